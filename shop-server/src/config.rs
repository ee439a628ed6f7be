//! Server configuration

/// Configuration for the shop back office
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the redb database file
    pub data_dir: String,
    pub log_level: String,
    /// When set, logs also go to a daily-rolling file in this directory
    pub log_dir: Option<String>,
    /// Stock threshold for restock alerts
    pub low_stock_threshold: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/saree-shop".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }

    pub fn db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("shop.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
