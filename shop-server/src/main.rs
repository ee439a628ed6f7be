use shop_server::{AppState, Config, init_logging};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    tracing::info!("saree shop back office starting...");

    let state = AppState::open(&config)?;

    // Morning snapshot for the shop floor
    let customers = state.customers.list_customers()?;
    let active = state.catalog.list_active()?;
    let restock = state.catalog.low_stock(config.low_stock_threshold)?;
    let pending = state.reports.pending_installment_orders()?;
    let outstanding = state.reports.total_outstanding_amount()?;
    let today = state.reports.todays_orders()?;

    tracing::info!(
        customers = customers.len(),
        active_sarees = active.len(),
        todays_orders = today.len(),
        "shop ledger ready"
    );
    tracing::info!(
        open_installment_orders = pending.len(),
        total_outstanding = %outstanding,
        "collections summary"
    );
    for saree in &restock {
        tracing::warn!(
            saree_id = saree.id,
            title = %saree.title,
            stock = saree.stock_quantity,
            "stock below restock threshold"
        );
    }

    Ok(())
}
