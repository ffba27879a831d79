use pos_actions::{setup_tracing, total_amount, ClientConfig, EventSink, PosSystem};
use tracing::{debug, error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env is fine; the process environment is used as is
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    let (events, mut receiver) = EventSink::channel();
    let system = PosSystem::with_events(&config, events).map_err(|e| e.to_string())?;

    let listener = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            debug!(event_type = %event.event_type(), request_id = event.request_id, "Lifecycle event");
        }
    });

    let span = tracing::info_span!("customers");
    async {
        match system.customer_client.get_all_customers().await {
            Ok(customers) => info!(customer_count = customers.len(), "Fetched customers"),
            Err(e) => error!(error = %e, "Could not fetch customers"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("refunds");
    async {
        match system.refund_client.get_all_refunds().await {
            Ok(refunds) => info!(
                refund_count = refunds.len(),
                total_amount = total_amount(&refunds.items()),
                "Fetched refunds"
            ),
            Err(e) => error!(error = %e, "Could not fetch refunds"),
        }
    }
    .instrument(span)
    .await;

    // Dropping the clients closes the event channel
    drop(system);
    listener.await.map_err(|e| format!("Event listener failed: {e}"))?;

    info!("Done");
    Ok(())
}
