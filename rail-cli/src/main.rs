use std::sync::Arc;

use rail_booking::BookingLedger;
use rail_catalog::{FareCalculator, TrainCatalog};
use rail_cli::{Config, Session, SessionOutcome};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Logs go to stderr so the prompts on stdout stay readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.filter.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        route = %config.route.name,
        capacity = config.inventory.initial_capacity,
        "Starting booking session"
    );

    let ledger = Arc::new(BookingLedger::new(
        config.inventory.initial_capacity,
        FareCalculator::new(config.fares.clone()),
    ));
    let session = Session::new(
        ledger.clone(),
        TrainCatalog::default(),
        config.travel_window,
        config.route.name.clone(),
    );

    let stdin = BufReader::new(tokio::io::stdin());
    match session.run(stdin, tokio::io::stdout()).await? {
        SessionOutcome::Booked(receipts) => {
            tracing::info!(
                bookings = receipts.len(),
                remaining = ledger.available_seats()?,
                utilization = ledger.utilization()?,
                "Session complete"
            );
        }
        SessionOutcome::Aborted(reason) => {
            tracing::info!(%reason, "Session ended without booking");
        }
        SessionOutcome::Failed { receipts, error } => {
            tracing::info!(
                bookings = receipts.len(),
                %error,
                "Session ended with a failed booking"
            );
        }
    }

    Ok(())
}
