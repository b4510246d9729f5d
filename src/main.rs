use dotenvy::dotenv;
use std::sync::Arc;
use trip_planner::{
    TripPlanner,
    config::{database, planner},
    dispatch::{TripPlanWorker, trip_request_queue},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the planner configuration
    let config = planner::load_default_config()
        .inspect_err(|e| error!("Failed to load planner configuration: {}", e))?;
    info!(?config, "Loaded planner configuration.");

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Start the trip plan worker
    let db = Arc::new(db);
    let (publisher, consumer) = trip_request_queue(config.planner.queue_capacity);
    let worker = TripPlanWorker::new(Arc::clone(&db), config.planner.insert_failure_policy)
        .spawn(consumer);

    // 6. Build the planner; a transport layer would hold on to it
    let trip_planner = TripPlanner::new(db, Some(publisher), config.planner);
    info!("Trip planner ready. Press Ctrl+C to stop.");

    // 7. Run until interrupted
    tokio::signal::ctrl_c().await?;
    info!("Shutting down.");

    let failed = trip_planner.wait_for_dispatches().await;
    if failed > 0 {
        error!(failed, "Trip requests were not delivered");
    }
    drop(trip_planner);

    let stats = worker.shutdown().await?;
    info!(?stats, "Trip plan worker finished.");
    Ok(())
}
