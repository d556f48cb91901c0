use cabinet_api::config::ApiConfig;
use cabinet_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging at the configured level
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        admin = %config.admin_name,
        upload_dir = %config.upload_dir.display(),
        slot_minutes = config.slot_duration_minutes,
        "Starting cabinet admin API"
    );

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;
    info!("Database schema ready");

    // Serve the admin API until shutdown
    if let Err(e) = cabinet_api::start_server(config, db_pool).await {
        error!("Cabinet admin API stopped with an error: {:?}", e);
        return Err(e);
    }

    info!("Cabinet admin API shut down");
    Ok(())
}
