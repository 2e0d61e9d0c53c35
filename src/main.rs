use county_portal::{
    bot::{self, BotData},
    config::{self, database},
    core::stores::ContentStores,
    errors::{Error, Result},
    storage::{Backend, DatabaseStorage, UnavailableStorage},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Connects to the database and prepares the schema. Any failure leaves the
/// portal running on in-memory content only.
async fn open_backend() -> Backend {
    let connected = async {
        let db = database::create_connection().await?;
        database::create_tables(&db).await?;
        Ok::<_, Error>(db)
    }
    .await;

    match connected {
        Ok(db) => {
            info!("Database initialized successfully.");
            Backend::Database(DatabaseStorage::new(db))
        }
        Err(e) => {
            warn!("Durable storage unavailable, content changes will not survive a restart: {e}");
            Backend::Unavailable(UnavailableStorage)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_config()
        .inspect(|c| info!("Configuration loaded for {}", c.site.name))
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Open storage and the content stores
    let backend = open_backend().await;
    info!("Using {} storage backend", backend.name());
    let stores = ContentStores::open(backend, &app_config.storage).await;

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(stores, app_config)).await
}
