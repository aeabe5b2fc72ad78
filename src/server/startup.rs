use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::{fred::prelude::Pool, RedisStore};

use crate::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    service::import::{tracker::ImportTracker, ImportSettings},
    wtrl::{PollConfig, WtrlClient},
};

/// Build the WTRL client with the configured cookie and user agent
pub fn build_wtrl_client(config: &Config) -> Result<WtrlClient, Error> {
    let wtrl_client = WtrlClient::new(
        &config.wtrl_base_url,
        &config.wtrl_api_cookie,
        &config.user_agent,
        PollConfig::default(),
    )?;

    Ok(wtrl_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Database connected and migrations applied");

    Ok(db)
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<Pool>>, Error> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};
    use tower_sessions_redis_store::fred::prelude::{ClientLike, Config as RedisConfig};

    let redis_config = RedisConfig::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Secure cookies need HTTPS, which local development runs without
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Connect every backing service and assemble the shared handler state
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let wtrl_client = build_wtrl_client(config)?;
    let import_settings = ImportSettings::from_config(config)?;

    Ok(AppState {
        db,
        wtrl_client,
        imports: ImportTracker::new(),
        import_settings: Arc::new(import_settings),
    })
}
