use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use wms_api::{
    app_router,
    config::{init_tracing, load_config},
    db::{run_migrations, DbConfig},
    events::start_event_processor,
    handlers, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(config.log_level(), config.log_json);

    info!(
        environment = %config.environment,
        "starting warehouse operations API"
    );

    let db_config = DbConfig::from_app_config(&config);
    let db = Arc::new(
        wms_api::db::establish_connection_with_config(&db_config)
            .await
            .context("failed to connect to database")?,
    );

    if config.auto_migrate {
        run_migrations(&db).await.context("migration failed")?;
        info!("database migrations applied");
    }

    let event_sender = start_event_processor(config.event_channel_capacity);
    handlers::health::init_start_time();

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(db, config, event_sender);
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
