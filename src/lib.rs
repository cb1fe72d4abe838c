pub mod configuration;
pub mod db;
pub mod error;
pub mod logger;
pub mod logic;
pub mod packages;
pub mod pages;
pub mod routes;

use std::time::Instant;

use tokio::net::TcpListener;

use crate::{configuration::Configuration, error::Result, logic::app_data::AppData};

// Open the database and serve until the process is stopped.
pub async fn run(config: Configuration) -> Result<()> {
    let db = db::setup(&config.database_url).await?;

    let now = Instant::now();
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("listening on http://{address} (bound in {:.2?})", now.elapsed());

    if !config.is_admin_gated() {
        tracing::warn!("CLUBHOUSE_ADMIN_TOKEN is not set, the admin area is open to everyone");
    }

    let app = routes::router(AppData::build(db, config));
    axum::serve(listener, app).await?;
    Ok(())
}
