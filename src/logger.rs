use std::{fs::File, sync::Mutex};

use time::macros::format_description;
use tracing_subscriber::{fmt::time::OffsetTime, EnvFilter};

use crate::{configuration::Configuration, error::Result};

// Install the global tracing subscriber. Call once, before anything logs.
pub fn init_logger(config: &Configuration) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer);

    let installed = match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        },
        None => builder.try_init(),
    };

    if installed.is_err() {
        // A subscriber is already set, e.g. by a test harness.
        tracing::debug!("tracing subscriber already installed");
    }

    for warning in Configuration::warnings() {
        tracing::warn!("{warning}");
    }

    Ok(())
}
