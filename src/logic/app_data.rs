use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{configuration::Configuration, logic::types::Db};

// Shared by every request handler.
#[derive(Clone)]
pub struct AppData {
    pub db: Db,
    pub config: Configuration,
    // Encrypts the admin session cookie. A new key per process, so a restart logs everyone out.
    pub cookie_key: Key,
}

impl AppData {
    // Build the thing.
    pub fn build(db: Db, config: Configuration) -> Self {
        Self {
            db,
            config,
            cookie_key: Key::generate(),
        }
    }
}

impl FromRef<AppData> for Key {
    fn from_ref(data: &AppData) -> Self {
        data.cookie_key.clone()
    }
}
