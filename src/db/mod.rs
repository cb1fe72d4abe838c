// The database. Each submodule adds query methods to a type from `logic`.
mod club;
mod game;
mod leaderboard;
mod person;
mod tournament;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{error::Result, logic::types::Db};

// Open (and create if needed) the database at the given URL and bring the schema up to date.
pub async fn setup(url: &str) -> Result<Db> {
    let now = std::time::Instant::now();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let db = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!("sql/migrations").run(&db).await?;

    tracing::info!("database ready in {:.2?}", now.elapsed());
    return Ok(db);
}

// A private in-memory database. Every connection would get its own, so the pool holds exactly one.
pub async fn setup_in_memory() -> Result<Db> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options).await?;

    sqlx::migrate!("sql/migrations").run(&db).await?;
    return Ok(db);
}

// Counts for the admin dashboard.
pub async fn count(db: &Db, table: Table) -> Result<i64> {
    let query = format!("SELECT COUNT(*) FROM {}", table.name());
    Ok(sqlx::query_scalar(&query).fetch_one(db).await?)
}

#[derive(Debug, Copy, Clone)]
pub enum Table {
    Club,
    Player,
    Tournament,
    Game,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Table::Club => "Club",
            Table::Player => "Player",
            Table::Tournament => "Tournament",
            Table::Game => "Game",
        }
    }
}
