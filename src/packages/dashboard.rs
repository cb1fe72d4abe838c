use serde::Serialize;

use crate::{
    db::{self, Table},
    error::Result,
    logic::{tournament::Tournament, types::Db},
};

#[derive(Serialize)]
pub struct DashboardPackage {
    pub clubs: i64,
    pub players: i64,
    pub tournaments: i64,
    pub games: i64,
    pub recent: Vec<Tournament>,
}

impl DashboardPackage {
    pub async fn build(db: &Db) -> Result<Self> {
        let mut recent = Tournament::fetch_all(db).await?;
        recent.truncate(5);

        Ok(Self {
            clubs: db::count(db, Table::Club).await?,
            players: db::count(db, Table::Player).await?,
            tournaments: db::count(db, Table::Tournament).await?,
            games: db::count(db, Table::Game).await?,
            recent,
        })
    }
}
