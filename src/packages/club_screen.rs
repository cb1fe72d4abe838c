use serde::Serialize;
use sqlx::FromRow;

use crate::{
    error::Result,
    logic::{club::Club, person::Player, tournament::Tournament, types::{ClubId, Db}},
};

// A line in the club list.
#[derive(Debug)]
#[derive(FromRow, Serialize)]
pub struct ClubRowPackage {
    #[sqlx(flatten)]
    pub club: Club,
    pub member_count: i64,
    pub tournament_count: i64,
}

impl ClubRowPackage {
    pub async fn fetch_all(db: &Db) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT Club.*,
            (SELECT COUNT(*) FROM Player WHERE club_id = Club.id) AS member_count,
            (SELECT COUNT(*) FROM Tournament WHERE club_id = Club.id) AS tournament_count
            FROM Club
            ORDER BY club_name COLLATE NOCASE ASC"
        ).fetch_all(db).await?)
    }
}

#[derive(Serialize)]
pub struct ClubPackage {
    pub club: Club,
    pub players: Vec<Player>,
    pub tournaments: Vec<Tournament>,
}

impl ClubPackage {
    pub async fn build(db: &Db, id: ClubId) -> Result<Self> {
        let club = Club::fetch_from_db(db, id).await?;
        Ok(Self {
            players: club.players(db).await?,
            tournaments: club.tournaments(db).await?,
            club,
        })
    }
}
