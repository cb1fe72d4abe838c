pub mod game;

use serde::Serialize;

use crate::{
    error::Result,
    logic::{
        club::Club,
        person::Player,
        tournament::{Tournament, leaderboard::Standing},
        types::{Db, TournamentId},
    },
    packages::tournament_screen::game::GamePackage,
};

#[derive(Serialize)]
pub struct TournamentPackage {
    pub tournament: Tournament,
    pub host: Club,
    pub participants: Vec<Player>,
    pub players: Vec<Standing>,
    pub clubs: Vec<Standing>,
    pub games: Vec<GamePackage>,
}

impl TournamentPackage {
    pub async fn build(db: &Db, id: TournamentId) -> Result<Self> {
        let tournament = Tournament::fetch_from_db(db, id).await?;
        return Ok(Self {
            host: tournament.host(db).await?,
            participants: tournament.participants(db).await?,
            players: Standing::tournament_board(db, &tournament).await?,
            clubs: Standing::club_board(db, &tournament).await?,
            games: GamePackage::fetch_by_tournament(db, id).await?,
            tournament,
        });
    }
}

// Just the standings, for the JSON API.
#[derive(Serialize)]
pub struct LeaderboardPackage {
    pub tournament_id: Option<TournamentId>,
    pub name: String,
    pub players: Vec<Standing>,
    pub clubs: Vec<Standing>,
}

impl LeaderboardPackage {
    pub async fn build(db: &Db, id: TournamentId) -> Result<Self> {
        let tournament = Tournament::fetch_from_db(db, id).await?;
        Ok(Self {
            tournament_id: Some(id),
            players: Standing::tournament_board(db, &tournament).await?,
            clubs: Standing::club_board(db, &tournament).await?,
            name: tournament.name,
        })
    }

    // Every tournament together. No club table here.
    pub async fn overall(db: &Db) -> Result<Self> {
        Ok(Self {
            tournament_id: None,
            name: "All tournaments".to_string(),
            players: Standing::overall_board(db).await?,
            clubs: Vec::new(),
        })
    }
}
