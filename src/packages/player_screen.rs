use serde::Serialize;

use crate::{
    error::Result,
    logic::{club::Club, person::Player, tournament::Tournament, types::{Db, PlayerId}},
    packages::tournament_screen::game::GamePackage,
};

#[derive(Serialize)]
pub struct PlayerPackage {
    pub player: Player,
    pub club: Club,
    pub tournaments: Vec<Tournament>,
    pub games: Vec<GamePackage>,
}

impl PlayerPackage {
    pub async fn build(db: &Db, id: PlayerId) -> Result<Self> {
        let player = Player::fetch_from_db(db, id).await?;
        Ok(Self {
            club: player.club(db).await?,
            tournaments: player.tournaments(db).await?,
            games: GamePackage::fetch_by_player(db, id).await?,
            player,
        })
    }
}
