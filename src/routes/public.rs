use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use maud::Markup;

use crate::{
    error::Result,
    logic::{app_data::AppData, tournament::Tournament, types::{ClubId, PlayerId, TournamentId}},
    packages::{
        club_screen::{ClubPackage, ClubRowPackage},
        player_screen::PlayerPackage,
        tournament_screen::{LeaderboardPackage, TournamentPackage},
    },
    pages,
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/", get(home))
        .route("/clubs", get(clubs))
        .route("/clubs/:id", get(club))
        .route("/players/:id", get(player))
        .route("/tournaments", get(tournaments))
        .route("/tournaments/:id", get(tournament))
        .route("/leaderboard", get(leaderboard))
}

async fn home(State(data): State<AppData>) -> Result<Markup> {
    let clubs = ClubRowPackage::fetch_all(&data.db).await?;
    let tournaments = Tournament::fetch_all(&data.db).await?;
    let overall = LeaderboardPackage::overall(&data.db).await?;
    Ok(pages::public::home(&clubs, &tournaments, &overall))
}

async fn clubs(State(data): State<AppData>) -> Result<Markup> {
    let clubs = ClubRowPackage::fetch_all(&data.db).await?;
    Ok(pages::public::club_list(&clubs))
}

async fn club(State(data): State<AppData>, Path(id): Path<ClubId>) -> Result<Markup> {
    let package = ClubPackage::build(&data.db, id).await?;
    Ok(pages::public::club_detail(&package))
}

async fn player(State(data): State<AppData>, Path(id): Path<PlayerId>) -> Result<Markup> {
    let package = PlayerPackage::build(&data.db, id).await?;
    Ok(pages::public::player_detail(&package))
}

async fn tournaments(State(data): State<AppData>) -> Result<Markup> {
    let tournaments = Tournament::fetch_all(&data.db).await?;
    Ok(pages::public::tournament_list(&tournaments))
}

async fn tournament(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Markup> {
    let package = TournamentPackage::build(&data.db, id).await?;
    Ok(pages::public::tournament_detail(&package))
}

async fn leaderboard(State(data): State<AppData>) -> Result<Markup> {
    let package = LeaderboardPackage::overall(&data.db).await?;
    Ok(pages::public::leaderboard(&package))
}
