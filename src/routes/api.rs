// Read-only JSON.
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::Result,
    logic::{app_data::AppData, types::TournamentId},
    packages::{club_screen::ClubRowPackage, tournament_screen::LeaderboardPackage},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/clubs", get(clubs))
        .route("/leaderboard", get(leaderboard))
        .route("/tournaments/:id/leaderboard", get(tournament_leaderboard))
}

async fn clubs(State(data): State<AppData>) -> Result<Json<Vec<ClubRowPackage>>> {
    Ok(Json(ClubRowPackage::fetch_all(&data.db).await?))
}

async fn leaderboard(State(data): State<AppData>) -> Result<Json<LeaderboardPackage>> {
    Ok(Json(LeaderboardPackage::overall(&data.db).await?))
}

async fn tournament_leaderboard(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Json<LeaderboardPackage>> {
    Ok(Json(LeaderboardPackage::build(&data.db, id).await?))
}
