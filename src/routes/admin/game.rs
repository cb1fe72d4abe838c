use axum::{
    Form, Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post},
};
use maud::Markup;

use crate::{
    error::{AppError, Result},
    logic::{app_data::AppData, game::Game, time::{date_to_string, today}, tournament::Tournament, types::{Db, GameId, TournamentId}},
    pages,
    routes::admin::{forms::GameForm, rejected, see_other},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/tournaments/:id/games", post(create))
        .route("/tournaments/:id/games/new", get(new))
        .route("/games/:id", post(update).delete(delete))
        .route("/games/:id/edit", get(edit))
        .route("/games/:id/delete", post(delete))
}

async fn form_page(db: &Db, tournament: &Tournament, form: &GameForm, errors: &[String], game_id: Option<GameId>) -> Result<Markup> {
    let participants = tournament.participants(db).await?;
    let (title, action) = match game_id {
        Some(id) => (format!("Edit game in {}", tournament.name), format!("/admin/games/{id}")),
        None => (format!("New game in {}", tournament.name), format!("/admin/tournaments/{}/games", tournament.id)),
    };
    Ok(pages::admin::game_form(&title, &action, form, tournament, &participants, errors, game_id))
}

async fn new(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Markup> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    // Today, kept inside the tournament dates.
    let mut played_on = today().max(tournament.start_date);
    if let Some(end) = tournament.end_date {
        played_on = played_on.min(end);
    }

    let form = GameForm { played_on: date_to_string(played_on), ..Default::default() };
    form_page(&data.db, &tournament, &form, &[], None).await
}

async fn create(State(data): State<AppData>, Path(id): Path<TournamentId>, Form(form): Form<GameForm>) -> Result<Response> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    let result = match form.input() {
        Ok(input) => Game::record(&data.db, &tournament, input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(see_other(format!("/admin/tournaments/{id}"))),
        Err(AppError::Validation(errors)) => Ok(rejected(form_page(&data.db, &tournament, &form, &errors, None).await?)),
        Err(e) => Err(e),
    }
}

async fn edit(State(data): State<AppData>, Path(id): Path<GameId>) -> Result<Markup> {
    let game = Game::fetch_from_db(&data.db, id).await?;
    let tournament = Tournament::fetch_from_db(&data.db, game.tournament_id).await?;
    form_page(&data.db, &tournament, &GameForm::from_game(&game), &[], Some(id)).await
}

async fn update(State(data): State<AppData>, Path(id): Path<GameId>, Form(form): Form<GameForm>) -> Result<Response> {
    let game = Game::fetch_from_db(&data.db, id).await?;
    let result = match form.input() {
        Ok(input) => Game::update(&data.db, id, input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(see_other(format!("/admin/tournaments/{}", game.tournament_id))),
        Err(AppError::Validation(errors)) => {
            let tournament = Tournament::fetch_from_db(&data.db, game.tournament_id).await?;
            Ok(rejected(form_page(&data.db, &tournament, &form, &errors, Some(id)).await?))
        },
        Err(e) => Err(e),
    }
}

async fn delete(State(data): State<AppData>, Path(id): Path<GameId>) -> Result<Response> {
    let game = Game::fetch_from_db(&data.db, id).await?;
    Game::delete(&data.db, id).await?;
    Ok(see_other(format!("/admin/tournaments/{}", game.tournament_id)))
}
