use axum::{
    Form, Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post},
};
use maud::Markup;

use crate::{
    error::{AppError, Result},
    logic::{app_data::AppData, club::Club, person::Player, tournament::Tournament, types::{Db, PlayerId, TournamentId}},
    packages::tournament_screen::TournamentPackage,
    pages,
    routes::admin::{forms::{ParticipantForm, TournamentForm}, rejected, see_other},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/tournaments", get(list).post(create))
        .route("/tournaments/new", get(new))
        .route("/tournaments/:id", get(show).post(update).delete(delete))
        .route("/tournaments/:id/edit", get(edit))
        .route("/tournaments/:id/delete", post(delete))
        .route("/tournaments/:id/participants", post(add_participant))
        .route("/tournaments/:id/participants/:player_id", axum::routing::delete(remove_participant))
        .route("/tournaments/:id/participants/:player_id/delete", post(remove_participant))
}

async fn list(State(data): State<AppData>) -> Result<Markup> {
    let tournaments = Tournament::fetch_all(&data.db).await?;
    Ok(pages::admin::tournament_list(&tournaments))
}

async fn new(State(data): State<AppData>) -> Result<Markup> {
    let clubs = Club::fetch_all(&data.db).await?;
    Ok(pages::admin::tournament_form("New tournament", "/admin/tournaments", &TournamentForm::default(), &clubs, &[]))
}

async fn create(State(data): State<AppData>, Form(form): Form<TournamentForm>) -> Result<Response> {
    let result = match form.input() {
        Ok(input) => Tournament::create(&data.db, &input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(tournament) => Ok(see_other(format!("/admin/tournaments/{}", tournament.id))),
        Err(AppError::Validation(errors)) => {
            let clubs = Club::fetch_all(&data.db).await?;
            Ok(rejected(pages::admin::tournament_form("New tournament", "/admin/tournaments", &form, &clubs, &errors)))
        },
        Err(e) => Err(e),
    }
}

// Players of any club who are not in the tournament yet.
async fn page(db: &Db, id: TournamentId, errors: &[String]) -> Result<Markup> {
    let package = TournamentPackage::build(db, id).await?;
    let others: Vec<Player> = Player::fetch_all(db).await?
        .into_iter()
        .filter(|player| !package.participants.iter().any(|p| p.id == player.id))
        .collect();

    Ok(pages::admin::tournament_admin(&package, &others, errors))
}

async fn show(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Markup> {
    page(&data.db, id, &[]).await
}

async fn edit(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Markup> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    let clubs = Club::fetch_all(&data.db).await?;
    let title = format!("Edit {}", tournament.name);
    let form = TournamentForm::from_tournament(&tournament);
    Ok(pages::admin::tournament_form(&title, &format!("/admin/tournaments/{id}"), &form, &clubs, &[]))
}

async fn update(State(data): State<AppData>, Path(id): Path<TournamentId>, Form(form): Form<TournamentForm>) -> Result<Response> {
    let result = match form.input() {
        Ok(input) => Tournament::update(&data.db, id, &input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(see_other(format!("/admin/tournaments/{id}"))),
        Err(AppError::Validation(errors)) => {
            let clubs = Club::fetch_all(&data.db).await?;
            let page = pages::admin::tournament_form("Edit tournament", &format!("/admin/tournaments/{id}"), &form, &clubs, &errors);
            Ok(rejected(page))
        },
        Err(e) => Err(e),
    }
}

async fn delete(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Response> {
    Tournament::delete(&data.db, id).await?;
    Ok(see_other("/admin/tournaments".to_string()))
}

async fn add_participant(State(data): State<AppData>, Path(id): Path<TournamentId>, Form(form): Form<ParticipantForm>) -> Result<Response> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    tournament.add_participant(&data.db, form.player_id).await?;
    Ok(see_other(format!("/admin/tournaments/{id}")))
}

async fn remove_participant(State(data): State<AppData>, Path((id, player_id)): Path<(TournamentId, PlayerId)>) -> Result<Response> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    match tournament.remove_participant(&data.db, player_id).await {
        Ok(()) => Ok(see_other(format!("/admin/tournaments/{id}"))),
        Err(AppError::Validation(errors)) => Ok(rejected(page(&data.db, id, &errors).await?)),
        Err(e) => Err(e),
    }
}
