use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    logic::{app_data::AppData, club::Club, person::Player, types::{ClubId, PlayerId}},
    pages,
    routes::admin::{forms::PlayerForm, rejected, see_other},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/players", get(list).post(create))
        .route("/players/new", get(new))
        .route("/players/:id", post(update).delete(delete))
        .route("/players/:id/edit", get(edit))
        .route("/players/:id/delete", post(delete))
}

// "All clubs" submits an empty value.
#[derive(Debug, Default)]
#[derive(Deserialize)]
struct ClubFilter {
    club_id: Option<String>,
}

impl ClubFilter {
    fn club_id(&self) -> Option<ClubId> {
        self.club_id.as_deref().and_then(|id| id.trim().parse().ok())
    }
}

async fn list(State(data): State<AppData>, Query(filter): Query<ClubFilter>) -> Result<Markup> {
    let club_id = filter.club_id();
    let players = match club_id {
        Some(id) => Player::fetch_by_club(&data.db, id).await?,
        None => Player::fetch_all(&data.db).await?,
    };
    let clubs = Club::fetch_all(&data.db).await?;
    Ok(pages::admin::player_list(&players, &clubs, club_id))
}

async fn new(State(data): State<AppData>, Query(filter): Query<ClubFilter>) -> Result<Markup> {
    let clubs = Club::fetch_all(&data.db).await?;
    let form = PlayerForm { club_id: filter.club_id().unwrap_or_default(), ..Default::default() };
    Ok(pages::admin::player_form("New player", "/admin/players", &form, &clubs, &[]))
}

async fn create(State(data): State<AppData>, Form(form): Form<PlayerForm>) -> Result<Response> {
    match Player::create(&data.db, &form.input()).await {
        Ok(player) => Ok(see_other(format!("/admin/players?club_id={}", player.club_id))),
        Err(AppError::Validation(errors)) => {
            let clubs = Club::fetch_all(&data.db).await?;
            Ok(rejected(pages::admin::player_form("New player", "/admin/players", &form, &clubs, &errors)))
        },
        Err(e) => Err(e),
    }
}

async fn edit(State(data): State<AppData>, Path(id): Path<PlayerId>) -> Result<Markup> {
    let player = Player::fetch_from_db(&data.db, id).await?;
    let clubs = Club::fetch_all(&data.db).await?;
    let title = format!("Edit {}", player.full_name());
    Ok(pages::admin::player_form(&title, &format!("/admin/players/{id}"), &PlayerForm::from_player(&player), &clubs, &[]))
}

async fn update(State(data): State<AppData>, Path(id): Path<PlayerId>, Form(form): Form<PlayerForm>) -> Result<Response> {
    match Player::update(&data.db, id, &form.input()).await {
        Ok(player) => Ok(see_other(format!("/players/{}", player.id))),
        Err(AppError::Validation(errors)) => {
            let clubs = Club::fetch_all(&data.db).await?;
            let page = pages::admin::player_form("Edit player", &format!("/admin/players/{id}"), &form, &clubs, &errors);
            Ok(rejected(page))
        },
        Err(e) => Err(e),
    }
}

async fn delete(State(data): State<AppData>, Path(id): Path<PlayerId>) -> Result<Response> {
    let player = Player::fetch_from_db(&data.db, id).await?;
    Player::delete(&data.db, id).await?;
    Ok(see_other(format!("/admin/players?club_id={}", player.club_id)))
}
