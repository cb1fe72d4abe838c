use axum::{
    Form, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use maud::Markup;

use crate::{
    error::{AppError, Result},
    logic::{app_data::AppData, game::Game, tournament::Tournament, types::TournamentId},
    pages,
    routes::admin::{forms::UploadForm, rejected},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/tournaments/:id/upload", get(show).post(import))
}

async fn show(State(data): State<AppData>, Path(id): Path<TournamentId>) -> Result<Markup> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    Ok(pages::admin::upload_form(&tournament, &UploadForm::default(), &[], None))
}

// On success the form comes back empty with the count, so another batch can follow.
async fn import(State(data): State<AppData>, Path(id): Path<TournamentId>, Form(form): Form<UploadForm>) -> Result<Response> {
    let tournament = Tournament::fetch_from_db(&data.db, id).await?;
    match Game::import_upload(&data.db, &tournament, &form.csv).await {
        Ok(count) => Ok(pages::admin::upload_form(&tournament, &UploadForm::default(), &[], Some(count)).into_response()),
        Err(AppError::Validation(errors)) => {
            tracing::debug!(tournament_id = id, errors = errors.len(), "upload rejected");
            Ok(rejected(pages::admin::upload_form(&tournament, &form, &errors, None)))
        },
        Err(e) => Err(e),
    }
}
