use axum::{
    Form, Router,
    extract::{Path, State},
    response::Response,
    routing::{get, post},
};
use maud::Markup;

use crate::{
    error::{AppError, Result},
    logic::{app_data::AppData, club::Club, time::today, types::ClubId},
    packages::club_screen::ClubRowPackage,
    pages,
    routes::admin::{forms::ClubForm, rejected, see_other},
};

pub fn router() -> Router<AppData> {
    Router::new()
        .route("/clubs", get(list).post(create))
        .route("/clubs/new", get(new))
        .route("/clubs/:id", post(update).delete(delete))
        .route("/clubs/:id/edit", get(edit))
        .route("/clubs/:id/delete", post(delete))
}

async fn list(State(data): State<AppData>) -> Result<Markup> {
    let clubs = ClubRowPackage::fetch_all(&data.db).await?;
    Ok(pages::admin::club_list(&clubs))
}

async fn new() -> Markup {
    pages::admin::club_form("New club", "/admin/clubs", &ClubForm::default(), &[])
}

async fn create(State(data): State<AppData>, Form(form): Form<ClubForm>) -> Result<Response> {
    match Club::create(&data.db, &form.input(), today()).await {
        Ok(club) => Ok(see_other(format!("/clubs/{}", club.id))),
        Err(AppError::Validation(errors)) => Ok(rejected(pages::admin::club_form("New club", "/admin/clubs", &form, &errors))),
        Err(e) => Err(e),
    }
}

async fn edit(State(data): State<AppData>, Path(id): Path<ClubId>) -> Result<Markup> {
    let club = Club::fetch_from_db(&data.db, id).await?;
    let title = format!("Edit {}", club.name);
    Ok(pages::admin::club_form(&title, &format!("/admin/clubs/{id}"), &ClubForm::from_club(&club), &[]))
}

async fn update(State(data): State<AppData>, Path(id): Path<ClubId>, Form(form): Form<ClubForm>) -> Result<Response> {
    match Club::update(&data.db, id, &form.input()).await {
        Ok(club) => Ok(see_other(format!("/clubs/{}", club.id))),
        Err(AppError::Validation(errors)) => {
            let page = pages::admin::club_form("Edit club", &format!("/admin/clubs/{id}"), &form, &errors);
            Ok(rejected(page))
        },
        Err(e) => Err(e),
    }
}

async fn delete(State(data): State<AppData>, Path(id): Path<ClubId>) -> Result<Response> {
    Club::delete(&data.db, id).await?;
    Ok(see_other("/admin/clubs".to_string()))
}
