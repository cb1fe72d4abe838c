// The admin area. Everything but the login page sits behind the token gate.
mod club;
pub mod forms;
mod game;
mod player;
mod tournament;
mod upload;

use axum::{
    Form, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use maud::Markup;

use crate::{
    configuration::Configuration,
    error::{AppError, Result},
    logic::app_data::AppData,
    packages::dashboard::DashboardPackage,
    pages,
    routes::admin::forms::LoginForm,
};

pub const SESSION_COOKIE: &str = "clubhouse_admin";
// What the encrypted session cookie holds. The token itself never leaves the server.
const SESSION_MARKER: &str = "admin";

pub fn router(data: AppData) -> Router<AppData> {
    Router::new()
        .route("/", get(dashboard))
        .route("/logout", post(logout))
        .merge(club::router())
        .merge(player::router())
        .merge(tournament::router())
        .merge(game::router())
        .merge(upload::router())
        .route_layer(middleware::from_fn_with_state(data, require_admin))
        .route("/login", get(login_page).post(login))
}

fn session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, SESSION_MARKER))
        .path("/admin")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

fn is_admin(config: &Configuration, jar: &PrivateCookieJar) -> bool {
    match &config.admin_token {
        None => true,
        Some(_) => jar.get(SESSION_COOKIE).is_some_and(|cookie| cookie.value() == SESSION_MARKER),
    }
}

async fn require_admin(State(data): State<AppData>, jar: PrivateCookieJar, request: Request, next: Next) -> Response {
    match is_admin(&data.config, &jar) {
        true => next.run(request).await,
        false => AppError::Unauthorized.into_response(),
    }
}

async fn login_page(State(data): State<AppData>) -> Response {
    match data.config.is_admin_gated() {
        true => pages::admin::login(false).into_response(),
        false => Redirect::to("/admin").into_response(),
    }
}

async fn login(State(data): State<AppData>, jar: PrivateCookieJar, Form(form): Form<LoginForm>) -> Response {
    let Some(token) = &data.config.admin_token else {
        return Redirect::to("/admin").into_response();
    };

    if form.token.trim() != token {
        tracing::warn!("failed admin login");
        return (StatusCode::UNAUTHORIZED, pages::admin::login(true)).into_response();
    }

    tracing::info!("admin logged in");
    (jar.add(session_cookie()), Redirect::to("/admin")).into_response()
}

async fn logout(jar: PrivateCookieJar) -> Response {
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/admin")), Redirect::to("/")).into_response()
}

async fn dashboard(State(data): State<AppData>) -> Result<Markup> {
    let package = DashboardPackage::build(&data.db).await?;
    Ok(pages::admin::dashboard(&package))
}

// The form again, with what was wrong with it.
fn rejected(page: Markup) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
}

fn see_other(uri: String) -> Response {
    Redirect::to(&uri).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum_extra::extract::cookie::Key;

    use super::*;

    #[test]
    fn gate_is_open_without_a_token() {
        let key = Key::generate();
        let mut config = Configuration::new();
        assert!(is_admin(&config, &PrivateCookieJar::new(key.clone())));

        config.admin_token = Some("s3cret".to_string());
        assert!(!is_admin(&config, &PrivateCookieJar::new(key.clone())));
        assert!(is_admin(&config, &PrivateCookieJar::new(key.clone()).add(session_cookie())));

        // The marker written by hand, unencrypted, is not a session.
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("clubhouse_admin=admin"));
        assert!(!is_admin(&config, &PrivateCookieJar::from_headers(&headers, key)));
    }

    #[test]
    fn session_cookie_is_scoped_to_the_admin_area() {
        let cookie = session_cookie();
        assert_eq!(cookie.path(), Some("/admin"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }
}
