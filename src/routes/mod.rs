// HTTP surface: the public mirror, the JSON API and the admin area.
pub mod admin;
mod api;
mod public;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::logic::app_data::AppData;

pub fn router(data: AppData) -> Router {
    Router::new()
        .merge(public::router())
        .nest("/api", api::router())
        .nest("/admin", admin::router(data.clone()))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(data)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use tower::ServiceExt;

    use super::*;
    use time::macros::date;

    use crate::{
        configuration::Configuration,
        db,
        logic::{club::Club, game::{Game, GameInput}, person::Player, tournament::Tournament, types::Db},
    };

    async fn app(admin_token: Option<&str>) -> (Router, Db) {
        let db = db::setup_in_memory().await.unwrap();
        let config = Configuration { admin_token: admin_token.map(str::to_string), ..Configuration::new() };
        (router(AppData::build(db.clone(), config)), db)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder().method(Method::DELETE).uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn health_says_ok() {
        let (app, _) = app(None).await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn missing_things_are_404() {
        let (app, _) = app(None).await;
        for uri in ["/clubs/9", "/players/9", "/tournaments/9", "/api/tournaments/9/leaderboard"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    fn with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder().uri(uri).header(header::COOKIE, cookie).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn admin_gate_needs_a_session_cookie() {
        let (app, _) = app(Some("open;sesame, please")).await;

        let response = app.clone().oneshot(get("/admin/clubs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");

        let response = app.clone().oneshot(post_form("/admin/login", "token=wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.clone().oneshot(post_form("/admin/login", "token=open%3Bsesame%2C+please")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("clubhouse_admin="));
        assert!(!set_cookie.contains("sesame"));

        // Send back exactly the pair the server set.
        let session = set_cookie.split(';').next().unwrap();
        let response = app.clone().oneshot(with_cookie("/admin/clubs", session)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The token itself is not a session.
        let response = app.clone().oneshot(with_cookie("/admin/clubs", "clubhouse_admin=open;sesame, please")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // The public mirror stays open.
        assert_eq!(app.oneshot(get("/clubs")).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn club_forms_redirect_or_show_errors() {
        let (app, db) = app(None).await;

        let response = app.clone().oneshot(post_form("/admin/clubs", "name=North+End&city=Leeds&description=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let club = &Club::fetch_all(&db).await.unwrap()[0];
        assert_eq!(location(&response), format!("/clubs/{}", club.id));

        let response = app.clone().oneshot(post_form("/admin/clubs", "name=north+end")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let page = body_text(response).await;
        assert!(page.contains("A club named north end already exists."));
        assert!(page.contains("value=\"north end\""));

        let page = body_text(app.clone().oneshot(get(&format!("/clubs/{}", club.id))).await.unwrap()).await;
        assert!(page.contains("Based in Leeds."));

        let request = Request::builder().method(Method::DELETE).uri(format!("/admin/clubs/{}", club.id)).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(Club::fetch_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn uploaded_games_show_on_the_boards() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;
        let ada = db::fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        let alan = db::fixtures::player(&db, club.id, "Alan", "Turing").await;
        let tournament = db::fixtures::tournament(&db, club.id).await;

        for player in [&ada, &alan] {
            let uri = format!("/admin/tournaments/{}/participants", tournament.id);
            let response = app.clone().oneshot(post_form(&uri, &format!("player_id={}", player.id))).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }

        let uri = format!("/admin/tournaments/{}/upload", tournament.id);
        let csv = "csv=date%2Chome%2Caway%2Chome_goals%2Caway_goals%0A2025-03-02%2CAda+Lovelace%2CAlan+Turing%2C2%2C0%0A";
        let response = app.clone().oneshot(post_form(&uri, csv)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Imported 1 game(s)."));

        let page = body_text(app.clone().oneshot(get(&format!("/tournaments/{}", tournament.id))).await.unwrap()).await;
        assert!(page.contains("1st"));
        assert!(page.contains("2 – 0"));

        let json = body_text(app.clone().oneshot(get(&format!("/api/tournaments/{}/leaderboard", tournament.id))).await.unwrap()).await;
        let board: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(board["players"][0]["name"], "Ada Lovelace");
        assert_eq!(board["players"][0]["points"], 3);
        assert_eq!(board["clubs"][0]["name"], "North");

        // Ada has a game now, so she stays in.
        let uri = format!("/admin/tournaments/{}/participants/{}/delete", tournament.id, ada.id);
        let response = app.oneshot(post_form(&uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn bad_uploads_import_nothing() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;
        let tournament = db::fixtures::tournament(&db, club.id).await;

        let uri = format!("/admin/tournaments/{}/upload", tournament.id);
        let response = app.oneshot(post_form(&uri, "csv=date%2Chome%0A")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let page = body_text(response).await;
        assert!(page.contains("missing column"));
        assert!(tournament.games(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn players_are_deleted_by_either_route() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;
        let ada = db::fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        let alan = db::fixtures::player(&db, club.id, "Alan", "Turing").await;

        let response = app.clone().oneshot(delete(&format!("/admin/players/{}", ada.id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/admin/players?club_id={}", club.id));

        let response = app.clone().oneshot(post_form(&format!("/admin/players/{}/delete", alan.id), "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(Player::fetch_all(&db).await.unwrap().is_empty());

        let response = app.oneshot(delete(&format!("/admin/players/{}", alan.id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn games_are_deleted_by_either_route() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;
        let ada = db::fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        let alan = db::fixtures::player(&db, club.id, "Alan", "Turing").await;
        let tournament = db::fixtures::tournament(&db, club.id).await;
        tournament.add_participant(&db, ada.id).await.unwrap();
        tournament.add_participant(&db, alan.id).await.unwrap();
        let first = Game::record(&db, &tournament, GameInput::build(date!(2025-03-02), ada.id, alan.id, 1, 0)).await.unwrap();
        let second = Game::record(&db, &tournament, GameInput::build(date!(2025-03-03), alan.id, ada.id, 2, 2)).await.unwrap();

        let response = app.clone().oneshot(delete(&format!("/admin/games/{}", first.id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/admin/tournaments/{}", tournament.id));

        let response = app.oneshot(post_form(&format!("/admin/games/{}/delete", second.id), "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(tournament.games(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tournaments_are_deleted_by_either_route() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;
        let first = db::fixtures::tournament(&db, club.id).await;
        let second = db::fixtures::tournament(&db, club.id).await;

        let response = app.clone().oneshot(delete(&format!("/admin/tournaments/{}", first.id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/tournaments");

        let response = app.oneshot(post_form(&format!("/admin/tournaments/{}/delete", second.id), "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(Tournament::fetch_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_points_re_render_the_forms() {
        let (app, db) = app(None).await;
        let club = db::fixtures::club(&db, "North").await;

        let body = format!(
            "club_id={}&name=Cup&start_date=2025-03-01&points_for_win=9223372036854775807&rank_criteria=points",
            club.id
        );
        let response = app.clone().oneshot(post_form("/admin/tournaments", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Points for a win (9223372036854775807) must be between"));
        assert!(Tournament::fetch_all(&db).await.unwrap().is_empty());

        let ada = db::fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        let alan = db::fixtures::player(&db, club.id, "Alan", "Turing").await;
        let tournament = db::fixtures::tournament(&db, club.id).await;
        tournament.add_participant(&db, ada.id).await.unwrap();
        tournament.add_participant(&db, alan.id).await.unwrap();

        let body = format!(
            "played_on=2025-03-02&home_id={}&away_id={}&home_goals=1&away_goals=0&away_adjustment=-9223372036854775808",
            ada.id, alan.id
        );
        let response = app.oneshot(post_form(&format!("/admin/tournaments/{}/games", tournament.id), &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Away adjustment (-9223372036854775808) must be between"));
        assert!(tournament.games(&db).await.unwrap().is_empty());
    }
}
