// View models, one per screen. Each is assembled from the database and is serialisable
// so the same data backs both the HTML pages and the JSON API.
pub mod club_screen;
pub mod dashboard;
pub mod player_screen;
pub mod tournament_screen;
