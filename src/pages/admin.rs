// The admin area: lists, forms and the tournament control page.
use maud::{Markup, html};

use crate::{
    logic::{
        club::Club,
        game::Walkover,
        person::{Player, role::Role},
        tournament::{Tournament, leaderboard::ranking::RankCriteria},
        types::{ClubId, GameId},
    },
    packages::{club_screen::ClubRowPackage, dashboard::DashboardPackage, tournament_screen::TournamentPackage},
    pages::{Area, delete_button, error_list, games_table, layout, public::tournament_summary, standings_table},
    routes::admin::forms::{ClubForm, GameForm, PlayerForm, TournamentForm, UploadForm},
};

fn club_select(clubs: &[Club], selected: ClubId) -> Markup {
    html! {
        select name="club_id" required {
            @for club in clubs {
                option value=(club.id) selected[club.id == selected] { (club.name) }
            }
        }
    }
}

fn player_select(name: &str, players: &[Player], selected: i64) -> Markup {
    html! {
        select name=(name) required {
            @for player in players {
                option value=(player.id) selected[player.id == selected] { (player.full_name()) }
            }
        }
    }
}

fn text_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        label { (label) br; input type="text" name=(name) value=(value); }
    }
}

pub fn login(failed: bool) -> Markup {
    layout("Admin login", Area::Public, html! {
        @if failed {
            (error_list(&["That token is not right.".to_string()]))
        }
        form method="post" action="/admin/login" {
            label { "Admin token" br; input type="password" name="token" autofocus; }
            button type="submit" { "Log in" }
        }
    })
}

pub fn dashboard(package: &DashboardPackage) -> Markup {
    layout("Admin", Area::Admin, html! {
        ul {
            li { a href="/admin/clubs" { (package.clubs) " clubs" } }
            li { a href="/admin/players" { (package.players) " players" } }
            li { a href="/admin/tournaments" { (package.tournaments) " tournaments" } }
            li { (package.games) " games" }
        }
        h2 { "Latest tournaments" }
        ul {
            @for tournament in &package.recent {
                li { a href={ "/admin/tournaments/" (tournament.id) } { (tournament.name) } }
            }
        }
        form method="post" action="/admin/logout" { button type="submit" { "Log out" } }
    })
}

pub fn club_list(clubs: &[ClubRowPackage]) -> Markup {
    layout("Clubs", Area::Admin, html! {
        p { a href="/admin/clubs/new" { "New club" } }
        table {
            thead {
                tr {
                    th { "Club" }
                    th class="num" { "Players" }
                    th class="num" { "Tournaments" }
                    th {}
                }
            }
            tbody {
                @for row in clubs {
                    tr {
                        td { a href={ "/admin/clubs/" (row.club.id) "/edit" } { (row.club.name) } }
                        td class="num" { a href={ "/admin/players?club_id=" (row.club.id) } { (row.member_count) } }
                        td class="num" { (row.tournament_count) }
                        td { (delete_button(&format!("/admin/clubs/{}/delete", row.club.id), "Delete")) }
                    }
                }
            }
        }
    })
}

pub fn club_form(title: &str, action: &str, form: &ClubForm, errors: &[String]) -> Markup {
    layout(title, Area::Admin, html! {
        (error_list(errors))
        form method="post" action=(action) {
            (text_field("Name", "name", &form.name))
            (text_field("City", "city", &form.city))
            label { "Description" br; textarea name="description" rows="4" cols="60" { (form.description) } }
            button type="submit" { "Save" }
        }
    })
}

pub fn player_list(players: &[Player], clubs: &[Club], club_id: Option<ClubId>) -> Markup {
    let club_name = |id: ClubId| clubs.iter().find(|c| c.id == id).map(|c| c.name.as_str()).unwrap_or_default();
    layout("Players", Area::Admin, html! {
        form method="get" action="/admin/players" {
            select name="club_id" onchange="this.form.submit()" {
                option value="" { "All clubs" }
                @for club in clubs {
                    option value=(club.id) selected[Some(club.id) == club_id] { (club.name) }
                }
            }
            noscript { button type="submit" { "Filter" } }
        }
        p { a href="/admin/players/new" { "New player" } }
        table {
            thead { tr { th { "Name" } th { "Club" } th { "Roles" } th {} } }
            tbody {
                @for player in players {
                    tr {
                        td { a href={ "/admin/players/" (player.id) "/edit" } { (player.full_name()) } }
                        td { (club_name(player.club_id)) }
                        td { (player.roles_label()) }
                        td { (delete_button(&format!("/admin/players/{}/delete", player.id), "Delete")) }
                    }
                }
            }
        }
    })
}

pub fn player_form(title: &str, action: &str, form: &PlayerForm, clubs: &[Club], errors: &[String]) -> Markup {
    layout(title, Area::Admin, html! {
        (error_list(errors))
        @if clubs.is_empty() {
            p { "Create a club first: " a href="/admin/clubs/new" { "new club" } }
        } @else {
            form method="post" action=(action) {
                label { "Club" br; (club_select(clubs, form.club_id)) }
                (text_field("Forename", "forename", &form.forename))
                (text_field("Surname", "surname", &form.surname))
                (text_field("Email", "email", &form.email))
                fieldset {
                    legend { "Roles" }
                    @for role in Role::ALL {
                        label {
                            input type="checkbox" name=(role.field_name()) checked[form.has_role(role)];
                            " " (role.label())
                        }
                    }
                }
                button type="submit" { "Save" }
            }
        }
    })
}

pub fn tournament_list(tournaments: &[Tournament]) -> Markup {
    layout("Tournaments", Area::Admin, html! {
        p { a href="/admin/tournaments/new" { "New tournament" } }
        table {
            thead { tr { th { "Tournament" } th { "Dates" } th {} } }
            tbody {
                @for tournament in tournaments {
                    tr {
                        td { a href={ "/admin/tournaments/" (tournament.id) } { (tournament.name) } }
                        td { (tournament.date_range_label()) }
                        td { (delete_button(&format!("/admin/tournaments/{}/delete", tournament.id), "Delete")) }
                    }
                }
            }
        }
    })
}

pub fn tournament_form(title: &str, action: &str, form: &TournamentForm, clubs: &[Club], errors: &[String]) -> Markup {
    let keys = RankCriteria::ALL.iter().map(|c| format!("{} ({})", c.key(), c.label())).collect::<Vec<_>>().join(", ");
    layout(title, Area::Admin, html! {
        (error_list(errors))
        @if clubs.is_empty() {
            p { "Create a club first: " a href="/admin/clubs/new" { "new club" } }
        } @else {
            form method="post" action=(action) {
                label { "Host club" br; (club_select(clubs, form.club_id)) }
                (text_field("Name", "name", &form.name))
                label { "Start date" br; input type="date" name="start_date" value=(form.start_date) required; }
                label { "End date (optional)" br; input type="date" name="end_date" value=(form.end_date); }
                fieldset {
                    legend { "Point system" }
                    (text_field("Points for a win", "points_for_win", &form.points_for_win))
                    (text_field("Points for a draw", "points_for_draw", &form.points_for_draw))
                    (text_field("Points for a loss", "points_for_loss", &form.points_for_loss))
                    (text_field("Points per goal scored", "points_per_goal_scored", &form.points_per_goal_scored))
                    (text_field("Points per goal conceded", "points_per_goal_conceded", &form.points_per_goal_conceded))
                    (text_field("Goals awarded for a walkover", "walkover_goals", &form.walkover_goals))
                }
                (text_field("Ranking criteria, in order", "rank_criteria", &form.rank_criteria))
                p { small { "Available: " (keys) } }
                button type="submit" { "Save" }
            }
        }
    })
}

// Everything about one tournament: standings, participants and games.
pub fn tournament_admin(package: &TournamentPackage, others: &[Player], errors: &[String]) -> Markup {
    let id = package.tournament.id;
    layout(&package.tournament.name, Area::Admin, html! {
        (error_list(errors))
        (tournament_summary(package))
        p {
            a href={ "/admin/tournaments/" (id) "/edit" } { "Edit" } " · "
            a href={ "/admin/tournaments/" (id) "/games/new" } { "Record a game" } " · "
            a href={ "/admin/tournaments/" (id) "/upload" } { "Upload games" } " · "
            a href={ "/tournaments/" (id) } { "Public page" }
        }
        h2 { "Standings" }
        (standings_table(&package.players, true))
        h2 { "Participants" }
        ul {
            @for player in &package.participants {
                li {
                    (player.full_name()) " "
                    (delete_button(&format!("/admin/tournaments/{id}/participants/{}/delete", player.id), "Remove"))
                }
            }
        }
        @if !others.is_empty() {
            form method="post" action={ "/admin/tournaments/" (id) "/participants" } {
                (player_select("player_id", others, 0))
                button type="submit" { "Add participant" }
            }
        }
        h2 { "Games" }
        (games_table(&package.games, Area::Admin))
    })
}

pub fn game_form(title: &str, action: &str, form: &GameForm, tournament: &Tournament, participants: &[Player],
errors: &[String], game_id: Option<GameId>) -> Markup {
    layout(title, Area::Admin, html! {
        p { a href={ "/admin/tournaments/" (tournament.id) } { "Back to " (tournament.name) } }
        (error_list(errors))
        @if participants.len() < 2 {
            p { "A game needs two participants. Add players to the tournament first." }
        } @else {
            form method="post" action=(action) {
                label { "Date" br; input type="date" name="played_on" value=(form.played_on) required; }
                label { "Home" br; (player_select("home_id", participants, form.home_id)) }
                (text_field("Home goals", "home_goals", &form.home_goals))
                label { "Away" br; (player_select("away_id", participants, form.away_id)) }
                (text_field("Away goals", "away_goals", &form.away_goals))
                label {
                    "Walkover" br;
                    select name="walkover" {
                        @for walkover in [Walkover::None, Walkover::Home, Walkover::Away, Walkover::Both] {
                            option value=(walkover.key()) selected[walkover.key() == form.walkover.trim()] {
                                @if walkover.is_walkover() { (walkover.label()) } @else { "No walkover" }
                            }
                        }
                    }
                }
                (text_field("Home adjustment (points)", "home_adjustment", &form.home_adjustment))
                (text_field("Away adjustment (points)", "away_adjustment", &form.away_adjustment))
                button type="submit" { "Save" }
            }
            @if let Some(game_id) = game_id {
                (delete_button(&format!("/admin/games/{game_id}/delete"), "Delete game"))
            }
        }
    })
}

pub fn upload_form(tournament: &Tournament, form: &UploadForm, errors: &[String], imported: Option<usize>) -> Markup {
    layout(&format!("Upload games to {}", tournament.name), Area::Admin, html! {
        p { a href={ "/admin/tournaments/" (tournament.id) } { "Back to " (tournament.name) } }
        @if let Some(count) = imported {
            div class="notice" { "Imported " (count) " game(s)." }
        }
        (error_list(errors))
        p {
            "Paste CSV with a header row. Columns: "
            code { "date, home, away, home_goals, away_goals" }
            ", optionally "
            code { "walkover, home_adjustment, away_adjustment" } "."
        }
        p {
            "Players are named by id or full name. A goal cell of " code { "w/o" }
            " marks that side as forfeiting. Nothing is imported if any line has a problem."
        }
        form method="post" action={ "/admin/tournaments/" (tournament.id) "/upload" } {
            textarea name="csv" rows="16" cols="80" { (form.csv) }
            br;
            button type="submit" { "Import" }
        }
    })
}
