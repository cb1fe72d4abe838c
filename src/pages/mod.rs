// HTML rendering. Every function returns finished markup for one page or one part of a page.
pub mod admin;
pub mod public;

use maud::{DOCTYPE, Markup, html};

use crate::{
    logic::tournament::leaderboard::Standing,
    packages::tournament_screen::game::GamePackage,
};

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 60rem; padding: 0 1rem; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }
th, td { border-bottom: 1px solid #ddd; padding: 0.3rem 0.5rem; text-align: left; }
td.num, th.num { text-align: right; }
.errors { background: #fde8e8; border: 1px solid #e0a0a0; padding: 0.5rem 1rem; }
.notice { background: #e8f4fd; border: 1px solid #a0c4e0; padding: 0.5rem 1rem; }
form.inline { display: inline; }
label { display: block; margin: 0.4rem 0; }
";

// Which navigation bar to show.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Area {
    Public,
    Admin,
}

pub fn layout(title: &str, area: Area, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Clubhouse" }
                style { (STYLE) }
            }
            body {
                nav {
                    @match area {
                        Area::Public => {
                            a href="/" { "Clubhouse" }
                            a href="/clubs" { "Clubs" }
                            a href="/tournaments" { "Tournaments" }
                            a href="/leaderboard" { "Leaderboard" }
                        },
                        Area::Admin => {
                            a href="/admin" { "Dashboard" }
                            a href="/admin/clubs" { "Clubs" }
                            a href="/admin/players" { "Players" }
                            a href="/admin/tournaments" { "Tournaments" }
                            a href="/" { "Public site" }
                        },
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

pub fn error_page(title: &str, messages: &[String]) -> Markup {
    layout(title, Area::Public, html! {
        (error_list(messages))
        p { a href="javascript:history.back()" { "Go back" } }
    })
}

// Validation messages above a form. Nothing when there are none.
pub fn error_list(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            div class="errors" {
                ul {
                    @for message in messages {
                        li { (message) }
                    }
                }
            }
        }
    }
}

// A ranked table. Player boards link to players and show their club.
pub fn standings_table(standings: &[Standing], players: bool) -> Markup {
    html! {
        @if standings.is_empty() {
            p { "No results yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Rank" }
                        th { @if players { "Player" } @else { "Club" } }
                        @if players { th { "Club" } }
                        th class="num" { "P" }
                        th class="num" { "W" }
                        th class="num" { "D" }
                        th class="num" { "L" }
                        th class="num" { "GF" }
                        th class="num" { "GA" }
                        th class="num" { "GD" }
                        th class="num" { "Adj" }
                        th class="num" { "Pts" }
                    }
                }
                tbody {
                    @for row in standings {
                        tr {
                            td { (row.rank_label()) }
                            @if players {
                                td { a href={ "/players/" (row.id) } { (row.name) } }
                                td {
                                    @if let Some(club_id) = row.club_id {
                                        a href={ "/clubs/" (club_id) } { (row.club_name.as_deref().unwrap_or_default()) }
                                    }
                                }
                            } @else {
                                td { a href={ "/clubs/" (row.id) } { (row.name) } }
                            }
                            td class="num" { (row.played) }
                            td class="num" { (row.wins) }
                            td class="num" { (row.draws) }
                            td class="num" { (row.losses) }
                            td class="num" { (row.goals_scored) }
                            td class="num" { (row.goals_conceded) }
                            td class="num" { (row.goal_difference()) }
                            td class="num" { (row.conditional_points) }
                            td class="num" { strong { (row.points) } }
                        }
                    }
                }
            }
        }
    }
}

// Game list. The admin version gets edit and delete controls.
pub fn games_table(games: &[GamePackage], area: Area) -> Markup {
    html! {
        @if games.is_empty() {
            p { "No games played yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Date" }
                        th { "Tournament" }
                        th { "Home" }
                        th { "Score" }
                        th { "Away" }
                        th class="num" { "Points" }
                        @if area == Area::Admin { th {} }
                    }
                }
                tbody {
                    @for game in games {
                        tr {
                            td { (crate::logic::time::date_to_string(game.played_on)) }
                            td { a href={ "/tournaments/" (game.tournament_id) } { (game.tournament_name) } }
                            td { a href={ "/players/" (game.home.id) } { (game.home.name) } }
                            td { (game.score_label()) }
                            td { a href={ "/players/" (game.away.id) } { (game.away.name) } }
                            td class="num" { (game.home.points) " / " (game.away.points) }
                            @if area == Area::Admin {
                                td {
                                    a href={ "/admin/games/" (game.id) "/edit" } { "Edit" } " "
                                    (delete_button(&format!("/admin/games/{}/delete", game.id), "Delete"))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// A one-button form posting to a delete route.
pub fn delete_button(action: &str, label: &str) -> Markup {
    html! {
        form class="inline" method="post" action=(action) onsubmit="return confirm('Are you sure?')" {
            button type="submit" { (label) }
        }
    }
}
