// The read-only mirror.
use maud::{Markup, html};

use crate::{
    logic::{club::Club, time::date_to_string, tournament::Tournament, types::PlayerId},
    packages::{
        club_screen::{ClubPackage, ClubRowPackage},
        player_screen::PlayerPackage,
        tournament_screen::{LeaderboardPackage, TournamentPackage, game::GamePackage},
    },
    pages::{Area, games_table, layout, standings_table},
};

fn tournaments_list(tournaments: &[Tournament]) -> Markup {
    html! {
        @if tournaments.is_empty() {
            p { "No tournaments yet." }
        } @else {
            ul {
                @for tournament in tournaments {
                    li {
                        a href={ "/tournaments/" (tournament.id) } { (tournament.name) }
                        " (" (tournament.date_range_label()) ")"
                    }
                }
            }
        }
    }
}

pub fn home(clubs: &[ClubRowPackage], tournaments: &[Tournament], overall: &LeaderboardPackage) -> Markup {
    layout("Clubhouse", Area::Public, html! {
        p { (clubs.len()) " clubs, " (tournaments.len()) " tournaments." }
        h2 { "Recent tournaments" }
        (tournaments_list(&tournaments[..tournaments.len().min(5)]))
        h2 { "Top players" }
        (standings_table(&overall.players[..overall.players.len().min(10)], true))
        p { a href="/leaderboard" { "Full leaderboard" } }
    })
}

pub fn club_list(clubs: &[ClubRowPackage]) -> Markup {
    layout("Clubs", Area::Public, html! {
        @if clubs.is_empty() {
            p { "No clubs yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Club" }
                        th { "City" }
                        th class="num" { "Players" }
                        th class="num" { "Tournaments" }
                    }
                }
                tbody {
                    @for row in clubs {
                        tr {
                            td { a href={ "/clubs/" (row.club.id) } { (row.club.name) } }
                            td { (row.club.city_or_blank()) }
                            td class="num" { (row.member_count) }
                            td class="num" { (row.tournament_count) }
                        }
                    }
                }
            }
        }
    })
}

fn club_details(club: &Club) -> Markup {
    html! {
        @if let Some(city) = &club.city { p { "Based in " (city) "." } }
        @if let Some(description) = &club.description { p { (description) } }
        p { small { "Registered " (date_to_string(club.created_on)) } }
    }
}

pub fn club_detail(package: &ClubPackage) -> Markup {
    layout(&package.club.name, Area::Public, html! {
        (club_details(&package.club))
        h2 { "Players" }
        @if package.players.is_empty() {
            p { "No players yet." }
        } @else {
            table {
                thead { tr { th { "Name" } th { "Roles" } } }
                tbody {
                    @for player in &package.players {
                        tr {
                            td { a href={ "/players/" (player.id) } { (player.full_name()) } }
                            td { (player.roles_label()) }
                        }
                    }
                }
            }
        }
        h2 { "Tournaments hosted" }
        (tournaments_list(&package.tournaments))
    })
}

pub fn player_detail(package: &PlayerPackage) -> Markup {
    let player = &package.player;
    layout(&player.full_name(), Area::Public, html! {
        p {
            a href={ "/clubs/" (package.club.id) } { (package.club.name) }
            " · " (player.roles_label())
        }
        h2 { "Tournaments" }
        (tournaments_list(&package.tournaments))
        h2 { "Games" }
        (player_games_table(player.id, &package.games))
    })
}

// A player's games from their own side, with the outcome for them.
fn player_games_table(player_id: PlayerId, games: &[GamePackage]) -> Markup {
    html! {
        @if games.is_empty() {
            p { "No games played yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Date" }
                        th { "Tournament" }
                        th { "Opponent" }
                        th { "Score" }
                        th { "Result" }
                        th class="num" { "Points" }
                    }
                }
                tbody {
                    @for game in games {
                        @if let Some((own, opponent)) = game.sides_for(player_id) {
                            tr {
                                td { (date_to_string(game.played_on)) }
                                td { a href={ "/tournaments/" (game.tournament_id) } { (game.tournament_name) } }
                                td { a href={ "/players/" (opponent.id) } { (opponent.name) } }
                                td { (own.goals) " – " (opponent.goals) }
                                td { (own.outcome.map(|outcome| outcome.label()).unwrap_or("")) }
                                td class="num" { (own.points) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn tournament_list(tournaments: &[Tournament]) -> Markup {
    layout("Tournaments", Area::Public, tournaments_list(tournaments))
}

// Header lines shared by the public and admin tournament pages.
pub fn tournament_summary(package: &TournamentPackage) -> Markup {
    let tournament = &package.tournament;
    html! {
        p {
            "Hosted by " a href={ "/clubs/" (package.host.id) } { (package.host.name) }
            ", " (tournament.date_range_label()) "."
        }
        p { "Points: " (tournament.point_system.summary()) ". Walkovers count as " (tournament.walkover_goals) "–0." }
        p {
            "Ranked by: "
            (tournament.rank_criteria.iter().map(|c| c.label()).collect::<Vec<_>>().join(", "))
        }
    }
}

pub fn tournament_detail(package: &TournamentPackage) -> Markup {
    layout(&package.tournament.name, Area::Public, html! {
        (tournament_summary(package))
        h2 { "Players" }
        (standings_table(&package.players, true))
        h2 { "Clubs" }
        (standings_table(&package.clubs, false))
        h2 { "Games" }
        (games_table(&package.games, Area::Public))
    })
}

pub fn leaderboard(package: &LeaderboardPackage) -> Markup {
    layout("Leaderboard", Area::Public, html! {
        p { "Every player with a result, over " (package.name.to_lowercase()) "." }
        (standings_table(&package.players, true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::person::{Player, role::Role};

    #[test]
    fn club_detail_lists_players_with_roles() {
        let package = ClubPackage {
            club: Club { id: 1, name: "North".to_string(), city: Some("Leeds".to_string()), ..Default::default() },
            players: vec![Player { id: 7, forename: "Ada".to_string(), surname: "Lovelace".to_string(), roles: vec![Role::Captain], ..Default::default() }],
            tournaments: Vec::new(),
        };
        let page = club_detail(&package).into_string();
        assert!(page.contains("Based in Leeds."));
        assert!(page.contains("href=\"/players/7\""));
        assert!(page.contains("CAPTAIN"));
        assert!(page.contains("No tournaments yet."));
    }

    #[test]
    fn tournament_summary_names_host_and_points() {
        let tournament = Tournament { id: 3, name: "Cup".to_string(), walkover_goals: 5, ..Default::default() };
        let package = TournamentPackage {
            tournament,
            host: Club { id: 1, name: "North".to_string(), ..Default::default() },
            participants: Vec::new(),
            players: Vec::new(),
            clubs: Vec::new(),
            games: Vec::new(),
        };
        let page = tournament_detail(&package).into_string();
        assert!(page.contains("Hosted by <a href=\"/clubs/1\">North</a>"));
        assert!(page.contains("5–0"));
        assert!(page.contains("Points, Goal difference"));
    }

    #[test]
    fn player_page_shows_games_from_their_side() {
        use time::macros::date;

        use crate::{logic::game::{Outcome, Walkover}, packages::tournament_screen::game::SidePackage};

        let side = |id, name: &str, goals, outcome, points| SidePackage {
            id,
            name: name.to_string(),
            goals,
            outcome: Some(outcome),
            points,
        };
        let package = PlayerPackage {
            player: Player { id: 2, forename: "Alan".to_string(), surname: "Turing".to_string(), roles: vec![Role::Player], ..Default::default() },
            club: Club { id: 1, name: "North".to_string(), ..Default::default() },
            tournaments: Vec::new(),
            games: vec![GamePackage {
                id: 5,
                tournament_id: 3,
                tournament_name: "Cup".to_string(),
                played_on: date!(2025-03-02),
                walkover: Walkover::None,
                home: side(1, "Ada Lovelace", 1, Outcome::Loss, 0),
                away: side(2, "Alan Turing", 2, Outcome::Win, 3),
            }],
        };
        let page = player_detail(&package).into_string();
        assert!(page.contains("href=\"/players/1\">Ada Lovelace</a>"));
        assert!(page.contains("2 – 1"));
        assert!(page.contains("WIN"));
    }
}
