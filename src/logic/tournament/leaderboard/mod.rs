// Aggregated results per player or per club.
pub mod ranking;

use std::collections::BTreeMap;

use ordinal::ToOrdinal as _;
use serde::Serialize;
use sqlx::FromRow;

use crate::logic::types::{ClubId, Points};

#[derive(Debug, Clone, Default, PartialEq)]
#[derive(FromRow, Serialize)]
pub struct Standing {
    pub id: i64,    // Player or club, depending on the board.
    pub name: String,
    pub club_id: Option<ClubId>,
    pub club_name: Option<String>,
    pub played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_scored: i64,
    pub goals_conceded: i64,
    pub conditional_points: Points,
    pub points: Points,
    #[sqlx(skip)]
    pub rank: u32,
}

impl Standing {
    pub fn goal_difference(&self) -> i64 {
        self.goals_scored - self.goals_conceded
    }

    // E.g. "1st", "22nd".
    pub fn rank_label(&self) -> String {
        self.rank.to_ordinal_string()
    }

    // Add another standing's numbers to this one.
    fn absorb(&mut self, other: &Standing) {
        self.played += other.played;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.goals_scored += other.goals_scored;
        self.goals_conceded += other.goals_conceded;
        self.conditional_points += other.conditional_points;
        self.points += other.points;
    }

    // Sum player standings per club. Players without a club are left out.
    pub fn sum_by_club(players: &[Standing]) -> Vec<Standing> {
        let mut clubs: BTreeMap<ClubId, Standing> = BTreeMap::new();
        for player in players {
            let Some(club_id) = player.club_id else { continue };
            let club = clubs.entry(club_id).or_insert_with(|| Standing {
                id: club_id,
                name: player.club_name.clone().unwrap_or_default(),
                ..Default::default()
            });
            club.absorb(player);
        }

        clubs.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_label_is_ordinal() {
        let s = Standing { rank: 22, ..Default::default() };
        assert_eq!(s.rank_label(), "22nd");
    }

    #[test]
    fn clubs_sum_their_players() {
        let a = Standing { id: 1, club_id: Some(7), club_name: Some("North".into()), played: 2, wins: 1, losses: 1, goals_scored: 3, goals_conceded: 2, points: 3, ..Default::default() };
        let b = Standing { id: 2, club_id: Some(7), club_name: Some("North".into()), played: 1, draws: 1, goals_scored: 1, goals_conceded: 1, conditional_points: -1, points: 0, ..Default::default() };
        let c = Standing { id: 3, club_id: Some(9), club_name: Some("South".into()), played: 1, wins: 1, points: 3, ..Default::default() };

        let clubs = Standing::sum_by_club(&[a, b, c]);
        assert_eq!(clubs.len(), 2);
        let north = &clubs[0];
        assert_eq!((north.id, north.name.as_str()), (7, "North"));
        assert_eq!((north.played, north.wins, north.draws, north.losses), (3, 1, 1, 1));
        assert_eq!(north.goal_difference(), 1);
        assert_eq!((north.conditional_points, north.points), (-1, 3));
        assert_eq!(clubs[1].points, 3);
    }
}
