// Functions and methods for ranking standings.
use std::{cmp::Ordering, collections::HashMap};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::logic::tournament::leaderboard::Standing;

// What ranking criteria a tournament has, in priority order.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[derive(Eq, Hash, PartialEq)]
pub enum RankCriteria {
    Points,
    GoalDifference,
    GoalsScored,
    GoalsConceded,  // Lower is better.
    Wins,
    Draws,
    Losses,         // Lower is better.
    Played,         // Lower is better.
}

type CmpFunc = fn (&Standing, &Standing) -> Ordering;

// Compare functions here.

fn compare_points(a: &Standing, b: &Standing) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_goal_difference(a: &Standing, b: &Standing) -> Ordering {
    b.goal_difference().cmp(&a.goal_difference())
}

fn compare_goals_scored(a: &Standing, b: &Standing) -> Ordering {
    b.goals_scored.cmp(&a.goals_scored)
}

fn compare_goals_conceded(a: &Standing, b: &Standing) -> Ordering {
    a.goals_conceded.cmp(&b.goals_conceded)
}

fn compare_wins(a: &Standing, b: &Standing) -> Ordering {
    b.wins.cmp(&a.wins)
}

fn compare_draws(a: &Standing, b: &Standing) -> Ordering {
    b.draws.cmp(&a.draws)
}

fn compare_losses(a: &Standing, b: &Standing) -> Ordering {
    a.losses.cmp(&b.losses)
}

fn compare_played(a: &Standing, b: &Standing) -> Ordering {
    a.played.cmp(&b.played)
}

lazy_static! {
    static ref SORT_FUNCTIONS: HashMap<RankCriteria, CmpFunc> = {
        let mut functions: HashMap<RankCriteria, CmpFunc> = HashMap::new();
        functions.insert(RankCriteria::Points, compare_points);
        functions.insert(RankCriteria::GoalDifference, compare_goal_difference);
        functions.insert(RankCriteria::GoalsScored, compare_goals_scored);
        functions.insert(RankCriteria::GoalsConceded, compare_goals_conceded);
        functions.insert(RankCriteria::Wins, compare_wins);
        functions.insert(RankCriteria::Draws, compare_draws);
        functions.insert(RankCriteria::Losses, compare_losses);
        functions.insert(RankCriteria::Played, compare_played);
        functions
    };
}

impl RankCriteria {
    pub const ALL: [RankCriteria; 8] = [
        RankCriteria::Points,
        RankCriteria::GoalDifference,
        RankCriteria::GoalsScored,
        RankCriteria::GoalsConceded,
        RankCriteria::Wins,
        RankCriteria::Draws,
        RankCriteria::Losses,
        RankCriteria::Played,
    ];

    pub fn defaults() -> Vec<Self> {
        vec![
            RankCriteria::Points,
            RankCriteria::GoalDifference,
            RankCriteria::GoalsScored,
            RankCriteria::Wins,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankCriteria::Points => "Points",
            RankCriteria::GoalDifference => "Goal difference",
            RankCriteria::GoalsScored => "Goals scored",
            RankCriteria::GoalsConceded => "Fewest goals conceded",
            RankCriteria::Wins => "Wins",
            RankCriteria::Draws => "Draws",
            RankCriteria::Losses => "Fewest losses",
            RankCriteria::Played => "Fewest games played",
        }
    }

    // Identifier used in forms.
    pub fn key(&self) -> &'static str {
        match self {
            RankCriteria::Points => "points",
            RankCriteria::GoalDifference => "goal_difference",
            RankCriteria::GoalsScored => "goals_scored",
            RankCriteria::GoalsConceded => "goals_conceded",
            RankCriteria::Wins => "wins",
            RankCriteria::Draws => "draws",
            RankCriteria::Losses => "losses",
            RankCriteria::Played => "played",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key.trim())
    }

    // Parse a comma separated list of keys. Unknown keys are reported, duplicates dropped.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, String> {
        let mut criteria = Vec::new();
        for key in list.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            let criterium = Self::from_key(key).ok_or_else(|| format!("\"{key}\" is not a ranking criterion."))?;
            if !criteria.contains(&criterium) {
                criteria.push(criterium);
            }
        }
        Ok(criteria)
    }

    // The inverse of parse_list.
    pub fn list_to_keys(criteria: &[Self]) -> String {
        criteria.iter().map(Self::key).collect::<Vec<_>>().join(",")
    }
}

// Compare two standings by the given criteria only.
pub fn compare_by_criteria(a: &Standing, b: &Standing, criteria: &[RankCriteria]) -> Ordering {
    let mut order = Ordering::Equal;
    for criterium in criteria.iter() {
        order = SORT_FUNCTIONS[criterium](a, b);
        if order.is_ne() { break; }
    }
    order
}

// Sort the standings in the order of betterhood and assign ranks.
// Standings tied on every criterion share a rank and are listed by name.
pub fn rank_standings(standings: &mut [Standing], criteria: &[RankCriteria]) {
    standings.sort_by(|a, b| {
        compare_by_criteria(a, b, criteria)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });

    for i in 0..standings.len() {
        let rank = match i {
            0 => 1,
            _ if compare_by_criteria(&standings[i - 1], &standings[i], criteria).is_eq() => standings[i - 1].rank,
            _ => i as u32 + 1,
        };
        standings[i].rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(id: i64, name: &str, points: i64, scored: i64, conceded: i64, wins: i64) -> Standing {
        Standing {
            id,
            name: name.to_string(),
            points,
            goals_scored: scored,
            goals_conceded: conceded,
            wins,
            played: 3,
            ..Default::default()
        }
    }

    #[test]
    fn points_first_then_goal_difference() {
        let mut rows = vec![
            standing(1, "Ann", 4, 3, 3, 1),
            standing(2, "Bob", 6, 2, 2, 2),
            standing(3, "Cid", 4, 5, 1, 1),
        ];
        rank_standings(&mut rows, &RankCriteria::defaults());
        let order: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn full_ties_share_a_rank_and_sort_by_name() {
        let mut rows = vec![
            standing(1, "zed", 3, 1, 0, 1),
            standing(2, "Amy", 3, 1, 0, 1),
            standing(3, "Kim", 9, 1, 0, 3),
            standing(4, "Lou", 0, 0, 1, 0),
        ];
        rank_standings(&mut rows, &RankCriteria::defaults());
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Kim", "Amy", "zed", "Lou"]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 2, 4]);
    }

    #[test]
    fn lower_is_better_criteria() {
        let mut rows = vec![
            standing(1, "Ann", 3, 2, 4, 1),
            standing(2, "Bob", 3, 2, 1, 1),
        ];
        rank_standings(&mut rows, &[RankCriteria::GoalsConceded]);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn parse_list_rejects_unknown_and_drops_duplicates() {
        assert_eq!(
            RankCriteria::parse_list("points, wins,points").unwrap(),
            vec![RankCriteria::Points, RankCriteria::Wins]
        );
        assert!(RankCriteria::parse_list("points,luck").unwrap_err().contains("luck"));
        assert_eq!(RankCriteria::list_to_keys(&RankCriteria::defaults()), "points,goal_difference,goals_scored,wins");
    }
}
