// How a tournament turns results into points.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::logic::{game::Outcome, types::{Goals, Points}};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[derive(FromRow)]
#[derive(Serialize, Deserialize)]
pub struct PointSystem {
    pub points_for_win: Points,
    pub points_for_draw: Points,
    pub points_for_loss: Points,
    pub points_per_goal_scored: Points,
    // Usually zero or negative.
    pub points_per_goal_conceded: Points,
}

impl Default for PointSystem {
    fn default() -> Self {
        Self::build(3, 1, 0, 0, 0)
    }
}

impl PointSystem {
    // Largest magnitude allowed for any point value or adjustment.
    // With goals capped by their type, every row and every board total stays far inside `Points`.
    pub const LIMIT: Points = 1_000_000;

    pub fn build(points_for_win: Points, points_for_draw: Points, points_for_loss: Points,
    points_per_goal_scored: Points, points_per_goal_conceded: Points) -> Self {
        Self {
            points_for_win,
            points_for_draw,
            points_for_loss,
            points_per_goal_scored,
            points_per_goal_conceded,
        }
    }

    // Whether a point value or adjustment is small enough to use.
    pub fn in_range(value: Points) -> bool {
        value.unsigned_abs() <= Self::LIMIT.unsigned_abs()
    }

    pub fn validate(&self) -> Vec<String> {
        [
            ("Points for a win", self.points_for_win),
            ("Points for a draw", self.points_for_draw),
            ("Points for a loss", self.points_for_loss),
            ("Points per goal scored", self.points_per_goal_scored),
            ("Points per goal conceded", self.points_per_goal_conceded),
        ]
        .into_iter()
        .filter(|(_, value)| !Self::in_range(*value))
        .map(|(label, value)| format!("{label} ({value}) must be between -{0} and {0}.", Self::LIMIT))
        .collect()
    }

    // Points for the outcome alone.
    pub fn outcome_points(&self, outcome: Outcome) -> Points {
        match outcome {
            Outcome::Win => self.points_for_win,
            Outcome::Draw => self.points_for_draw,
            Outcome::Loss => self.points_for_loss,
        }
    }

    // Points a single player earns from a single game.
    pub fn points(&self, outcome: Outcome, goals_scored: Goals, goals_conceded: Goals, conditional_points: Points) -> Points {
        self.outcome_points(outcome) +
        Points::from(goals_scored) * self.points_per_goal_scored +
        Points::from(goals_conceded) * self.points_per_goal_conceded +
        conditional_points
    }

    // Short human readable summary, e.g. "W3 D1 L0 +1/goal".
    pub fn summary(&self) -> String {
        let mut s = format!("W{} D{} L{}", self.points_for_win, self.points_for_draw, self.points_for_loss);
        if self.points_per_goal_scored != 0 {
            s += &format!(" {:+}/goal scored", self.points_per_goal_scored);
        }
        if self.points_per_goal_conceded != 0 {
            s += &format!(" {:+}/goal conceded", self.points_per_goal_conceded);
        }
        s
    }
}
