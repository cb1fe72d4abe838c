// A game is a recorded 1v1 result between two tournament participants.
pub mod result;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use crate::logic::{
    time::{date_to_string, iso_date_format},
    tournament::{Tournament, point_system::PointSystem},
    types::{GameId, Goals, PlayerId, Points, TournamentId},
};

// Outcome from one player's point of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(sqlx::Type)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Draw => "DRAW",
            Outcome::Loss => "LOSS",
        }
    }

    // The same game seen from the other side.
    pub fn reverse(&self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

// Who forfeited the game, if anyone.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[derive(sqlx::Type)]
pub enum Walkover {
    #[default] None,
    Home,
    Away,
    Both,
}

impl Walkover {
    pub fn build(home_forfeits: bool, away_forfeits: bool) -> Self {
        match (home_forfeits, away_forfeits) {
            (false, false) => Walkover::None,
            (true, false) => Walkover::Home,
            (false, true) => Walkover::Away,
            (true, true) => Walkover::Both,
        }
    }

    pub fn home_forfeits(&self) -> bool {
        matches!(self, Walkover::Home | Walkover::Both)
    }

    pub fn away_forfeits(&self) -> bool {
        matches!(self, Walkover::Away | Walkover::Both)
    }

    pub fn is_walkover(&self) -> bool {
        *self != Walkover::None
    }

    // Identifier used in forms and uploads.
    pub fn key(&self) -> &'static str {
        match self {
            Walkover::None => "",
            Walkover::Home => "home",
            Walkover::Away => "away",
            Walkover::Both => "both",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "no" => Some(Walkover::None),
            "home" => Some(Walkover::Home),
            "away" => Some(Walkover::Away),
            "both" => Some(Walkover::Both),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Walkover::None => "",
            Walkover::Home => "W/O (home forfeited)",
            Walkover::Away => "W/O (away forfeited)",
            Walkover::Both => "W/O (both forfeited)",
        }
    }
}

// What a user enters for a game, by hand or through an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInput {
    pub played_on: Date,
    pub home_id: PlayerId,
    pub away_id: PlayerId,
    pub home_goals: Goals,
    pub away_goals: Goals,
    pub walkover: Walkover,
    pub home_adjustment: Points,
    pub away_adjustment: Points,
}

impl GameInput {
    pub fn build(played_on: Date, home_id: PlayerId, away_id: PlayerId, home_goals: Goals, away_goals: Goals) -> Self {
        Self {
            played_on,
            home_id,
            away_id,
            home_goals,
            away_goals,
            walkover: Walkover::None,
            home_adjustment: 0,
            away_adjustment: 0,
        }
    }

    // Replace entered goals with the score a walkover stands for.
    // Goals entered alongside a walkover are ignored.
    pub fn resolve(mut self, walkover_goals: Goals) -> Self {
        match self.walkover {
            Walkover::None => (),
            Walkover::Home => {
                self.home_goals = 0;
                self.away_goals = walkover_goals;
            },
            Walkover::Away => {
                self.home_goals = walkover_goals;
                self.away_goals = 0;
            },
            Walkover::Both => {
                self.home_goals = 0;
                self.away_goals = 0;
            },
        }
        self
    }

    // Outcome for the home player. The away outcome is the reverse.
    pub fn home_outcome(&self) -> Outcome {
        match self.walkover {
            Walkover::Home | Walkover::Both => Outcome::Loss,
            Walkover::Away => Outcome::Win,
            Walkover::None => match self.home_goals.cmp(&self.away_goals) {
                std::cmp::Ordering::Greater => Outcome::Win,
                std::cmp::Ordering::Equal => Outcome::Draw,
                std::cmp::Ordering::Less => Outcome::Loss,
            },
        }
    }

    // Outcome for the away player. Not simply the reverse: both lose a double forfeit.
    pub fn away_outcome(&self) -> Outcome {
        match self.walkover {
            Walkover::Both => Outcome::Loss,
            _ => self.home_outcome().reverse(),
        }
    }

    // Every problem with the game in the context of its tournament.
    pub fn validate(&self, tournament: &Tournament, participants: &[PlayerId]) -> Vec<String> {
        let mut errors = Vec::new();
        if self.home_id == self.away_id {
            errors.push("A player cannot play against themselves.".to_string());
        }
        for (side, id) in [("Home", self.home_id), ("Away", self.away_id)] {
            if !participants.contains(&id) {
                errors.push(format!("{side} player (id {id}) is not a participant of {}.", tournament.name));
            }
        }
        if !tournament.contains_date(self.played_on) {
            errors.push(format!(
                "{} is outside the tournament dates ({}).",
                date_to_string(self.played_on), tournament.date_range_label()
            ));
        }
        for (side, adjustment) in [("Home", self.home_adjustment), ("Away", self.away_adjustment)] {
            if !PointSystem::in_range(adjustment) {
                errors.push(format!(
                    "{side} adjustment ({adjustment}) must be between -{0} and {0}.", PointSystem::LIMIT
                ));
            }
        }
        errors
    }
}

#[derive(Debug, Clone)]
#[derive(FromRow, Serialize)]
pub struct Game {
    pub id: GameId,
    pub tournament_id: TournamentId,
    #[serde(with = "iso_date_format")]
    pub played_on: Date,
    pub home_id: PlayerId,
    pub away_id: PlayerId,
    pub home_goals: Goals,
    pub away_goals: Goals,
    pub walkover: Walkover,
    pub home_adjustment: Points,
    pub away_adjustment: Points,
}

impl Game {
    // The input that would recreate this game, e.g. for an edit form.
    pub fn input(&self) -> GameInput {
        GameInput {
            played_on: self.played_on,
            home_id: self.home_id,
            away_id: self.away_id,
            home_goals: self.home_goals,
            away_goals: self.away_goals,
            walkover: self.walkover,
            home_adjustment: self.home_adjustment,
            away_adjustment: self.away_adjustment,
        }
    }
}
