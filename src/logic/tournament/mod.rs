// A tournament is hosted by a club and has its own point system and participants.
pub mod leaderboard;
pub mod point_system;

use serde::Serialize;
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use time::Date;

use crate::logic::{
    time::{date_to_string, is_within, iso_date_format, optional_iso_date_format},
    tournament::{leaderboard::ranking::RankCriteria, point_system::PointSystem},
    types::{ClubId, Goals, TournamentId},
};

#[derive(Debug, Clone)]
#[derive(Serialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub club_id: ClubId,    // Host club.
    pub name: String,
    #[serde(with = "iso_date_format")]
    pub start_date: Date,
    #[serde(with = "optional_iso_date_format")]
    pub end_date: Option<Date>,
    pub point_system: PointSystem,
    pub rank_criteria: Vec<RankCriteria>,
    pub walkover_goals: Goals,  // Awarded to the side that did not forfeit.
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            id: TournamentId::default(),
            club_id: ClubId::default(),
            name: String::default(),
            start_date: Date::MIN,
            end_date: None,
            point_system: PointSystem::default(),
            rank_criteria: RankCriteria::defaults(),
            walkover_goals: Self::DEFAULT_WALKOVER_GOALS,
        }
    }
}

impl FromRow<'_, SqliteRow> for Tournament {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let criteria: serde_json::Value = row.try_get("rank_criteria")?;
        Ok(Self {
            id: row.try_get("id")?,
            club_id: row.try_get("club_id")?,
            name: row.try_get("tournament_name")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            point_system: PointSystem::from_row(row)?,
            rank_criteria: serde_json::from_value(criteria).map_err(|e| sqlx::Error::ColumnDecode {
                index: "rank_criteria".to_string(),
                source: Box::new(e),
            })?,
            walkover_goals: row.try_get("walkover_goals")?,
        })
    }
}

impl Tournament {
    pub const DEFAULT_WALKOVER_GOALS: Goals = 3;

    // Check whether a game on this date belongs inside the tournament window.
    pub fn contains_date(&self, date: Date) -> bool {
        is_within(date, self.start_date, self.end_date)
    }

    // E.g. "2025-04-01 – 2025-04-30", or "from 2025-04-01" when open-ended.
    pub fn date_range_label(&self) -> String {
        match self.end_date {
            Some(end) => format!("{} – {}", date_to_string(self.start_date), date_to_string(end)),
            None => format!("from {}", date_to_string(self.start_date)),
        }
    }
}

// What a user may change about a tournament.
#[derive(Debug, Clone)]
pub struct TournamentInput {
    pub club_id: ClubId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub point_system: PointSystem,
    pub rank_criteria: Vec<RankCriteria>,
    pub walkover_goals: Goals,
}

impl TournamentInput {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Tournament name is required.".to_string());
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                errors.push(format!(
                    "End date {} is before start date {}.",
                    date_to_string(end), date_to_string(self.start_date)
                ));
            }
        }
        if self.rank_criteria.is_empty() {
            errors.push("At least one ranking criterion is required.".to_string());
        }
        errors.extend(self.point_system.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn input() -> TournamentInput {
        TournamentInput {
            club_id: 1,
            name: "Spring Open".to_string(),
            start_date: date!(2025-04-01),
            end_date: Some(date!(2025-04-30)),
            point_system: PointSystem::default(),
            rank_criteria: RankCriteria::defaults(),
            walkover_goals: 3,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_empty());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut i = input();
        i.end_date = Some(date!(2025-03-31));
        let errors = i.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("2025-03-31"));
    }

    #[test]
    fn blank_name_and_missing_criteria_both_reported() {
        let mut i = input();
        i.name = "  ".to_string();
        i.rank_criteria.clear();
        assert_eq!(i.validate().len(), 2);
    }

    #[test]
    fn point_system_out_of_range_is_rejected() {
        let mut i = input();
        i.point_system.points_for_win = i64::MAX;
        let errors = i.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Points for a win"));
    }

    #[test]
    fn open_ended_tournament_accepts_late_dates() {
        let t = Tournament { start_date: date!(2025-01-01), end_date: None, ..Default::default() };
        assert!(t.contains_date(date!(2031-01-01)));
        assert!(!t.contains_date(date!(2024-12-31)));
        assert_eq!(t.date_range_label(), "from 2025-01-01");
    }
}
