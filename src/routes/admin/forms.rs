// Raw form submissions. Fields are kept as typed so a rejected form can be shown again as it was.
use std::str::FromStr;

use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    logic::{
        club::{Club, ClubInput},
        game::{Game, GameInput, Walkover},
        person::{Player, PlayerInput, role::Role},
        time::{date_to_string, optional_string_to_date, string_to_date},
        tournament::{Tournament, TournamentInput, leaderboard::ranking::RankCriteria, point_system::PointSystem},
        types::{ClubId, PlayerId},
    },
};

// Parse a number field, or note what is wrong with it.
fn parse_field<T: FromStr + Default>(label: &str, value: &str, errors: &mut Vec<String>) -> T {
    match value.trim() {
        "" => T::default(),
        v => v.parse().unwrap_or_else(|_| {
            errors.push(format!("{label}: \"{v}\" is not a valid number."));
            T::default()
        }),
    }
}

#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct ClubForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub description: String,
}

impl ClubForm {
    pub fn from_club(club: &Club) -> Self {
        Self {
            name: club.name.clone(),
            city: club.city.clone().unwrap_or_default(),
            description: club.description.clone().unwrap_or_default(),
        }
    }

    pub fn input(&self) -> ClubInput {
        ClubInput::build(&self.name, &self.city, &self.description)
    }
}

// Checkboxes are only sent when ticked.
#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct PlayerForm {
    #[serde(default)]
    pub club_id: ClubId,
    #[serde(default)]
    pub forename: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    pub role_manager: Option<String>,
    pub role_mentor: Option<String>,
    pub role_captain: Option<String>,
    pub role_player: Option<String>,
}

impl PlayerForm {
    pub fn from_player(player: &Player) -> Self {
        let mut form = Self {
            club_id: player.club_id,
            forename: player.forename.clone(),
            surname: player.surname.clone(),
            email: player.email.clone().unwrap_or_default(),
            ..Default::default()
        };
        for role in player.roles.iter() {
            *form.role_field(*role) = Some("on".to_string());
        }
        return form;
    }

    fn role_field(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Manager => &mut self.role_manager,
            Role::Mentor => &mut self.role_mentor,
            Role::Captain => &mut self.role_captain,
            Role::Player => &mut self.role_player,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        let field = match role {
            Role::Manager => &self.role_manager,
            Role::Mentor => &self.role_mentor,
            Role::Captain => &self.role_captain,
            Role::Player => &self.role_player,
        };
        field.is_some()
    }

    pub fn input(&self) -> PlayerInput {
        let roles = Role::ALL.into_iter().filter(|role| self.has_role(*role)).collect();
        PlayerInput::build(self.club_id, &self.forename, &self.surname, &self.email, roles)
    }
}

#[derive(Debug, Clone)]
#[derive(Deserialize)]
pub struct TournamentForm {
    #[serde(default)]
    pub club_id: ClubId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub points_for_win: String,
    #[serde(default)]
    pub points_for_draw: String,
    #[serde(default)]
    pub points_for_loss: String,
    #[serde(default)]
    pub points_per_goal_scored: String,
    #[serde(default)]
    pub points_per_goal_conceded: String,
    #[serde(default)]
    pub walkover_goals: String,
    #[serde(default)]
    pub rank_criteria: String,
}

impl Default for TournamentForm {
    fn default() -> Self {
        Self::from_tournament(&Tournament::default())
    }
}

impl TournamentForm {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let points = &tournament.point_system;
        Self {
            club_id: tournament.club_id,
            name: tournament.name.clone(),
            start_date: match tournament.id {
                0 => String::new(),
                _ => date_to_string(tournament.start_date),
            },
            end_date: tournament.end_date.map(date_to_string).unwrap_or_default(),
            points_for_win: points.points_for_win.to_string(),
            points_for_draw: points.points_for_draw.to_string(),
            points_for_loss: points.points_for_loss.to_string(),
            points_per_goal_scored: points.points_per_goal_scored.to_string(),
            points_per_goal_conceded: points.points_per_goal_conceded.to_string(),
            walkover_goals: tournament.walkover_goals.to_string(),
            rank_criteria: RankCriteria::list_to_keys(&tournament.rank_criteria),
        }
    }

    pub fn input(&self) -> Result<TournamentInput> {
        let mut errors = Vec::new();
        let start_date = string_to_date(&self.start_date).map_err(|e| errors.push(format!("Start date: {e}."))).ok();
        let end_date = optional_string_to_date(&self.end_date).map_err(|e| errors.push(format!("End date: {e}."))).ok();
        let rank_criteria = RankCriteria::parse_list(&self.rank_criteria).unwrap_or_else(|e| {
            errors.push(e);
            RankCriteria::defaults()
        });

        let point_system = PointSystem::build(
            parse_field("Points for a win", &self.points_for_win, &mut errors),
            parse_field("Points for a draw", &self.points_for_draw, &mut errors),
            parse_field("Points for a loss", &self.points_for_loss, &mut errors),
            parse_field("Points per goal scored", &self.points_per_goal_scored, &mut errors),
            parse_field("Points per goal conceded", &self.points_per_goal_conceded, &mut errors),
        );
        let walkover_goals = match self.walkover_goals.trim() {
            "" => Tournament::DEFAULT_WALKOVER_GOALS,
            _ => parse_field("Walkover goals", &self.walkover_goals, &mut errors),
        };

        let (Some(start_date), Some(end_date)) = (start_date, end_date) else {
            return Err(AppError::Validation(errors));
        };
        AppError::check(errors)?;

        Ok(TournamentInput {
            club_id: self.club_id,
            name: self.name.trim().to_string(),
            start_date,
            end_date,
            point_system,
            rank_criteria,
            walkover_goals,
        })
    }
}

#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct GameForm {
    #[serde(default)]
    pub played_on: String,
    #[serde(default)]
    pub home_id: PlayerId,
    #[serde(default)]
    pub away_id: PlayerId,
    #[serde(default)]
    pub home_goals: String,
    #[serde(default)]
    pub away_goals: String,
    #[serde(default)]
    pub walkover: String,
    #[serde(default)]
    pub home_adjustment: String,
    #[serde(default)]
    pub away_adjustment: String,
}

impl GameForm {
    pub fn from_game(game: &Game) -> Self {
        Self {
            played_on: date_to_string(game.played_on),
            home_id: game.home_id,
            away_id: game.away_id,
            home_goals: game.home_goals.to_string(),
            away_goals: game.away_goals.to_string(),
            walkover: game.walkover.key().to_string(),
            home_adjustment: game.home_adjustment.to_string(),
            away_adjustment: game.away_adjustment.to_string(),
        }
    }

    pub fn input(&self) -> Result<GameInput> {
        let mut errors = Vec::new();
        let played_on = string_to_date(&self.played_on).map_err(|e| errors.push(format!("Date: {e}."))).ok();
        let walkover = Walkover::from_key(&self.walkover).unwrap_or_else(|| {
            errors.push(format!("\"{}\" is not a walkover option.", self.walkover));
            Walkover::None
        });

        if !walkover.is_walkover() {
            for (label, value) in [("Home goals", &self.home_goals), ("Away goals", &self.away_goals)] {
                if value.trim().is_empty() {
                    errors.push(format!("{label} are required unless the game is a walkover."));
                }
            }
        }
        let home_goals = parse_field("Home goals", &self.home_goals, &mut errors);
        let away_goals = parse_field("Away goals", &self.away_goals, &mut errors);
        let home_adjustment = parse_field("Home adjustment", &self.home_adjustment, &mut errors);
        let away_adjustment = parse_field("Away adjustment", &self.away_adjustment, &mut errors);

        let Some(played_on) = played_on else {
            return Err(AppError::Validation(errors));
        };
        AppError::check(errors)?;

        Ok(GameInput {
            walkover,
            home_adjustment,
            away_adjustment,
            ..GameInput::build(played_on, self.home_id, self.away_id, home_goals, away_goals)
        })
    }
}

#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct ParticipantForm {
    pub player_id: PlayerId,
}

#[derive(Debug, Default, Clone)]
#[derive(Deserialize)]
pub struct UploadForm {
    #[serde(default)]
    pub csv: String,
}
