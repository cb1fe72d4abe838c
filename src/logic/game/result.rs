// One player's view of one game.
use serde::Serialize;
use sqlx::FromRow;

use crate::logic::{
    game::{GameInput, Outcome},
    tournament::point_system::PointSystem,
    types::{GameId, Goals, PlayerId, Points, TournamentId},
};

#[derive(Debug, Clone, PartialEq)]
#[derive(FromRow, Serialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub tournament_id: TournamentId,
    pub outcome: Outcome,
    pub goals_scored: Goals,
    pub goals_conceded: Goals,
    pub conditional_points: Points,
    pub points_earned: Points,
}

impl GameResult {
    fn build(game_id: GameId, tournament_id: TournamentId, player_id: PlayerId, outcome: Outcome,
    goals_scored: Goals, goals_conceded: Goals, conditional_points: Points, point_system: &PointSystem) -> Self {
        Self {
            game_id,
            player_id,
            tournament_id,
            outcome,
            goals_scored,
            goals_conceded,
            conditional_points,
            points_earned: point_system.points(outcome, goals_scored, goals_conceded, conditional_points),
        }
    }

    // Get the result rows of a resolved game, home first.
    pub fn results_from_game(game_id: GameId, tournament_id: TournamentId, game: &GameInput, point_system: &PointSystem) -> (GameResult, GameResult) {
        let home = Self::build(
            game_id, tournament_id, game.home_id, game.home_outcome(),
            game.home_goals, game.away_goals, game.home_adjustment, point_system
        );
        let away = Self::build(
            game_id, tournament_id, game.away_id, game.away_outcome(),
            game.away_goals, game.home_goals, game.away_adjustment, point_system
        );

        return (home, away);
    }
}
