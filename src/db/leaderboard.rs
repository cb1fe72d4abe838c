use futures::TryStreamExt;

use crate::{
    error::Result,
    logic::{
        tournament::{Tournament, leaderboard::{Standing, ranking::{RankCriteria, rank_standings}}},
        types::Db,
    },
};

// Player columns of a standing, summed over whatever GameResult rows are joined.
const STANDING_COLUMNS: &str =
    "SELECT Player.id AS id, Player.forename || ' ' || Player.surname AS name,
    Club.id AS club_id, Club.club_name AS club_name,
    COUNT(GameResult.game_id) AS played,
    COALESCE(SUM(GameResult.outcome = 'Win'), 0) AS wins,
    COALESCE(SUM(GameResult.outcome = 'Draw'), 0) AS draws,
    COALESCE(SUM(GameResult.outcome = 'Loss'), 0) AS losses,
    COALESCE(SUM(GameResult.goals_scored), 0) AS goals_scored,
    COALESCE(SUM(GameResult.goals_conceded), 0) AS goals_conceded,
    COALESCE(SUM(GameResult.conditional_points), 0) AS conditional_points,
    COALESCE(SUM(GameResult.points_earned), 0) AS points";

impl Standing {
    // Every participant of the tournament, including those yet to play.
    pub async fn tournament_board(db: &Db, tournament: &Tournament) -> Result<Vec<Self>> {
        let query = format!(
            "{STANDING_COLUMNS}
            FROM TournamentPlayer
            INNER JOIN Player ON Player.id = TournamentPlayer.player_id
            INNER JOIN Club ON Club.id = Player.club_id
            LEFT JOIN GameResult ON GameResult.player_id = Player.id
                AND GameResult.tournament_id = TournamentPlayer.tournament_id
            WHERE TournamentPlayer.tournament_id = $1
            GROUP BY Player.id"
        );

        let mut standings: Vec<Self> = sqlx::query_as(&query)
            .bind(tournament.id)
            .fetch(db)
            .try_collect().await?;

        rank_standings(&mut standings, &tournament.rank_criteria);
        return Ok(standings);
    }

    // The tournament's player standings summed per club.
    pub async fn club_board(db: &Db, tournament: &Tournament) -> Result<Vec<Self>> {
        let players = Self::tournament_board(db, tournament).await?;
        let mut clubs = Self::sum_by_club(&players);
        rank_standings(&mut clubs, &tournament.rank_criteria);
        return Ok(clubs);
    }

    // Every player with at least one result, over all tournaments.
    pub async fn overall_board(db: &Db) -> Result<Vec<Self>> {
        let query = format!(
            "{STANDING_COLUMNS}
            FROM Player
            INNER JOIN Club ON Club.id = Player.club_id
            INNER JOIN GameResult ON GameResult.player_id = Player.id
            GROUP BY Player.id"
        );

        let mut standings: Vec<Self> = sqlx::query_as(&query)
            .fetch(db)
            .try_collect().await?;

        rank_standings(&mut standings, &RankCriteria::defaults());
        return Ok(standings);
    }
}
