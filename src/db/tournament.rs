use serde_json::json;
use sqlx::SqliteConnection;

use crate::{
    error::{AppError, Result},
    logic::{
        club::Club,
        game::{Game, result::GameResult},
        person::Player,
        time::is_within,
        tournament::{Tournament, TournamentInput},
        types::{ClubId, Db, PlayerId, TournamentId},
    },
};

// Static read queries.
impl Tournament {
    pub async fn fetch_from_db(db: &Db, id: TournamentId) -> Result<Self> {
        sqlx::query_as(
            "SELECT * FROM Tournament WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await?
        .ok_or_else(|| AppError::not_found(format!("Tournament {id}")))
    }

    // Fetch ALL tournaments from the database, newest first.
    pub async fn fetch_all(db: &Db) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Tournament
            ORDER BY start_date DESC, id DESC"
        ).fetch_all(db).await?)
    }

    // Tournaments hosted by the club.
    pub async fn fetch_by_club(db: &Db, club_id: ClubId) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Tournament WHERE club_id = $1
            ORDER BY start_date DESC, id DESC"
        ).bind(club_id)
        .fetch_all(db).await?)
    }

    // Tournaments the player is entered in.
    pub async fn fetch_by_player(db: &Db, player_id: PlayerId) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT Tournament.* FROM Tournament
            INNER JOIN TournamentPlayer ON TournamentPlayer.tournament_id = Tournament.id
            WHERE TournamentPlayer.player_id = $1
            ORDER BY Tournament.start_date DESC, Tournament.id DESC"
        ).bind(player_id)
        .fetch_all(db).await?)
    }

    async fn validate(db: &Db, input: &TournamentInput) -> Result<()> {
        let mut errors = input.validate();
        match Club::fetch_from_db(db, input.club_id).await {
            Err(AppError::NotFound(_)) => errors.push(format!("Club {} does not exist.", input.club_id)),
            Err(e) => return Err(e),
            Ok(_) => (),
        }
        AppError::check(errors)
    }

    // Games already recorded must stay inside the tournament dates.
    async fn check_dates_keep_games(&self, db: &Db, input: &TournamentInput) -> Result<()> {
        let outside = self.games(db).await?
            .into_iter()
            .filter(|game| !is_within(game.played_on, input.start_date, input.end_date))
            .count();

        match outside {
            0 => Ok(()),
            n => Err(AppError::Validation(vec![format!(
                "{n} game(s) of {} would fall outside the new dates.", self.name
            )])),
        }
    }
}

// Database write queries.
impl Tournament {
    pub async fn create(db: &Db, input: &TournamentInput) -> Result<Self> {
        Self::validate(db, input).await?;

        let points = &input.point_system;
        let id: TournamentId = sqlx::query_scalar(
            "INSERT INTO Tournament
            (club_id, tournament_name, start_date, end_date,
            points_for_win, points_for_draw, points_for_loss, points_per_goal_scored, points_per_goal_conceded,
            walkover_goals, rank_criteria)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id"
        ).bind(input.club_id)
        .bind(input.name.trim())
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(points.points_for_win)
        .bind(points.points_for_draw)
        .bind(points.points_for_loss)
        .bind(points.points_per_goal_scored)
        .bind(points.points_per_goal_conceded)
        .bind(input.walkover_goals)
        .bind(json!(input.rank_criteria))
        .fetch_one(db).await?;

        tracing::info!(tournament_id = id, club_id = input.club_id, "tournament created");
        return Self::fetch_from_db(db, id).await;
    }

    // Update the tournament. Stored results are recalculated in the same transaction,
    // as the point system or the walkover score may have changed.
    pub async fn update(db: &Db, id: TournamentId, input: &TournamentInput) -> Result<Self> {
        let current = Self::fetch_from_db(db, id).await?;
        Self::validate(db, input).await?;
        current.check_dates_keep_games(db, input).await?;

        let points = &input.point_system;
        let mut tx = db.begin().await?;
        sqlx::query(
            "UPDATE Tournament SET
            club_id = $1, tournament_name = $2, start_date = $3, end_date = $4,
            points_for_win = $5, points_for_draw = $6, points_for_loss = $7,
            points_per_goal_scored = $8, points_per_goal_conceded = $9,
            walkover_goals = $10, rank_criteria = $11
            WHERE id = $12"
        ).bind(input.club_id)
        .bind(input.name.trim())
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(points.points_for_win)
        .bind(points.points_for_draw)
        .bind(points.points_for_loss)
        .bind(points.points_per_goal_scored)
        .bind(points.points_per_goal_conceded)
        .bind(input.walkover_goals)
        .bind(json!(input.rank_criteria))
        .bind(id)
        .execute(&mut *tx).await?;

        let tournament: Tournament = sqlx::query_as(
            "SELECT * FROM Tournament WHERE id = $1"
        ).bind(id)
        .fetch_one(&mut *tx).await?;

        let games = tournament.recalculate_results(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(tournament_id = id, games, "tournament updated, results recalculated");
        return Ok(tournament);
    }

    // Re-resolve every game and rewrite its result rows. Returns the number of games.
    async fn recalculate_results(&self, conn: &mut SqliteConnection) -> Result<usize> {
        let games: Vec<Game> = sqlx::query_as(
            "SELECT * FROM Game WHERE tournament_id = $1"
        ).bind(self.id)
        .fetch_all(&mut *conn).await?;

        for game in games.iter() {
            let input = game.input().resolve(self.walkover_goals);
            sqlx::query(
                "UPDATE Game SET home_goals = $1, away_goals = $2 WHERE id = $3"
            ).bind(input.home_goals)
            .bind(input.away_goals)
            .bind(game.id)
            .execute(&mut *conn).await?;

            let (home, away) = GameResult::results_from_game(game.id, self.id, &input, &self.point_system);
            home.save(&mut *conn).await?;
            away.save(&mut *conn).await?;
        }

        return Ok(games.len());
    }

    // Games, entries and results go with the tournament.
    pub async fn delete(db: &Db, id: TournamentId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM Tournament WHERE id = $1"
        ).bind(id)
        .execute(db).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Tournament {id}")));
        }

        tracing::info!(tournament_id = id, "tournament deleted");
        Ok(())
    }

    // Enter a player in the tournament. Entering twice changes nothing.
    pub async fn add_participant(&self, db: &Db, player_id: PlayerId) -> Result<()> {
        Player::fetch_from_db(db, player_id).await?;

        sqlx::query(
            "INSERT OR IGNORE INTO TournamentPlayer (tournament_id, player_id)
            VALUES ($1, $2)"
        ).bind(self.id)
        .bind(player_id)
        .execute(db).await?;

        tracing::info!(tournament_id = self.id, player_id, "participant added");
        Ok(())
    }

    // Withdraw a player. Not possible once they have games in the tournament.
    pub async fn remove_participant(&self, db: &Db, player_id: PlayerId) -> Result<()> {
        let games: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM Game
            WHERE tournament_id = $1 AND (home_id = $2 OR away_id = $2)"
        ).bind(self.id)
        .bind(player_id)
        .fetch_one(db).await?;

        if games > 0 {
            let player = Player::fetch_from_db(db, player_id).await?;
            return Err(AppError::validation(format!(
                "{} has {games} game(s) in {} and cannot be removed.", player.full_name(), self.name
            )));
        }

        sqlx::query(
            "DELETE FROM TournamentPlayer WHERE tournament_id = $1 AND player_id = $2"
        ).bind(self.id)
        .bind(player_id)
        .execute(db).await?;

        tracing::info!(tournament_id = self.id, player_id, "participant removed");
        Ok(())
    }
}

// Database read queries.
impl Tournament {
    pub async fn host(&self, db: &Db) -> Result<Club> {
        Club::fetch_from_db(db, self.club_id).await
    }

    // Participants ordered by name.
    pub async fn participants(&self, db: &Db) -> Result<Vec<Player>> {
        Player::fetch_by_tournament(db, self.id).await
    }

    pub async fn participant_ids(&self, db: &Db) -> Result<Vec<PlayerId>> {
        Ok(sqlx::query_scalar(
            "SELECT player_id FROM TournamentPlayer WHERE tournament_id = $1"
        ).bind(self.id)
        .fetch_all(db).await?)
    }

    // Games of the tournament, newest first.
    pub async fn games(&self, db: &Db) -> Result<Vec<Game>> {
        Game::fetch_by_tournament(db, self.id).await
    }
}
