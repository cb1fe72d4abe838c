use sqlx::SqliteConnection;

use crate::{
    error::{AppError, Result},
    logic::{
        game::{Game, GameInput, result::GameResult},
        tournament::Tournament,
        types::{Db, GameId, PlayerId, TournamentId},
        upload::parse_upload,
    },
};

// Static read queries.
impl Game {
    pub async fn fetch_from_db(db: &Db, id: GameId) -> Result<Self> {
        sqlx::query_as(
            "SELECT * FROM Game WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await?
        .ok_or_else(|| AppError::not_found(format!("Game {id}")))
    }

    // Newest first.
    pub async fn fetch_by_tournament(db: &Db, tournament_id: TournamentId) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Game WHERE tournament_id = $1
            ORDER BY played_on DESC, id DESC"
        ).bind(tournament_id)
        .fetch_all(db).await?)
    }

    pub async fn fetch_by_player(db: &Db, player_id: PlayerId) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Game WHERE home_id = $1 OR away_id = $1
            ORDER BY played_on DESC, id DESC"
        ).bind(player_id)
        .fetch_all(db).await?)
    }

    // Validate and resolve an input against its tournament.
    async fn prepare(db: &Db, tournament: &Tournament, input: GameInput) -> Result<GameInput> {
        let participants = tournament.participant_ids(db).await?;
        AppError::check(input.validate(tournament, &participants))?;
        return Ok(input.resolve(tournament.walkover_goals));
    }
}

// Database write queries.
impl Game {
    // Record a game and both of its result rows.
    pub async fn record(db: &Db, tournament: &Tournament, input: GameInput) -> Result<Self> {
        let input = Self::prepare(db, tournament, input).await?;

        let mut tx = db.begin().await?;
        let id = Self::insert(&mut *tx, tournament, &input).await?;
        tx.commit().await?;

        tracing::info!(game_id = id, tournament_id = tournament.id, "game recorded");
        return Self::fetch_from_db(db, id).await;
    }

    // Record games that were already validated and resolved, all or none.
    pub async fn record_many(db: &Db, tournament: &Tournament, inputs: &[GameInput]) -> Result<usize> {
        let mut tx = db.begin().await?;
        for input in inputs.iter() {
            Self::insert(&mut *tx, tournament, input).await?;
        }
        tx.commit().await?;

        tracing::info!(tournament_id = tournament.id, games = inputs.len(), "games recorded");
        return Ok(inputs.len());
    }

    // Import every game of a CSV upload, or none of them if any line is wrong.
    pub async fn import_upload(db: &Db, tournament: &Tournament, text: &str) -> Result<usize> {
        let participants = tournament.participants(db).await?;
        let inputs = parse_upload(text, tournament, &participants).map_err(AppError::Validation)?;
        Self::record_many(db, tournament, &inputs).await
    }

    pub async fn update(db: &Db, id: GameId, input: GameInput) -> Result<Self> {
        let game = Self::fetch_from_db(db, id).await?;
        let tournament = Tournament::fetch_from_db(db, game.tournament_id).await?;
        let input = Self::prepare(db, &tournament, input).await?;

        let mut tx = db.begin().await?;
        sqlx::query(
            "UPDATE Game SET
            played_on = $1, home_id = $2, away_id = $3, home_goals = $4, away_goals = $5,
            walkover = $6, home_adjustment = $7, away_adjustment = $8
            WHERE id = $9"
        ).bind(input.played_on)
        .bind(input.home_id)
        .bind(input.away_id)
        .bind(input.home_goals)
        .bind(input.away_goals)
        .bind(input.walkover)
        .bind(input.home_adjustment)
        .bind(input.away_adjustment)
        .bind(id)
        .execute(&mut *tx).await?;

        Self::save_results(&mut *tx, id, &tournament, &input).await?;
        tx.commit().await?;

        tracing::info!(game_id = id, "game updated");
        return Self::fetch_from_db(db, id).await;
    }

    // Result rows go with the game.
    pub async fn delete(db: &Db, id: GameId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM Game WHERE id = $1"
        ).bind(id)
        .execute(db).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Game {id}")));
        }

        tracing::info!(game_id = id, "game deleted");
        Ok(())
    }

    async fn insert(conn: &mut SqliteConnection, tournament: &Tournament, input: &GameInput) -> Result<GameId> {
        let id: GameId = sqlx::query_scalar(
            "INSERT INTO Game
            (tournament_id, played_on, home_id, away_id, home_goals, away_goals,
            walkover, home_adjustment, away_adjustment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id"
        ).bind(tournament.id)
        .bind(input.played_on)
        .bind(input.home_id)
        .bind(input.away_id)
        .bind(input.home_goals)
        .bind(input.away_goals)
        .bind(input.walkover)
        .bind(input.home_adjustment)
        .bind(input.away_adjustment)
        .fetch_one(&mut *conn).await?;

        Self::save_results(&mut *conn, id, tournament, input).await?;
        return Ok(id);
    }

    // Replace the result rows of a game.
    async fn save_results(conn: &mut SqliteConnection, id: GameId, tournament: &Tournament, input: &GameInput) -> Result<()> {
        sqlx::query(
            "DELETE FROM GameResult WHERE game_id = $1"
        ).bind(id)
        .execute(&mut *conn).await?;

        let (home, away) = GameResult::results_from_game(id, tournament.id, input, &tournament.point_system);
        home.save(&mut *conn).await?;
        away.save(&mut *conn).await?;
        Ok(())
    }
}

// Database read queries.
impl Game {
    // Result rows of the game, home first.
    pub async fn results(&self, db: &Db) -> Result<Vec<GameResult>> {
        Ok(sqlx::query_as(
            "SELECT GameResult.* FROM GameResult
            INNER JOIN Game ON Game.id = GameResult.game_id
            WHERE GameResult.game_id = $1
            ORDER BY GameResult.player_id != Game.home_id"
        ).bind(self.id)
        .fetch_all(db).await?)
    }
}

impl GameResult {
    pub async fn save(&self, conn: &mut SqliteConnection) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO GameResult
            (game_id, player_id, tournament_id, outcome, goals_scored, goals_conceded, conditional_points, points_earned)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        ).bind(self.game_id)
        .bind(self.player_id)
        .bind(self.tournament_id)
        .bind(self.outcome)
        .bind(self.goals_scored)
        .bind(self.goals_conceded)
        .bind(self.conditional_points)
        .bind(self.points_earned)
        .execute(conn).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::{
        db::{fixtures, setup_in_memory},
        logic::{game::{Outcome, Walkover}, person::Player},
    };

    async fn setup() -> (Db, Tournament, Player, Player) {
        let db = setup_in_memory().await.unwrap();
        let club = fixtures::club(&db, "North").await;
        let ada = fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        let alan = fixtures::player(&db, club.id, "Alan", "Turing").await;
        let tournament = fixtures::tournament(&db, club.id).await;
        tournament.add_participant(&db, ada.id).await.unwrap();
        tournament.add_participant(&db, alan.id).await.unwrap();
        (db, tournament, ada, alan)
    }

    #[tokio::test]
    async fn record_writes_both_result_rows() {
        let (db, tournament, ada, alan) = setup().await;
        let input = GameInput { home_adjustment: 2, ..GameInput::build(date!(2025-03-02), ada.id, alan.id, 1, 1) };
        let game = Game::record(&db, &tournament, input).await.unwrap();

        let results = game.results(&db).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].player_id, ada.id);
        assert_eq!(results[0].outcome, Outcome::Draw);
        assert_eq!(results[0].points_earned, 1 + 2);
        assert_eq!(results[1].points_earned, 1);
    }

    #[tokio::test]
    async fn double_walkover_is_a_loss_for_both() {
        let (db, tournament, ada, alan) = setup().await;
        let input = GameInput { walkover: Walkover::Both, ..GameInput::build(date!(2025-03-02), ada.id, alan.id, 4, 2) };
        let game = Game::record(&db, &tournament, input).await.unwrap();
        assert_eq!((game.home_goals, game.away_goals), (0, 0));

        let results = game.results(&db).await.unwrap();
        assert!(results.iter().all(|r| r.outcome == Outcome::Loss));
    }

    #[tokio::test]
    async fn invalid_games_are_not_written() {
        let (db, tournament, ada, _) = setup().await;
        let input = GameInput::build(date!(2025-04-02), ada.id, ada.id, 1, 0);
        let err = Game::record(&db, &tournament, input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.len() == 2));
        assert!(tournament.games(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rewrites_results() {
        let (db, tournament, ada, alan) = setup().await;
        let game = Game::record(&db, &tournament, GameInput::build(date!(2025-03-02), ada.id, alan.id, 2, 0)).await.unwrap();

        let game = Game::update(&db, game.id, GameInput::build(date!(2025-03-04), ada.id, alan.id, 0, 1)).await.unwrap();
        assert_eq!(game.played_on, date!(2025-03-04));
        let results = game.results(&db).await.unwrap();
        assert_eq!(results[0].outcome, Outcome::Loss);
        assert_eq!(results[1].outcome, Outcome::Win);
        assert_eq!(results[1].points_earned, 3);
    }

    #[tokio::test]
    async fn delete_removes_results() {
        let (db, tournament, ada, alan) = setup().await;
        let game = Game::record(&db, &tournament, GameInput::build(date!(2025-03-02), ada.id, alan.id, 2, 0)).await.unwrap();

        Game::delete(&db, game.id).await.unwrap();
        assert!(game.results(&db).await.unwrap().is_empty());
        assert!(matches!(Game::delete(&db, game.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn uploads_are_all_or_nothing() {
        let (db, tournament, ..) = setup().await;
        let bad = "date,home,away,home_goals,away_goals\n\
                   2025-03-02,Ada Lovelace,Alan Turing,2,1\n\
                   2025-03-03,Ada Lovelace,Nobody,2,1\n";
        let err = Game::import_upload(&db, &tournament, bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].starts_with("Line 3:")));
        assert!(tournament.games(&db).await.unwrap().is_empty());

        let good = "date,home,away,home_goals,away_goals,walkover\n\
                    2025-03-02,Ada Lovelace,Alan Turing,2,1,\n\
                    2025-03-03,alan turing,ada lovelace,,,home\n";
        assert_eq!(Game::import_upload(&db, &tournament, good).await.unwrap(), 2);

        let games = tournament.games(&db).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].walkover, Walkover::Home);
        assert_eq!((games[0].home_goals, games[0].away_goals), (0, 3));
    }
}
