use sqlx::SqliteConnection;

use crate::{
    error::{AppError, Result},
    logic::{
        club::Club,
        game::Game,
        person::{Player, PlayerInput, role::Role},
        tournament::Tournament,
        types::{ClubId, Db, PlayerId, TournamentId},
    },
};

// Player rows with their roles folded into one column.
const PLAYER_SELECT: &str =
    "SELECT Player.*, GROUP_CONCAT(PlayerRole.role) AS roles FROM Player
    LEFT JOIN PlayerRole ON PlayerRole.player_id = Player.id";

const PLAYER_ORDER: &str =
    "GROUP BY Player.id
    ORDER BY Player.surname COLLATE NOCASE, Player.forename COLLATE NOCASE, Player.id";

// Static read queries.
impl Player {
    pub async fn fetch_from_db(db: &Db, id: PlayerId) -> Result<Self> {
        let query = format!("{PLAYER_SELECT} WHERE Player.id = $1 GROUP BY Player.id");
        sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(db).await?
            .ok_or_else(|| AppError::not_found(format!("Player {id}")))
    }

    // Fetch ALL players from the database.
    pub async fn fetch_all(db: &Db) -> Result<Vec<Self>> {
        let query = format!("{PLAYER_SELECT} {PLAYER_ORDER}");
        Ok(sqlx::query_as(&query).fetch_all(db).await?)
    }

    pub async fn fetch_by_club(db: &Db, club_id: ClubId) -> Result<Vec<Self>> {
        let query = format!("{PLAYER_SELECT} WHERE Player.club_id = $1 {PLAYER_ORDER}");
        Ok(sqlx::query_as(&query).bind(club_id).fetch_all(db).await?)
    }

    // Players entered in a tournament.
    pub async fn fetch_by_tournament(db: &Db, tournament_id: TournamentId) -> Result<Vec<Self>> {
        let query = format!(
            "{PLAYER_SELECT}
            WHERE Player.id IN (SELECT player_id FROM TournamentPlayer WHERE tournament_id = $1)
            {PLAYER_ORDER}"
        );
        Ok(sqlx::query_as(&query).bind(tournament_id).fetch_all(db).await?)
    }

    // Check the input, including rules that need the database.
    async fn validate(db: &Db, input: &PlayerInput, except: Option<PlayerId>) -> Result<()> {
        let mut errors = input.validate();
        match Club::fetch_from_db(db, input.club_id).await {
            Err(AppError::NotFound(_)) => errors.push(format!("Club {} does not exist.", input.club_id)),
            Err(e) => return Err(e),
            Ok(club) => if input.roles.contains(&Role::Captain) {
                if let Some(captain) = Self::club_captain(db, club.id, except).await? {
                    errors.push(format!("{captain} is already the captain of {}.", club.name));
                }
            },
        }
        AppError::check(errors)
    }

    // Name of the club's captain other than the given player, if there is one.
    async fn club_captain(db: &Db, club_id: ClubId, except: Option<PlayerId>) -> Result<Option<String>> {
        Ok(sqlx::query_scalar(
            "SELECT Player.forename || ' ' || Player.surname FROM Player
            INNER JOIN PlayerRole ON PlayerRole.player_id = Player.id
            WHERE Player.club_id = $1 AND PlayerRole.role = $2 AND Player.id != $3
            LIMIT 1"
        ).bind(club_id)
        .bind(Role::Captain)
        .bind(except.unwrap_or_default())
        .fetch_optional(db).await?)
    }
}

// Database write queries.
impl Player {
    pub async fn create(db: &Db, input: &PlayerInput) -> Result<Self> {
        Self::validate(db, input, None).await?;

        let mut tx = db.begin().await?;
        let id: PlayerId = sqlx::query_scalar(
            "INSERT INTO Player (club_id, forename, surname, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id"
        ).bind(input.club_id)
        .bind(input.forename.as_str())
        .bind(input.surname.as_str())
        .bind(input.email.as_deref())
        .fetch_one(&mut *tx).await?;

        Self::save_roles(&mut *tx, id, &input.roles).await?;
        tx.commit().await?;

        tracing::info!(player_id = id, club_id = input.club_id, "player created");
        return Self::fetch_from_db(db, id).await;
    }

    // Update the player and replace their roles in one go.
    pub async fn update(db: &Db, id: PlayerId, input: &PlayerInput) -> Result<Self> {
        Self::fetch_from_db(db, id).await?;
        Self::validate(db, input, Some(id)).await?;

        let mut tx = db.begin().await?;
        sqlx::query(
            "UPDATE Player SET club_id = $1, forename = $2, surname = $3, email = $4
            WHERE id = $5"
        ).bind(input.club_id)
        .bind(input.forename.as_str())
        .bind(input.surname.as_str())
        .bind(input.email.as_deref())
        .bind(id)
        .execute(&mut *tx).await?;

        Self::save_roles(&mut *tx, id, &input.roles).await?;
        tx.commit().await?;

        tracing::info!(player_id = id, "player updated");
        return Self::fetch_from_db(db, id).await;
    }

    async fn save_roles(conn: &mut SqliteConnection, id: PlayerId, roles: &[Role]) -> Result<()> {
        sqlx::query(
            "DELETE FROM PlayerRole WHERE player_id = $1"
        ).bind(id)
        .execute(&mut *conn).await?;

        for role in Role::normalise(roles.to_vec()) {
            sqlx::query(
                "INSERT INTO PlayerRole (player_id, role) VALUES ($1, $2)"
            ).bind(id)
            .bind(role)
            .execute(&mut *conn).await?;
        }

        Ok(())
    }

    // Roles, tournament entries and every game of the player go with them.
    pub async fn delete(db: &Db, id: PlayerId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM Player WHERE id = $1"
        ).bind(id)
        .execute(db).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Player {id}")));
        }

        tracing::info!(player_id = id, "player deleted");
        Ok(())
    }
}

// Database read queries.
impl Player {
    pub async fn club(&self, db: &Db) -> Result<Club> {
        Club::fetch_from_db(db, self.club_id).await
    }

    // Tournaments the player is entered in, newest first.
    pub async fn tournaments(&self, db: &Db) -> Result<Vec<Tournament>> {
        Tournament::fetch_by_player(db, self.id).await
    }

    pub async fn games(&self, db: &Db) -> Result<Vec<Game>> {
        Game::fetch_by_player(db, self.id).await
    }
}
