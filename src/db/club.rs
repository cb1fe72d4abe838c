use time::Date;

use crate::{error::{AppError, Result}, logic::{club::{Club, ClubInput}, person::Player, tournament::Tournament, types::{ClubId, Db}}};

// Static read queries.
impl Club {
    pub async fn fetch_from_db(db: &Db, id: ClubId) -> Result<Self> {
        sqlx::query_as(
            "SELECT * FROM Club WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await?
        .ok_or_else(|| AppError::not_found(format!("Club {id}")))
    }

    // Fetch ALL clubs from the database.
    pub async fn fetch_all(db: &Db) -> Result<Vec<Self>> {
        Ok(sqlx::query_as(
            "SELECT * FROM Club
            ORDER BY club_name COLLATE NOCASE ASC"
        ).fetch_all(db).await?)
    }

    // Whether another club already uses the name.
    async fn is_name_taken(db: &Db, name: &str, except: Option<ClubId>) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM Club
            WHERE club_name = $1 COLLATE NOCASE AND id != $2"
        ).bind(name)
        .bind(except.unwrap_or_default())
        .fetch_one(db).await?;

        return Ok(count > 0);
    }

    async fn validate(db: &Db, input: &ClubInput, except: Option<ClubId>) -> Result<()> {
        let mut errors = input.validate();
        if errors.is_empty() && Self::is_name_taken(db, &input.name, except).await? {
            errors.push(format!("A club named {} already exists.", input.name));
        }
        AppError::check(errors)
    }
}

// Database write queries.
impl Club {
    pub async fn create(db: &Db, input: &ClubInput, today: Date) -> Result<Self> {
        Self::validate(db, input, None).await?;

        let id: ClubId = sqlx::query_scalar(
            "INSERT INTO Club (club_name, city, description, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id"
        ).bind(input.name.as_str())
        .bind(input.city.as_deref())
        .bind(input.description.as_deref())
        .bind(today)
        .fetch_one(db).await?;

        tracing::info!(club_id = id, name = %input.name, "club created");
        return Self::fetch_from_db(db, id).await;
    }

    pub async fn update(db: &Db, id: ClubId, input: &ClubInput) -> Result<Self> {
        Self::fetch_from_db(db, id).await?;
        Self::validate(db, input, Some(id)).await?;

        sqlx::query(
            "UPDATE Club SET club_name = $1, city = $2, description = $3
            WHERE id = $4"
        ).bind(input.name.as_str())
        .bind(input.city.as_deref())
        .bind(input.description.as_deref())
        .bind(id)
        .execute(db).await?;

        tracing::info!(club_id = id, "club updated");
        return Self::fetch_from_db(db, id).await;
    }

    // Players and hosted tournaments go with the club.
    pub async fn delete(db: &Db, id: ClubId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM Club WHERE id = $1"
        ).bind(id)
        .execute(db).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Club {id}")));
        }

        tracing::info!(club_id = id, "club deleted");
        Ok(())
    }
}

// Database read queries.
impl Club {
    // Get every player of the club.
    pub async fn players(&self, db: &Db) -> Result<Vec<Player>> {
        Player::fetch_by_club(db, self.id).await
    }

    // Get the tournaments the club hosts, newest first.
    pub async fn tournaments(&self, db: &Db) -> Result<Vec<Tournament>> {
        Tournament::fetch_by_club(db, self.id).await
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::db::{fixtures, setup_in_memory};

    #[tokio::test]
    async fn create_update_and_fetch() {
        let db = setup_in_memory().await.unwrap();
        let club = Club::create(&db, &ClubInput::build("Riverside", "Leeds", ""), date!(2025-02-01)).await.unwrap();
        assert_eq!(club.city.as_deref(), Some("Leeds"));
        assert_eq!(club.created_on, date!(2025-02-01));

        let club = Club::update(&db, club.id, &ClubInput::build("Riverside FC", "", "Founded 1921")).await.unwrap();
        assert_eq!(club.name, "Riverside FC");
        assert_eq!(club.city, None);
        assert_eq!(Club::fetch_all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn names_are_unique_ignoring_case() {
        let db = setup_in_memory().await.unwrap();
        fixtures::club(&db, "North").await;
        let other = fixtures::club(&db, "South").await;

        let err = Club::create(&db, &ClubInput::build("north", "", ""), date!(2025-01-01)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].contains("already exists")));

        let err = Club::update(&db, other.id, &ClubInput::build("NORTH", "", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Keeping its own name is fine.
        assert!(Club::update(&db, other.id, &ClubInput::build("South", "York", "")).await.is_ok());
    }

    #[tokio::test]
    async fn delete_takes_players_and_tournaments_along() {
        let db = setup_in_memory().await.unwrap();
        let club = fixtures::club(&db, "North").await;
        fixtures::player(&db, club.id, "Ada", "Lovelace").await;
        fixtures::tournament(&db, club.id).await;
        assert_eq!(club.players(&db).await.unwrap().len(), 1);
        assert_eq!(club.tournaments(&db).await.unwrap().len(), 1);

        Club::delete(&db, club.id).await.unwrap();
        assert!(Player::fetch_all(&db).await.unwrap().is_empty());
        assert!(Tournament::fetch_all(&db).await.unwrap().is_empty());
        assert!(matches!(Club::delete(&db, club.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_club_is_not_found() {
        let db = setup_in_memory().await.unwrap();
        assert!(matches!(Club::fetch_from_db(&db, 42).await, Err(AppError::NotFound(_))));
    }
}
