use serde::Serialize;
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use time::Date;

use crate::{
    error::Result,
    logic::{game::{Outcome, Walkover}, time::iso_date_format, types::{Db, GameId, Goals, PlayerId, Points, TournamentId}},
};

#[derive(Debug)]
#[derive(Serialize)]
pub struct GamePackage {
    pub id: GameId,
    pub tournament_id: TournamentId,
    pub tournament_name: String,
    #[serde(with = "iso_date_format")]
    pub played_on: Date,
    pub walkover: Walkover,
    pub home: SidePackage,
    pub away: SidePackage,
}

impl FromRow<'_, SqliteRow> for GamePackage {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            tournament_id: row.try_get("tournament_id")?,
            tournament_name: row.try_get("tournament_name")?,
            played_on: row.try_get("played_on")?,
            walkover: row.try_get("walkover")?,
            home: SidePackage::custom_from_row(row, "home")?,
            away: SidePackage::custom_from_row(row, "away")?,
        })
    }
}

impl GamePackage {
    fn select_query() -> String {
        let home_and_away = SidePackage::home_away_queries();
        format!(
            "SELECT Game.id, Game.tournament_id, Tournament.tournament_name, Game.played_on, Game.walkover,
            Game.home_id, home_name, Game.home_goals, home_outcome, home_points,
            Game.away_id, away_name, Game.away_goals, away_outcome, away_points
            FROM Game

            INNER JOIN Tournament ON Tournament.id = Game.tournament_id
            {home_and_away}"
        )
    }

    // Games of a tournament, newest first.
    pub async fn fetch_by_tournament(db: &Db, tournament_id: TournamentId) -> Result<Vec<Self>> {
        let query = format!("{} WHERE Game.tournament_id = $1 ORDER BY Game.played_on DESC, Game.id DESC", Self::select_query());
        Ok(sqlx::query_as(&query).bind(tournament_id).fetch_all(db).await?)
    }

    // Games of a player in every tournament, newest first.
    pub async fn fetch_by_player(db: &Db, player_id: PlayerId) -> Result<Vec<Self>> {
        let query = format!(
            "{} WHERE Game.home_id = $1 OR Game.away_id = $1 ORDER BY Game.played_on DESC, Game.id DESC",
            Self::select_query()
        );
        Ok(sqlx::query_as(&query).bind(player_id).fetch_all(db).await?)
    }

    // E.g. "3 – 1", with a note for walkovers.
    pub fn score_label(&self) -> String {
        match self.walkover.is_walkover() {
            true => format!("{} – {}, {}", self.home.goals, self.away.goals, self.walkover.label()),
            false => format!("{} – {}", self.home.goals, self.away.goals),
        }
    }

    // The player's own side first, then the opponent's.
    pub fn sides_for(&self, player_id: PlayerId) -> Option<(&SidePackage, &SidePackage)> {
        match player_id {
            id if id == self.home.id => Some((&self.home, &self.away)),
            id if id == self.away.id => Some((&self.away, &self.home)),
            _ => None,
        }
    }
}

// One side of a game.
#[derive(Debug)]
#[derive(Serialize)]
pub struct SidePackage {
    pub id: PlayerId,
    pub name: String,
    pub goals: Goals,
    pub outcome: Option<Outcome>,
    pub points: Points,
}

impl SidePackage {
    pub fn custom_from_row(row: &SqliteRow, home_away: &str) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get(format!("{home_away}_id").as_str())?,
            name: row.try_get(format!("{home_away}_name").as_str())?,
            goals: row.try_get(format!("{home_away}_goals").as_str())?,
            outcome: row.try_get(format!("{home_away}_outcome").as_str())?,
            points: row.try_get::<Option<Points>, _>(format!("{home_away}_points").as_str())?.unwrap_or_default(),
        })
    }

    fn home_away_queries() -> String {
        format!("{} {}", Self::home_away_query("home"), Self::home_away_query("away"))
    }

    fn home_away_query(home_away: &str) -> String {
        format!("
            INNER JOIN (
                SELECT id AS player_id, forename || ' ' || surname AS {home_away}_name FROM Player
            ) {home_away} ON {home_away}.player_id = Game.{home_away}_id
            LEFT JOIN (
                SELECT game_id, player_id, outcome AS {home_away}_outcome, points_earned AS {home_away}_points
                FROM GameResult
            ) {home_away}_result ON {home_away}_result.game_id = Game.id
            AND {home_away}_result.player_id = Game.{home_away}_id
        ")
    }
}
