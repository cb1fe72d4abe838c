// Custom types that are widely used are defined here.
use sqlx::SqlitePool;

pub type Db = SqlitePool;

// Database ID types.
pub type ClubId = i64;
pub type PlayerId = i64;
pub type TournamentId = i64;
pub type GameId = i64;

// Goals in a single game. Two bytes is more than enough.
pub type Goals = u16;

// Signed, because conceded goals and adjustments may cost points.
pub type Points = i64;
