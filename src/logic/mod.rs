pub mod app_data;
pub mod club;
pub mod game;
pub mod person;
pub mod time;
pub mod tournament;
pub mod types;
pub mod upload;
