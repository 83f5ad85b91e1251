pub mod config;
pub mod game;
pub mod logger;
pub mod replay;
pub mod version;

pub use game::{Cell, Direction, GameOverReason, GameSettings, GameState, Grid, Position, SessionRng};
