mod direction_queue;
mod game_state;
mod grid;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use direction_queue::DirectionQueue;
pub use game_state::GameState;
pub use grid::Grid;
pub use session_rng::SessionRng;
pub use settings::{GameSettings, MAX_SIDE, MIN_COLS, MIN_ROWS};
pub use snake::Snake;
pub use types::{Cell, Direction, GameOverReason, Hit, Position};
