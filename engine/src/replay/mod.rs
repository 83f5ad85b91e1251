pub mod file_io;
pub mod player;
pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::game::Direction;

pub use file_io::{ReplayError, generate_replay_filename, load_replay, load_replay_from_str, save_replay, save_replay_to_string};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;

/// A turn requested while the session's tick counter read `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    pub tick: u64,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub version: u8,
    pub engine_version: String,
    pub started_at: String,
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub total_ticks: u64,
    pub final_score: u32,
    pub actions: Vec<ReplayAction>,
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::game::{Direction, GameState, SessionRng};

    fn play_recorded_game(seed: u64) -> (GameState, Replay) {
        let mut state = GameState::new(10, 10, SessionRng::new(seed));
        let mut recorder = ReplayRecorder::new(&state);
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        let mut step = 0usize;
        while !state.is_game_over() && step < 200 {
            if step % 5 == 0 {
                let direction = turns[(step / 5) % turns.len()];
                recorder.record_direction(state.tick(), direction);
                state.request_direction_change(direction);
            }
            state.advance();
            step += 1;
        }
        let replay = recorder.finalize(&state);
        (state, replay)
    }

    #[test]
    fn test_replay_reproduces_game() {
        let (original, replay) = play_recorded_game(42);

        let mut player = ReplayPlayer::new(replay).unwrap();
        while !player.is_finished() {
            player.step();
        }

        let replayed = player.state();
        assert_eq!(replayed.tick(), original.tick());
        assert_eq!(replayed.score(), original.score());
        assert_eq!(replayed.snake_positions(), original.snake_positions());
        assert_eq!(replayed.grid(), original.grid());
        assert_eq!(replayed.game_over_reason(), original.game_over_reason());
    }

    #[test]
    fn test_replay_survives_file_round_trip() {
        let (original, replay) = play_recorded_game(7);

        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_replay_{}.{}", random_number, REPLAY_FILE_EXTENSION));

        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path).unwrap();
        assert_eq!(loaded, replay);

        let mut player = ReplayPlayer::new(loaded).unwrap();
        player.run_to_end();
        assert_eq!(player.state().score(), original.score());
        assert_eq!(player.state().snake_positions(), original.snake_positions());

        let _ = std::fs::remove_file(&path);
    }
}
