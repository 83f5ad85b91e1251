use crate::config::Validate;
use crate::game::{GameSettings, GameState, SessionRng};
use super::{ReplayError, Replay};

/// Re-runs a recorded game tick by tick.
pub struct ReplayPlayer {
    replay: Replay,
    state: GameState,
    current_action_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Result<Self, ReplayError> {
        let settings = GameSettings {
            rows: replay.rows,
            cols: replay.cols,
            seed: Some(replay.seed),
            ..GameSettings::default()
        };
        settings
            .validate()
            .map_err(|e| ReplayError::Mismatch(format!("field {}x{}: {}", replay.rows, replay.cols, e)))?;
        let state = GameState::new(replay.rows, replay.cols, SessionRng::new(replay.seed));
        Ok(Self {
            replay,
            state,
            current_action_index: 0,
        })
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_game_over() || self.state.tick() >= self.replay.total_ticks
    }

    /// Feeds the turns recorded for the current tick, then advances once.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        let tick = self.state.tick();
        while let Some(action) = self.replay.actions.get(self.current_action_index) {
            if action.tick > tick {
                break;
            }
            self.state.request_direction_change(action.direction);
            self.current_action_index += 1;
        }
        self.state.advance();
    }

    pub fn run_to_end(&mut self) {
        while !self.is_finished() {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::replay::{REPLAY_VERSION, ReplayAction};

    fn replay_with(actions: Vec<ReplayAction>, total_ticks: u64) -> Replay {
        Replay {
            version: REPLAY_VERSION,
            engine_version: "test".to_string(),
            started_at: String::new(),
            seed: 11,
            rows: 10,
            cols: 10,
            total_ticks,
            final_score: 0,
            actions,
        }
    }

    #[test]
    fn test_applies_actions_at_their_tick() {
        let actions = vec![ReplayAction { tick: 1, direction: Direction::Down }];
        let mut player = ReplayPlayer::new(replay_with(actions, 3)).unwrap();

        player.step();
        assert_eq!(player.state().direction(), Direction::Right);
        player.step();
        assert_eq!(player.state().direction(), Direction::Down);
    }

    #[test]
    fn test_stops_at_total_ticks() {
        let mut player = ReplayPlayer::new(replay_with(Vec::new(), 2)).unwrap();
        player.run_to_end();
        assert!(player.is_finished());
        assert_eq!(player.state().tick(), 2);
        player.step();
        assert_eq!(player.state().tick(), 2);
    }

    #[test]
    fn test_rejects_undersized_field() {
        let mut replay = replay_with(Vec::new(), 1);
        replay.cols = 2;
        assert!(matches!(ReplayPlayer::new(replay), Err(ReplayError::Mismatch(_))));
    }

    #[test]
    fn test_rejects_oversized_field() {
        let mut replay = replay_with(Vec::new(), 1);
        replay.rows = usize::MAX / 2;
        replay.cols = 4;
        assert!(matches!(ReplayPlayer::new(replay), Err(ReplayError::Mismatch(_))));

        let mut replay = replay_with(Vec::new(), 1);
        replay.cols = crate::game::MAX_SIDE + 1;
        assert!(matches!(ReplayPlayer::new(replay), Err(ReplayError::Mismatch(_))));
    }

    #[test]
    fn test_oversized_field_from_file_is_rejected() {
        let text = format!(
            "version: {}\nengine_version: test\nstarted_at: ''\nseed: 1\nrows: {}\ncols: 4\ntotal_ticks: 1\nfinal_score: 0\nactions: []\n",
            REPLAY_VERSION,
            usize::MAX / 2
        );
        let replay = crate::replay::load_replay_from_str(&text).unwrap();
        assert!(matches!(ReplayPlayer::new(replay), Err(ReplayError::Mismatch(_))));
    }
}
