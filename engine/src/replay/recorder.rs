use chrono::Local;

use crate::game::{Direction, GameState};
use crate::version::VERSION;
use super::{REPLAY_VERSION, Replay, ReplayAction};

/// Collects the turns a player requested so the game can be replayed from
/// its seed.
pub struct ReplayRecorder {
    started_at: String,
    seed: u64,
    rows: usize,
    cols: usize,
    actions: Vec<ReplayAction>,
}

impl ReplayRecorder {
    /// Must be created before the first tick of `state`.
    pub fn new(state: &GameState) -> Self {
        Self {
            started_at: Local::now().to_rfc3339(),
            seed: state.seed(),
            rows: state.rows(),
            cols: state.cols(),
            actions: Vec::new(),
        }
    }

    pub fn record_direction(&mut self, tick: u64, direction: Direction) {
        self.actions.push(ReplayAction { tick, direction });
    }

    pub fn finalize(&mut self, state: &GameState) -> Replay {
        let mut actions = std::mem::take(&mut self.actions);
        actions.sort_by_key(|a| a.tick);

        Replay {
            version: REPLAY_VERSION,
            engine_version: VERSION.to_string(),
            started_at: self.started_at.clone(),
            seed: self.seed,
            rows: self.rows,
            cols: self.cols,
            total_ticks: state.tick(),
            final_score: state.score(),
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionRng;

    #[test]
    fn test_finalize_captures_session() {
        let mut state = GameState::new(6, 8, SessionRng::new(3));
        let mut recorder = ReplayRecorder::new(&state);
        recorder.record_direction(0, Direction::Up);
        state.request_direction_change(Direction::Up);
        state.advance();
        recorder.record_direction(1, Direction::Right);

        let replay = recorder.finalize(&state);
        assert_eq!(replay.version, REPLAY_VERSION);
        assert_eq!(replay.seed, 3);
        assert_eq!(replay.rows, 6);
        assert_eq!(replay.cols, 8);
        assert_eq!(replay.total_ticks, 1);
        assert_eq!(replay.actions.len(), 2);
    }

    #[test]
    fn test_actions_sorted_by_tick() {
        let state = GameState::new(6, 8, SessionRng::new(3));
        let mut recorder = ReplayRecorder::new(&state);
        recorder.record_direction(4, Direction::Up);
        recorder.record_direction(2, Direction::Left);
        recorder.record_direction(2, Direction::Down);

        let replay = recorder.finalize(&state);
        let ticks: Vec<u64> = replay.actions.iter().map(|a| a.tick).collect();
        assert_eq!(ticks, vec![2, 2, 4]);
        assert_eq!(replay.actions[0].direction, Direction::Left);
        assert_eq!(replay.actions[1].direction, Direction::Down);
    }
}
