use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use snake_engine::replay::{ReplayPlayer, ReplayRecorder, generate_replay_filename, load_replay, save_replay};
use snake_engine::{GameOverReason, GameSettings, GameState, log};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::config::ReplayConfig;
use crate::input::ClientCommand;
use crate::render::{TerminalGuard, draw};

pub struct GameSummary {
    pub score: u32,
    pub ticks: u64,
    pub game_over_reason: Option<GameOverReason>,
    pub replay_path: Option<PathBuf>,
}

impl GameSummary {
    fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score(),
            ticks: state.tick(),
            game_over_reason: state.game_over_reason(),
            replay_path: None,
        }
    }
}

fn tick_interval(tick_interval_ms: u64) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(Duration::from_millis(tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Keeps the final frame up until the player presses something.
async fn wait_for_key(command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>) {
    let _ = command_rx.recv().await;
}

pub async fn run_live_game(
    terminal: &mut TerminalGuard,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    settings: &GameSettings,
    replay_config: &ReplayConfig,
) -> Result<GameSummary, Box<dyn Error>> {
    let mut state = GameState::from_settings(settings);
    let mut recorder = ReplayRecorder::new(&state);
    let mut interval = tick_interval(settings.tick_interval_ms);
    interval.tick().await;

    draw(terminal.stdout(), &state, "Live")?;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                state.advance();
                draw(terminal.stdout(), &state, "Live")?;
                if state.is_game_over() {
                    break;
                }
            }
            command = command_rx.recv() => {
                match command {
                    Some(ClientCommand::Turn(direction)) => {
                        recorder.record_direction(state.tick(), direction);
                        state.request_direction_change(direction);
                    }
                    Some(ClientCommand::Continue) => {}
                    Some(ClientCommand::Quit) | None => {
                        log!("Player quit at tick {}", state.tick());
                        break;
                    }
                }
            }
        }
    }

    let mut summary = GameSummary::from_state(&state);

    if replay_config.save {
        let replay = recorder.finalize(&state);
        let replay_dir = Path::new(&replay_config.location);
        match std::fs::create_dir_all(replay_dir) {
            Err(e) => log!("Failed to create replay directory: {}", e),
            Ok(()) => {
                let file_path = replay_dir.join(generate_replay_filename());
                match save_replay(&file_path, &replay) {
                    Ok(()) => {
                        log!("Replay saved to: {}", file_path.display());
                        summary.replay_path = Some(file_path);
                    }
                    Err(e) => log!("Failed to save replay: {}", e),
                }
            }
        }
    }

    if state.is_game_over() {
        wait_for_key(command_rx).await;
    }

    Ok(summary)
}

pub async fn run_replay(
    terminal: &mut TerminalGuard,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    replay_path: &Path,
    tick_interval_ms: u64,
) -> Result<GameSummary, Box<dyn Error>> {
    let replay = load_replay(replay_path)?;
    log!(
        "Playing replay {} (engine {}, seed {}, {} ticks)",
        replay_path.display(),
        replay.engine_version,
        replay.seed,
        replay.total_ticks
    );

    let mut player = ReplayPlayer::new(replay)?;
    let mut interval = tick_interval(tick_interval_ms);
    interval.tick().await;

    draw(terminal.stdout(), player.state(), "Replay")?;

    while !player.is_finished() {
        tokio::select! {
            _ = interval.tick() => {
                player.step();
                draw(terminal.stdout(), player.state(), "Replay")?;
            }
            command = command_rx.recv() => {
                if matches!(command, Some(ClientCommand::Quit) | None) {
                    return Ok(GameSummary::from_state(player.state()));
                }
            }
        }
    }

    if player.state().score() != player.replay().final_score {
        log!(
            "Replay diverged: recorded score {}, replayed score {}",
            player.replay().final_score,
            player.state().score()
        );
    }

    wait_for_key(command_rx).await;
    Ok(GameSummary::from_state(player.state()))
}
