mod config;
mod input;
mod render;
mod runner;

use std::path::{Path, PathBuf};
use clap::Parser;
use snake_engine::config::Validate;
use snake_engine::logger::{self, LogSink};
use snake_engine::{GameOverReason, log};
use tokio::sync::mpsc;

use input::spawn_input_thread;
use render::TerminalGuard;
use runner::GameSummary;

#[derive(Parser)]
#[command(name = "snake_terminal", about = "Classic single-snake game in the terminal")]
struct Args {
    /// Config file (defaults to one next to the executable)
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Fixed food seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    /// Play back a saved replay instead of a live game
    #[arg(long)]
    replay: Option<PathBuf>,
    #[arg(long)]
    no_save_replay: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

fn print_summary(summary: &GameSummary) {
    let ending = match summary.game_over_reason {
        Some(GameOverReason::WallCollision) => "hit the wall",
        Some(GameOverReason::SelfCollision) => "bit itself",
        None => "stopped",
    };
    println!(
        "Game {} after {} ticks. Final score: {}",
        ending, summary.ticks, summary.score
    );
    if let Some(path) = &summary.replay_path {
        println!("Replay saved to {}", path.display());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_or_create_config()?;
    if let Some(rows) = args.rows {
        config.game.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.game.cols = cols;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.game.tick_interval_ms = tick_ms;
    }
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }
    if args.no_save_replay {
        config.replays.save = false;
    }
    config.validate()?;

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogSink::append_to(Path::new(&config.log_file))?);
    log!(
        "Starting {}x{} game, tick {}ms",
        config.game.rows,
        config.game.cols,
        config.game.tick_interval_ms
    );

    let summary = {
        let mut terminal = TerminalGuard::enter()?;
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let input_thread = spawn_input_thread(command_tx);

        let result = match &args.replay {
            Some(path) => {
                runner::run_replay(&mut terminal, &mut command_rx, path, config.game.tick_interval_ms).await
            }
            None => runner::run_live_game(&mut terminal, &mut command_rx, &config.game, &config.replays).await,
        };

        drop(command_rx);
        if input_thread.join().is_err() {
            log!("Input thread panicked");
        }
        result?
    };

    log!("Session finished with score {}", summary.score);
    print_summary(&summary);
    Ok(())
}
