use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use snake_engine::Direction;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    Turn(Direction),
    Quit,
    /// Any other key; used to dismiss the game-over screen.
    Continue,
}

pub fn key_to_command(key: KeyEvent) -> Option<ClientCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => ClientCommand::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => ClientCommand::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => ClientCommand::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => ClientCommand::Turn(Direction::Right),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ClientCommand::Quit,
        KeyCode::Char('q') | KeyCode::Esc => ClientCommand::Quit,
        _ => ClientCommand::Continue,
    };
    Some(command)
}

/// Reads keys on a dedicated thread and forwards them to the tick loop.
/// The thread exits once the receiver is dropped.
pub fn spawn_input_thread(command_tx: mpsc::UnboundedSender<ClientCommand>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !command_tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    snake_engine::log!("Input poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(command) = key_to_command(key)
                        && command_tx.send(command).is_err()
                    {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    snake_engine::log!("Input read failed: {}", e);
                    break;
                }
            }
        }
    })
}
