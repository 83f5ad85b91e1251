use std::path::Path;
use chrono::Local;

use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION, Replay};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    FormatError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    Mismatch(String),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::FormatError(e) => write!(f, "Format error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::Mismatch(reason) => write!(f, "Replay does not fit the engine: {}", reason),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for ReplayError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ReplayError::FormatError(e)
    }
}

pub fn save_replay_to_string(replay: &Replay) -> Result<String, ReplayError> {
    Ok(serde_yaml_ng::to_string(replay)?)
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let content = save_replay_to_string(replay)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_replay_from_str(content: &str) -> Result<Replay, ReplayError> {
    let replay: Replay = serde_yaml_ng::from_str(content)?;
    if replay.version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.version,
            expected: REPLAY_VERSION,
        });
    }
    Ok(replay)
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    load_replay_from_str(&content)
}

pub fn generate_replay_filename() -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("snake_{}.{}", timestamp, REPLAY_FILE_EXTENSION)
}
