use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MIN_ROWS: usize = 1;
pub const MIN_COLS: usize = 4;
pub const MAX_SIDE: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub rows: usize,
    pub cols: usize,
    pub tick_interval_ms: u64,
    /// Fixed food seed; a fresh one is drawn per game when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 20,
            tick_interval_ms: 150,
            seed: None,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_ROWS..=MAX_SIDE).contains(&self.rows) {
            return Err(format!("Rows must be between {} and {}", MIN_ROWS, MAX_SIDE));
        }
        if !(MIN_COLS..=MAX_SIDE).contains(&self.cols) {
            return Err(format!("Columns must be between {} and {}", MIN_COLS, MAX_SIDE));
        }
        if self.tick_interval_ms < 20 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_too_few_columns_rejected() {
        let settings = GameSettings {
            cols: 3,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let settings = GameSettings {
            rows: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_tick_interval_bounds() {
        let too_fast = GameSettings {
            tick_interval_ms: 5,
            ..GameSettings::default()
        };
        let too_slow = GameSettings {
            tick_interval_ms: 10_000,
            ..GameSettings::default()
        };
        assert!(too_fast.validate().is_err());
        assert!(too_slow.validate().is_err());
    }
}
