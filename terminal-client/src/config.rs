use serde::{Deserialize, Serialize};
use snake_engine::GameSettings;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "snake_terminal_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save && self.location.trim().is_empty() {
            return Err("Replay location must be set when saving replays".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: GameSettings,
    pub replays: ReplayConfig,
    pub log_file: String,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.replays.validate()?;
        if self.log_file.trim().is_empty() {
            return Err("Log file must be set".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            replays: ReplayConfig {
                save: true,
                location: "snakereplays".to_string(),
            },
            log_file: "snake_terminal.log".to_string(),
        }
    }
}
