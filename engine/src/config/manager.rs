use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::log;
use super::{ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate, YamlConfigSerializer};

/// Loads, validates and caches one config document. A missing document
/// yields `TConfig::default()`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().map_err(|_| "Config lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        let mut current = self.config.lock().map_err(|_| "Config lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }

    /// Like `get_config`, but writes the defaults out when nothing is stored
    /// so the user has a file to edit.
    pub fn get_or_create_config(&self) -> Result<TConfig, String> {
        if self.config_content_provider.get_config_content()?.is_some() {
            return self.get_config();
        }
        let config = TConfig::default();
        self.set_config(&config)?;
        log!("Wrote default config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSettings;

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_engine_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_settings_round_trip_through_yaml_string() {
        let settings = GameSettings {
            seed: Some(1234),
            ..GameSettings::default()
        };
        let serializer = YamlConfigSerializer::new();
        let text = ConfigSerializer::<GameSettings>::serialize(&serializer, &settings).unwrap();
        let loaded: GameSettings = serializer.deserialize(&text).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_missing_seed_defaults_to_none() {
        let serializer = YamlConfigSerializer::new();
        let loaded: GameSettings = serializer
            .deserialize("rows: 10\ncols: 12\ntick_interval_ms: 100\n")
            .unwrap();
        assert_eq!(loaded.seed, None);
        assert_eq!(loaded.cols, 12);
    }

    #[test]
    fn test_manager_saves_and_loads() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(path.clone());
        let settings = GameSettings {
            rows: 9,
            cols: 11,
            tick_interval_ms: 80,
            seed: Some(5),
        };
        assert!(manager.set_config(&settings).is_ok());
        assert_eq!(manager.get_config().unwrap(), settings);

        let fresh: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(fresh.get_config().unwrap(), settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let manager: ConfigManager<_, GameSettings> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), GameSettings::default());
    }

    #[test]
    fn test_get_or_create_writes_defaults() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(manager.get_or_create_config().unwrap(), GameSettings::default());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = get_temp_file_path();
        std::fs::write(&path, "rows: 5\ncols: 2\ntick_interval_ms: 100\n").unwrap();
        let manager: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(path.clone());
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let path = get_temp_file_path();
        let manager: ConfigManager<_, GameSettings> = ConfigManager::from_yaml_file(path.clone());
        let settings = GameSettings {
            rows: 0,
            ..GameSettings::default()
        };
        assert!(manager.set_config(&settings).is_err());
        assert!(!path.exists());
    }
}
