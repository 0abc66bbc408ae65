use std::path::{Path, PathBuf};

use fruit_tracker_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use fruit_tracker_common::games::match3::{INITIAL_BEST_SCORE, Match3Settings};
use serde::{Deserialize, Serialize};

use super::{PacingConfig, ReplayConfig};

const CONFIG_FILE_NAME: &str = "fruit_match_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Uses `path` when given, otherwise the file next to the executable.
pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: Match3Settings,
    #[serde(default)]
    pub pacing: PacingConfig,
    pub initial_best_score: u32,
    pub replays: ReplayConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.pacing.validate()?;
        self.replays.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: Match3Settings::default(),
            pacing: PacingConfig::default(),
            initial_best_score: INITIAL_BEST_SCORE,
            replays: ReplayConfig {
                save: true,
                location: "fruitreplays".to_string(),
            },
        }
    }
}
