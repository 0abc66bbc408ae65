use std::path::Path;

use serde::Deserialize;

use super::{Replay, REPLAY_FILE_EXTENSION, REPLAY_VERSION};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    DecodeError(serde_yaml_ng::Error),
    EncodeError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    EmptyFile,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::DecodeError(e) => write!(f, "Decode error: {}", e),
            ReplayError::EncodeError(e) => write!(f, "Encode error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::EmptyFile => write!(f, "Empty replay file"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

/// Read first so a newer file is reported as such instead of as a
/// confusing field error.
#[derive(Deserialize)]
struct ReplayHeader {
    format_version: u8,
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let content = save_replay_to_string(replay)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_replay_to_string(replay: &Replay) -> Result<String, ReplayError> {
    serde_yaml_ng::to_string(replay).map_err(ReplayError::EncodeError)
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    load_replay_from_str(&content)
}

pub fn load_replay_from_str(content: &str) -> Result<Replay, ReplayError> {
    if content.trim().is_empty() {
        return Err(ReplayError::EmptyFile);
    }

    let header: ReplayHeader =
        serde_yaml_ng::from_str(content).map_err(ReplayError::DecodeError)?;
    if header.format_version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: header.format_version,
            expected: REPLAY_VERSION,
        });
    }

    serde_yaml_ng::from_str(content).map_err(ReplayError::DecodeError)
}

pub fn generate_replay_filename(version: &str) -> String {
    let now = chrono::Local::now();
    let timestamp = now.format("%Y%m%d%H%M%S");
    let sanitized_version = version.replace('.', "_");

    format!("{}_MATCH3_{}.{}", timestamp, sanitized_version, REPLAY_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::match3::{Match3Input, Match3Settings};
    use crate::replay::ReplayEntry;

    fn create_test_replay() -> Replay {
        Replay {
            format_version: REPLAY_VERSION,
            engine_version: "1.0.0".to_string(),
            game_started_timestamp_ms: 1234567890,
            seed: 42,
            settings: Match3Settings::default(),
            initial_best_score: 7,
            actions: vec![
                ReplayEntry { tick: 0, input: Match3Input::Start },
                ReplayEntry { tick: 0, input: Match3Input::Select { row: 2, col: 3 } },
                ReplayEntry { tick: 1, input: Match3Input::Tick },
            ],
        }
    }

    #[test]
    fn test_save_load_replay_string() {
        let replay = create_test_replay();
        let content = save_replay_to_string(&replay).unwrap();
        let loaded = load_replay_from_str(&content).unwrap();
        assert_eq!(loaded, replay);
    }

    #[test]
    fn test_save_load_replay_file() {
        let path = std::env::temp_dir().join(format!(
            "fruit_tracker_replay_test_{}.{}",
            std::process::id(),
            REPLAY_FILE_EXTENSION
        ));
        let replay = create_test_replay();

        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.actions.len(), 3);
    }

    #[test]
    fn test_inputs_are_tagged_in_yaml() {
        let content = save_replay_to_string(&create_test_replay()).unwrap();
        assert!(content.contains("type: select"));
        assert!(content.contains("type: tick"));
    }

    #[test]
    fn test_generate_replay_filename() {
        let filename = generate_replay_filename("1.2.3");
        assert!(filename.ends_with(".fruitreplay"));
        assert!(filename.contains("MATCH3"));
        assert!(filename.contains("1_2_3"));
    }

    #[test]
    fn test_load_empty_file_error() {
        let result = load_replay_from_str("  \n");
        assert!(matches!(result, Err(ReplayError::EmptyFile)));
    }

    #[test]
    fn test_load_unsupported_version_error() {
        let result = load_replay_from_str("format_version: 99\nseed: 1\n");
        assert!(matches!(
            result,
            Err(ReplayError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let result = load_replay_from_str("format_version: 1\nseed: not-a-number\n");
        assert!(matches!(result, Err(ReplayError::DecodeError(_))));
    }
}
