use serde::{Deserialize, Serialize};

use super::types::{BOARD_SIZE, GOAL_SCORE, SESSION_SECONDS, TILE_KINDS};
use crate::config::Validate;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub struct Match3Settings {
    pub board_size: usize,
    pub tile_kinds: u8,
    pub goal_score: u32,
    pub session_seconds: u32,
}

impl Validate for Match3Settings {
    fn validate(&self) -> Result<(), String> {
        if self.board_size < 4 || self.board_size > 10 {
            return Err(format!(
                "Board size must be between 4 and 10, got {}",
                self.board_size
            ));
        }
        if self.tile_kinds < 3 || self.tile_kinds > 12 {
            return Err(format!(
                "Tile kinds must be between 3 and 12, got {}",
                self.tile_kinds
            ));
        }
        if self.goal_score == 0 {
            return Err("Goal score must be at least 1".to_string());
        }
        if self.session_seconds == 0 {
            return Err("Session length must be at least 1 second".to_string());
        }
        Ok(())
    }
}

impl Default for Match3Settings {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            tile_kinds: TILE_KINDS,
            goal_score: GOAL_SCORE,
            session_seconds: SESSION_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Match3Settings::default().validate().is_ok());
    }

    #[test]
    fn test_board_size_bounds() {
        let mut settings = Match3Settings::default();
        settings.board_size = 3;
        assert!(settings.validate().is_err());
        settings.board_size = 11;
        assert!(settings.validate().is_err());
        settings.board_size = 10;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_needs_three_kinds() {
        let settings = Match3Settings {
            tile_kinds: 2,
            ..Match3Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.contains("Tile kinds"));
    }

    #[test]
    fn test_zero_goal_and_time_rejected() {
        let no_goal = Match3Settings {
            goal_score: 0,
            ..Match3Settings::default()
        };
        assert!(no_goal.validate().is_err());

        let no_time = Match3Settings {
            session_seconds: 0,
            ..Match3Settings::default()
        };
        assert!(no_time.validate().is_err());
    }
}
