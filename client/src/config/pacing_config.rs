use std::time::Duration;

use fruit_tracker_common::config::Validate;
use fruit_tracker_common::games::match3::SessionPacing;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PacingConfig {
    pub tick_interval_ms: u64,
    pub cascade_step_delay_ms: u64,
}

impl PacingConfig {
    pub fn to_session_pacing(&self) -> SessionPacing {
        SessionPacing {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            cascade_step_delay: Duration::from_millis(self.cascade_step_delay_ms),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            cascade_step_delay_ms: 250,
        }
    }
}

impl Validate for PacingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".to_string());
        }
        if self.cascade_step_delay_ms > 5000 {
            return Err("cascade_step_delay_ms must be at most 5000".to_string());
        }
        Ok(())
    }
}
