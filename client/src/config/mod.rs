mod config;
mod pacing_config;
mod replay_config;

pub use config::{get_config_manager, Config};
pub use pacing_config::PacingConfig;
pub use replay_config::ReplayConfig;
