pub mod config;
pub mod games;
pub mod logger;
pub mod replay;
pub mod tracker;
pub mod version;
