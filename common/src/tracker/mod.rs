mod day_log;
mod favorites;

pub use day_log::{DailyLog, DayKey, DayRecord, DrinkEntry, FruitLogEntry, TrackerStore};
pub use favorites::{FavoritesStore, TriedStore};
