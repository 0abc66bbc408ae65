use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day a record belongs to. Displays as `YYYY-MM-DD`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Reads the first ten characters, so both `2024-05-01` and
    /// `2024-05-01T08:30:00Z` name the same day.
    pub fn parse(value: &str) -> Result<Self, String> {
        let head: String = value.chars().take(10).collect();
        NaiveDate::parse_from_str(&head, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|e| format!("Invalid day key '{}': {}", value, e))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DayKey {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.date_naive())
    }
}

impl FromStr for DayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FruitLogEntry {
    pub fruit_id: String,
    pub timestamp_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrinkEntry {
    pub drink: String,
    pub milliliters: u32,
    pub timestamp_ms: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayRecord {
    pub fruit: BTreeMap<String, u32>,
    pub fruit_log: Vec<FruitLogEntry>,
    pub drinks: Vec<DrinkEntry>,
}

impl DayRecord {
    pub fn fruit_count(&self, fruit_id: &str) -> u32 {
        self.fruit.get(fruit_id).copied().unwrap_or(0)
    }

    pub fn total_milliliters(&self) -> u32 {
        self.drinks.iter().map(|d| d.milliliters).sum()
    }
}

pub trait TrackerStore {
    fn add_fruit(&mut self, day: DayKey, fruit_id: &str, delta: i32);
    fn add_drink(&mut self, day: DayKey, drink: &str, milliliters: u32, timestamp_ms: i64);
    /// Returns false when the day was already current.
    fn set_current_date(&mut self, day: DayKey) -> bool;
    fn current_date(&self) -> Option<DayKey>;
    fn day(&self, day: DayKey) -> Option<&DayRecord>;
}

/// In-memory tracker. Days are created on first write.
#[derive(Clone, Debug, Default)]
pub struct DailyLog {
    days: BTreeMap<DayKey, DayRecord>,
    current_date: Option<DayKey>,
}

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn days(&self) -> impl Iterator<Item = (&DayKey, &DayRecord)> {
        self.days.iter()
    }

    /// Counter never goes below zero. Only increments are logged.
    pub fn add_fruit_at(&mut self, day: DayKey, fruit_id: &str, delta: i32, timestamp_ms: i64) {
        let record = self.days.entry(day).or_default();
        let current = record.fruit_count(fruit_id) as i64;
        let updated = (current + delta as i64).clamp(0, u32::MAX as i64) as u32;
        record.fruit.insert(fruit_id.to_string(), updated);

        if delta > 0 {
            record.fruit_log.push(FruitLogEntry {
                fruit_id: fruit_id.to_string(),
                timestamp_ms,
            });
        }
    }
}

impl TrackerStore for DailyLog {
    fn add_fruit(&mut self, day: DayKey, fruit_id: &str, delta: i32) {
        self.add_fruit_at(day, fruit_id, delta, Utc::now().timestamp_millis());
    }

    fn add_drink(&mut self, day: DayKey, drink: &str, milliliters: u32, timestamp_ms: i64) {
        self.days.entry(day).or_default().drinks.push(DrinkEntry {
            drink: drink.to_string(),
            milliliters,
            timestamp_ms,
        });
    }

    fn set_current_date(&mut self, day: DayKey) -> bool {
        if self.current_date == Some(day) {
            return false;
        }
        self.current_date = Some(day);
        true
    }

    fn current_date(&self) -> Option<DayKey> {
        self.current_date
    }

    fn day(&self, day: DayKey) -> Option<&DayRecord> {
        self.days.get(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> DayKey {
        DayKey::parse(value).unwrap()
    }

    #[test]
    fn test_day_key_parses_date_and_datetime_strings() {
        assert_eq!(day("2024-05-01"), day("2024-05-01T23:59:59.000Z"));
        assert_eq!(day("2024-05-01").to_string(), "2024-05-01");
        assert!(DayKey::parse("05/01/2024").is_err());
        assert!(DayKey::parse("").is_err());
        assert_eq!("2024-02-29".parse::<DayKey>().unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn test_day_key_from_datetime() {
        let moment = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        assert_eq!(DayKey::from(moment), day("2024-05-01"));
    }

    #[test]
    fn test_add_fruit_increments_and_logs() {
        let mut log = DailyLog::new();
        let today = day("2024-05-01");

        log.add_fruit_at(today, "apple", 1, 100);
        log.add_fruit_at(today, "apple", 2, 200);

        let record = log.day(today).unwrap();
        assert_eq!(record.fruit_count("apple"), 3);
        assert_eq!(record.fruit_log.len(), 2);
        assert_eq!(record.fruit_log[1].timestamp_ms, 200);
    }

    #[test]
    fn test_fruit_counter_clamps_at_zero_without_logging() {
        let mut log = DailyLog::new();
        let today = day("2024-05-01");

        log.add_fruit_at(today, "kiwi", 1, 100);
        log.add_fruit(today, "kiwi", -5);

        let record = log.day(today).unwrap();
        assert_eq!(record.fruit_count("kiwi"), 0);
        assert_eq!(record.fruit_log.len(), 1);
    }

    #[test]
    fn test_decrement_on_untouched_fruit_stays_zero() {
        let mut log = DailyLog::new();
        let today = day("2024-05-02");
        log.add_fruit(today, "mango", -1);
        let record = log.day(today).unwrap();
        assert_eq!(record.fruit_count("mango"), 0);
        assert!(record.fruit_log.is_empty());
    }

    #[test]
    fn test_drinks_are_appended_per_day() {
        let mut log = DailyLog::new();
        let monday = day("2024-05-06");
        let tuesday = day("2024-05-07");

        log.add_drink(monday, "water", 250, 1);
        log.add_drink(monday, "tea", 200, 2);
        log.add_drink(tuesday, "water", 500, 3);

        assert_eq!(log.day(monday).unwrap().drinks.len(), 2);
        assert_eq!(log.day(monday).unwrap().total_milliliters(), 450);
        assert_eq!(log.day(tuesday).unwrap().drinks[0].drink, "water");
        assert!(log.day(day("2024-05-08")).is_none());
        assert_eq!(log.days().count(), 2);
    }

    #[test]
    fn test_set_current_date_reports_change() {
        let mut log = DailyLog::new();
        assert_eq!(log.current_date(), None);
        assert!(log.set_current_date(day("2024-05-01")));
        assert!(!log.set_current_date(day("2024-05-01T10:00:00")));
        assert!(log.set_current_date(day("2024-05-02")));
        assert_eq!(log.current_date(), Some(day("2024-05-02")));
    }
}
