use crate::error::AppResult;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BreakEvent {
    pub start: NaiveDateTime,
    pub minutes: u64,
    pub snoozes: u32,
}

/// Accumulated breaks for a single calendar day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub total_minutes: u64,
    pub breaks: Vec<BreakEvent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub report_sent: bool,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        DailyRecord {
            date,
            total_minutes: 0,
            breaks: Vec::new(),
            report_sent: false,
        }
    }

    pub fn record(&mut self, event: BreakEvent) {
        self.total_minutes += event.minutes;
        self.breaks.push(event);
    }
}

/// Holds at most one daily record.
pub trait DataStore {
    fn read(&self) -> AppResult<Option<DailyRecord>>;
    fn write(&self, record: &DailyRecord) -> AppResult<()>;
}

pub struct JsonDataStore {
    path: PathBuf,
}

impl JsonDataStore {
    pub fn new(path: PathBuf) -> Self {
        JsonDataStore { path }
    }
}

impl DataStore for JsonDataStore {
    fn read(&self) -> AppResult<Option<DailyRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }

    fn write(&self, record: &DailyRecord) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), date = %record.date, "saved break data");
        Ok(())
    }
}

/// Returns the stored record if it belongs to `today`, otherwise a fresh one.
pub fn load_break_data(store: &impl DataStore, today: NaiveDate) -> AppResult<DailyRecord> {
    match store.read()? {
        Some(record) if record.date == today => Ok(record),
        Some(stale) => {
            tracing::debug!(stored = %stale.date, %today, "discarding record from another day");
            Ok(DailyRecord::new(today))
        }
        None => Ok(DailyRecord::new(today)),
    }
}

pub fn save_break_data(store: &impl DataStore, record: &DailyRecord) -> AppResult<()> {
    store.write(record)
}
