//! In-memory stand-ins for the stores, the clock and the terminal.

use crate::clock::Clock;
use crate::config::{Config, ConfigStore, EmailConfig};
use crate::console::{Console, Reply, Tick};
use crate::data::{DailyRecord, DataStore};
use crate::error::AppResult;
use crate::notify::Notifier;
use crate::report::{MailError, Mailer};
use chrono::{Duration, NaiveDateTime};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(timestamp: &str) -> Self {
        FixedClock {
            now: Cell::new(timestamp.parse().expect("valid timestamp")),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[derive(Default)]
pub struct MemoryConfigStore {
    config: RefCell<Option<Config>>,
    writes: Cell<usize>,
}

impl MemoryConfigStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(config: Config) -> Self {
        MemoryConfigStore {
            config: RefCell::new(Some(config)),
            writes: Cell::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn exists(&self) -> bool {
        self.config.borrow().is_some()
    }

    fn read(&self) -> AppResult<Config> {
        Ok(self.config.borrow().clone().unwrap_or_default())
    }

    fn write(&self, config: &Config) -> AppResult<()> {
        *self.config.borrow_mut() = Some(config.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[derive(Default)]
pub struct MemoryDataStore {
    record: RefCell<Option<DailyRecord>>,
    writes: Cell<usize>,
}

impl MemoryDataStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(record: DailyRecord) -> Self {
        MemoryDataStore {
            record: RefCell::new(Some(record)),
            writes: Cell::new(0),
        }
    }

    pub fn stored(&self) -> Option<DailyRecord> {
        self.record.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl DataStore for MemoryDataStore {
    fn read(&self) -> AppResult<Option<DailyRecord>> {
        Ok(self.record.borrow().clone())
    }

    fn write(&self, record: &DailyRecord) -> AppResult<()> {
        *self.record.borrow_mut() = Some(record.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Replays canned prompt replies; every countdown second advances the clock.
pub struct ScriptedConsole<'a> {
    clock: &'a FixedClock,
    replies: VecDeque<Reply>,
    cancel_after: Option<usize>,
    ticks: usize,
}

impl<'a> ScriptedConsole<'a> {
    pub fn new(clock: &'a FixedClock) -> Self {
        ScriptedConsole {
            clock,
            replies: VecDeque::new(),
            cancel_after: None,
            ticks: 0,
        }
    }

    pub fn replies(mut self, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Cancels once this many countdown seconds have elapsed.
    pub fn cancel_after(mut self, ticks: usize) -> Self {
        self.cancel_after = Some(ticks);
        self
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl Console for ScriptedConsole<'_> {
    async fn tick(&mut self, _remaining_secs: u64, _total_secs: u64) -> Tick {
        if self.cancel_after == Some(self.ticks) {
            return Tick::Cancelled;
        }
        self.ticks += 1;
        self.clock.advance(Duration::seconds(1));
        Tick::Elapsed
    }

    fn clear_countdown(&mut self) {}

    async fn read_reply(&mut self, _prompt: &str) -> Reply {
        self.replies.pop_front().unwrap_or(Reply::Closed)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.sent.borrow_mut().push((title.to_string(), body.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub server: String,
    pub port: u16,
    pub from: String,
    pub to: String,
    pub subject: String,
}

/// Records every send; optionally fails all of them with the given message.
#[derive(Default)]
pub struct RecordingMailer {
    sent: RefCell<Vec<SentMail>>,
    calls: Cell<usize>,
    failure: Option<String>,
}

impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        RecordingMailer {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, email: &EmailConfig, subject: &str) -> Result<(), MailError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(message) = &self.failure {
            return Err(MailError::Transport(message.clone()));
        }
        self.sent.borrow_mut().push(SentMail {
            server: email.smtp_server.clone(),
            port: email.smtp_port,
            from: email.from_email.clone(),
            to: email.to_email.clone(),
            subject: subject.to_string(),
        });
        Ok(())
    }
}

pub fn enabled_email() -> Config {
    Config {
        default_snooze_minutes: 5,
        email: EmailConfig {
            enabled: true,
            smtp_server: "smtp.test.com".to_string(),
            smtp_port: 587,
            from_email: "test@example.com".to_string(),
            to_email: "recipient@example.com".to_string(),
            password: "test_password".to_string(),
        },
    }
}
