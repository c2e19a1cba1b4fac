use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub from_email: String,
    pub to_email: String,
    /// App-specific password, stored in plain text.
    pub password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            enabled: false,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            from_email: "your_email@gmail.com".to_string(),
            to_email: "your_email@gmail.com".to_string(),
            password: "your_app_password".to_string(),
        }
    }
}

// Plain values come before the `[email]` table so the TOML output stays valid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_snooze_minutes")]
    pub default_snooze_minutes: u32,
    #[serde(default)]
    pub email: EmailConfig,
}

fn default_snooze_minutes() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_snooze_minutes: default_snooze_minutes(),
            email: EmailConfig::default(),
        }
    }
}

/// Narrow load/save interface over wherever the configuration lives.
pub trait ConfigStore {
    fn exists(&self) -> bool;
    fn read(&self) -> AppResult<Config>;
    fn write(&self, config: &Config) -> AppResult<()>;
    fn location(&self) -> String;
}

pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: PathBuf) -> Self {
        FileConfigStore { path }
    }
}

impl ConfigStore for FileConfigStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> AppResult<Config> {
        let contents = std::fs::read_to_string(&self.path)?;
        let config = toml::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), "loaded config");
        Ok(config)
    }

    fn write(&self, config: &Config) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "wrote config");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Directory holding both the config and the daily data file.
pub fn default_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("break_tracker")
}

/// Writes the default config when none exists. Returns whether it already existed.
pub fn ensure_config(store: &impl ConfigStore) -> AppResult<bool> {
    if store.exists() {
        return Ok(true);
    }
    store.write(&Config::default())?;
    println!("Created config file at {}", store.location());
    println!("Please edit it to enable email notifications if desired.");
    Ok(false)
}

pub fn load_config(store: &impl ConfigStore) -> AppResult<Config> {
    if store.exists() {
        store.read()
    } else {
        Ok(Config::default())
    }
}
