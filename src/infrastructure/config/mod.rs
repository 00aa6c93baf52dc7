//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Users granted the admin flag at startup
    #[serde(default)]
    pub admins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub nick: String,
    pub channel: String,
    /// Pause between messages when dumping triggers
    #[serde(default = "default_list_delay_ms")]
    pub list_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

fn default_list_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                nick: "HelperBot".to_string(),
                channel: "#bots".to_string(),
                list_delay_ms: default_list_delay_ms(),
            },
            server: ServerConfig {
                host: "irc.libera.chat".to_string(),
                port: 6667,
            },
            database: DatabaseConfig {
                path: PathBuf::from("irc-helper.db"),
            },
            admins: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.nick.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.nick".to_string()));
        }
        if !self.bot.channel.starts_with('#') && !self.bot.channel.starts_with('&') {
            return Err(ConfigError::InvalidValue(format!(
                "bot.channel must start with # or &: {}",
                self.bot.channel
            )));
        }
        Ok(())
    }

    pub fn list_delay(&self) -> Duration {
        Duration::from_millis(self.bot.list_delay_ms)
    }

    /// Apply environment variable overrides
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = std::env::var("IRC_SERVER") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("IRC_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("IRC_PORT: {}", port)))?;
        }
        if let Ok(nick) = std::env::var("IRC_NICK") {
            self.bot.nick = nick;
        }
        if let Ok(channel) = std::env::var("IRC_CHANNEL") {
            self.bot.channel = channel;
        }
        if let Ok(path) = std::env::var("BOT_DATABASE") {
            self.database.path = PathBuf::from(path);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn load_env() -> Result<Self, ConfigError> {
        Config::default().apply_env()
    }
}
