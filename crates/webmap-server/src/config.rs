use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use webmap_common::{Result, WebMapError};
use webmap_logger::{log, LogSeverity};

/// Runtime settings, stored as JSON next to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the map service, with a trailing slash
    pub url: String,
    pub render_threads: usize,
    pub upload_threads: usize,
    /// Packets per automatic batch flush
    pub batch_size: usize,
    /// Server ticks between two metadata uploads
    pub tick_interval: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "https://map.conczin.net/".to_owned(),
            render_threads: 1,
            upload_threads: 2,
            batch_size: 100,
            tick_interval: 200,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Reads the config at `path`, or writes the defaults there if it does not exist yet
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                log(format!("Loaded config from {}", path.display()), LogSeverity::Info);
                Ok(serde_json::from_str(&contents)?)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let config = Config::default();
                fs::write(path, serde_json::to_string_pretty(&config)?)?;
                log(
                    format!("Wrote default config to {}", path.display()),
                    LogSeverity::Info,
                );
                Ok(config)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(WebMapError::ConfigError("url must not be empty".to_owned()));
        }
        if self.render_threads == 0 {
            return Err(WebMapError::ConfigError(
                "render_threads must be at least 1".to_owned(),
            ));
        }
        if self.upload_threads == 0 {
            return Err(WebMapError::ConfigError(
                "upload_threads must be at least 1".to_owned(),
            ));
        }
        if self.batch_size == 0 {
            return Err(WebMapError::ConfigError(
                "batch_size must be at least 1".to_owned(),
            ));
        }
        if self.tick_interval == 0 {
            return Err(WebMapError::ConfigError(
                "tick_interval must be at least 1".to_owned(),
            ));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn log_severity(&self) -> Result<LogSeverity> {
        self.log_level
            .parse()
            .map_err(WebMapError::ConfigError)
    }
}
