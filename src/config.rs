//! Terminal configuration
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

const ENV_TTY: &str = "QUICK_TERM_TTY";
const ENV_POLL_MS: &str = "QUICK_TERM_POLL_MS";
const ENV_SIGNALS: &str = "QUICK_TERM_SIGNALS";
const ENV_MOUSE_REMINDER: &str = "QUICK_TERM_MOUSE_REMINDER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Terminal device to open
    pub tty_path: String,
    /// Report SIGINT, SIGTERM and SIGQUIT as [`Error::Quit`]
    pub catch_signals: bool,
    /// Sleep between polls while waiting for input
    pub poll_interval_ms: u64,
    /// Print guidance on the first click without mouse-down handler
    pub mouse_reminder: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            tty_path: "/dev/tty".to_owned(),
            catch_signals: true,
            poll_interval_ms: 10,
            mouse_reminder: true,
        }
    }
}

impl TerminalConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from JSON file, missing fields take default values
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Default configuration overridden by `QUICK_TERM_*` environment variables
    pub fn from_env() -> Result<Self, Error> {
        Self::default().merge_env(|name| std::env::var(name).ok())
    }

    /// Override fields with values returned by `lookup` for `QUICK_TERM_*` names
    pub fn merge_env(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, Error> {
        if let Some(path) = lookup(ENV_TTY) {
            self.tty_path = path;
        }
        if let Some(value) = lookup(ENV_POLL_MS) {
            self.poll_interval_ms = value
                .trim()
                .parse()
                .map_err(|_| Error::ParseError(ENV_POLL_MS, value))?;
        }
        if let Some(value) = lookup(ENV_SIGNALS) {
            self.catch_signals = flag_parse(ENV_SIGNALS, value)?;
        }
        if let Some(value) = lookup(ENV_MOUSE_REMINDER) {
            self.mouse_reminder = flag_parse(ENV_MOUSE_REMINDER, value)?;
        }
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn flag_parse(name: &'static str, value: String) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::ParseError(name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_json() -> Result<(), Error> {
        let config = TerminalConfig::from_json(r#"{"poll_interval_ms": 25, "catch_signals": false}"#)?;
        assert_eq!(
            config,
            TerminalConfig {
                poll_interval_ms: 25,
                catch_signals: false,
                ..TerminalConfig::default()
            }
        );
        assert_eq!(config.poll_interval(), Duration::from_millis(25));

        let json = serde_json::to_string(&config)?;
        assert_eq!(TerminalConfig::from_json(&json)?, config);

        assert!(matches!(
            TerminalConfig::from_json(r#"{"poll_interval_ms": "fast"}"#),
            Err(Error::JsonError(..))
        ));
        Ok(())
    }

    #[test]
    fn test_load() -> Result<(), Error> {
        let path = std::env::temp_dir().join(format!("quick_term_config_{}", std::process::id()));
        std::fs::write(&path, r#"{"tty_path": "/dev/pts/7"}"#)?;
        let config = TerminalConfig::load(&path);
        std::fs::remove_file(&path)?;
        assert_eq!(config?.tty_path, "/dev/pts/7");
        Ok(())
    }

    #[test]
    fn test_merge_env() -> Result<(), Error> {
        let env: HashMap<&str, &str> = [
            ("QUICK_TERM_TTY", "/dev/pts/3"),
            ("QUICK_TERM_POLL_MS", " 5 "),
            ("QUICK_TERM_SIGNALS", "off"),
            ("QUICK_TERM_MOUSE_REMINDER", "0"),
        ]
        .into_iter()
        .collect();
        let config =
            TerminalConfig::default().merge_env(|name| env.get(name).map(|v| v.to_string()))?;
        assert_eq!(
            config,
            TerminalConfig {
                tty_path: "/dev/pts/3".to_owned(),
                catch_signals: false,
                poll_interval_ms: 5,
                mouse_reminder: false,
            }
        );

        let config = TerminalConfig::default().merge_env(|_| None)?;
        assert_eq!(config, TerminalConfig::default());

        let error = TerminalConfig::default().merge_env(|name| {
            (name == "QUICK_TERM_SIGNALS").then(|| "maybe".to_owned())
        });
        assert!(matches!(
            error,
            Err(Error::ParseError("QUICK_TERM_SIGNALS", value)) if value == "maybe"
        ));
        Ok(())
    }
}
