//! Session configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::color::{Color, ColorError};
use crate::consts::{DEFAULT_BRUSH_SIZE, DEFAULT_COLOR, DEFAULT_USER_COUNT, EXPORT_FILE_NAME, PRESENCE_INTERVAL};
use crate::presence::{PresenceConfig, PresenceState};
use crate::style::{StyleState, clamp_brush_size};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SKETCHBOARD_COLOR is not a valid color: {0}")]
    Color(#[from] ColorError),
    #[error("SKETCHBOARD_PRESENCE_INTERVAL_MS must be greater than zero")]
    ZeroInterval,
    #[error("SKETCHBOARD_EXPORT_FILE_NAME must not be empty")]
    EmptyFileName,
}

/// Startup values for a drawing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub color: Color,
    pub brush_size: u32,
    pub presence_interval: Duration,
    pub initial_users: u32,
    pub presence_seed: Option<u64>,
    pub export_file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x3b, 0x82, 0xf6),
            brush_size: DEFAULT_BRUSH_SIZE,
            presence_interval: PRESENCE_INTERVAL,
            initial_users: DEFAULT_USER_COUNT,
            presence_seed: None,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl SessionConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SKETCHBOARD_COLOR`: starting stroke color (default `#3b82f6`)
    /// - `SKETCHBOARD_BRUSH_SIZE`: starting brush size, clamped to 1..=30 (default 3)
    /// - `SKETCHBOARD_PRESENCE_INTERVAL_MS`: presence tick period (default 3000)
    /// - `SKETCHBOARD_INITIAL_USERS`: starting collaborator count, at least 1 (default 3)
    /// - `SKETCHBOARD_PRESENCE_SEED`: fixed presence RNG seed
    /// - `SKETCHBOARD_EXPORT_FILE_NAME`: suggested export file name
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a malformed color, a zero interval, or an
    /// empty file name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(_) => None,
        })
    }

    /// Same as [`SessionConfig::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`SessionConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let color = lookup("SKETCHBOARD_COLOR").unwrap_or_else(|| DEFAULT_COLOR.to_string()).parse::<Color>()?;
        let brush_size = clamp_brush_size(parse_or(lookup("SKETCHBOARD_BRUSH_SIZE"), i64::from(DEFAULT_BRUSH_SIZE)));

        let interval_ms = parse_or(lookup("SKETCHBOARD_PRESENCE_INTERVAL_MS"), millis(PRESENCE_INTERVAL));
        if interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let initial_users = parse_or(lookup("SKETCHBOARD_INITIAL_USERS"), DEFAULT_USER_COUNT).max(1);
        let presence_seed = lookup("SKETCHBOARD_PRESENCE_SEED").and_then(|raw| parse_opt::<u64>(&raw));

        let export_file_name = lookup("SKETCHBOARD_EXPORT_FILE_NAME").unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
        let export_file_name = export_file_name.trim().to_string();
        if export_file_name.is_empty() {
            return Err(ConfigError::EmptyFileName);
        }

        Ok(Self {
            color,
            brush_size,
            presence_interval: Duration::from_millis(interval_ms),
            initial_users,
            presence_seed,
            export_file_name,
        })
    }

    /// Initial style for a session built from this config.
    #[must_use]
    pub fn style(&self) -> StyleState {
        StyleState::new(self.color, i64::from(self.brush_size))
    }

    /// Presence simulator settings for a session built from this config.
    #[must_use]
    pub fn presence(&self) -> PresenceConfig {
        PresenceConfig {
            interval: self.presence_interval,
            initial: PresenceState::new(self.initial_users),
            seed: self.presence_seed,
        }
    }
}

fn parse_opt<T: FromStr>(raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.as_deref().and_then(parse_opt::<T>).unwrap_or(default)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
