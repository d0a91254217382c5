//! crates/logging/src/config.rs
//! Logging configuration: the enabled flag, the root threshold and
//! per-logger level directives.

use std::env;

use crate::error::ConfigError;
use crate::level::Level;

/// Environment variable holding the process-wide enabled flag.
pub const ENABLED_ENV_VAR: &str = "LOGGING_ENABLED";

/// Environment variable holding a comma-separated list of level directives.
pub const LEVELS_ENV_VAR: &str = "LOGGING_LEVELS";

/// Level override for one logger.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDirective {
    /// Dotted logger name; empty for the root logger.
    pub logger: String,
    /// Explicit level, or `None` to inherit from the parent.
    pub level: Option<Level>,
}

impl LevelDirective {
    /// Parses a single directive token.
    ///
    /// Accepted forms are `name=LEVEL`, a bare `LEVEL` (applies to the root),
    /// and `name=` or `name=INHERIT` (clears the logger's explicit level).
    /// Levels are predefined names in any case or numeric weights.
    ///
    /// ```
    /// use logging::{Level, LevelDirective};
    ///
    /// let directive = LevelDirective::parse("net.http=fine").unwrap();
    /// assert_eq!(directive.logger, "net.http");
    /// assert_eq!(directive.level, Some(Level::FINE));
    ///
    /// let root = LevelDirective::parse("WARNING").unwrap();
    /// assert_eq!(root.logger, "");
    /// ```
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyDirective);
        }

        let (logger, level_text) = match token.split_once('=') {
            Some((logger, level)) => (logger.trim(), level.trim()),
            None => ("", token),
        };

        let level = if level_text.is_empty() || level_text.eq_ignore_ascii_case("inherit") {
            None
        } else {
            let level = level_text
                .parse::<Level>()
                .map_err(|source| ConfigError::InvalidLevel {
                    directive: token.to_owned(),
                    source,
                })?;
            Some(level)
        };

        Ok(Self {
            logger: logger.to_owned(),
            level,
        })
    }
}

/// Configuration applied to a [`LogManager`](crate::LogManager).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggingConfig {
    /// When `false`, every logging operation is a no-op.
    pub enabled: bool,
    /// Explicit threshold for the root logger.
    pub root_level: Option<Level>,
    /// Per-logger overrides, applied in order.
    pub directives: Vec<LevelDirective>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_level: None,
            directives: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// A configuration with logging switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Parses a comma-separated directive list such as `"INFO,net=FINE"`.
    ///
    /// Empty items between commas are skipped. Bare levels set
    /// [`root_level`](Self::root_level).
    pub fn parse_directives(directives: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for token in directives.split(',').filter(|token| !token.trim().is_empty()) {
            config.apply_directive(token)?;
        }
        Ok(config)
    }

    /// Parses `token` and records it.
    pub fn apply_directive(&mut self, token: &str) -> Result<(), ConfigError> {
        let directive = LevelDirective::parse(token)?;
        if directive.logger.is_empty() {
            self.root_level = directive.level;
        } else {
            self.directives.push(directive);
        }
        Ok(())
    }

    /// Builds a configuration from [`ENABLED_ENV_VAR`] and [`LEVELS_ENV_VAR`].
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(LEVELS_ENV_VAR) {
            Some(directives) => Self::parse_directives(&directives)?,
            None => Self::default(),
        };

        if let Some(flag) = lookup(ENABLED_ENV_VAR) {
            config.enabled = parse_flag(&flag)?;
        }

        Ok(config)
    }
}

/// Interprets common boolean spellings, ignoring ASCII case and whitespace.
fn parse_flag(text: &str) -> Result<bool, ConfigError> {
    const TRUE: [&str; 5] = ["1", "true", "yes", "on", ""];
    const FALSE: [&str; 4] = ["0", "false", "no", "off"];

    let trimmed = text.trim();

    if TRUE.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
        Ok(true)
    } else if FALSE.iter().any(|word| trimmed.eq_ignore_ascii_case(word)) {
        Ok(false)
    } else {
        Err(ConfigError::InvalidFlag(text.to_owned()))
    }
}
