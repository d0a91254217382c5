//! crates/logging/src/level.rs
//! Severity levels and the predefined level table.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::LevelParseError;

/// Named severity threshold with a numeric weight.
///
/// Higher values are more severe. A logger emits a record when the record's
/// level value is at least the logger's effective threshold, so enabling a
/// level implicitly enables every level above it.
///
/// Prefer the predefined constants such as [`Level::SEVERE`]. Two sentinels
/// bracket the table: [`Level::OFF`] carries the largest representable value
/// and disables output when used as a threshold, while [`Level::ALL`] carries
/// `0` and enables everything.
///
/// # Examples
///
/// ```
/// use logging::Level;
///
/// assert!(Level::SEVERE > Level::WARNING);
/// assert_eq!(Level::INFO.to_string(), "INFO");
///
/// let custom = Level::new("AUDIT", 950);
/// assert!(custom > Level::WARNING && custom < Level::SEVERE);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LevelRepr", into = "LevelRepr"))]
pub struct Level {
    name: Cow<'static, str>,
    value: u32,
}

impl Level {
    /// Disables logging. Its value acts as positive infinity.
    pub const OFF: Self = Self::from_static("OFF", u32::MAX);
    /// Extra-loud debugging output.
    pub const SHOUT: Self = Self::from_static("SHOUT", 1200);
    /// A serious failure.
    pub const SEVERE: Self = Self::from_static("SEVERE", 1000);
    /// A potential problem.
    pub const WARNING: Self = Self::from_static("WARNING", 900);
    /// Informational messages.
    pub const INFO: Self = Self::from_static("INFO", 800);
    /// Static configuration messages.
    pub const CONFIG: Self = Self::from_static("CONFIG", 700);
    /// Tracing information.
    pub const FINE: Self = Self::from_static("FINE", 500);
    /// Fairly detailed tracing.
    pub const FINER: Self = Self::from_static("FINER", 400);
    /// Highly detailed tracing.
    pub const FINEST: Self = Self::from_static("FINEST", 300);
    /// Enables every message.
    pub const ALL: Self = Self::from_static("ALL", 0);

    /// Creates a custom level. Names are not checked for uniqueness.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    const fn from_static(name: &'static str, value: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }

    /// Returns the level's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the level's numeric weight.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Reports whether this level is the [`Level::OFF`] sentinel.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.value == u32::MAX
    }

    /// Looks up a predefined level by name, ignoring ASCII case.
    ///
    /// ```
    /// use logging::Level;
    ///
    /// assert_eq!(Level::predefined("warning"), Some(Level::WARNING));
    /// assert_eq!(Level::predefined("VERBOSE"), None);
    /// ```
    #[must_use]
    pub fn predefined(name: &str) -> Option<Self> {
        PREDEFINED_LEVELS
            .iter()
            .find(|level| level.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Returns the most severe predefined level whose value does not exceed
    /// `value`.
    ///
    /// Custom numeric thresholds snap down to the table, so `850` maps to
    /// [`Level::INFO`] and anything below `300` maps to [`Level::ALL`].
    #[must_use]
    pub fn predefined_by_value(value: u32) -> Self {
        PREDEFINED_LEVELS
            .iter()
            .find(|level| level.value <= value)
            .cloned()
            .unwrap_or(Self::ALL)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::ALL
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    /// Parses a predefined level name or a bare numeric weight.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LevelParseError::new(s));
        }

        if let Some(level) = Self::predefined(trimmed) {
            return Ok(level);
        }

        trimmed
            .parse::<u32>()
            .map(Self::predefined_by_value)
            .map_err(|_| LevelParseError::new(s))
    }
}

/// Serialized form of a [`Level`].
///
/// Predefined levels are written by name (`"INFO"`). Custom levels keep both
/// fields. Strings are read through [`FromStr`], so names are matched without
/// regard to case and bare numbers snap to the table.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Name(String),
    Custom { name: String, value: u32 },
}

#[cfg(feature = "serde")]
impl From<Level> for LevelRepr {
    fn from(level: Level) -> Self {
        if Level::predefined(&level.name).as_ref() == Some(&level) {
            Self::Name(level.name.into_owned())
        } else {
            Self::Custom {
                name: level.name.into_owned(),
                value: level.value,
            }
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<LevelRepr> for Level {
    type Error = LevelParseError;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Name(name) => name.parse(),
            LevelRepr::Custom { name, value } => Ok(Self::new(name, value)),
        }
    }
}

/// Predefined levels ordered from most to least severe, sentinels included.
///
/// The table lives for the whole process, so entries can be borrowed as
/// `&'static Level`.
pub static PREDEFINED_LEVELS: [Level; 10] = [
    Level::OFF,
    Level::SHOUT,
    Level::SEVERE,
    Level::WARNING,
    Level::INFO,
    Level::CONFIG,
    Level::FINE,
    Level::FINER,
    Level::FINEST,
    Level::ALL,
];
