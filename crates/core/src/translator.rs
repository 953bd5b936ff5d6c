//! Translator model - roster entries and throughput rates.

use serde::{Deserialize, Serialize};
use crate::id::TranslatorId;
use crate::lenient;

/// Words per hour assumed when a translator has no usable rate.
pub const DEFAULT_WORDS_PER_HOUR: u32 = 500;

/// Lines per hour assumed when a translator has no usable rate.
pub const DEFAULT_LINES_PER_HOUR: u32 = 50;

/// A translator on the agency roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translator {
    /// Unique identifier
    pub id: TranslatorId,

    /// Display name
    pub name: String,

    /// Short name (initials, nickname)
    #[serde(default)]
    pub short_name: Option<String>,

    /// Avatar reference
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Throughput in words per hour, as stored upstream
    #[serde(default, deserialize_with = "lenient::count")]
    pub words_per_hour: Option<i64>,

    /// Throughput in lines per hour, as stored upstream
    #[serde(default, deserialize_with = "lenient::count")]
    pub lines_per_hour: Option<i64>,
}

impl Translator {
    /// Create a translator with default rates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TranslatorId::new(),
            name: name.into(),
            short_name: None,
            avatar_url: None,
            words_per_hour: Some(DEFAULT_WORDS_PER_HOUR as i64),
            lines_per_hour: Some(DEFAULT_LINES_PER_HOUR as i64),
        }
    }

    /// Effective rates, substituting `fallback` for missing or non-positive values.
    pub fn rates(&self, fallback: Rates) -> Rates {
        Rates {
            words_per_hour: positive(self.words_per_hour).unwrap_or(fallback.words_per_hour),
            lines_per_hour: positive(self.lines_per_hour).unwrap_or(fallback.lines_per_hour),
        }
    }

    /// Identity and display fields, as embedded in assignments.
    pub fn to_ref(&self) -> TranslatorRef {
        TranslatorRef {
            id: self.id,
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Identity and display fields of a translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorRef {
    /// Translator ID
    pub id: TranslatorId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Short name
    #[serde(default)]
    pub short_name: Option<String>,

    /// Avatar reference
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Normalized throughput rates. Both values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    /// Words per hour
    pub words_per_hour: u32,
    /// Lines per hour
    pub lines_per_hour: u32,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            words_per_hour: DEFAULT_WORDS_PER_HOUR,
            lines_per_hour: DEFAULT_LINES_PER_HOUR,
        }
    }
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}
