use std::fmt;

use serde::{Serialize, Serializer};

use crate::ansi;

/// Message severity.
///
/// The scale is ordered so that numerically higher values are more verbose:
/// `ERROR(1) < WARNING(2) < INFO(3) < DEBUG(4)`. Values outside the catalog
/// are representable and render as `UNKNOWN` / `UNK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    pub const ERROR: Level = Level(1);
    pub const WARNING: Level = Level(2);
    pub const INFO: Level = Level(3);
    pub const DEBUG: Level = Level(4);

    pub const fn from_u8(value: u8) -> Self {
        Level(value)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Long name (`DEBUG`, `INFO`, `WARNING`, `ERROR`).
    pub fn as_str(&self) -> &'static str {
        match *self {
            Level::DEBUG => "DEBUG",
            Level::INFO => "INFO",
            Level::WARNING => "WARNING",
            Level::ERROR => "ERROR",
            _ => "UNKNOWN",
        }
    }

    /// Three-letter name used in bracketed text output.
    pub fn short(&self) -> &'static str {
        match *self {
            Level::DEBUG => "DBG",
            Level::INFO => "INF",
            Level::WARNING => "WRN",
            Level::ERROR => "ERR",
            _ => "UNK",
        }
    }

    pub fn color(&self) -> &'static str {
        match *self {
            Level::ERROR => ansi::ERROR,
            Level::WARNING => ansi::WARNING,
            Level::INFO => ansi::INFO,
            Level::DEBUG => ansi::DEBUG,
            _ => ansi::UNKNOWN,
        }
    }

    pub fn render(&self, short: bool, colors: bool) -> String {
        let name = if short { self.short() } else { self.as_str() };
        if colors {
            ansi::paint(self.color(), name)
        } else {
            name.to_string()
        }
    }

    /// Look up a prefix keyword. Only the lower-case forms `dbg`, `inf`,
    /// `wrn` and `err` are keywords.
    pub fn from_keyword(token: &str) -> Option<Level> {
        match token {
            "dbg" => Some(Level::DEBUG),
            "inf" => Some(Level::INFO),
            "wrn" => Some(Level::WARNING),
            "err" => Some(Level::ERROR),
            _ => None,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
