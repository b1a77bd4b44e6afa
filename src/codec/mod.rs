//! Wire format selection.
//!
//! `Format` picks the encoding used on both the publish and the subscribe
//! path. It carries no behavior of its own: the publisher and the subscriber
//! each branch on it independently.
//!
//! Format names coming from configuration or other text sources are parsed
//! strictly. An unknown name is a `FormatError`, never a fallback to some
//! default encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    /// Text encoding through `serde_json`.
    Json,
    /// Compact binary encoding through `rmp_serde`.
    MessagePack,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::MessagePack => "MessagePack",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "messagepack" | "msgpack" => Ok(Format::MessagePack),
            _ => Err(FormatError::Unsupported(s.to_string())),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.as_str().to_string()
    }
}
