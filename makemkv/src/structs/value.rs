//! Typed attribute values.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attribute value after code translation, before schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(u64),
    Text(String),
}

impl Value {
    /// Integer for all-digit input, trimmed text otherwise.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse() {
                return Value::Integer(n);
            }
        }
        Value::Text(raw.to_string())
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Text form of the value. Integers are rendered back to digits.
    pub fn into_text(self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => s,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscType {
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "BD")]
    Bluray,
    #[serde(rename = "HDDVD")]
    HdDvd,
    #[serde(rename = "MKV")]
    Mkv,
}

impl FromStr for DiscType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DVD" => Ok(DiscType::Dvd),
            "BD" => Ok(DiscType::Bluray),
            "HDDVD" => Ok(DiscType::HdDvd),
            "MKV" => Ok(DiscType::Mkv),
            _ => Err(()),
        }
    }
}

impl Display for DiscType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscType::Dvd => write!(f, "DVD"),
            DiscType::Bluray => write!(f, "BD"),
            DiscType::HdDvd => write!(f, "HDDVD"),
            DiscType::Mkv => write!(f, "MKV"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Subtitles,
}

impl FromStr for StreamType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(StreamType::Video),
            "audio" => Ok(StreamType::Audio),
            "subtitles" => Ok(StreamType::Subtitles),
            _ => Err(()),
        }
    }
}

impl Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamType::Video => write!(f, "video"),
            StreamType::Audio => write!(f, "audio"),
            StreamType::Subtitles => write!(f, "subtitles"),
        }
    }
}

/// Video frame rate, either whole (`25`) or fractional (`23.976`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Framerate {
    Integer(u64),
    Fractional(f64),
}

impl Framerate {
    /// Accepts an integer value or text such as `"23.976 (120000/5005)"`,
    /// where only the leading number counts.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Framerate::Integer(*n)),
            Value::Text(s) => {
                let head = s.split_whitespace().next()?;
                let rate = head.parse::<f64>().ok().filter(|r| r.is_finite())?;
                Some(Framerate::Fractional(rate))
            }
        }
    }
}

impl Display for Framerate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framerate::Integer(n) => write!(f, "{n}"),
            Framerate::Fractional(r) => write!(f, "{r}"),
        }
    }
}
