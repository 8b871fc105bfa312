//! Rig Veda verse locations (`mandala.hymn.stanza`).

use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Position of a verse, e.g. `01.001.01` for mandala 1, hymn 1, stanza 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseLocation {
    pub mandala: u32,
    pub hymn: u32,
    pub stanza: u32,
}

impl VerseLocation {
    pub fn new(mandala: u32, hymn: u32, stanza: u32) -> Self {
        Self {
            mandala,
            hymn,
            stanza,
        }
    }

    /// Parse a `MANDALA.HYMN.STANZA` string. Leading zeros are allowed.
    pub fn parse(location: &str) -> Result<Self> {
        let parts: Vec<&str> = location.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(FilterError::invalid_location(
                location,
                format!("expected 3 dot-separated parts, found {}", parts.len()),
            ));
        }

        let mandala = parse_part(location, "mandala", parts[0])?;
        let hymn = parse_part(location, "hymn", parts[1])?;
        let stanza = parse_part(location, "stanza", parts[2])?;

        Ok(Self::new(mandala, hymn, stanza))
    }

    /// Path of the recitation audio for this verse, relative to the API base.
    pub fn audio_path(&self) -> String {
        format!("/audio/{}/{}/{}", self.mandala, self.hymn, self.stanza)
    }
}

/// Read the leading digits of a part. Anything after them is ignored, so
/// `1a` reads as 1, but a part must start with a digit.
fn parse_part(location: &str, name: &str, part: &str) -> Result<u32> {
    let part = part.trim_start();
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    let digits = &part[..end];
    if digits.is_empty() {
        return Err(FilterError::invalid_location(
            location,
            format!("{} '{}' is not a number", name, part),
        ));
    }
    digits.parse().map_err(|_| {
        FilterError::invalid_location(location, format!("{} '{}' is out of range", name, part))
    })
}

impl FromStr for VerseLocation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VerseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{:03}.{:02}", self.mandala, self.hymn, self.stanza)
    }
}
