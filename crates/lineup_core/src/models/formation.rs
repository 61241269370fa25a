use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tactical shape of the outfield players: ordered line sizes from the
/// defensive line forward, e.g. `[4, 2, 3, 1]` for "4-2-3-1".
///
/// Serialized as its canonical label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Formation {
    lines: Vec<u8>,
}

impl Formation {
    /// Build from line sizes, dropping empty lines.
    pub fn from_lines(lines: impl IntoIterator<Item = u8>) -> Self {
        Self { lines: lines.into_iter().filter(|&n| n > 0).collect() }
    }

    /// Build from raw counts, saturating at `u8::MAX`.
    pub fn from_counts(counts: impl IntoIterator<Item = usize>) -> Self {
        Self::from_lines(counts.into_iter().map(|n| u8::try_from(n).unwrap_or(u8::MAX)))
    }

    pub fn lines(&self) -> &[u8] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Canonical label, e.g. "4-2-3-1".
    pub fn label(&self) -> String {
        self.lines.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("-")
    }

    pub fn defenders(&self) -> u8 {
        self.lines.first().copied().unwrap_or(0)
    }

    /// Forward line size; a single-line formation has no forward line.
    pub fn forwards(&self) -> u8 {
        if self.lines.len() < 2 {
            0
        } else {
            self.lines.last().copied().unwrap_or(0)
        }
    }

    /// Line sizes strictly between the defensive and forward lines.
    pub fn midfield_lines(&self) -> &[u8] {
        if self.lines.len() <= 2 {
            &[]
        } else {
            &self.lines[1..self.lines.len() - 1]
        }
    }

    pub fn midfielders(&self) -> u8 {
        self.midfield_lines().iter().fold(0u8, |acc, &n| acc.saturating_add(n))
    }

    pub fn outfield_count(&self) -> usize {
        self.lines.iter().map(|&n| n as usize).sum()
    }

    /// Named formation with exactly this shape, if catalogued.
    pub fn known(&self) -> Option<KnownFormation> {
        KnownFormation::ALL.iter().copied().find(|k| k.lines() == self.lines.as_slice())
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Formation {
    type Err = LayoutError;

    /// Accepts "4-2-3-1", "4231" and trailing descriptors such as
    /// "4-4-2 Diamond" (only the leading token is read).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidFormation(s.to_string());
        let token = s.split_whitespace().next().ok_or_else(invalid)?;

        let lines: Vec<u8> = if token.contains('-') {
            token
                .split('-')
                .map(|part| part.parse::<u8>().ok().filter(|&n| n > 0))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?
        } else {
            token
                .chars()
                .map(|c| c.to_digit(10).filter(|&d| d > 0).map(|d| d as u8))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?
        };

        if lines.len() < 2 {
            return Err(invalid());
        }
        Ok(Self { lines })
    }
}

impl From<Formation> for String {
    fn from(formation: Formation) -> Self {
        formation.label()
    }
}

impl TryFrom<String> for Formation {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KnownFormation> for Formation {
    fn from(known: KnownFormation) -> Self {
        Self::from_lines(known.lines().iter().copied())
    }
}

/// Catalogue of named formations the detector and layout recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownFormation {
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-1-1")]
    F4411,
    #[serde(rename = "4-3-2-1")]
    F4321,
    #[serde(rename = "4-2-2-2")]
    F4222,
    #[serde(rename = "4-5-1")]
    F451,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "3-4-2-1")]
    F3421,
    #[serde(rename = "3-4-1-2")]
    F3412,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "4-1-4-1")]
    F4141,
    #[serde(rename = "3-4-3")]
    F343,
    #[serde(rename = "5-4-1")]
    F541,
    #[serde(rename = "4-3-1-2")]
    F4312,
    #[serde(rename = "4-1-2-1-2")]
    F41212,
}

impl KnownFormation {
    pub const ALL: [KnownFormation; 16] = [
        Self::F442,
        Self::F433,
        Self::F4411,
        Self::F4321,
        Self::F4222,
        Self::F451,
        Self::F352,
        Self::F3421,
        Self::F3412,
        Self::F532,
        Self::F4231,
        Self::F4141,
        Self::F343,
        Self::F541,
        Self::F4312,
        Self::F41212,
    ];

    pub fn lines(&self) -> &'static [u8] {
        match self {
            Self::F442 => &[4, 4, 2],
            Self::F433 => &[4, 3, 3],
            Self::F4411 => &[4, 4, 1, 1],
            Self::F4321 => &[4, 3, 2, 1],
            Self::F4222 => &[4, 2, 2, 2],
            Self::F451 => &[4, 5, 1],
            Self::F352 => &[3, 5, 2],
            Self::F3421 => &[3, 4, 2, 1],
            Self::F3412 => &[3, 4, 1, 2],
            Self::F532 => &[5, 3, 2],
            Self::F4231 => &[4, 2, 3, 1],
            Self::F4141 => &[4, 1, 4, 1],
            Self::F343 => &[3, 4, 3],
            Self::F541 => &[5, 4, 1],
            Self::F4312 => &[4, 3, 1, 2],
            Self::F41212 => &[4, 1, 2, 1, 2],
        }
    }

    /// Canonical formation code string (e.g., "4-3-3").
    pub fn code(&self) -> &'static str {
        match self {
            Self::F442 => "4-4-2",
            Self::F433 => "4-3-3",
            Self::F4411 => "4-4-1-1",
            Self::F4321 => "4-3-2-1",
            Self::F4222 => "4-2-2-2",
            Self::F451 => "4-5-1",
            Self::F352 => "3-5-2",
            Self::F3421 => "3-4-2-1",
            Self::F3412 => "3-4-1-2",
            Self::F532 => "5-3-2",
            Self::F4231 => "4-2-3-1",
            Self::F4141 => "4-1-4-1",
            Self::F343 => "3-4-3",
            Self::F541 => "5-4-1",
            Self::F4312 => "4-3-1-2",
            Self::F41212 => "4-1-2-1-2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashed_and_compact_labels() {
        let dashed: Formation = "4-2-3-1".parse().unwrap();
        let compact: Formation = "4231".parse().unwrap();
        assert_eq!(dashed, compact);
        assert_eq!(dashed.lines(), &[4, 2, 3, 1]);
        assert_eq!(dashed.label(), "4-2-3-1");

        let described: Formation = "  4-4-2 Diamond ".parse().unwrap();
        assert_eq!(described.label(), "4-4-2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "   ", "4", "4--2", "4-x-2", "4-0-2", "-4-4-2", "4402", "abc"] {
            assert!(bad.parse::<Formation>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_line_accessors() {
        let f: Formation = "4-2-3-1".parse().unwrap();
        assert_eq!(f.defenders(), 4);
        assert_eq!(f.midfield_lines(), &[2, 3]);
        assert_eq!(f.midfielders(), 5);
        assert_eq!(f.forwards(), 1);
        assert_eq!(f.outfield_count(), 10);

        let two: Formation = "5-5".parse().unwrap();
        assert!(two.midfield_lines().is_empty());
        assert_eq!(two.forwards(), 5);
    }

    #[test]
    fn test_from_counts_drops_empty_lines() {
        let f = Formation::from_counts([4, 0, 6]);
        assert_eq!(f.label(), "4-6");
        assert!(Formation::from_counts([0, 0]).is_empty());
    }

    #[test]
    fn test_known_catalogue_round_trips() {
        for known in KnownFormation::ALL {
            let formation: Formation = known.code().parse().unwrap();
            assert_eq!(formation.known(), Some(known), "{}", known.code());
            assert_eq!(formation.outfield_count(), 10, "{} should field 10", known.code());
        }
    }

    #[test]
    fn test_serializes_as_label() {
        let f: Formation = "3-5-2".parse().unwrap();
        assert_eq!(serde_json::to_string(&f).unwrap(), "\"3-5-2\"");
        let back: Formation = serde_json::from_str("\"3-5-2\"").unwrap();
        assert_eq!(back, f);
    }
}
