//! Grid token parsing
//!
//! Upstream lineups may carry a compact `"row:column"` slot per player.
//! Row 1 is the goalkeeper row; higher rows move up the pitch. Column 1 is
//! the leftmost slot as seen by the team facing the opponent goal.

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row of the goalkeeper in upstream grids.
pub const GOALKEEPER_ROW: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u16,
    pub column: u16,
}

impl GridPosition {
    pub fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    pub fn is_goalkeeper_row(&self) -> bool {
        self.row == GOALKEEPER_ROW
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl FromStr for GridPosition {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidGrid { token: s.to_string() };

        let (row, column) = s.split_once(':').ok_or_else(invalid)?;
        let row = parse_index(row).ok_or_else(invalid)?;
        let column = parse_index(column).ok_or_else(invalid)?;

        Ok(Self { row, column })
    }
}

/// Positive integer part; rejects signs, zero and anything non-digit.
fn parse_index(part: &str) -> Option<u16> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u16>().ok().filter(|&n| n > 0)
}

/// Lenient form used by the layout path: a failure is just "no grid".
pub fn parse_grid(token: &str) -> Option<GridPosition> {
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tokens() {
        assert_eq!(parse_grid("1:1"), Some(GridPosition::new(1, 1)));
        assert_eq!(parse_grid("4:3"), Some(GridPosition::new(4, 3)));
        assert_eq!(parse_grid(" 2 : 5 "), Some(GridPosition::new(2, 5)));
        assert_eq!(parse_grid("12:10"), Some(GridPosition::new(12, 10)));
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for bad in ["", ":", "3", "3:", ":2", "a:b", "2:x", "1:2:3", "-1:2", "+2:1", "0:1", "2:0", "99999:1", "2.5:1"] {
            assert_eq!(parse_grid(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_strict_parse_reports_token() {
        let err = "x:1".parse::<GridPosition>().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGrid { ref token } if token == "x:1"));
    }

    #[test]
    fn test_display_round_trip() {
        let pos = GridPosition::new(3, 2);
        assert_eq!(pos.to_string(), "3:2");
        assert_eq!(parse_grid(&pos.to_string()), Some(pos));
        assert!(GridPosition::new(1, 1).is_goalkeeper_row());
    }
}
