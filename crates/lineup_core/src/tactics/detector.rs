//! Formation detection
//!
//! Two sources of evidence, never mixed within one roster:
//! - **Grid mode**: any entry carries a parsable grid token. Row populations
//!   (goalkeeper row excluded) decide the shape.
//! - **Code mode**: no grid data. Classified line/role counts decide.
//!
//! Each mode consults one named exception table first so that shapes such as
//! 4-2-3-1 are not flattened into 4-5-1; otherwise the label is the plain
//! defenders-midfielders-forwards concatenation.

use super::classifier::{classify_entry, LineType, Role};
use super::grid::{parse_grid, GridPosition};
use crate::models::{Formation, KnownFormation, RosterEntry};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Grid,
    Code,
}

/// Grid mode as soon as one entry has a parsable grid token.
pub fn detection_mode(roster: &[RosterEntry]) -> DetectionMode {
    let has_grid = roster.iter().any(|e| e.grid.as_deref().and_then(parse_grid).is_some());
    if has_grid {
        DetectionMode::Grid
    } else {
        DetectionMode::Code
    }
}

/// Infer the formation of a roster. `None` when there is no outfield player.
pub fn detect_formation(roster: &[RosterEntry]) -> Option<Formation> {
    let mode = detection_mode(roster);
    let formation = match mode {
        DetectionMode::Grid => {
            let grids: Vec<GridPosition> =
                roster.iter().filter_map(|e| e.grid.as_deref().and_then(parse_grid)).collect();
            formation_from_grid(&grids)
        }
        DetectionMode::Code => formation_from_line_counts(&LineCounts::from_roster(roster)),
    };

    debug!(
        ?mode,
        players = roster.len(),
        formation = formation.as_ref().map(|f| f.label()).unwrap_or_default(),
        named = formation.as_ref().and_then(|f| f.known()).is_some(),
        "formation detected"
    );
    formation
}

/// Outfield row populations in ascending row order.
pub fn row_counts(grids: &[GridPosition]) -> Vec<usize> {
    let mut rows: BTreeMap<u16, usize> = BTreeMap::new();
    for grid in grids.iter().filter(|g| !g.is_goalkeeper_row()) {
        *rows.entry(grid.row).or_insert(0) += 1;
    }
    rows.into_values().collect()
}

pub fn formation_from_grid(grids: &[GridPosition]) -> Option<Formation> {
    formation_from_row_counts(&row_counts(grids))
}

/// Row counts → formation: named exception first, then defenders (first row),
/// summed middle rows, forwards (last row).
pub fn formation_from_row_counts(counts: &[usize]) -> Option<Formation> {
    if counts.iter().all(|&n| n == 0) {
        return None;
    }
    if let Some(known) = grid_exception(counts) {
        return Some(known.into());
    }

    let formation = match counts {
        [] => return None,
        [only] => Formation::from_counts([*only]),
        [first, middle @ .., last] => {
            Formation::from_counts([*first, middle.iter().sum(), *last])
        }
    };
    Some(formation)
}

/// Grid exception table, matched on the exact row-count sequence.
fn grid_exception(counts: &[usize]) -> Option<KnownFormation> {
    match counts {
        [4, 2, 3, 1] => Some(KnownFormation::F4231),
        [4, 1, 4, 1] => Some(KnownFormation::F4141),
        [4, 4, 1, 1] => Some(KnownFormation::F4411),
        [4, 3, 2, 1] => Some(KnownFormation::F4321),
        [4, 2, 2, 2] => Some(KnownFormation::F4222),
        [4, 3, 1, 2] => Some(KnownFormation::F4312),
        [3, 4, 2, 1] => Some(KnownFormation::F3421),
        [3, 4, 1, 2] => Some(KnownFormation::F3412),
        _ => None,
    }
}

/// Classified outfield counts, midfield split by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub defenders: usize,
    pub defensive_mids: usize,
    pub central_mids: usize,
    pub attacking_mids: usize,
    pub forwards: usize,
}

impl LineCounts {
    pub fn from_roster(roster: &[RosterEntry]) -> Self {
        let mut counts = Self::default();
        for entry in roster {
            let class = classify_entry(entry);
            match (class.line, class.role) {
                (LineType::Goalkeeper, _) => {}
                (LineType::Defender, _) => counts.defenders += 1,
                (LineType::Midfielder, Role::Defensive) => counts.defensive_mids += 1,
                (LineType::Midfielder, Role::Neutral) => counts.central_mids += 1,
                (LineType::Midfielder, Role::Offensive) => counts.attacking_mids += 1,
                (LineType::Forward, _) => counts.forwards += 1,
            }
        }
        counts
    }

    pub fn midfielders(&self) -> usize {
        self.defensive_mids + self.central_mids + self.attacking_mids
    }

    pub fn outfield(&self) -> usize {
        self.defenders + self.midfielders() + self.forwards
    }
}

/// Line counts → formation: role-driven exception first, then D-M-F.
pub fn formation_from_line_counts(counts: &LineCounts) -> Option<Formation> {
    if counts.outfield() == 0 {
        return None;
    }
    if let Some(known) = code_exception(counts) {
        return Some(known.into());
    }
    Some(Formation::from_counts([counts.defenders, counts.midfielders(), counts.forwards]))
}

/// Code exception table on (defenders, deep mids, attacking mids, forwards),
/// where deep = defensive + neutral midfielders. 4-1-4-1 additionally needs a
/// lone holding midfielder.
fn code_exception(c: &LineCounts) -> Option<KnownFormation> {
    let deep = c.defensive_mids + c.central_mids;
    match (c.defenders, deep, c.attacking_mids, c.forwards) {
        (4, 5, 0, 1) if c.defensive_mids == 1 => Some(KnownFormation::F4141),
        (4, 2, 3, 1) => Some(KnownFormation::F4231),
        (4, 4, 1, 1) => Some(KnownFormation::F4411),
        (4, 3, 2, 1) => Some(KnownFormation::F4321),
        (4, 2, 2, 2) => Some(KnownFormation::F4222),
        (4, 3, 1, 2) => Some(KnownFormation::F4312),
        (3, 4, 2, 1) => Some(KnownFormation::F3421),
        (3, 4, 1, 2) => Some(KnownFormation::F3412),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn grid_roster(grids: &[&str]) -> Vec<RosterEntry> {
        grids
            .iter()
            .enumerate()
            .map(|(i, g)| RosterEntry::new(i.to_string(), format!("P{i}"), i as u16 + 1).with_grid(*g))
            .collect()
    }

    fn code_roster(codes: &[&str]) -> Vec<RosterEntry> {
        codes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                RosterEntry::new(i.to_string(), format!("P{i}"), i as u16 + 1).with_position(*c)
            })
            .collect()
    }

    fn label(roster: &[RosterEntry]) -> String {
        detect_formation(roster).map(|f| f.label()).unwrap_or_default()
    }

    #[test]
    fn test_grid_4231_is_not_flattened() {
        let roster = grid_roster(&[
            "1:1", "2:4", "2:3", "2:2", "2:1", "3:2", "3:1", "4:3", "4:2", "4:1", "5:1",
        ]);
        assert_eq!(detection_mode(&roster), DetectionMode::Grid);
        assert_eq!(label(&roster), "4-2-3-1");
    }

    #[test]
    fn test_grid_generic_concatenation() {
        let roster =
            grid_roster(&["1:1", "2:1", "2:2", "2:3", "2:4", "3:1", "3:2", "3:3", "4:1", "4:2", "4:3"]);
        assert_eq!(label(&roster), "4-3-3");

        // 4-1-3-2 is not a named shape: middle rows are summed
        let roster =
            grid_roster(&["1:1", "2:1", "2:2", "2:3", "2:4", "3:1", "4:1", "4:2", "4:3", "5:1", "5:2"]);
        assert_eq!(label(&roster), "4-4-2");
    }

    #[test]
    fn test_grid_ignores_goalkeeper_absence_and_bad_tokens() {
        let roster = grid_roster(&["2:1", "2:2", "2:3", "2:4", "3:1", "3:2", "3:3", "3:4", "4:1", "oops"]);
        assert_eq!(label(&roster), "4-4-1");
    }

    #[test]
    fn test_code_442_without_sub_roles() {
        let roster =
            code_roster(&["G", "D", "D", "D", "D", "M", "M", "M", "M", "F", "F"]);
        assert_eq!(detection_mode(&roster), DetectionMode::Code);
        assert_eq!(label(&roster), "4-4-2");
    }

    #[test]
    fn test_code_abbreviated_back_line() {
        let roster =
            code_roster(&["GK", "DF", "DF", "DEF", "DF", "MF", "MF", "MF", "MF", "FW", "FW"]);
        assert_eq!(label(&roster), "4-4-2");

        let roster =
            code_roster(&["GK", "LB", "CB", "CB", "RB", "CM", "CM", "CAM", "LW", "LS", "RS"]);
        assert_eq!(label(&roster), "4-3-3");
    }

    #[test]
    fn test_code_role_exceptions() {
        let roster = code_roster(&[
            "GK", "LB", "CB", "CB", "RB", "CDM", "CDM", "LAM", "CAM", "RAM", "ST",
        ]);
        assert_eq!(label(&roster), "4-2-3-1");

        let roster =
            code_roster(&["GK", "LB", "CB", "CB", "RB", "CDM", "LM", "CM", "CM", "RM", "ST"]);
        assert_eq!(label(&roster), "4-1-4-1");

        let roster =
            code_roster(&["GK", "LB", "CB", "CB", "RB", "CM", "CM", "CM", "CM", "CM", "ST"]);
        assert_eq!(label(&roster), "4-5-1");
    }

    #[test]
    fn test_empty_and_goalkeeper_only_rosters() {
        assert_eq!(detect_formation(&[]), None);
        assert_eq!(detect_formation(&code_roster(&["GK"])), None);
        assert_eq!(detect_formation(&grid_roster(&["1:1"])), None);
        assert_eq!(formation_from_row_counts(&[]), None);
        assert_eq!(formation_from_line_counts(&LineCounts::default()), None);
    }

    #[test]
    fn test_degenerate_row_counts() {
        assert_eq!(formation_from_row_counts(&[10]).map(|f| f.label()), Some("10".to_string()));
        assert_eq!(formation_from_row_counts(&[5, 5]).map(|f| f.label()), Some("5-5".to_string()));
    }

    #[test]
    fn test_detected_labels_snapshot() {
        let fixtures: [(&str, Vec<RosterEntry>); 6] = [
            ("code_352_wingbacks", code_roster(&["G", "CB", "CB", "CB", "LWB", "CM", "CM", "CM", "RWB", "ST", "ST"])),
            ("code_343", code_roster(&["G", "CB", "CB", "CB", "LM", "CM", "CM", "RM", "LW", "ST", "RW"])),
            ("code_3421", code_roster(&["G", "D", "D", "D", "M", "M", "M", "M", "CAM", "CAM", "F"])),
            ("code_4411", code_roster(&["G", "D", "D", "D", "D", "LM", "CM", "CM", "RM", "CAM", "ST"])),
            ("grid_4141", grid_roster(&["1:1", "2:1", "2:2", "2:3", "2:4", "3:1", "4:1", "4:2", "4:3", "4:4", "5:1"])),
            ("grid_532", grid_roster(&["1:1", "2:1", "2:2", "2:3", "2:4", "2:5", "3:1", "3:2", "3:3", "4:1", "4:2"])),
        ];
        let labels: BTreeMap<&str, String> =
            fixtures.iter().map(|(name, roster)| (*name, label(roster))).collect();

        insta::assert_json_snapshot!(labels, @r###"
        {
          "code_3421": "3-4-2-1",
          "code_343": "3-4-3",
          "code_352_wingbacks": "5-3-2",
          "code_4411": "4-4-1-1",
          "grid_4141": "4-1-4-1",
          "grid_532": "5-3-2"
        }
        "###);
    }
}
