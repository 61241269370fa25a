//! Placement orchestration
//!
//! roster + optional formation label → mode selection → formation (parsed or
//! detected) → line membership → coordinates → mirror → placements.
//!
//! The output always has one placement per roster entry, in roster order.

use super::config::{Band, LayoutConfig, PresentationMode};
use super::coordinates::{LineCoordinateMapper, LineMember};
use super::mirror::orient;
use crate::models::{FieldPosition, Formation, Placement, RosterEntry};
use crate::tactics::{
    classify_entry, detect_formation, detection_mode, lateral_lean, parse_grid,
    ClassifiedPosition, DetectionMode, GridPosition, LineType, Role,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Result of one layout call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Formation used for the layout, `None` when the roster has no outfield player
    pub formation: Option<Formation>,
    pub placements: Vec<Placement>,
}

/// Layout engine bound to one pitch geometry. Stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct LineupLayout {
    config: LayoutConfig,
}

impl LineupLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn for_mode(mode: PresentationMode) -> Self {
        Self::new(LayoutConfig::for_mode(mode))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn detect_formation(&self, roster: &[RosterEntry]) -> Option<Formation> {
        detect_formation(roster)
    }

    /// Parsed label, or the detected formation when the label is absent or unusable.
    pub fn resolve_formation(&self, roster: &[RosterEntry], label: Option<&str>) -> Option<Formation> {
        match label.map(str::parse::<Formation>) {
            Some(Ok(formation)) => Some(formation),
            Some(Err(err)) => {
                debug!(%err, "ignoring unusable formation label");
                detect_formation(roster)
            }
            None => detect_formation(roster),
        }
    }

    pub fn place_roster(
        &self,
        roster: &[RosterEntry],
        formation: Option<&str>,
        is_reference_side: bool,
    ) -> Vec<Placement> {
        self.layout_roster(roster, formation, is_reference_side).placements
    }

    pub fn layout_roster(
        &self,
        roster: &[RosterEntry],
        formation: Option<&str>,
        is_reference_side: bool,
    ) -> Layout {
        let mode = detection_mode(roster);
        let formation = self.resolve_formation(roster, formation);
        debug!(
            ?mode,
            players = roster.len(),
            formation = formation.as_ref().map(|f| f.label()).unwrap_or_default(),
            is_reference_side,
            "placing roster"
        );

        let mapper = LineCoordinateMapper::new(&self.config);
        let mut positions = vec![mapper.goalkeeper(); roster.len()];
        match mode {
            DetectionMode::Grid => place_by_grid(&mapper, roster, &mut positions),
            DetectionMode::Code => {
                let all: Vec<usize> = (0..roster.len()).collect();
                place_by_code(&mapper, roster, &all, formation.as_ref(), &mut positions);
            }
        }

        let axis = self.config.mirror_axis();
        let placements = roster
            .iter()
            .zip(positions)
            .map(|(entry, pos)| Placement::new(entry.clone(), orient(pos, axis, is_reference_side)))
            .collect();

        Layout { formation, placements }
    }
}

/// Entries with a valid grid token follow the grid; the rest are laid out
/// among themselves from their position codes.
fn place_by_grid(
    mapper: &LineCoordinateMapper<'_>,
    roster: &[RosterEntry],
    out: &mut [FieldPosition],
) {
    let grids: Vec<Option<GridPosition>> = roster
        .iter()
        .map(|entry| {
            let grid = entry.grid.as_deref().and_then(parse_grid);
            if grid.is_none() {
                trace!(player = %entry.id, token = ?entry.grid, "no usable grid token, using position code");
            }
            grid
        })
        .collect();

    let top_row = grids.iter().flatten().map(|g| g.row).max().unwrap_or(0);
    let mut widest: BTreeMap<u16, u16> = BTreeMap::new();
    for grid in grids.iter().flatten() {
        let width = widest.entry(grid.row).or_insert(0);
        *width = (*width).max(grid.column);
    }

    let mut ungridded = Vec::new();
    for (i, grid) in grids.iter().enumerate() {
        match grid {
            Some(g) => {
                let max_column = widest.get(&g.row).copied().unwrap_or(g.column);
                out[i] = mapper.grid_position(*g, max_column, top_row);
            }
            None => ungridded.push(i),
        }
    }

    if !ungridded.is_empty() {
        place_by_code(mapper, roster, &ungridded, None, out);
    }
}

#[derive(Default)]
struct Lines {
    defenders: Vec<usize>,
    midfielders: Vec<(usize, Role)>,
    forwards: Vec<usize>,
}

/// Code-mode placement of the roster entries at `indices`.
fn place_by_code(
    mapper: &LineCoordinateMapper<'_>,
    roster: &[RosterEntry],
    indices: &[usize],
    formation: Option<&Formation>,
    out: &mut [FieldPosition],
) {
    let classes: BTreeMap<usize, ClassifiedPosition> =
        indices.iter().map(|&i| (i, classify_entry(&roster[i]))).collect();

    let mut lines = Lines::default();
    for (&i, class) in &classes {
        match class.line {
            LineType::Goalkeeper => out[i] = mapper.goalkeeper(),
            LineType::Defender => lines.defenders.push(i),
            LineType::Midfielder => lines.midfielders.push((i, class.role)),
            LineType::Forward => lines.forwards.push(i),
        }
    }

    let member = |i: usize| LineMember {
        side: classes.get(&i).map(|c| c.side).unwrap_or(ClassifiedPosition::DEFAULT.side),
        lean: roster[i].position.as_deref().map(lateral_lean).unwrap_or(0),
    };
    let mut place = |line: &[usize], y: f32, capacity: Option<usize>| {
        let members: Vec<LineMember> = line.iter().map(|&i| member(i)).collect();
        for (&i, pos) in line.iter().zip(mapper.place_line(&members, y, capacity)) {
            out[i] = pos;
        }
    };

    let defenders = formation.map(|f| f.defenders() as usize);
    let forwards = formation.map(|f| f.forwards() as usize);
    place(&lines.defenders, mapper.band_y(Band::Defence), defenders);
    place(&lines.forwards, mapper.band_y(Band::Attack), forwards);

    let midfield_lines = formation.map(|f| f.midfield_lines()).unwrap_or(&[]);
    if midfield_lines.len() >= 2 {
        let mut ordered = lines.midfielders;
        ordered.sort_by_key(|&(_, role)| role);
        let ordered: Vec<usize> = ordered.into_iter().map(|(i, _)| i).collect();

        let count = midfield_lines.len();
        let mut start = 0;
        for (line_index, &size) in midfield_lines.iter().enumerate() {
            let end = if line_index + 1 == count {
                ordered.len()
            } else {
                (start + size as usize).min(ordered.len())
            };
            if end > start + size as usize {
                debug!(line = line_index, size, players = end - start, "midfield line overflow");
            }
            place(&ordered[start..end], mapper.midfield_line_y(line_index, count), Some(size as usize));
            start = end;
        }
    } else {
        for (role, y) in [
            (Role::Defensive, mapper.band_y(Band::DefensiveMidfield)),
            (Role::Neutral, mapper.midfield_y()),
            (Role::Offensive, mapper.band_y(Band::AttackingMidfield)),
        ] {
            let band: Vec<usize> =
                lines.midfielders.iter().filter(|(_, r)| *r == role).map(|(i, _)| *i).collect();
            place(&band, y, None);
        }
    }
}
