//! Orientation mirror for the non-reference side.
//!
//! A pure reflection applied exactly once per placement:
//! - `LeftRight`: x' = 100 - x (split panels, both teams attacking upward)
//! - `NearFar`: y' = 100 - y (one full pitch, opposite halves)
//!
//! Mirroring twice restores the input.

use crate::models::{FieldPosition, Placement};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    LeftRight,
    NearFar,
}

#[inline]
pub fn mirror(pos: FieldPosition, axis: MirrorAxis) -> FieldPosition {
    match axis {
        MirrorAxis::LeftRight => FieldPosition::new(FieldPosition::MAX - pos.x, pos.y),
        MirrorAxis::NearFar => FieldPosition::new(pos.x, FieldPosition::MAX - pos.y),
    }
}

/// Reference side unchanged, the other side reflected once.
#[inline]
pub fn orient(pos: FieldPosition, axis: MirrorAxis, is_reference_side: bool) -> FieldPosition {
    if is_reference_side {
        pos
    } else {
        mirror(pos, axis)
    }
}

pub fn mirror_placements(placements: Vec<Placement>, axis: MirrorAxis) -> Vec<Placement> {
    placements
        .into_iter()
        .map(|p| Placement { field_position: mirror(p.field_position, axis), ..p })
        .collect()
}
