//! # lineup_core - Deterministic Formation Layout Engine
//!
//! Turns a starting lineup into pitch-diagram coordinates.
//!
//! ## Features
//! - Formation detection from grid slots or free-text position codes
//! - Percentage coordinates for every roster entry, degraded never dropped
//! - Split-panel and full-pitch presentation with one mirror convention each
//! - JSON API for view layers in other runtimes
//!
//! ## Usage
//! ```rust
//! use lineup_core::{place_roster, RosterEntry};
//!
//! let roster = vec![
//!     RosterEntry::new("1", "Keeper", 1).with_position("GK"),
//!     RosterEntry::new("5", "Stopper", 5).with_position("CB"),
//! ];
//! let placements = place_roster(&roster, None, true);
//! assert_eq!(placements.len(), 2);
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod tactics;

pub use api::{detect_formation_json, layout_request_schema, layout_roster_json};
pub use api::{DetectRequest, DetectResponse, LayoutRequest, LayoutResponse};
pub use engine::{Layout, LayoutConfig, LineupLayout, MirrorAxis, PresentationMode};
pub use error::{LayoutError, Result};
pub use models::{FieldPosition, Formation, KnownFormation, Placement, RosterEntry};
pub use tactics::{classify, detect_formation, ClassifiedPosition, GridPosition, LineType, Role, Side};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placements for `roster` with the default (split panel) geometry.
pub fn place_roster(
    roster: &[RosterEntry],
    formation: Option<&str>,
    is_reference_side: bool,
) -> Vec<Placement> {
    LineupLayout::default().place_roster(roster, formation, is_reference_side)
}

/// Like [`place_roster`], also returning the formation used.
pub fn layout_roster(roster: &[RosterEntry], formation: Option<&str>, is_reference_side: bool) -> Layout {
    LineupLayout::default().layout_roster(roster, formation, is_reference_side)
}
