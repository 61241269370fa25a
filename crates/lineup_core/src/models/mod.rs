pub mod formation;
pub mod roster;

pub use formation::{Formation, KnownFormation};
pub use roster::{FieldPosition, Placement, RosterEntry};
