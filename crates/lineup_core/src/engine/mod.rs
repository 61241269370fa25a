pub mod config;
pub mod coordinates;
pub mod mirror;
pub mod placement;

pub use config::{Band, LayoutConfig, PresentationMode};
pub use coordinates::{LineCoordinateMapper, LineMember, CENTER_X};
pub use mirror::{mirror, mirror_placements, orient, MirrorAxis};
pub use placement::{Layout, LineupLayout};
