// Positional metadata: grid tokens, position codes, formation inference

pub mod classifier;
pub mod detector;
pub mod grid;

pub use classifier::{
    classify, classify_entry, lateral_lean, ClassifiedPosition, LineType, Role, Side,
};
pub use detector::{
    detect_formation, detection_mode, formation_from_line_counts, formation_from_row_counts,
    DetectionMode, LineCounts,
};
pub use grid::{parse_grid, GridPosition, GOALKEEPER_ROW};
