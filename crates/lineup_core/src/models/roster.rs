use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One player of a starting lineup, as supplied by the caller.
///
/// Either token may be missing or malformed; the layout engine degrades
/// instead of rejecting the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RosterEntry {
    /// Upstream player identifier (numeric ids are accepted and stringified)
    #[serde(deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Jersey number
    #[serde(default, alias = "shirt")]
    pub number: u16,
    /// Compact "row:column" slot, e.g. "2:3"
    #[serde(default)]
    pub grid: Option<String>,
    /// Free-text position code, e.g. "CB", "LWB", "D"
    #[serde(default, alias = "pos")]
    pub position: Option<String>,
}

impl RosterEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: u16) -> Self {
        Self { id: id.into(), name: name.into(), number, grid: None, position: None }
    }

    pub fn with_grid(mut self, grid: impl Into<String>) -> Self {
        self.grid = Some(grid.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

/// Percentage coordinate on the pitch diagram.
/// - x: 0 = left touchline, 100 = right touchline
/// - y: 0 = top edge of the diagram, 100 = bottom edge
///
/// The reference side defends the bottom edge, so its goalkeeper sits at high y.
///
/// Both axes sit on a 1/256 grid. Every grid value in [0, 100] is exact in
/// `f32`, so `100 - v` is exact and mirroring twice restores the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldPosition {
    pub x: f32,
    pub y: f32,
}

impl FieldPosition {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;
    /// Grid steps per percentage point
    pub const RESOLUTION: f32 = 256.0;

    /// Build a position, clamping both axes into [0, 100] and snapping to the grid.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: clamp_percent(x), y: clamp_percent(y) }
    }

    pub fn is_in_bounds(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.x) && (Self::MIN..=Self::MAX).contains(&self.y)
    }
}

fn clamp_percent(v: f32) -> f32 {
    if v.is_nan() {
        50.0
    } else {
        let snapped = (v * FieldPosition::RESOLUTION).round() / FieldPosition::RESOLUTION;
        snapped.clamp(FieldPosition::MIN, FieldPosition::MAX)
    }
}

/// A roster entry paired with its pitch coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Placement {
    pub player: RosterEntry,
    pub field_position: FieldPosition,
}

impl Placement {
    pub fn new(player: RosterEntry, field_position: FieldPosition) -> Self {
        Self { player, field_position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_position_clamps() {
        let pos = FieldPosition::new(-12.0, 140.0);
        assert_eq!(pos, FieldPosition { x: 0.0, y: 100.0 });
        assert!(pos.is_in_bounds());

        let pos = FieldPosition::new(f32::NAN, 30.0);
        assert_eq!(pos.x, 50.0);
    }

    #[test]
    fn test_field_position_snaps_to_exact_grid() {
        let pos = FieldPosition::new(0.1, 24.666668);
        assert_eq!(pos.x, 26.0 / 256.0);
        assert_eq!(pos.y, 6315.0 / 256.0);

        let reflected = FieldPosition::new(100.0 - pos.x, 100.0 - pos.y);
        let back = FieldPosition::new(100.0 - reflected.x, 100.0 - reflected.y);
        assert_eq!(back, pos);
    }

    #[test]
    fn test_roster_entry_accepts_upstream_shape() {
        let json = r#"{"id": 1100, "name": "K. Mbappe", "number": 7, "pos": "F", "grid": "4:2"}"#;
        let entry: RosterEntry = serde_json::from_str(json).expect("valid entry");

        assert_eq!(entry.id, "1100");
        assert_eq!(entry.number, 7);
        assert_eq!(entry.position.as_deref(), Some("F"));
        assert_eq!(entry.grid.as_deref(), Some("4:2"));
    }

    #[test]
    fn test_roster_entry_optional_tokens_default() {
        let json = r#"{"id": "p-9", "name": "Nine"}"#;
        let entry: RosterEntry = serde_json::from_str(json).expect("valid entry");

        assert_eq!(entry.number, 0);
        assert!(entry.grid.is_none());
        assert!(entry.position.is_none());
    }
}
