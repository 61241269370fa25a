use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{LineupLayout, PresentationMode};
use crate::error::Result;
use crate::models::{Placement, RosterEntry};
use crate::tactics::detect_formation;

fn default_reference_side() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutRequest {
    pub roster: Vec<RosterEntry>,
    /// Formation label such as "4-2-3-1"; detected when absent or unusable
    #[serde(default)]
    pub formation: Option<String>,
    /// `false` mirrors the placements for the opposing side
    #[serde(default = "default_reference_side")]
    pub is_reference_side: bool,
    #[serde(default)]
    pub mode: PresentationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LayoutResponse {
    pub formation: Option<String>,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetectRequest {
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetectResponse {
    pub formation: Option<String>,
}

/// Lay out a roster from a JSON request, returning the JSON response.
pub fn layout_roster_json(request_json: &str) -> Result<String> {
    let request: LayoutRequest = serde_json::from_str(request_json)?;
    debug!(players = request.roster.len(), mode = ?request.mode, "layout request");

    let engine = LineupLayout::for_mode(request.mode);
    let layout = engine.layout_roster(
        &request.roster,
        request.formation.as_deref(),
        request.is_reference_side,
    );

    let response = LayoutResponse {
        formation: layout.formation.map(|f| f.label()),
        placements: layout.placements,
    };
    Ok(serde_json::to_string(&response)?)
}

pub fn detect_formation_json(request_json: &str) -> Result<String> {
    let request: DetectRequest = serde_json::from_str(request_json)?;
    let response = DetectResponse { formation: detect_formation(&request.roster).map(|f| f.label()) };
    Ok(serde_json::to_string(&response)?)
}

/// JSON Schema of [`LayoutRequest`], pretty printed.
pub fn layout_request_schema() -> Result<String> {
    let schema = schemars::schema_for!(LayoutRequest);
    Ok(serde_json::to_string_pretty(&schema)?)
}
