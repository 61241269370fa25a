pub mod json_api;

pub use json_api::{
    detect_formation_json, layout_request_schema, layout_roster_json, DetectRequest,
    DetectResponse, LayoutRequest, LayoutResponse,
};
