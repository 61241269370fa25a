//! Position code classification
//!
//! Turns a free-text position code ("G", "CB", "LWB", "CDM", "RW", "Striker")
//! into a closed [`ClassifiedPosition`]. Classification is total: unknown or
//! empty codes fall back to a neutral central midfielder.

use crate::models::RosterEntry;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tactical line a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

/// Lateral tag. Only `Left`/`Right` pin a player near the touchline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Center,
    Right,
    None,
}

impl Side {
    pub fn is_wide(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Defensive,
    Neutral,
    Offensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassifiedPosition {
    pub line: LineType,
    pub side: Side,
    pub role: Role,
}

impl ClassifiedPosition {
    pub const GOALKEEPER: Self =
        Self { line: LineType::Goalkeeper, side: Side::None, role: Role::Neutral };

    /// Fallback for missing or unrecognised codes.
    pub const DEFAULT: Self =
        Self { line: LineType::Midfielder, side: Side::Center, role: Role::Neutral };

    pub fn is_goalkeeper(&self) -> bool {
        self.line == LineType::Goalkeeper
    }
}

impl Default for ClassifiedPosition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classify a position code. Case-insensitive; punctuation and spaces ignored.
pub fn classify(code: &str) -> ClassifiedPosition {
    let normalized = normalize(code);
    let code = fold_long_form(&normalized);

    // 1. Goalkeeper
    if code == "G" || code.contains("GK") {
        return ClassifiedPosition::GOALKEEPER;
    }

    // 2. Defender / back
    if is_defender_marker(code) {
        return ClassifiedPosition {
            line: LineType::Defender,
            side: side_marker(code),
            role: Role::Defensive,
        };
    }

    // 3. Midfielder
    if code.contains('M') {
        let role = if code.contains("DM") {
            Role::Defensive
        } else if code.contains("AM") {
            Role::Offensive
        } else {
            Role::Neutral
        };
        return ClassifiedPosition { line: LineType::Midfielder, side: side_marker(code), role };
    }

    // 4. Forward / winger / striker
    if code.contains('F')
        || code.contains("ST")
        || code.contains('W')
        || code.contains("SS")
        || matches!(code, "S" | "LS" | "RS")
    {
        let side = if code.contains("LW") {
            Side::Left
        } else if code.contains("RW") {
            Side::Right
        } else {
            side_marker(code)
        };
        return ClassifiedPosition { line: LineType::Forward, side, role: Role::Offensive };
    }

    trace!(code = %normalized, "unrecognised position code, defaulting to central midfielder");
    ClassifiedPosition::DEFAULT
}

/// Classification of a roster entry; entries without a code get the default.
pub fn classify_entry(entry: &RosterEntry) -> ClassifiedPosition {
    entry.position.as_deref().map(classify).unwrap_or_default()
}

/// Ordering hint among central players of one line: -1 for centre-left codes
/// ("LCB", "LCM", "LDM"), +1 for centre-right, 0 otherwise.
pub fn lateral_lean(code: &str) -> i8 {
    let normalized = normalize(code);
    let code = fold_long_form(&normalized);
    match code.as_bytes().first() {
        Some(b'L') if code.len() > 1 => -1,
        Some(b'R') if code.len() > 1 => 1,
        _ => 0,
    }
}

/// "D", "SW", any back ("CB", "LWB"), "DF"/"DEF..." and "...DEFENDER".
/// A leading "DEF" that introduces a midfield code ("DEFMID") does not count.
fn is_defender_marker(code: &str) -> bool {
    if code == "D" || code == "SW" || code.contains('B') || code.contains("DEFEND") {
        return true;
    }
    (code.starts_with("DEF") || code.starts_with("DF")) && !code.contains('M')
}

fn normalize(code: &str) -> String {
    code.chars().filter(|c| c.is_ascii_alphabetic()).map(|c| c.to_ascii_uppercase()).collect()
}

fn fold_long_form(code: &str) -> &str {
    match code {
        "GOALKEEPER" | "KEEPER" | "GOALIE" => "GK",
        "DEFENDER" => "D",
        "CENTREBACK" | "CENTERBACK" => "CB",
        "LEFTBACK" => "LB",
        "RIGHTBACK" => "RB",
        "LEFTWINGBACK" => "LWB",
        "RIGHTWINGBACK" => "RWB",
        "SWEEPER" => "SW",
        "DEFENSIVEMIDFIELDER" | "DEFENSIVEMIDFIELD" | "DEFENSIVEMID" | "DEFMID" => "DM",
        "CENTRALMIDFIELDER" | "CENTREMIDFIELDER" | "CENTERMIDFIELDER" => "CM",
        "ATTACKINGMIDFIELDER" | "ATTACKINGMIDFIELD" => "AM",
        "LEFTMIDFIELDER" | "LEFTMIDFIELD" => "LM",
        "RIGHTMIDFIELDER" | "RIGHTMIDFIELD" => "RM",
        "MIDFIELDER" | "MIDFIELD" => "M",
        "STRIKER" | "CENTREFORWARD" | "CENTERFORWARD" => "ST",
        "FORWARD" | "ATTACKER" => "F",
        "LEFTWINGER" | "LEFTWING" => "LW",
        "RIGHTWINGER" | "RIGHTWING" => "RW",
        "WINGER" => "W",
        "SECONDSTRIKER" => "SS",
        other => other,
    }
}

/// Leading L/R marks a wide player, unless it introduces a central code
/// ("LCB", "RCM", "LDM" stay central).
fn side_marker(code: &str) -> Side {
    let rest = code.get(1..).unwrap_or("");
    let central = rest.starts_with('C') || rest.starts_with("DM");
    match code.as_bytes().first() {
        Some(b'L') if !central => Side::Left,
        Some(b'R') if !central => Side::Right,
        _ => Side::Center,
    }
}
