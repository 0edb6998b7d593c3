//! Tool catalog and dispatch onto the session.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::library;
use crate::session::GameSession;

use super::messages::ProtocolError;

/// Origin used by `add_pattern` when the client gives none
pub const DEFAULT_PATTERN_ORIGIN: i64 = 10;

/// Schema entry returned by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn no_arguments() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize)]
pub struct ToolList {
    pub tools: Vec<ToolDefinition>,
}

impl ToolList {
    pub fn new() -> Self {
        Self { tools: catalog() }
    }
}

impl Default for ToolList {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed six-tool catalog
pub fn catalog() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "step_universe",
            description: concat!(
                "Execute one step of the universe simulation ",
                "(returns summary with visual display every 10 turns)"
            ),
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "get_universe_state",
            description: "Get current state of the universe game with visual display",
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "reset_universe",
            description: "Reset the universe game to initial state",
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "flip_cell",
            description: "Manually flip a specific cell in the universe",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "x": {"type": "integer", "description": "X coordinate (0-19)"},
                    "y": {"type": "integer", "description": "Y coordinate (0-19)"}
                },
                "required": ["x", "y"]
            }),
        },
        ToolDefinition {
            name: "add_pattern",
            description: "Add a known Conway's Game of Life pattern",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "enum": library::names(),
                        "description": "Pattern to add"
                    },
                    "x": {
                        "type": "integer",
                        "description": "X coordinate (default: 10)",
                        "default": DEFAULT_PATTERN_ORIGIN
                    },
                    "y": {
                        "type": "integer",
                        "description": "Y coordinate (default: 10)",
                        "default": DEFAULT_PATTERN_ORIGIN
                    }
                },
                "required": ["pattern"]
            }),
        },
        ToolDefinition {
            name: "get_analytics",
            description: "Get detailed analytics and pattern history with visual display",
            input_schema: no_arguments(),
        },
    ]
}

/// Coordinates arrive as integers, floats or numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCoordinate {
    fn into_i64(self) -> Result<i64, String> {
        match self {
            RawCoordinate::Int(v) => Ok(v),
            RawCoordinate::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            RawCoordinate::Float(v) => Err(format!("cannot convert {} to integer", v)),
            RawCoordinate::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("invalid integer coordinate: '{}'", s)),
        }
    }
}

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    RawCoordinate::deserialize(deserializer)?
        .into_i64()
        .map_err(serde::de::Error::custom)
}

/// Like `coordinate`, but an explicit `null` counts as absent
fn optional_coordinate<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Option::<RawCoordinate>::deserialize(deserializer)?
        .map(RawCoordinate::into_i64)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn default_origin() -> i64 {
    DEFAULT_PATTERN_ORIGIN
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlipCellArgs {
    #[serde(default, deserialize_with = "optional_coordinate")]
    pub x: Option<i64>,
    #[serde(default, deserialize_with = "optional_coordinate")]
    pub y: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPatternArgs {
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default = "default_origin", deserialize_with = "coordinate")]
    pub x: i64,
    #[serde(default = "default_origin", deserialize_with = "coordinate")]
    pub y: i64,
}

/// A parsed `tools/call`
#[derive(Debug, Clone)]
pub enum ToolCall {
    StepUniverse,
    GetUniverseState,
    ResetUniverse,
    FlipCell(FlipCellArgs),
    AddPattern(AddPatternArgs),
    GetAnalytics,
    Unknown(String),
}

/// Tool-level failure, returned to the client as a normal result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    pub error: String,
}

impl ToolFailure {
    fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

impl ToolCall {
    /// Validate `arguments` against the tool named `name`
    pub fn parse(name: &str, arguments: Map<String, Value>) -> Result<Self, ProtocolError> {
        let arguments = Value::Object(arguments);
        let call = match name {
            "step_universe" => Self::StepUniverse,
            "get_universe_state" => Self::GetUniverseState,
            "reset_universe" => Self::ResetUniverse,
            "flip_cell" => Self::FlipCell(serde_json::from_value(arguments)?),
            "add_pattern" => Self::AddPattern(serde_json::from_value(arguments)?),
            "get_analytics" => Self::GetAnalytics,
            other => Self::Unknown(other.to_string()),
        };
        Ok(call)
    }

    /// Run the tool against the session and return its JSON payload
    pub fn execute(self, session: &mut GameSession) -> Result<Value, ProtocolError> {
        let payload = match self {
            Self::StepUniverse => serde_json::to_value(session.step())?,
            Self::GetUniverseState => serde_json::to_value(session.state())?,
            Self::ResetUniverse => serde_json::to_value(session.reset())?,
            Self::GetAnalytics => serde_json::to_value(session.analytics())?,
            Self::FlipCell(FlipCellArgs {
                x: Some(x),
                y: Some(y),
            }) => {
                let message = match session.flip_cell(x, y) {
                    Ok(flip) => flip.to_string(),
                    Err(e) => {
                        log::warn!("flip_cell rejected: {}", e);
                        e.to_string()
                    }
                };
                serde_json::to_value(session.edit_report(message))?
            }
            Self::FlipCell(_) => {
                serde_json::to_value(ToolFailure::new("Missing x or y coordinate"))?
            }
            Self::AddPattern(AddPatternArgs { pattern, x, y }) => {
                match pattern.filter(|p| !p.is_empty()) {
                    None => serde_json::to_value(ToolFailure::new("Missing pattern name"))?,
                    Some(name) => {
                        let message = match session.add_pattern(&name, x, y) {
                            Ok(placement) => placement.to_string(),
                            Err(e) => {
                                log::warn!("add_pattern rejected: {}", e);
                                e.to_string()
                            }
                        };
                        serde_json::to_value(session.edit_report(message))?
                    }
                }
            }
            Self::Unknown(name) => {
                log::warn!("Unknown tool requested: {}", name);
                serde_json::to_value(ToolFailure::new(format!("Unknown tool: {}", name)))?
            }
        };
        Ok(payload)
    }
}
