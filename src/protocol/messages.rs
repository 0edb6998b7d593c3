//! JSON-RPC envelopes exchanged over the line channel.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

/// Request line was JSON but not a usable request object
pub const PARSE_ERROR: i64 = -32700;
/// Unknown `method`
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Failure while executing a tool
pub const INTERNAL_ERROR: i64 = -32603;

/// Incoming request
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Any JSON value; non-strings are reported as unknown methods
    #[serde(default)]
    pub method: Option<Value>,
    /// Echoed back verbatim; `"unknown"` when the client sent none
    #[serde(default = "unknown_id")]
    pub id: Value,
    #[serde(default)]
    pub params: Option<Value>,
}

fn unknown_id() -> Value {
    Value::String("unknown".to_string())
}

/// `params` of a `tools/call` request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// Protocol-level failures, reported as JSON-RPC error objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Parse(String),
    MethodNotFound(String),
    Internal(String),
}

impl ProtocolError {
    pub fn code(&self) -> i64 {
        match self {
            Self::Parse(_) => PARSE_ERROR,
            Self::MethodNotFound(_) => METHOD_NOT_FOUND,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::MethodNotFound(method) => write!(f, "Method not found: {}", method),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Error object of a failed response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Outgoing response; exactly one of `result` / `error` is set
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: &ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// `initialize` result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Capabilities {
    pub tools: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// One content block of a tool result
#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// `tools/call` result: the operation's return value as pretty JSON text
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
}

impl ToolCallResult {
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self, ProtocolError> {
        Ok(Self {
            content: vec![TextContent {
                kind: "text",
                text: serde_json::to_string_pretty(payload)?,
            }],
        })
    }
}
