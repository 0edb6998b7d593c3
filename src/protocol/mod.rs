//! Line-oriented JSON-RPC front end for the universe session.
//!
//! ## Architecture
//!
//! - **Transport**: one JSON request per input line, one JSON response per
//!   output line (stdin/stdout)
//! - **Methods**: `initialize`, `tools/list`, `tools/call`
//! - **Tools**: six operations mapped onto [`GameSession`](crate::session::GameSession)
//!
//! ## Error tiers
//!
//! 1. Undecodable lines are logged and dropped
//! 2. Protocol failures come back as JSON-RPC error objects
//! 3. Tool-level mistakes (bad coordinates, unknown pattern, missing
//!    arguments) come back as ordinary results carrying a message
//!
//! ## Usage
//!
//! ```no_run
//! use universe_game::Config;
//! use universe_game::protocol::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(Config::default()).await.unwrap();
//! }
//! ```

mod messages;
mod server;
mod state;
mod tools;

pub use messages::{
    ProtocolError, Request, Response, RpcError, INTERNAL_ERROR, METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use server::{handle_line, handle_message, run_server, serve};
pub use state::AppState;
pub use tools::{catalog, ToolCall, ToolDefinition};
