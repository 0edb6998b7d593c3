//! Shared application state for the protocol server.

use tokio::sync::Mutex;

use crate::config::{Config, ServerConfig};
use crate::session::GameSession;

/// State shared by every request handler.
///
/// The session sits behind a single mutex held for the whole handling of a
/// request, so requests are applied one at a time in arrival order.
pub struct AppState {
    /// The simulation session
    pub session: Mutex<GameSession>,
    /// Metadata reported by `initialize`
    pub server: ServerConfig,
}

impl AppState {
    /// Create state with a fresh session built from `config`
    pub fn new(config: Config) -> Self {
        let server = config.server.clone();
        Self {
            session: Mutex::new(GameSession::new(config)),
            server,
        }
    }

    /// Wrap an existing session
    pub fn with_session(session: GameSession) -> Self {
        Self {
            server: session.config.server.clone(),
            session: Mutex::new(session),
        }
    }
}
