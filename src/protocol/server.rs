//! Line loop and request dispatch.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::Config;

use super::messages::{
    CallParams, Capabilities, InitializeResult, ProtocolError, Request, Response, ServerInfo,
    ToolCallResult,
};
use super::state::AppState;
use super::tools::{ToolCall, ToolList};

/// Serve requests from stdin, writing responses to stdout, until end of input
pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config);
    {
        let session = state.session.lock().await;
        log::info!(
            "Universe server starting: session={}, seed={}, population={}",
            session.id,
            session.seed(),
            session.population()
        );
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(&state, stdin, stdout).await?;

    log::info!("End of input, shutting down");
    Ok(())
}

/// Process newline-delimited requests from `reader` until it is exhausted.
///
/// Only I/O failures on the channel itself end the loop early; every
/// malformed or failing request is reported and skipped.
pub async fn serve<R, W>(state: &AppState, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Skipping non UTF-8 input line: {}", e);
                continue;
            }
        };

        if let Some(response) = handle_line(state, line).await {
            let mut json = serde_json::to_string(&response).map_err(std::io::Error::from)?;
            json.push('\n');
            if let Err(e) = write_line(&mut writer, &json).await {
                log::error!("Failed to write response: {}", e);
                return Err(e);
            }
        }
    }
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

/// Handle one raw input line. Blank and undecodable lines produce no response.
pub async fn handle_line(state: &AppState, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("JSON decode error: {}", e);
            return None;
        }
    };

    if !value.is_object() {
        log::warn!("Request is not a JSON object");
        return Some(Response::failure(
            Value::Null,
            &ProtocolError::Parse("request must be a JSON object".to_string()),
        ));
    }

    match serde_json::from_value::<Request>(value) {
        Ok(request) => Some(handle_message(state, request).await),
        Err(e) => {
            log::warn!("Malformed request: {}", e);
            Some(Response::failure(Value::Null, &ProtocolError::Parse(e.to_string())))
        }
    }
}

/// Dispatch a decoded request
pub async fn handle_message(state: &AppState, request: Request) -> Response {
    let Request { method, id, params } = request;
    log::debug!("Request {}: {:?}", id, method);

    let outcome = match method {
        Some(Value::String(method)) => match method.as_str() {
            "initialize" => initialize(state),
            "tools/list" => serde_json::to_value(ToolList::new()).map_err(ProtocolError::from),
            "tools/call" => call_tool(state, params).await,
            other => Err(ProtocolError::MethodNotFound(other.to_string())),
        },
        Some(other) => Err(ProtocolError::MethodNotFound(other.to_string())),
        None => Err(ProtocolError::MethodNotFound("<none>".to_string())),
    };

    match outcome {
        Ok(result) => Response::success(id, result),
        Err(e) => {
            if matches!(e, ProtocolError::Internal(_)) {
                log::error!("Request {} failed: {}", id, e);
            }
            Response::failure(id, &e)
        }
    }
}

fn initialize(state: &AppState) -> Result<Value, ProtocolError> {
    let result = InitializeResult {
        protocol_version: state.server.protocol_version.clone(),
        capabilities: Capabilities::default(),
        server_info: ServerInfo {
            name: state.server.name.clone(),
            version: crate::VERSION.to_string(),
        },
    };
    Ok(serde_json::to_value(result)?)
}

async fn call_tool(state: &AppState, params: Option<Value>) -> Result<Value, ProtocolError> {
    let params: CallParams = match params {
        Some(params) => serde_json::from_value(params)
            .map_err(|e| ProtocolError::Internal(format!("invalid params: {}", e)))?,
        None => CallParams::default(),
    };

    let name = params.name.unwrap_or_default();
    let call = ToolCall::parse(&name, params.arguments.unwrap_or_default())?;

    let payload = {
        let mut session = state.session.lock().await;
        call.execute(&mut session)?
    };

    Ok(serde_json::to_value(ToolCallResult::from_payload(&payload)?)?)
}
