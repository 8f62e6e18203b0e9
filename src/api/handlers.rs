//! Command handlers for the control-plane operations.
//!
//! Each handler follows the same shape: authenticate, validate input,
//! delegate to the collaborator, encode the reply. Failures are logged
//! here with the operation's identifiers before they surface to the
//! dispatcher.

use serde::Serialize;

use crate::api::auth;
use crate::dispatch::RequestContext;
use crate::engine::{Engine, ModuleSpec, PortAllocator};
use crate::error::ApiError;

/// Host probed when the port route carries no `{host}` segment.
const DEFAULT_PORT_HOST: &str = "127.0.0.1";

/// Reply body for the available-port operation.
#[derive(Debug, Serialize)]
pub struct PortReply {
    pub port: u16,
}

/// PUT /modules/{name}/start
pub fn start_module(
    engine: &dyn Engine,
    ctx: RequestContext,
) -> Result<Option<Vec<u8>>, ApiError> {
    let module = ctx.params.get("name").cloned().unwrap_or_default();
    auth::authorize(engine, &ctx.headers, "start_module", Some(&module))?;

    let body = ctx
        .body
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("request body missing".to_string()))?;
    let spec: ModuleSpec = serde_json::from_slice(body)
        .map_err(|err| ApiError::BadRequest(format!("invalid module specification: {err}")))?;

    let name = spec.name.clone();
    engine.start(spec).map_err(|source| {
        tracing::error!(module = %name, error = %source, "failed to start module");
        ApiError::OperationFailed {
            operation: "start module",
            source,
        }
    })?;
    Ok(None)
}

/// PUT /modules/{name}/stop
pub fn stop_module(engine: &dyn Engine, ctx: RequestContext) -> Result<Option<Vec<u8>>, ApiError> {
    let module = ctx.params.get("name").cloned().unwrap_or_default();
    auth::authorize(engine, &ctx.headers, "stop_module", Some(&module))?;

    engine.stop(&module).map_err(|source| {
        tracing::error!(module = %module, error = %source, "failed to stop module");
        ApiError::OperationFailed {
            operation: "stop module",
            source,
        }
    })?;
    Ok(None)
}

/// GET /ports/available and GET /ports/available/host/{host}
pub fn get_available_port(
    engine: &dyn Engine,
    ports: &dyn PortAllocator,
    ctx: RequestContext,
) -> Result<Option<Vec<u8>>, ApiError> {
    auth::authorize(engine, &ctx.headers, "get_available_port", None)?;

    // Only a missing key falls back to loopback; a present value is
    // passed through unchanged.
    let host = ctx
        .params
        .get("host")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PORT_HOST);

    let port = ports.available_port(host).map_err(|source| {
        tracing::error!(host = %host, error = %source, "failed to find available port");
        ApiError::OperationFailed {
            operation: "get available port",
            source,
        }
    })?;

    let reply =
        serde_json::to_vec(&PortReply { port }).map_err(|source| ApiError::OperationFailed {
            operation: "encode reply",
            source: Box::new(source),
        })?;
    Ok(Some(reply))
}
