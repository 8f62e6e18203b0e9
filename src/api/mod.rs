//! Control-plane command surface.
//!
//! # Data Flow
//! ```text
//! Dispatcher match
//!     → auth.rs (extract credentials, engine authenticate)
//!     → handlers.rs (validate input, delegate, encode reply)
//!     → Dispatcher (outcome logging, error mapping)
//! ```
//!
//! # Design Decisions
//! - Every handler authenticates before any side-effecting call
//! - Handlers are stateless; collaborators arrive as shared trait objects
//! - Route wiring lives here so the full table reads in one place

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::engine::{Engine, PortAllocator};

/// Wire the control-plane operations into a dispatcher.
///
/// The port route is registered twice because the `{host}` suffix is
/// optional; both registrations share one handler.
pub fn build_dispatcher(engine: Arc<dyn Engine>, ports: Arc<dyn PortAllocator>) -> Dispatcher {
    let e = engine.clone();
    let start = Box::new(move |ctx| handlers::start_module(e.as_ref(), ctx));

    let e = engine.clone();
    let stop = Box::new(move |ctx| handlers::stop_module(e.as_ref(), ctx));

    let e = engine.clone();
    let p = ports.clone();
    let port_default = Box::new(move |ctx| handlers::get_available_port(e.as_ref(), p.as_ref(), ctx));

    let port_with_host =
        Box::new(move |ctx| handlers::get_available_port(engine.as_ref(), ports.as_ref(), ctx));

    Dispatcher::new()
        .route("PUT", "/modules/{name}/start", start)
        .route("PUT", "/modules/{name}/stop", stop)
        .route("GET", "/ports/available", port_default)
        .route("GET", "/ports/available/host/{host}", port_with_host)
}
