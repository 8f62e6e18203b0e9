//! Authenticated control-plane API for module lifecycle management.
//!
//! The crate is the command-dispatch layer of an edge runtime: it matches
//! inbound HTTP requests to handlers, validates the caller's credentials,
//! and delegates the actual work to an injected engine.
//!
//! ```text
//! inbound request
//!     → http::ApiServer (axum adapter, layers, request IDs)
//!     → dispatch::Dispatcher (route match, context, outcome logging)
//!     → api::handlers (authenticate, validate, delegate, encode)
//!     → engine::Engine / engine::PortAllocator (injected collaborators)
//! ```
//!
//! The engine and port allocator are trait objects supplied by the
//! embedding application; this crate never constructs them and keeps no
//! state beyond the immutable route table.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use engine::{Engine, ModuleSpec, PortAllocator};
pub use error::ApiError;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
