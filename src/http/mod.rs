//! HTTP transport adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, timeout/trace layers)
//!     → fallback handler (capture method, path, headers, body)
//!     → dispatch::Dispatcher (route match, command handler)
//!     → status mapping + JSON encoding + x-request-id
//!     → Send to client
//! ```

pub mod server;

pub use server::ApiServer;
