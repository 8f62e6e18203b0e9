//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, headers, body)
//!     → router.rs (route lookup, first match wins)
//!     → pattern.rs (segment match, placeholder capture)
//!     → context.rs (params + headers + body handed to the handler)
//!     → Return: handler outcome or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes registered at construction, immutable at runtime
//! - No regex; patterns match segment for segment
//! - Duplicate (method, pattern) registration panics at startup
//! - Transport-agnostic: no axum types cross this boundary

pub mod context;
pub mod pattern;
pub mod router;

pub use context::{Headers, PathParams, RequestContext};
pub use pattern::PathPattern;
pub use router::{Dispatcher, HandlerFn};
