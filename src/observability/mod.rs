//! Observability subsystem.
//!
//! Logging goes through the `tracing` facade and the embedding
//! application owns the subscriber; this module adds request metrics on
//! top of it.

pub mod metrics;
