//! Capability contracts for the external collaborators.
//!
//! # Design Decisions
//! - Collaborators are trait objects injected at construction; handlers
//!   never build or own them
//! - Calls are synchronous from this layer's point of view; timeout and
//!   retry policy belongs to the implementation behind the trait
//! - Credential validation is owned by the engine; this layer only
//!   transports credentials

use serde::{Deserialize, Serialize};

/// Opaque error returned by a collaborator call.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Specification of a module to start.
///
/// Opaque to the dispatch layer beyond its name: `config` is handed to
/// the engine as received and semantic validation happens there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Module identifier.
    pub name: String,

    /// Engine-specific configuration, passed through untouched.
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Owner of the module lifecycle and of credential validation.
pub trait Engine: Send + Sync {
    /// Check credentials. `false` means the caller may not act.
    fn authenticate(&self, username: &str, password: &str) -> bool;

    /// Start the module described by `spec`.
    fn start(&self, spec: ModuleSpec) -> Result<(), CollaboratorError>;

    /// Stop the named module.
    fn stop(&self, name: &str) -> Result<(), CollaboratorError>;
}

/// Finds an unused network port on a host.
pub trait PortAllocator: Send + Sync {
    /// Return a currently free port on `host`.
    fn available_port(&self, host: &str) -> Result<u16, CollaboratorError>;
}
