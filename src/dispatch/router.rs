//! Route table and dispatch.
//!
//! # Responsibilities
//! - Hold the immutable (method, pattern) → handler table
//! - Build the per-request context and invoke the matched handler
//! - Convert unmatched requests and handler panics into `ApiError`
//! - Emit one log record per dispatch with the outcome
//!
//! # Design Decisions
//! - First match wins, in registration order
//! - Duplicate (method, pattern) registration panics at construction
//! - Immutable after construction; shared across requests without locks

use std::panic::{self, AssertUnwindSafe};

use crate::dispatch::context::{Headers, RequestContext};
use crate::dispatch::pattern::PathPattern;
use crate::error::ApiError;

/// A registered handler: consumes the request context, produces an
/// optional response body.
pub type HandlerFn =
    Box<dyn Fn(RequestContext) -> Result<Option<Vec<u8>>, ApiError> + Send + Sync>;

struct Route {
    method: String,
    pattern: PathPattern,
    handler: HandlerFn,
}

/// Matches inbound requests to handlers.
pub struct Dispatcher {
    routes: Vec<Route>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for (method, pattern).
    ///
    /// Panics if the same (method, pattern) is already registered; the
    /// table is wired once at server construction and a duplicate is a
    /// bug, not a request-time condition.
    pub fn route(mut self, method: &str, pattern: &str, handler: HandlerFn) -> Self {
        let method = method.to_ascii_uppercase();
        let pattern = PathPattern::parse(pattern);
        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.as_str() == pattern.as_str())
        {
            panic!(
                "route already registered: {method} {pattern}",
                pattern = pattern.as_str()
            );
        }
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        self
    }

    /// Dispatch one request to the matching handler.
    ///
    /// `Ok(Some(bytes))` carries an encoded response body, `Ok(None)` an
    /// empty success. A panicking handler is caught here and surfaced as
    /// `OperationFailed` so one bad collaborator cannot take the server
    /// down.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        headers: Headers,
        body: Option<Vec<u8>>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let method = method.to_ascii_uppercase();
        let matched = self.routes.iter().find_map(|route| {
            if route.method != method {
                return None;
            }
            route.pattern.matches(path).map(|params| (route, params))
        });

        let outcome = match matched {
            Some((route, params)) => {
                let ctx = RequestContext {
                    params,
                    headers,
                    body,
                };
                match panic::catch_unwind(AssertUnwindSafe(|| (route.handler)(ctx))) {
                    Ok(result) => result,
                    Err(payload) => Err(ApiError::OperationFailed {
                        operation: "handler",
                        source: panic_message(payload).into(),
                    }),
                }
            }
            None => Err(ApiError::NotFound {
                method: method.clone(),
                path: path.to_string(),
            }),
        };

        match &outcome {
            Ok(_) => tracing::info!(method = %method, path = %path, "request handled"),
            Err(err) => {
                tracing::error!(method = %method, path = %path, error = %err, "request failed")
            }
        }
        outcome
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
