//! Credential extraction and the authentication gate.
//!
//! Credentials travel in two fixed headers. A missing header reads as an
//! empty string and is forwarded to the engine unchanged; whether empty
//! credentials are acceptable is the engine's call.

use crate::dispatch::Headers;
use crate::engine::Engine;
use crate::error::ApiError;

/// Header carrying the acting account name.
pub const USERNAME_HEADER: &str = "x-edge-username";

/// Header carrying the account password.
pub const PASSWORD_HEADER: &str = "x-edge-password";

/// Check the caller's credentials against the engine.
///
/// Returns the acting account name so the caller can log it. The
/// password is read, forwarded, and dropped; it never reaches a log
/// record or an error message.
pub fn authorize(
    engine: &dyn Engine,
    headers: &Headers,
    operation: &'static str,
    module: Option<&str>,
) -> Result<String, ApiError> {
    let username = headers.get(USERNAME_HEADER).to_string();
    let password = headers.get(PASSWORD_HEADER);
    if engine.authenticate(&username, password) {
        return Ok(username);
    }
    match module {
        Some(module) => tracing::error!(
            operation,
            module = %module,
            account = %username,
            "unauthorized request"
        ),
        None => tracing::error!(operation, account = %username, "unauthorized request"),
    }
    Err(ApiError::Unauthorized { account: username })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CollaboratorError, ModuleSpec};
    use std::sync::Mutex;

    struct RecordingEngine {
        accept: bool,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl RecordingEngine {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Engine for RecordingEngine {
        fn authenticate(&self, username: &str, password: &str) -> bool {
            self.seen
                .lock()
                .unwrap()
                .push((username.to_string(), password.to_string()));
            self.accept
        }

        fn start(&self, _spec: ModuleSpec) -> Result<(), CollaboratorError> {
            Ok(())
        }

        fn stop(&self, _name: &str) -> Result<(), CollaboratorError> {
            Ok(())
        }
    }

    #[test]
    fn test_accepted_credentials_return_account() {
        let engine = RecordingEngine::new(true);
        let headers: Headers = [(USERNAME_HEADER, "ops"), (PASSWORD_HEADER, "secret")]
            .into_iter()
            .collect();

        let account = authorize(&engine, &headers, "start_module", Some("foo")).unwrap();
        assert_eq!(account, "ops");
        assert_eq!(
            engine.seen.lock().unwrap().as_slice(),
            &[("ops".to_string(), "secret".to_string())]
        );
    }

    #[test]
    fn test_rejected_credentials_are_unauthorized() {
        let engine = RecordingEngine::new(false);
        let headers: Headers = [(USERNAME_HEADER, "intruder")].into_iter().collect();

        let err = authorize(&engine, &headers, "stop_module", Some("foo")).unwrap_err();
        match err {
            ApiError::Unauthorized { account } => assert_eq!(account, "intruder"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_headers_read_as_empty_credentials() {
        let engine = RecordingEngine::new(false);

        let _ = authorize(&engine, &Headers::new(), "get_available_port", None);
        assert_eq!(
            engine.seen.lock().unwrap().as_slice(),
            &[(String::new(), String::new())]
        );
    }
}
