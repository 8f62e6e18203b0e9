//! Per-request context handed to handlers.

use std::collections::HashMap;

/// Named path parameters captured from the concrete path.
pub type PathParams = HashMap<String, String>;

/// Case-insensitive header view.
///
/// Keys are folded to lowercase at insertion so lookups are independent
/// of the transport's header casing. Values are stored as received.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header value. A later insert for the same key overwrites.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Look up a header value. A missing key reads as the empty string.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Headers {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Everything a handler sees for one call.
///
/// Constructed by the dispatcher per inbound request and dropped when
/// the handler returns.
#[derive(Debug)]
pub struct RequestContext {
    pub params: PathParams,
    pub headers: Headers,
    /// Raw request body. `None` when the transport saw no body bytes.
    pub body: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("X-Edge-Username", "ops");
        assert_eq!(headers.get("x-edge-username"), "ops");
        assert_eq!(headers.get("X-EDGE-USERNAME"), "ops");
    }

    #[test]
    fn test_missing_header_reads_as_empty() {
        let headers = Headers::new();
        assert_eq!(headers.get("x-edge-password"), "");
    }

    #[test]
    fn test_later_insert_overwrites() {
        let mut headers = Headers::new();
        headers.insert("x-edge-username", "first");
        headers.insert("X-Edge-Username", "second");
        assert_eq!(headers.get("x-edge-username"), "second");
    }
}
