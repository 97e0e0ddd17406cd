//! Plain-data request and response types.
//!
//! # Design
//! A `Request` is built once per call and never mutated afterwards; a
//! `Response` is whatever the transport handed back, untouched. Keeping both
//! as plain owned data means any transport implementation can produce and
//! consume them without lifetime concerns, and unit tests can fabricate
//! responses without a network.

use std::collections::BTreeMap;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The uppercase wire form of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request described as plain data, ready for a transport to execute.
///
/// Built by `RequestClient::build`. `mode` mirrors the fetch request mode
/// from the configuration; transports that have no such concept ignore it.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub mode: String,
    pub body: Option<String>,
}

/// A response described as plain data, as returned by a transport.
///
/// The body is kept as raw bytes; decoding is the decoder's job and depends
/// on the declared content type.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Case-insensitive header lookup; returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The declared content type with any parameters after `;` stripped.
    pub fn content_type(&self) -> Option<&str> {
        let raw = self.header("content-type")?;
        Some(raw.split(';').next().unwrap_or(raw).trim())
    }

    /// Whether the status code is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(headers: Vec<(String, String)>) -> Response {
        Response {
            status: 200,
            headers,
            body: Vec::new(),
        }
    }

    #[test]
    fn method_wire_forms_are_uppercase() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = response_with(vec![("Content-Type".to_string(), "text/html".to_string())]);
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn content_type_strips_parameters() {
        let resp = response_with(vec![(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        )]);
        assert_eq!(resp.content_type(), Some("text/html"));
    }

    #[test]
    fn content_type_absent_when_header_missing() {
        let resp = response_with(Vec::new());
        assert_eq!(resp.content_type(), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut resp = response_with(Vec::new());
        resp.status = 199;
        assert!(!resp.is_success());
        resp.status = 200;
        assert!(resp.is_success());
        resp.status = 299;
        assert!(resp.is_success());
        resp.status = 300;
        assert!(!resp.is_success());
    }
}
