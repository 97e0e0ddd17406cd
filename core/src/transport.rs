//! The transport seam between the client and the host's HTTP machinery.
//!
//! # Design
//! `Transport` is the single point where actual I/O happens: it takes a
//! built [`Request`] and returns a raw [`Response`] or a transport-level
//! error string. Status interpretation is explicitly not the transport's
//! job; a 4xx/5xx round-trip is a successful `send`. This keeps the client
//! in charge of classification and lets tests swap in a canned transport.
//!
//! `UreqTransport` is the bundled implementation. The agent is configured
//! with `http_status_as_error(false)` so non-2xx responses come back as
//! data, and connections are reused across calls for the lifetime of the
//! agent.

use crate::http::{Method, Request, Response};

/// Executes a single HTTP round-trip.
///
/// Errors are transport-level only (network unreachable, DNS failure); any
/// response that arrived, whatever its status, is `Ok`.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response, String>;
}

/// Bundled [`Transport`] over a long-lived [`ureq::Agent`].
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &Request) -> Result<Response, String> {
        // GET and DELETE never carry a body; the request builder does not
        // attach one for them.
        let result = match (&request.method, &request.body) {
            (Method::Get, _) => {
                let mut req = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            (Method::Delete, _) => {
                let mut req = self.agent.delete(&request.url);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            (method, body) => {
                let mut req = match method {
                    Method::Post => self.agent.post(&request.url),
                    Method::Put => self.agent.put(&request.url),
                    Method::Patch => self.agent.patch(&request.url),
                    Method::Get | Method::Delete => unreachable!("handled above"),
                };
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => req.send(body.as_bytes()),
                    None => req.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| e.to_string())?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
