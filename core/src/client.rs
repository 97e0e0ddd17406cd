//! The request client: build, dispatch, classify, decode.
//!
//! # Design
//! `RequestClient` holds its configuration as instance state rather than in
//! a process-wide global, so two clients can point at different services
//! without coordinating. Each call runs the same pipeline: overlay per-call
//! options onto the defaults, build a plain-data [`Request`], hand it to the
//! transport, classify the status, and decode the body by content type.
//!
//! A response with a non-2xx status is an application error, not a decoded
//! payload: its body is decoded with the same content-type rules as a
//! success, and a `"message"` string found in a decoded JSON object becomes
//! the failure reason. Transport-level failures pass through unchanged.
//!
//! Reconfiguring takes `&mut self`, so on a single instance the "config
//! changed mid-flight" race cannot be expressed; sharing a client across
//! threads needs external synchronization.

use serde::Serialize;
use serde_json::Value;

use crate::body::{decode, Payload};
use crate::config::{Config, Options};
use crate::error::Error;
use crate::http::{Method, Request};
use crate::transport::{Transport, UreqTransport};

/// The eventual result of a dispatched call: the decoded payload (`None`
/// when the response carried no recognized content type), or a failure.
pub type Outcome = Result<Option<Payload>, Error>;

/// HTTP request helper with per-instance defaults and method shortcuts.
#[derive(Debug)]
pub struct RequestClient<T: Transport = UreqTransport> {
    config: Config,
    transport: T,
}

impl RequestClient<UreqTransport> {
    /// A client with default configuration over the bundled transport.
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl Default for RequestClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> RequestClient<T> {
    /// A client with default configuration over a caller-supplied transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            config: Config::default(),
            transport,
        }
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Overwrite default configuration fields and return the resulting full
    /// configuration. Fields not present in `options` keep their values;
    /// validation of loose option objects happens in [`Options::from_value`].
    pub fn configure(&mut self, options: Options) -> &Config {
        self.config.apply(&options)
    }

    /// Build the request for one call without dispatching it.
    ///
    /// Per-call options overlay the defaults (headers merge per key, the
    /// per-call entry winning). With the effective `json` flag set, `data`
    /// is serialized to JSON text; with it cleared, string data is sent
    /// verbatim and any other value falls back to its compact JSON text,
    /// there being no other canonical text form. No data means no body.
    pub fn build(
        &self,
        method: Method,
        route: &str,
        data: Option<&Value>,
        options: &Options,
    ) -> Result<Request, Error> {
        let config = self.config.overlay(options);
        let url = config.resolve(route);
        let body = match data {
            None => None,
            Some(value) if config.json => Some(
                serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?,
            ),
            Some(Value::String(text)) => Some(text.clone()),
            Some(value) => Some(value.to_string()),
        };
        Ok(Request {
            method,
            url,
            headers: config.headers,
            mode: config.mode,
            body,
        })
    }

    /// Build, dispatch, classify, decode.
    pub fn execute(
        &self,
        method: Method,
        route: &str,
        data: Option<&Value>,
        options: Options,
    ) -> Outcome {
        let request = self.build(method, route, data, &options)?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching");
        let response = self.transport.send(&request).map_err(Error::Transport)?;
        tracing::debug!(status = response.status, url = %request.url, "response received");

        if response.is_success() {
            return decode(&response);
        }
        // Failed response: decode the body with the same content-type rules
        // and surface its message. An undecodable or message-less body still
        // reports the status.
        let message = match decode(&response) {
            Ok(payload) => error_message(payload.as_ref()),
            Err(_) => None,
        };
        Err(Error::Api {
            status: response.status,
            message,
        })
    }

    pub fn get(&self, route: &str) -> Outcome {
        self.execute(Method::Get, route, None, Options::default())
    }

    pub fn get_with(&self, route: &str, options: Options) -> Outcome {
        self.execute(Method::Get, route, None, options)
    }

    pub fn post<B: Serialize>(&self, route: &str, data: &B) -> Outcome {
        self.post_with(route, data, Options::default())
    }

    pub fn post_with<B: Serialize>(&self, route: &str, data: &B, options: Options) -> Outcome {
        let value = to_value(data)?;
        self.execute(Method::Post, route, Some(&value), options)
    }

    pub fn put<B: Serialize>(&self, route: &str, data: &B) -> Outcome {
        self.put_with(route, data, Options::default())
    }

    pub fn put_with<B: Serialize>(&self, route: &str, data: &B, options: Options) -> Outcome {
        let value = to_value(data)?;
        self.execute(Method::Put, route, Some(&value), options)
    }

    pub fn patch<B: Serialize>(&self, route: &str, data: &B) -> Outcome {
        self.patch_with(route, data, Options::default())
    }

    pub fn patch_with<B: Serialize>(&self, route: &str, data: &B, options: Options) -> Outcome {
        let value = to_value(data)?;
        self.execute(Method::Patch, route, Some(&value), options)
    }

    pub fn del(&self, route: &str) -> Outcome {
        self.execute(Method::Delete, route, None, Options::default())
    }
}

fn to_value<B: Serialize>(data: &B) -> Result<Value, Error> {
    serde_json::to_value(data).map_err(|e| Error::Serialization(e.to_string()))
}

/// The `"message"` string of a decoded JSON object, if any. Other payload
/// shapes carry no extractable failure reason.
fn error_message(payload: Option<&Payload>) -> Option<String> {
    match payload {
        Some(Payload::Json(value)) => value.get("message")?.as_str().map(str::to_owned),
        _ => None,
    }
}
