//! Error types for the request client.
//!
//! # Design
//! Two failure kinds reach callers: `Transport` for network-level errors,
//! passed through from the transport unchanged, and `Api` for responses that
//! arrived with a non-2xx status. `Api` carries the message extracted from
//! the decoded body when one exists; a failed response with an undecodable
//! or message-less body still reports its status.

use std::fmt;

/// Errors returned by `RequestClient` operations.
#[derive(Debug)]
pub enum Error {
    /// The transport could not complete the round-trip (network unreachable,
    /// DNS failure, and so on). The inner string is the transport's own
    /// description, propagated as-is.
    Transport(String),

    /// The server responded with a status outside the 2xx range. `message`
    /// is the `"message"` field of the decoded body when the body decoded to
    /// a JSON object carrying one.
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The request payload could not be serialized.
    Serialization(String),

    /// The response declared a decodable content type but its body could not
    /// be decoded.
    Decode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "transport failure: {msg}"),
            Error::Api {
                status,
                message: Some(msg),
            } => write!(f, "HTTP {status}: {msg}"),
            Error::Api {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            Error::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            Error::Decode(msg) => write!(f, "decoding failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
