//! Minimal HTTP request helper.
//!
//! # Overview
//! Wraps a transport primitive with method-named shortcuts (GET, POST, PUT,
//! PATCH, DELETE), default/per-call option merging, content-type-aware
//! response decoding, and promotion of non-2xx responses to typed failures.
//! Every call runs the same pipeline: build request → dispatch → classify
//! status → decode body → resolve or reject.
//!
//! # Design
//! - Configuration lives on the [`RequestClient`] instance, not in
//!   process-wide state; `configure` takes `&mut self`.
//! - The actual I/O sits behind the [`Transport`] trait. The bundled
//!   [`UreqTransport`] executes requests with ureq; tests substitute canned
//!   transports.
//! - Body decoding is keyed on the content-type essence as a tagged
//!   [`Payload`] variant. Unrecognized content types decode to `None`, never
//!   to an error.
//! - Transport, TLS, pooling, retries and caching belong to the transport
//!   provider; this crate does none of them.

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use body::{decode, FormField, Payload};
pub use client::{Outcome, RequestClient};
pub use config::{Config, Options, ALLOWED_KEYS};
pub use error::Error;
pub use http::{Method, Request, Response};
pub use transport::{Transport, UreqTransport};
