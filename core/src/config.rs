//! Client configuration and URL resolution.
//!
//! # Design
//! `Config` is the full set of defaults applied to every call; `Options` is
//! a partial overlay with one `Option` field per configuration key. The two
//! merge in two distinct ways: `apply` (the `configure` path) overwrites
//! whole fields, while `overlay` (the per-call path) merges `headers` per
//! key so a call can add or override a single header without losing the
//! defaults.
//!
//! Option objects arriving as loose JSON go through `Options::from_value`,
//! which validates every key against the allow-list. Unknown keys and
//! wrong-typed values are warned about and dropped; they are never
//! persisted. Valid keys in the same object still apply.

use std::collections::BTreeMap;

use serde_json::Value;

/// The configuration keys accepted by `Options::from_value`.
pub const ALLOWED_KEYS: [&str; 4] = ["json", "baseUrl", "headers", "mode"];

/// Default settings applied to every call unless overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Serialize request data as JSON text.
    pub json: bool,
    /// Base URL joined onto rooted routes. Empty means rooted routes are
    /// used as-is; there is no ambient origin outside a browser.
    pub base_url: String,
    /// Headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Fetch-style request mode, carried on built requests for transports
    /// that understand it.
    pub mode: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            json: true,
            base_url: String::new(),
            headers,
            mode: "cors".to_string(),
        }
    }
}

impl Config {
    /// Overwrite whole fields from `options` (the `configure` semantics:
    /// a provided `headers` map replaces the defaults wholesale).
    pub fn apply(&mut self, options: &Options) -> &Config {
        if let Some(json) = options.json {
            self.json = json;
        }
        if let Some(base_url) = &options.base_url {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(headers) = &options.headers {
            self.headers = headers.clone();
        }
        if let Some(mode) = &options.mode {
            self.mode = mode.clone();
        }
        self
    }

    /// Merge `options` over this configuration for a single call. Scalar
    /// fields overwrite; `headers` merge per key with the per-call entry
    /// winning on conflict.
    pub fn overlay(&self, options: &Options) -> Config {
        let mut merged = self.clone();
        if let Some(json) = options.json {
            merged.json = json;
        }
        if let Some(base_url) = &options.base_url {
            merged.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(headers) = &options.headers {
            for (name, value) in headers {
                merged.headers.insert(name.clone(), value.clone());
            }
        }
        if let Some(mode) = &options.mode {
            merged.mode = mode.clone();
        }
        merged
    }

    /// Resolve a route against the base URL: routes beginning with `/` are
    /// joined onto `base_url`, anything else is treated as already absolute
    /// and used verbatim. No well-formedness validation.
    pub fn resolve(&self, route: &str) -> String {
        match route.strip_prefix('/') {
            Some(rest) => format!("{}/{}", self.base_url, rest),
            None => route.to_string(),
        }
    }
}

/// A partial configuration overlay: one optional field per allowed key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub json: Option<bool>,
    pub base_url: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub mode: Option<String>,
}

impl Options {
    /// Build an overlay from a loose JSON object, validating every key
    /// against [`ALLOWED_KEYS`]. Unknown keys and wrong-typed values are
    /// warned about and dropped; valid keys still apply.
    pub fn from_value(value: &Value) -> Options {
        let mut options = Options::default();
        let Some(object) = value.as_object() else {
            tracing::warn!("configuration options must be a JSON object, ignoring");
            return options;
        };
        for (key, value) in object {
            match key.as_str() {
                "json" => match value.as_bool() {
                    Some(json) => options.json = Some(json),
                    None => tracing::warn!(%key, "expected a boolean, ignoring"),
                },
                "baseUrl" => match value.as_str() {
                    Some(base_url) => options.base_url = Some(base_url.to_string()),
                    None => tracing::warn!(%key, "expected a string, ignoring"),
                },
                "headers" => match header_map(value) {
                    Some(headers) => options.headers = Some(headers),
                    None => {
                        tracing::warn!(%key, "expected an object of string values, ignoring")
                    }
                },
                "mode" => match value.as_str() {
                    Some(mode) => options.mode = Some(mode.to_string()),
                    None => tracing::warn!(%key, "expected a string, ignoring"),
                },
                _ => tracing::warn!(
                    %key,
                    allowed = ?ALLOWED_KEYS,
                    "unknown configuration key, ignoring"
                ),
            }
        }
        options
    }
}

fn header_map(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    let mut headers = BTreeMap::new();
    for (name, value) in object {
        headers.insert(name.clone(), value.as_str()?.to_string());
    }
    Some(headers)
}
