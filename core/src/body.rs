//! Content-type-aware response body decoding.
//!
//! # Design
//! The decoding strategy is selected purely from the content-type essence
//! (the part before any `;` parameter) as a tagged variant, so adding a new
//! strategy touches only this module, never the dispatcher. A response with
//! an unrecognized or missing content type decodes to `None` rather than an
//! error; that gap is deliberate and documented on [`decode`].
//!
//! The multipart parser is the minimum needed for `multipart/form-data`
//! response bodies: it takes the boundary from the full header value, splits
//! on the dash-prefixed delimiter, and reads each part's
//! `Content-Disposition` for the field name and optional filename. Part
//! bodies stay raw bytes since parts may carry binary payloads.

use serde_json::Value;

use crate::error::Error;
use crate::http::Response;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json` — the parsed document.
    Json(Value),
    /// `multipart/form-data` — the decoded form fields in order.
    Form(Vec<FormField>),
    /// `text/html` — the body as text.
    Text(String),
    /// `application/octet-stream` — the body as raw bytes.
    Binary(Vec<u8>),
}

/// One field of a decoded `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

/// Decode a response body according to its declared content type.
///
/// Returns `Ok(None)` when the content type is missing or not one of the
/// recognized strategies; callers must treat that as "no payload", not as a
/// failure.
pub fn decode(response: &Response) -> Result<Option<Payload>, Error> {
    let Some(essence) = response.content_type() else {
        return Ok(None);
    };
    match essence.to_ascii_lowercase().as_str() {
        "application/json" => {
            let value: Value = serde_json::from_slice(&response.body)
                .map_err(|e| Error::Decode(e.to_string()))?;
            Ok(Some(Payload::Json(value)))
        }
        "multipart/form-data" => {
            // the boundary parameter lives in the full header value
            let header = response.header("content-type").unwrap_or_default();
            Ok(Some(Payload::Form(parse_multipart(header, &response.body)?)))
        }
        "text/html" => {
            let text = String::from_utf8(response.body.clone())
                .map_err(|e| Error::Decode(e.to_string()))?;
            Ok(Some(Payload::Text(text)))
        }
        "application/octet-stream" => Ok(Some(Payload::Binary(response.body.clone()))),
        _ => Ok(None),
    }
}

/// Extract the boundary parameter from a content-type header value.
fn boundary(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.trim().split_once('=')?;
        name.eq_ignore_ascii_case("boundary")
            .then(|| value.trim_matches('"'))
    })
}

fn parse_multipart(content_type: &str, body: &[u8]) -> Result<Vec<FormField>, Error> {
    let boundary = boundary(content_type)
        .ok_or_else(|| Error::Decode("multipart response without a boundary parameter".to_string()))?;
    let delimiter = format!("--{boundary}").into_bytes();

    let mut fields = Vec::new();
    let mut pos = find(body, &delimiter, 0)
        .ok_or_else(|| Error::Decode("multipart body missing its boundary".to_string()))?;
    loop {
        pos += delimiter.len();
        if body[pos..].starts_with(b"--") {
            // closing delimiter
            break;
        }
        let Some(start) = find(body, b"\r\n", pos).map(|i| i + 2) else {
            break;
        };
        let Some(end) = find(body, &delimiter, start) else {
            break;
        };
        fields.push(parse_part(&body[start..end])?);
        pos = end;
    }
    Ok(fields)
}

/// Parse one part: a CRLF-separated header block, a blank line, then the
/// raw data up to (but not including) the CRLF before the next delimiter.
fn parse_part(part: &[u8]) -> Result<FormField, Error> {
    let header_end = find(part, b"\r\n\r\n", 0)
        .ok_or_else(|| Error::Decode("multipart part missing its header block".to_string()))?;
    let header_text = std::str::from_utf8(&part[..header_end])
        .map_err(|e| Error::Decode(e.to_string()))?;

    let mut name = None;
    let mut filename = None;
    for line in header_text.split("\r\n") {
        let Some((header, value)) = line.split_once(':') else {
            continue;
        };
        if header.trim().eq_ignore_ascii_case("content-disposition") {
            name = disposition_param(value, "name");
            filename = disposition_param(value, "filename");
        }
    }
    let name = name
        .ok_or_else(|| Error::Decode("multipart part without a field name".to_string()))?;

    let mut data = &part[header_end + 4..];
    if data.ends_with(b"\r\n") {
        data = &data[..data.len() - 2];
    }
    Ok(FormField {
        name,
        filename,
        data: data.to_vec(),
    })
}

fn disposition_param(value: &str, param: &str) -> Option<String> {
    value.split(';').skip(1).find_map(|p| {
        let (name, value) = p.trim().split_once('=')?;
        name.eq_ignore_ascii_case(param)
            .then(|| value.trim_matches('"').to_string())
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}
