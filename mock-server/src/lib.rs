use std::collections::BTreeMap;

use axum::{
    body::{Body, Bytes},
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Boundary used by the `/form` route, exported so tests can build
/// expectations against it.
pub const FORM_BOUNDARY: &str = "fetchy-mock-boundary";

/// What `/echo` reflects back about the request it received.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/json", get(json_doc))
        .route("/html", get(html_doc))
        .route("/bytes", get(bytes_doc))
        .route("/form", get(form_doc))
        .route("/plain", get(plain_doc))
        .route("/untyped", get(untyped_doc))
        .route("/fail/{status}", get(fail))
        .route("/fail-html/{status}", get(fail_html))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn json_doc() -> Json<serde_json::Value> {
    Json(serde_json::json!({"a": 1, "greeting": "hello"}))
}

async fn html_doc() -> Html<&'static str> {
    // Html sets `text/html; charset=utf-8`, which exercises parameter
    // stripping in the decoder.
    Html("<html><body>hello</body></html>")
}

async fn bytes_doc() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Bytes::from_static(&[0x00, 0x01, 0x02, 0xfe, 0xff]),
    )
}

async fn form_doc() -> impl IntoResponse {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"greeting\"\r\n\
         \r\n\
         hello\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"upload\"; filename=\"a.bin\"\r\n\
         Content-Type: application/octet-stream\r\n\
         \r\n\
         \x01\x02\r\n\
         --{b}--\r\n",
        b = FORM_BOUNDARY
    );
    (
        [(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={FORM_BOUNDARY}"),
        )],
        body,
    )
}

async fn plain_doc() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "plain text")
}

/// A 200 with a body but no content-type header at all.
async fn untyped_doc() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .body(Body::from("mystery"))
        .unwrap()
}

async fn fail(Path(status): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = status
        .canonical_reason()
        .unwrap_or("error")
        .to_lowercase();
    (status, Json(serde_json::json!({ "message": message })))
}

async fn fail_html(Path(status): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Html(format!("<html><body>{}</body></html>", status.as_u16())),
    )
}
