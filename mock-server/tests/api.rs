use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, FORM_BOUNDARY};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header(http::header::CONTENT_TYPE, "application/json")
                .header("x-request-id", "42")
                .body(r#"{"a":1}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.path, "/echo");
    assert_eq!(echo.body, r#"{"a":1}"#);
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(echo.headers.get("x-request-id").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn echo_accepts_delete_without_body() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/echo")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.body, "");
}

// --- content-type fixtures ---

#[tokio::test]
async fn json_route_declares_application_json() {
    let resp = app().oneshot(get("/json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"));
    let doc: serde_json::Value = body_json(resp).await;
    assert_eq!(doc["a"], 1);
}

#[tokio::test]
async fn html_route_declares_text_html_with_charset() {
    let resp = app().oneshot(get("/html")).await.unwrap();
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap();
    assert_eq!(content_type, "text/html; charset=utf-8");
}

#[tokio::test]
async fn bytes_route_serves_octet_stream() {
    let resp = app().oneshot(get("/bytes")).await.unwrap();
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert_eq!(content_type, "application/octet-stream");
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], &[0x00, 0x01, 0x02, 0xfe, 0xff]);
}

#[tokio::test]
async fn form_route_serves_multipart_with_known_boundary() {
    let resp = app().oneshot(get("/form")).await.unwrap();
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert_eq!(
        content_type,
        format!("multipart/form-data; boundary={FORM_BOUNDARY}")
    );
    let body = body_bytes(resp).await;
    assert!(body.starts_with(format!("--{FORM_BOUNDARY}\r\n").as_bytes()));
    assert!(body.ends_with(format!("--{FORM_BOUNDARY}--\r\n").as_bytes()));
}

#[tokio::test]
async fn untyped_route_has_no_content_type() {
    let resp = app().oneshot(get("/untyped")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(http::header::CONTENT_TYPE).is_none());
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"mystery");
}

// --- failure fixtures ---

#[tokio::test]
async fn fail_route_returns_status_with_json_message() {
    let resp = app().oneshot(get("/fail/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let doc: serde_json::Value = body_json(resp).await;
    assert_eq!(doc["message"], "not found");
}

#[tokio::test]
async fn fail_html_route_returns_status_without_message() {
    let resp = app().oneshot(get("/fail-html/500")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}
