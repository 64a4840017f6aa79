use super::*;

fn response(status: u16, body: &'static str) -> APIResponse {
    let http_response = http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Bytes::from_static(body.as_bytes()))
        .unwrap();
    APIResponse::new(reqwest::Response::from(http_response))
}

#[test]
fn ok_is_true_for_2xx() {
    let resp = response(200, "{}");
    assert!(resp.ok());
    assert_eq!(resp.status(), 200);
}

#[test]
fn is_client_error_for_4xx() {
    let resp = response(404, "{}");
    assert!(resp.is_client_error());
    assert!(!resp.ok());
}

#[test]
fn is_server_error_for_5xx() {
    let resp = response(503, "{}");
    assert!(resp.is_server_error());
}

#[test]
fn header_lookup_is_case_insensitive() {
    let resp = response(200, "{}");
    assert_eq!(resp.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn text_returns_body() {
    let resp = response(200, "hello");
    let text = resp.text().await.unwrap();
    assert_eq!(text, "hello");
}
