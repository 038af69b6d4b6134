use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use docsearchd::config::UpstreamConfig;
use docsearchd::query::SearchOptions;
use docsearchd::search;
use docsearchd::upstream::{DocsClient, UpstreamError};

/// One-shot HTTP server: reads a single request head, hands it back through
/// the join handle and writes `response` verbatim.
async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = sock.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        sock.write_all(response.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
        String::from_utf8_lossy(&buf).into_owned()
    });
    (format!("http://{}", addr), handle)
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn client_for(base_url: String) -> DocsClient {
    let cfg = UpstreamConfig { base_url, ..UpstreamConfig::default() };
    DocsClient::new_http(cfg).expect("client builds")
}

#[tokio::test]
async fn fetches_and_encodes_query() {
    let (base, server) = serve_once(http_response("200 OK", "[{\"id\":1}]")).await;
    let client = client_for(base);
    let body = client.fetch("cart api").await.expect("fetch ok");
    assert_eq!(body, "[{\"id\":1}]");
    let head = server.await.unwrap();
    assert!(head.starts_with("GET /mcp/search?query=cart+api HTTP/1.1"), "{head}");
    assert!(head.to_ascii_lowercase().contains("accept: application/json"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base, _server) = serve_once(http_response("500 Internal Server Error", "")).await;
    let err = client_for(base).fetch("q").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Status(500)), "{err:?}");
}

#[tokio::test]
async fn oversize_body_is_rejected() {
    let (base, _server) = serve_once(http_response("200 OK", "[1,2,3,4,5,6,7,8,9]")).await;
    let cfg = UpstreamConfig { base_url: base, max_body_bytes: 4, ..UpstreamConfig::default() };
    let err = DocsClient::new_http(cfg).unwrap().fetch("q").await.unwrap_err();
    assert!(matches!(err, UpstreamError::TooLarge(_)), "{err:?}");
}

#[tokio::test]
async fn hanging_upstream_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        let (sock, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(sock);
    });
    let cfg = UpstreamConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 1,
        ..UpstreamConfig::default()
    };
    let err = DocsClient::new_http(cfg).unwrap().fetch("q").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn upstream_failure_surfaces_as_failed_outcome() {
    let (base, _server) = serve_once(http_response("404 Not Found", "")).await;
    let out = search(&client_for(base), "q", &SearchOptions::default()).await;
    assert!(!out.success);
    assert_eq!(out.error.as_deref(), Some("upstream returned HTTP 404"));
}

#[tokio::test]
async fn end_to_end_paginates_upstream_results() {
    let body = "{\"results\":[{\"id\":1},{\"id\":2},{\"id\":3}],\"total_results\":30}";
    let (base, _server) = serve_once(http_response("200 OK", body)).await;
    let out = search(&client_for(base), "q", &SearchOptions::new(2i64, 2i64)).await;
    let v: serde_json::Value = serde_json::from_str(out.formatted_text.as_deref().unwrap()).unwrap();
    assert_eq!(v["results"], serde_json::json!([{ "id": 3 }]));
    assert_eq!(v["pagination"]["total_pages"], 15);
    assert_eq!(v["total_results"], 30);
}
