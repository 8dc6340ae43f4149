use bc_api::{ApiClient, ClientOptions, Resource, Session, Submission, TeamRanking};
use bc_pager::{FetchError, PageFetcher, PageRequest, StatusCode};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve a single HTTP response and hand back the raw request text
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(String::from_utf8_lossy(&request).to_string());
    });

    (format!("http://{}", addr), rx)
}

/// Accept one connection and never answer it
async fn hang_once() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    format!("http://{}", addr)
}

fn client(api_url: &str, session: impl FnOnce(Session) -> Session) -> ApiClient {
    ApiClient::new(
        session(Session::new(api_url, "bc24")),
        ClientOptions {
            timeout: Duration::from_secs(5),
            ..ClientOptions::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_submissions_with_count() {
    let body = r#"{
        "count": 23,
        "results": [
            {"id": 1, "status": "OK!", "created": "2024-01-10T12:00:00Z", "description": "v1"},
            {"id": 2, "status": "QUE", "created": "2024-01-11T12:00:00Z"}
        ]
    }"#;
    let (url, request_rx) = serve_once("200 OK", body).await;
    let client = client(&url, |s| s.with_token("tok3n"));

    let page = client
        .endpoint::<Submission>()
        .fetch_page(PageRequest::new(Resource::Submissions.key(), 3))
        .await
        .unwrap();

    assert_eq!(page.page_limit, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].status, StatusCode::Success);
    assert_eq!(page.items[1].status, StatusCode::Queued);

    let request = request_rx.await.unwrap();
    assert!(request.starts_with("GET /api/compete/bc24/submission/?page=3 HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer tok3n"));
}

#[tokio::test]
async fn test_fetch_rankings_with_page_limit_and_search() {
    let body = r#"{"pageLimit": 7, "results": [{"id": 4, "name": "bots", "rating": 1500.5}]}"#;
    let (url, request_rx) = serve_once("200 OK", body).await;
    let client = client(&url, |s| s);

    let page = client
        .fetch::<TeamRanking>(&PageRequest::new(Resource::rankings("bots").key(), 2))
        .await
        .unwrap();

    assert_eq!(page.page_limit, 7);
    assert_eq!(page.items[0].name, "bots");

    let request = request_rx.await.unwrap();
    assert!(request.starts_with("GET /api/team/bc24/t/?ordering=-rating%2Cname&search=bots&page=2 "));
    assert!(!request.to_lowercase().contains("authorization"));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let (url, _request_rx) = serve_once("500 Internal Server Error", "{}").await;
    let client = client(&url, |s| s);

    let err = client
        .fetch::<Submission>(&PageRequest::new("submissions", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (url, _request_rx) = serve_once("200 OK", r#"{"items": []}"#).await;
    let client = client(&url, |s| s);

    let err = client
        .fetch::<Submission>(&PageRequest::new("submissions", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}", addr), |s| s);
    let err = client
        .fetch::<Submission>(&PageRequest::new("submissions", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_unknown_resource_is_rejected_before_sending() {
    let client = client("http://127.0.0.1:9", |s| s);
    let err = client
        .fetch::<Submission>(&PageRequest::new("tournaments", 1))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::UnknownResource("tournaments".into()));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let url = hang_once().await;
    let client = ApiClient::new(
        Session::new(&url, "bc24"),
        ClientOptions {
            timeout: Duration::from_millis(100),
            ..ClientOptions::default()
        },
    )
    .unwrap();

    let err = client
        .fetch::<Submission>(&PageRequest::new("submissions", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)), "got {:?}", err);
}
