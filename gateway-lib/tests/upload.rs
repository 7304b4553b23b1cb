//! Integration tests for the upload call against an in-process gateway.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use gateway_lib::{GatewayClient, UploadError, UploadFile, UploadOptions, UploadPolicy};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    content_type: String,
    body: String,
}

struct MockGateway {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockGateway {
    /// Serve every request with the given status and JSON body.
    async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let recorded = recorded.clone();
                        async move {
                            let method = req.method().to_string();
                            let path = req.uri().path().to_string();
                            let content_type = req
                                .headers()
                                .get(CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or_default()
                                .to_string();
                            let bytes = req
                                .into_body()
                                .collect()
                                .await
                                .map(|c| c.to_bytes())
                                .unwrap_or_default();
                            recorded.lock().unwrap().push(Recorded {
                                method,
                                path,
                                content_type,
                                body: String::from_utf8_lossy(&bytes).into_owned(),
                            });

                            let response = Response::builder()
                                .status(status)
                                .header(CONTENT_TYPE, "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap();
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, requests }
    }

    fn client(&self) -> GatewayClient {
        GatewayClient::builder()
            .base_url(format!("http://{}", self.addr))
            .build()
            .unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn markdown_file() -> UploadFile {
    UploadFile::new("notes.md", "text/markdown", b"# Meeting notes".to_vec())
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_upload_returns_json_body() {
    let gateway = MockGateway::start(200, r#"{"file_id": "f-42", "status": "stored"}"#).await;

    let body = gateway
        .client()
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap();

    assert_eq!(body["file_id"], "f-42");
    assert_eq!(body["status"], "stored");
}

#[tokio::test]
async fn test_upload_sends_multipart_fields() {
    let gateway = MockGateway::start(201, r#"{"ok": true}"#).await;
    let options = UploadOptions::new()
        .user_id("alice")
        .privacy_level("private")
        .save_to_memory(true)
        .conversation_id("conv-7");

    gateway
        .client()
        .upload_file(&markdown_file(), &options)
        .await
        .unwrap();

    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/gateway/upload");
    assert!(request.content_type.starts_with("multipart/form-data"));

    assert!(request.body.contains(r#"name="file"; filename="notes.md""#));
    assert!(request.body.contains("Content-Type: text/markdown"));
    assert!(request.body.contains("# Meeting notes"));
    assert!(request.body.contains("name=\"user_id\"\r\n\r\nalice"));
    assert!(request.body.contains("name=\"privacy_level\"\r\n\r\nprivate"));
    assert!(request.body.contains("name=\"save_to_memory\"\r\n\r\ntrue"));
    assert!(request.body.contains("name=\"conversation_id\"\r\n\r\nconv-7"));
}

#[tokio::test]
async fn test_unset_options_are_omitted() {
    let gateway = MockGateway::start(200, "{}").await;

    gateway
        .client()
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap();

    let body = &gateway.requests()[0].body;
    assert!(body.contains(r#"name="file""#));
    assert!(!body.contains("user_id"));
    assert!(!body.contains("save_to_memory"));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_gateway_detail_becomes_error_message() {
    let gateway = MockGateway::start(400, r#"{"detail": "Unsupported document"}"#).await;

    let err = gateway
        .client()
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap_err();

    match &err {
        UploadError::Gateway { status, detail } => {
            assert_eq!(*status, 400);
            assert_eq!(detail, "Unsupported document");
        }
        other => panic!("expected gateway error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Unsupported document");
}

#[tokio::test]
async fn test_gateway_error_without_detail_uses_fallback() {
    let gateway = MockGateway::start(500, r#"{"message": "internal"}"#).await;

    let err = gateway
        .client()
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.to_string(), "Upload failed");
}

#[tokio::test]
async fn test_rejected_file_never_reaches_gateway() {
    let gateway = MockGateway::start(200, "{}").await;
    let client = GatewayClient::builder()
        .base_url(format!("http://{}", gateway.addr))
        .policy(UploadPolicy::default().with_max_size(4))
        .build()
        .unwrap();

    let err = client
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Rejected(_)));
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_passed_through() {
    // Bind and release a port so nothing is listening on it.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = GatewayClient::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();

    let err = client
        .upload_file(&markdown_file(), &UploadOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    match err {
        UploadError::Transport(inner) => assert!(inner.is_connect()),
        other => panic!("expected transport error, got {other:?}"),
    }
}
