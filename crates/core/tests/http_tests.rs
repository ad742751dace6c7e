// ═══════════════════════════════════════════════════════════════════
// HTTP Tests: HttpBackend against a local canned-response server
// ═══════════════════════════════════════════════════════════════════

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use portfolio_advisor_core::backend::http::HttpBackend;
use portfolio_advisor_core::backend::traits::PortfolioBackend;
use portfolio_advisor_core::errors::CoreError;
use portfolio_advisor_core::models::analysis::AnalysisRequest;
use portfolio_advisor_core::models::asset::Asset;
use portfolio_advisor_core::models::portfolio::Portfolio;
use portfolio_advisor_core::models::settings::ClientSettings;
use portfolio_advisor_core::models::upload::UploadFile;
use portfolio_advisor_core::services::analysis_service::failure_message;

// ═══════════════════════════════════════════════════════════════════
// Canned server: answers one request, hands back what it received
// ═══════════════════════════════════════════════════════════════════

struct Canned {
    backend: HttpBackend,
    received: JoinHandle<String>,
}

async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> Canned {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let received = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    let settings = ClientSettings {
        base_url: format!("http://{addr}"),
        ..ClientSettings::default()
    };
    Canned {
        backend: HttpBackend::new(&settings).unwrap(),
        received,
    }
}

/// Read head and body (Content-Length or chunked) of one request.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        let Some(head_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let head = text[..head_end].to_ascii_lowercase();
        let body_len = buf.len() - (head_end + 4);

        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok());
        match content_length {
            Some(len) if body_len >= len => break,
            Some(_) => continue,
            None if head.contains("transfer-encoding: chunked") => {
                if text.ends_with("0\r\n\r\n") {
                    break;
                }
            }
            None => break,
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn request() -> AnalysisRequest {
    AnalysisRequest {
        portfolio: Portfolio {
            assets: vec![Asset {
                ticker: "AAPL".into(),
                quantity: 10.0,
            }],
        },
        goals: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Error statuses
// ═══════════════════════════════════════════════════════════════════

mod error_status {
    use super::*;

    #[tokio::test]
    async fn bad_request_keeps_server_detail() {
        let canned = serve_once("400 Bad Request", "application/json", r#"{"detail":"bad ticker"}"#).await;

        let err = canned.backend.analyze_portfolio(&request()).await.unwrap_err();
        match &err {
            CoreError::Server {
                status,
                detail,
                message,
            } => {
                assert_eq!(*status, 400);
                assert_eq!(detail.as_deref(), Some("bad ticker"));
                assert_eq!(message, "Request failed with status code 400");
            }
            other => panic!("Expected Server, got {:?}", other),
        }
        assert_eq!(failure_message(&err), "Analysis failed: bad ticker");

        let received = canned.received.await.unwrap();
        assert!(received.starts_with("POST /portfolio/analyze "));
        assert!(!received.contains("\"goals\""));
    }

    #[tokio::test]
    async fn plain_text_error_falls_back_to_status_message() {
        let canned = serve_once("500 Internal Server Error", "text/plain", "Internal Server Error").await;

        let err = canned.backend.get_stored_portfolio().await.unwrap_err();
        match &err {
            CoreError::Server { status, detail, .. } => {
                assert_eq!(*status, 500);
                assert!(detail.is_none());
            }
            other => panic!("Expected Server, got {:?}", other),
        }
        assert_eq!(err.user_message(), "Request failed with status code 500");

        let received = canned.received.await.unwrap();
        assert!(received.starts_with("GET /portfolio/stored-portfolio "));
    }

    #[tokio::test]
    async fn unparseable_success_body_is_deserialization_error() {
        let canned = serve_once("200 OK", "application/json", "not json").await;

        let err = canned.backend.get_sample_portfolio().await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
        canned.received.await.unwrap();
    }
}

// ═══════════════════════════════════════════════════════════════════
// Request shapes
// ═══════════════════════════════════════════════════════════════════

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn upload_sends_single_file_part() {
        let canned = serve_once(
            "200 OK",
            "application/json",
            r#"{"message":"ok","extracted_data":null,"assets":[{"ticker":"AAPL","quantity":10}]}"#,
        )
        .await;
        let file = UploadFile::new("statement.png", b"\x89PNG\r\n\x1a\nimage".to_vec());

        let resp = canned.backend.upload_portfolio(&file).await.unwrap();
        assert_eq!(resp.message, "ok");
        assert!(resp.extracted_data.is_empty());
        assert_eq!(resp.assets.len(), 1);

        let received = canned.received.await.unwrap();
        assert!(received.starts_with("POST /portfolio/upload-portfolio "));
        assert!(received.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
        assert!(received.contains("name=\"file\""));
        assert!(received.contains("filename=\"statement.png\""));
        assert!(received.contains("image/png"));
        assert_eq!(received.to_ascii_lowercase().matches("content-disposition: form-data").count(), 1);
    }

    #[tokio::test]
    async fn clear_uses_delete() {
        let canned = serve_once("200 OK", "application/json", r#"{"message":"Portfolio cleared"}"#).await;

        let resp = canned.backend.clear_portfolio().await.unwrap();
        assert_eq!(resp.message, "Portfolio cleared");

        let received = canned.received.await.unwrap();
        assert!(received.starts_with("DELETE /portfolio/clear-portfolio "));
    }
}
