//! End-to-end publish tests against a local HTTP capture server.

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use tokio::net::TcpListener;

use hostbeat::{Publisher, Sample};

/// Requests seen by the capture server: (content-type, body).
#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
}

async fn capture(
    State(captured): State<Captured>,
    headers: HeaderMap,
    body: String,
) -> &'static str {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    captured.requests.lock().unwrap().push((content_type, body));
    "received"
}

async fn spawn_server(captured: Captured) -> SocketAddr {
    let app = Router::new()
        .route("/monitor", post(capture))
        .with_state(captured);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn scenario_sample() -> Sample {
    Sample {
        client_ip: "192.168.1.42".to_string(),
        cpu_usage: 12.5,
        memory_usage: 47.3,
        disk_usage: 88.0,
    }
}

#[tokio::test]
async fn test_posts_exact_json_body() {
    let captured = Captured::default();
    let addr = spawn_server(captured.clone()).await;

    let publisher = Publisher::new(format!("http://{}/monitor", addr));
    publisher.publish(&scenario_sample()).await.unwrap();

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);

    let (content_type, body) = &requests[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        r#"{"clientIP":"192.168.1.42","cpuUsage":12.5,"memoryUsage":47.3,"diskUsage":88.0}"#
    );
}

#[tokio::test]
async fn test_publishes_each_sample_independently() {
    let captured = Captured::default();
    let addr = spawn_server(captured.clone()).await;

    let publisher = Publisher::new(format!("http://{}/monitor", addr));

    // One sample with a zeroed field (failed measurement) still goes out.
    let degraded = Sample {
        client_ip: "192.168.1.42".to_string(),
        cpu_usage: 12.5,
        memory_usage: 0.0,
        disk_usage: 88.0,
    };

    publisher.publish(&degraded).await.unwrap();
    publisher.publish(&scenario_sample()).await.unwrap();

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].1.contains(r#""memoryUsage":0.0"#));
}

/// In-memory log sink for asserting on emitted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_server_reply_is_logged_at_default_level() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let captured = Captured::default();
    let addr = spawn_server(captured.clone()).await;

    // Same filter the agent installs by default: "info".
    let log = LogBuffer::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(move || writer.clone()))
        .with(EnvFilter::new("info"));
    let guard = tracing::subscriber::set_default(subscriber);

    let publisher = Publisher::new(format!("http://{}/monitor", addr));
    publisher.publish(&scenario_sample()).await.unwrap();

    drop(guard);

    // The response body is part of the log contract, verbatim.
    let logged = log.contents();
    assert!(logged.contains("server response"), "log was: {}", logged);
    assert!(logged.contains("received"), "log was: {}", logged);
}

#[tokio::test]
async fn test_unreachable_endpoint_reports_post_context() {
    // Bind then drop to find a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{}/monitor", addr);
    let publisher = Publisher::new(url.clone());

    let err = publisher.publish(&scenario_sample()).await.unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("Failed to POST sample"),
        "unexpected message: {}",
        message
    );
    assert!(message.contains(&url), "unexpected message: {}", message);

    // The publisher carries no failed state: a later attempt still runs
    // and fails the same way, as the loop expects.
    let err = publisher.publish(&scenario_sample()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to POST sample"));
}
