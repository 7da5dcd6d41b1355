use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use reqwest::blocking::Client;
use zipkin_trace_stats::rpc::{trace_url, TraceSource, ZipkinClient};
use zipkin_trace_stats::utils::RpcError;

/// Serve one canned HTTP response; the handle yields the request line
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        request_line.trim_end().to_string()
    });

    (base_url, handle)
}

/// Client that ignores proxy settings from the environment
fn local_client(base_url: String) -> ZipkinClient {
    let http = Client::builder().no_proxy().build().unwrap();
    ZipkinClient::with_http_client(base_url, http)
}

#[test]
fn test_trace_url() {
    assert_eq!(
        trace_url("http://localhost:9411", "abc123"),
        "http://localhost:9411/api/v2/trace/abc123"
    );
}

#[test]
fn test_fetch_success() {
    let (base_url, server) = serve_once("200 OK", r#"[{"timestamp":1000,"duration":20}]"#);
    let client = local_client(base_url);

    let body = client.fetch_trace("abc123").unwrap();

    assert_eq!(server.join().unwrap(), "GET /api/v2/trace/abc123 HTTP/1.1");
    assert_eq!(body, serde_json::json!([{"timestamp": 1000, "duration": 20}]));
}

#[test]
fn test_fetch_not_found_carries_status() {
    let (base_url, server) = serve_once("404 Not Found", "trace not found");
    let client = local_client(base_url);

    let err = client.fetch_trace("abc123").unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, RpcError::UnexpectedStatus { status: 404, .. }));
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_fetch_non_200_success_is_failure() {
    let (base_url, server) = serve_once("202 Accepted", "[]");
    let client = local_client(base_url);

    let err = client.fetch_trace("abc123").unwrap_err();
    server.join().unwrap();

    assert_eq!(err.status(), Some(202));
}

#[test]
fn test_fetch_rejects_non_array_body() {
    let (base_url, server) = serve_once("200 OK", r#"{"traceId":"abc123"}"#);
    let client = local_client(base_url);

    let err = client.fetch_trace("abc123").unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, RpcError::InvalidResponse(_)));
}
