use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use zipkin_trace_stats::aggregator::BatchStats;
use zipkin_trace_stats::commands::{execute_run, process_url, run_batch, RunArgs, TraceOutcome};
use zipkin_trace_stats::output::{read_batch_stats, FileSink};
use zipkin_trace_stats::rpc::TraceSource;
use zipkin_trace_stats::utils::{RpcError, Settings};

/// In-memory backend: known ids return their body, others 404
struct FakeBackend {
    traces: HashMap<String, Value>,
}

impl FakeBackend {
    fn new(traces: &[(&str, Value)]) -> Self {
        Self {
            traces: traces
                .iter()
                .map(|(id, body)| (id.to_string(), body.clone()))
                .collect(),
        }
    }
}

impl TraceSource for FakeBackend {
    fn fetch_trace(&self, trace_id: &str) -> Result<Value, RpcError> {
        self.traces
            .get(trace_id)
            .cloned()
            .ok_or_else(|| RpcError::UnexpectedStatus {
                trace_id: trace_id.to_string(),
                status: 404,
            })
    }
}

fn two_span_trace() -> Value {
    json!([
        {"timestamp": 1_000_000, "duration": 500_000},
        {"timestamp": 2_000_000, "duration": 250_000}
    ])
}

#[test]
fn test_end_to_end_one_valid_one_invalid() {
    let temp_dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(temp_dir.path());
    let backend = FakeBackend::new(&[("abc123", two_span_trace())]);
    let urls = vec![
        "http://zipkin-ui/zipkin/traces/abc123".to_string(),
        "http://zipkin-ui/zipkin/not-a-trace".to_string(),
    ];

    let report = run_batch(&urls, &backend, &sink).unwrap();

    let expected = BatchStats {
        total_traces: 1,
        total_spans: 2,
        total_time: 750.0,
        avg_time: 375.0,
        min_time: 250.0,
        max_time: 500.0,
    };
    assert_eq!(report.batch, Some(expected.clone()));
    assert_eq!(report.processed, 1);
    assert_eq!(report.invalid_urls, 1);

    let output_path = report.output_path.unwrap();
    assert_eq!(read_batch_stats(&output_path).unwrap(), expected);

    // Raw response is archived as received
    let archived: Value = serde_json::from_str(
        &std::fs::read_to_string(sink.archive_path("abc123")).unwrap(),
    )
    .unwrap();
    assert_eq!(archived, two_span_trace());
}

#[test]
fn test_failures_do_not_abort_batch() {
    let temp_dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(temp_dir.path());
    let backend = FakeBackend::new(&[
        ("aaa", two_span_trace()),
        ("bbb", json!([{"duration": 10}])),
        ("ccc", json!([{"timestamp": 0, "duration": 1_000}])),
    ]);
    let urls: Vec<String> = [
        "/traces/aaa",
        "/traces/404404",
        "",
        "/traces/bbb",
        "/traces/ccc?x=1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let report = run_batch(&urls, &backend, &sink).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.invalid_urls, 1);
    assert_eq!(report.empty_traces, 1);

    let batch = report.batch.unwrap();
    assert_eq!(batch.total_traces, 2);
    assert_eq!(batch.total_spans, 3);
    assert_eq!(batch.total_time, 751.0);
    assert_eq!(batch.min_time, 1.0);
    assert_eq!(batch.max_time, 500.0);
}

#[test]
fn test_no_usable_traces_writes_no_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = temp_dir.path().join("out");
    let sink = FileSink::new(&out_dir).with_archiving(false);
    let backend = FakeBackend::new(&[]);
    let urls = vec!["/traces/abc".to_string(), "nothing".to_string()];

    let report = run_batch(&urls, &backend, &sink).unwrap();

    assert!(report.batch.is_none());
    assert!(report.output_path.is_none());
    assert!(!out_dir.exists());
}

#[test]
fn test_fetch_failure_keeps_status() {
    let temp_dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(temp_dir.path());
    let backend = FakeBackend::new(&[]);

    match process_url("/traces/dead", &backend, &sink) {
        TraceOutcome::FetchFailed { trace_id, error } => {
            assert_eq!(trace_id, "dead");
            assert_eq!(error.status(), Some(404));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_missing_url_list_is_fatal_and_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = temp_dir.path().join("out");
    let args = RunArgs {
        settings: Settings {
            // Port 9 (discard) on loopback; nothing should ever be fetched
            zipkin_base_url: "http://127.0.0.1:9".to_string(),
            urls_file_path: temp_dir.path().join("missing-urls.txt"),
            output_dir: out_dir.clone(),
        },
        archive_traces: true,
        print_summary: false,
    };

    let result = execute_run(args);

    assert!(result.is_err());
    assert!(!out_dir.exists());
}
