use zipkin_trace_stats::aggregator::{aggregate_batch, compute_trace_stats, TraceStats};
use zipkin_trace_stats::parser::{build_intervals, RawSpan};

fn trace(total_spans: usize, total_time: f64, avg_time: f64, min_time: f64, max_time: f64) -> TraceStats {
    TraceStats {
        total_spans,
        total_time,
        avg_time,
        min_time,
        max_time,
    }
}

#[test]
fn test_weighted_average_not_mean_of_means() {
    let batch = aggregate_batch(&[
        trace(2, 10.0, 5.0, 3.0, 7.0),
        trace(1, 100.0, 100.0, 100.0, 100.0),
    ])
    .unwrap();

    assert_eq!(batch.total_traces, 2);
    assert_eq!(batch.total_spans, 3);
    assert_eq!(batch.total_time, 110.0);
    assert!((batch.avg_time - 36.667).abs() < 1e-3);
    assert_ne!(batch.avg_time, 52.5);
    assert_eq!(batch.min_time, 3.0);
    assert_eq!(batch.max_time, 100.0);
}

#[test]
fn test_build_then_compute() {
    let spans = vec![
        RawSpan::new(0, 1_500),
        RawSpan::new(10_000, 250),
        RawSpan::new(20_000, 7_000),
        RawSpan::default(),
    ];

    let intervals = build_intervals(&spans);
    let stats = compute_trace_stats(&intervals).unwrap();

    assert_eq!(stats.total_spans, 3);
    assert!(stats.max_time - stats.min_time >= 0.0);
    assert!((stats.total_time - (1.5 + 0.25 + 7.0)).abs() < 1e-9);
    assert_eq!(stats.min_time, 0.25);
    assert_eq!(stats.max_time, 7.0);
}

#[test]
fn test_empty_inputs_yield_nothing() {
    assert!(compute_trace_stats(&build_intervals(&[])).is_none());
    assert!(compute_trace_stats(&build_intervals(&[RawSpan::default()])).is_none());
    assert!(aggregate_batch(&[]).is_none());
}

#[test]
fn test_batch_bounds_are_global() {
    let batch = aggregate_batch(&[
        trace(3, 30.0, 10.0, 1.0, 20.0),
        trace(3, 300.0, 100.0, 50.0, 200.0),
        trace(1, 5.0, 5.0, 5.0, 5.0),
    ])
    .unwrap();

    assert_eq!(batch.min_time, 1.0);
    assert_eq!(batch.max_time, 200.0);
    assert!((batch.avg_time - 335.0 / 7.0).abs() < 1e-9);
}
