use crate::metrics::{MetricLog, MetricName, MetricRecord, MetricsSink, RunSummary};
use crate::model::{NodeId, TaskId};

fn rec(metric: MetricName, value: f64, task: u64) -> MetricRecord {
    MetricRecord {
        time_s: 0.0,
        entity: NodeId(0),
        metric,
        value,
        tag: String::new(),
        task: Some(TaskId(task)),
    }
}

#[test]
fn summary_aggregates_a_run() {
    let records = vec![
        rec(MetricName::TaskGenerated, 1e6, 1),
        rec(MetricName::TaskGenerated, 1e6, 2),
        rec(MetricName::TaskGenerated, 1e6, 3),
        rec(MetricName::TaskGenerated, 1e6, 4),
        rec(MetricName::TaskLatency, 0.1, 1),
        rec(MetricName::TaskSuccess, 1.0, 1),
        rec(MetricName::OffloadingType, 0.0, 1),
        rec(MetricName::EnergyConsumption, 2.0, 1),
        rec(MetricName::TaskLatency, 0.3, 2),
        rec(MetricName::TaskSuccess, 0.0, 2),
        rec(MetricName::OffloadingType, 1.0, 2),
        rec(MetricName::EnergyConsumption, 0.5, 2),
        rec(MetricName::FullQueueError, 1.0, 3),
        rec(MetricName::TaskSuccess, 0.0, 4),
        rec(MetricName::LowEnergyFail, 1.0, 4),
    ];

    let s = RunSummary::from_records(&records, 0);
    assert_eq!(s.total_tasks, 4);
    assert_eq!(s.successful, 1);
    assert_eq!(s.failed, 2);
    assert!((s.success_rate - 25.0).abs() < 1e-12);
    assert!((s.avg_latency_s - 0.2).abs() < 1e-12);
    assert_eq!(s.local_count, 1);
    assert_eq!(s.remote_count, 1);
    assert!((s.energy_j - 2.5).abs() < 1e-12);
    assert_eq!(s.rejected, 1);
    assert_eq!(s.low_energy_failures, 1);

    let explicit = RunSummary::from_records(&records, 10);
    assert_eq!(explicit.total_tasks, 10);
    assert!((explicit.success_rate - 10.0).abs() < 1e-12);
}

#[test]
fn empty_run_has_zero_rates() {
    let s = RunSummary::from_records(&[], 0);
    assert_eq!(s, RunSummary::default());
}

#[test]
fn metric_log_clones_share_records_and_serialize() {
    let log = MetricLog::new();
    let mut sink = log.clone();
    sink.record(rec(MetricName::TaskSuccess, 1.0, 1));
    sink.record(rec(MetricName::TaskLatency, 0.2, 2));

    assert_eq!(log.len(), 2);
    assert_eq!(log.count(MetricName::TaskSuccess), 1);
    assert_eq!(log.for_task(TaskId(2)).len(), 1);
    assert_eq!(log.for_entity(NodeId(0)).len(), 2);

    let raw = serde_json::to_string(&log.snapshot()).expect("serialize");
    assert!(raw.contains("\"TaskLatency\""));
    let back: Vec<MetricRecord> = serde_json::from_str(&raw).expect("parse");
    assert_eq!(back, log.snapshot());
}
