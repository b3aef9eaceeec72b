use super::task;
use crate::error::SimError;
use crate::model::{Task, TaskId};
use crate::sim::SimTime;

#[test]
fn total_cycles_is_size_times_density() {
    let t = task(1, SimTime::ZERO, 150_000, 1_000, 1.5);
    assert_eq!(t.total_cycles(), 150_000_000);
    assert_eq!(t.size_bytes(), 150_000);
    assert_eq!(t.density_cycles_per_byte(), 1_000);
    assert!(!t.is_offloaded());
    assert_eq!(t.transfer_time_s(), 0.0);
    assert_eq!(t.origin(), None);
}

#[test]
fn non_positive_features_are_rejected() {
    let id = TaskId(7);
    for (size, density, deadline) in [(0, 10, 1.0), (10, 0, 1.0), (10, 10, 0.0), (10, 10, -1.0)] {
        let err = Task::new(id, SimTime::ZERO, size, density, deadline).expect_err("invalid");
        assert!(matches!(err, SimError::InvalidTask { id: TaskId(7), .. }));
    }
    assert!(Task::new(id, SimTime::ZERO, 10, 10, f64::NAN).is_err());
}

#[test]
fn spent_time_is_measured_from_creation() {
    let t = task(1, SimTime::from_secs(1), 10, 10, 1.0);
    assert!((t.spent_time_s(SimTime::from_millis(1_250)) - 0.25).abs() < 1e-12);
    assert_eq!(t.spent_time_s(SimTime::ZERO), 0.0);
}

#[test]
fn display_mentions_id_and_cycles() {
    let t = task(42, SimTime::ZERO, 100, 20, 0.5);
    let s = t.to_string();
    assert!(s.contains("id=42"));
    assert!(s.contains("total_cycles=2000"));
}
