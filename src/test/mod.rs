mod chaos;
mod resources;
mod summary;
mod task;
mod workload;

use crate::config::SimConfig;
use crate::edge::EdgeWorld;
use crate::metrics::MetricLog;
use crate::model::{Task, TaskId};
use crate::sim::SimTime;

/// 决策零耗时、电量充足的默认配置
fn quiet_config() -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.decision.scripted_s = 0.0;
    cfg.decision.local_s = (0.0, 0.0);
    cfg.decision.first_remote_s = (0.0, 0.0);
    cfg
}

fn world_with_log(cfg: SimConfig) -> (EdgeWorld, MetricLog) {
    let log = MetricLog::new();
    let world = EdgeWorld::new(cfg, log.clone()).expect("valid config");
    (world, log)
}

fn task(id: u64, at: SimTime, size_bytes: u64, density: u64, deadline_s: f64) -> Task {
    Task::new(TaskId(id), at, size_bytes, density, deadline_s).expect("valid task")
}
