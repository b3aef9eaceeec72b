//! 单次运行的汇总统计

use super::{MetricName, MetricRecord};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_tasks: usize,
    pub successful: usize,
    pub failed: usize,
    /// 百分比
    pub success_rate: f64,
    pub avg_latency_s: f64,
    pub local_count: usize,
    pub remote_count: usize,
    /// 所有 EnergyConsumption 记录之和（CPU + 传输）
    pub energy_j: f64,
    pub rejected: usize,
    pub low_energy_failures: usize,
}

impl RunSummary {
    /// `total_tasks` 为 0 时使用 TaskGenerated 记录数
    pub fn from_records(records: &[MetricRecord], total_tasks: usize) -> Self {
        let mut s = RunSummary::default();
        let mut latency_sum = 0.0;
        let mut latency_n = 0usize;
        let mut generated = 0usize;

        for r in records {
            match r.metric {
                MetricName::TaskGenerated => generated += 1,
                MetricName::TaskSuccess if r.value >= 0.5 => s.successful += 1,
                MetricName::TaskSuccess => s.failed += 1,
                MetricName::TaskLatency => {
                    latency_sum += r.value;
                    latency_n += 1;
                }
                MetricName::OffloadingType if r.value < 0.5 => s.local_count += 1,
                MetricName::OffloadingType => s.remote_count += 1,
                MetricName::EnergyConsumption => s.energy_j += r.value,
                MetricName::FullQueueError => s.rejected += 1,
                MetricName::LowEnergyFail => s.low_energy_failures += 1,
                _ => {}
            }
        }

        s.total_tasks = if total_tasks > 0 { total_tasks } else { generated };
        if s.total_tasks > 0 {
            s.success_rate = s.successful as f64 / s.total_tasks as f64 * 100.0;
        }
        if latency_n > 0 {
            s.avg_latency_s = latency_sum / latency_n as f64;
        }
        s
    }
}
