//! 能耗与传输模型

use super::task::Task;
use crate::config::EnergyConfig;
use crate::sim::ChaosState;

#[derive(Debug, Clone)]
pub struct EnergyModel {
    cfg: EnergyConfig,
}

impl EnergyModel {
    pub fn new(cfg: EnergyConfig) -> Self {
        Self { cfg }
    }

    /// K · f² · cycles，混沌模式下按任务自己的 z 扰动
    pub fn processing_energy_j(&self, frequency_hz: f64, task: &Task, chaos: &ChaosState) -> f64 {
        let base = self.cfg.capacitance * frequency_hz * frequency_hz * task.total_cycles() as f64;
        chaos.drift_with(base, task.chaos_z())
    }

    /// 线性模型：每 MB 固定焦耳数
    pub fn transmission_energy_j(&self, task: &Task, chaos: &ChaosState) -> f64 {
        let base = self.cfg.tx_joules_per_mb * task.size_bytes() as f64 / 1e6;
        chaos.drift_with(base, task.chaos_z())
    }

    pub fn transfer_time_s(&self, size_bytes: u64) -> f64 {
        size_bytes as f64 / self.cfg.bandwidth_bytes_per_s
    }
}
