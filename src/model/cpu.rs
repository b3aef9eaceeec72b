//! CPU 状态机：Idle <-> Busy，同一时刻最多处理一个任务。

use super::task::Task;
use crate::sim::ChaosState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    Idle,
    Busy,
}

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    frequency_hz: f64,
}

impl Cpu {
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            state: CpuState::Idle,
            frequency_hz,
        }
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CpuState::Idle
    }

    pub fn is_busy(&self) -> bool {
        self.state == CpuState::Busy
    }

    pub fn start(&mut self) {
        self.state = CpuState::Busy;
    }

    pub fn complete(&mut self) {
        self.state = CpuState::Idle;
    }

    /// total_cycles / frequency（秒），混沌模式下按任务自己的 z 扰动
    pub fn processing_time_s(&self, task: &Task, chaos: &ChaosState) -> f64 {
        chaos.drift_with(task.total_cycles() as f64 / self.frequency_hz, task.chaos_z())
    }
}
