//! 启发式卸载策略
//!
//! 1. 处理队列接近满（len >= capacity - 1）：强制卸载到频率最高的候选；
//! 2. 本地完成时间估计（排队 + 服务）乘以安全余量后超过截止期：卸载；
//! 3. 否则留在本地，省下传输能耗。

use super::{Candidate, Decision, HostView};
use crate::model::{NodeId, Task};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntelligentParams {
    pub safety_margin: f64,
}

impl Default for IntelligentParams {
    fn default() -> Self {
        Self { safety_margin: 0.1 }
    }
}

impl IntelligentParams {
    pub(super) fn decide(&self, task: &Task, host: &HostView, candidates: &[Candidate]) -> Decision {
        let Some(best) = fastest(candidates) else {
            return Decision::Local;
        };

        if host.queue_len >= host.queue_capacity.saturating_sub(1) {
            return Decision::Remote(best);
        }

        let cycles = host.queued_cycles.saturating_add(task.total_cycles());
        let local_estimate_s = cycles as f64 / host.frequency_hz;
        if local_estimate_s * (1.0 + self.safety_margin) > task.deadline_s() {
            return Decision::Remote(best);
        }

        Decision::Local
    }
}

/// 频率最高的候选；频率相同时先出现者胜出
pub(crate) fn fastest(candidates: &[Candidate]) -> Option<NodeId> {
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        if best.is_none_or(|b| c.frequency_hz > b.frequency_hz) {
            best = Some(c);
        }
    }
    best.map(|c| c.id)
}
