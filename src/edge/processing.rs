//! 处理状态机
//!
//! `Idle -> ProcessingQueued -> Processing -> Idle | Processing(next)`。
//! 准入失败是唯一的背压信号：节点自己不阻塞、不重试。

use super::node_event::{NodeEvent, NodeEventKind};
use super::world::{EdgeWorld, node_slot};
use crate::error::SimError;
use crate::metrics::MetricName;
use crate::model::{NodeId, Task};
use crate::sim::{SimTime, Simulator};
use tracing::{debug, trace, warn};

impl EdgeWorld {
    /// 把任务放进节点的处理队列。
    ///
    /// 队列已满返回 `Ok(false)`，任务被丢弃；准入成功且 CPU 空闲时，
    /// 立即在当前时刻调度一次处理开始。
    #[tracing::instrument(skip(self, task, sim), fields(task = task.id().0))]
    pub fn accept_processing_task(
        &mut self,
        node: NodeId,
        task: Task,
        sim: &mut Simulator,
    ) -> Result<bool, SimError> {
        let n = node_slot(&mut self.nodes, node)?;
        if let Err(task) = n.queue_mut().enqueue(task) {
            debug!(len = n.queue().len(), "🚫 处理队列已满，拒绝 {}", task);
            return Ok(false);
        }
        trace!(len = n.queue().len(), "任务入队");
        if n.cpu.is_idle() {
            sim.schedule(sim.now(), NodeEvent::new(node, NodeEventKind::ProcessingStart))?;
        }
        Ok(true)
    }

    /// CPU 忙或队列为空时是过期事件，直接忽略。
    pub(crate) fn on_processing_start(
        &mut self,
        node: NodeId,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        let now = sim.now();
        let n = node_slot(&mut self.nodes, node)?;
        if n.cpu.is_busy() {
            return Ok(());
        }
        let depth = n.queue().len();
        let Some(task) = n.queue_mut().dequeue() else {
            return Ok(());
        };

        n.cpu.start();
        let service_s = n.cpu.processing_time_s(&task, &self.ctx.chaos);
        let task_id = task.id();
        debug!(node = ?node, service_s, "⚙️  开始处理 {}", task);
        n.set_processing(task);

        self.emit(now, node, MetricName::QueueSize, depth as f64, "Processing", Some(task_id));
        sim.schedule(
            now.saturating_add(SimTime::from_secs_f64(service_s)),
            NodeEvent::new(node, NodeEventKind::ProcessingComplete),
        )
    }

    pub(crate) fn on_processing_complete(
        &mut self,
        node: NodeId,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        let now = sim.now();
        let n = node_slot(&mut self.nodes, node)?;
        let Some(task) = n.take_processing() else {
            return Ok(());
        };
        n.cpu.complete();

        let energy_j =
            self.energy
                .processing_energy_j(n.cpu.frequency_hz(), &task, &self.ctx.chaos);
        let feasible = n.battery.predict_energy_consumption(energy_j) >= 0.0;
        let origin = task.origin().unwrap_or(node);
        let offload_tag = if task.is_offloaded() { "Remote" } else { "Local" };
        let offload_value = if task.is_offloaded() { 1.0 } else { 0.0 };
        let id = Some(task.id());

        if !feasible {
            // 不消耗电量，也不报告成功
            warn!(node = ?node, energy_j, remaining_j = n.battery.remaining_j(), "🪫 电量不足，{} 失败", task);
            self.stats.energy_failures += 1;
            self.emit(now, origin, MetricName::TaskSuccess, 0.0, self.policy_label(origin), id);
            self.emit(now, node, MetricName::LowEnergyFail, 1.0, "CpuOnly", id);
            self.emit(now, origin, MetricName::OffloadingType, offload_value, offload_tag, id);
        } else {
            n.battery.consume(energy_j);
            let remaining = (!n.battery.is_infinite()).then(|| n.battery.remaining_j());
            let depleted = n.battery.is_depleted();

            let latency_s = task.spent_time_s(now) + task.transfer_time_s();
            let margin_s = task.deadline_s() - latency_s;
            let success = latency_s <= task.deadline_s();
            debug!(node = ?node, latency_s, success, "✅ 处理完成 {}", task);

            self.stats.completed += 1;
            let label = self.policy_label(origin);
            self.emit(now, origin, MetricName::TaskLatency, latency_s, label, id);
            self.emit(now, origin, MetricName::TaskSuccess, f64::from(u8::from(success)), label, id);
            self.emit(now, origin, MetricName::TaskMargin, margin_s, label, id);
            self.emit(now, origin, MetricName::OffloadingType, offload_value, offload_tag, id);
            self.emit(now, node, MetricName::EnergyConsumption, energy_j, "CpuOnly", id);
            if let Some(remaining) = remaining {
                self.emit(now, node, MetricName::BatteryRemaining, remaining, "", id);
            }
            if depleted {
                warn!(node = ?node, "🔋 电池耗尽");
                self.emit(now, node, MetricName::BatteryDepleted, 1.0, "", id);
            }
        }

        let n = node_slot(&mut self.nodes, node)?;
        if !n.queue().is_empty() && !n.battery.is_depleted() {
            let step = SimTime::from_secs_f64(self.cfg.micro_step_s).max(SimTime::TICK);
            let at = now.saturating_add(step);
            sim.schedule(at, NodeEvent::new(node, NodeEventKind::ProcessingStart))?;
        }
        Ok(())
    }
}
