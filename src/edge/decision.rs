//! 决策状态机
//!
//! 两阶段握手：决策开始从决策队列取出任务并按策略耗时调度决策完成；
//! 决策完成调用策略，把任务送入本地或远端节点的准入路径。

use super::node_event::{NodeEvent, NodeEventKind};
use super::world::{EdgeWorld, node_slot, vehicle_slot};
use crate::error::SimError;
use crate::metrics::MetricName;
use crate::model::{Node, NodeId, Task};
use crate::policy::{Candidate, Decision};
use crate::sim::{SimTime, Simulator};
use tracing::{debug, trace};

impl EdgeWorld {
    /// 任务进入车辆的决策队列；策略空闲时立即调度决策开始。
    pub(crate) fn add_task_to_decision(
        &mut self,
        vehicle: NodeId,
        task: Task,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        let v = vehicle_slot(&mut self.nodes, vehicle)?;
        v.push_decision(task);
        if !v.is_deciding() {
            sim.schedule(sim.now(), NodeEvent::new(vehicle, NodeEventKind::DecisionStart))?;
        }
        Ok(())
    }

    /// 任务进入系统：记录来源、推进计数并交给决策队列。
    pub(crate) fn admit_new_task(
        &mut self,
        vehicle: NodeId,
        mut task: Task,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        task.set_origin(vehicle);
        task.set_chaos_z(self.ctx.chaos.state());
        self.stats.generated += 1;
        trace!(vehicle = ?vehicle, "📥 新任务 {}", task);
        self.emit(
            sim.now(),
            vehicle,
            MetricName::TaskGenerated,
            task.total_cycles() as f64,
            "",
            Some(task.id()),
        );
        self.add_task_to_decision(vehicle, task, sim)
    }

    pub(crate) fn on_decision_start(
        &mut self,
        vehicle: NodeId,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        let now = sim.now();
        let v = vehicle_slot(&mut self.nodes, vehicle)?;
        let depth = v.decision_queue_len();
        // 已在决策中（重复的开始事件）或队列为空
        let Some((task_id, z)) = v.begin_decision().map(|t| (t.id(), t.chaos_z())) else {
            return Ok(());
        };
        let decision_s =
            v.policy()
                .decision_time_s(&self.cfg.decision, &mut self.ctx.rng, &self.ctx.chaos, z);
        trace!(vehicle = ?vehicle, decision_s, "🤔 开始决策");

        self.emit(now, vehicle, MetricName::QueueSize, depth as f64, "Decision", Some(task_id));
        sim.schedule(
            now.saturating_add(SimTime::from_secs_f64(decision_s)),
            NodeEvent::new(vehicle, NodeEventKind::DecisionComplete),
        )
    }

    pub(crate) fn on_decision_complete(
        &mut self,
        vehicle: NodeId,
        sim: &mut Simulator,
    ) -> Result<(), SimError> {
        let now = sim.now();
        let Some(mut task) = vehicle_slot(&mut self.nodes, vehicle)?.finish_decision() else {
            return Ok(());
        };

        let node = self.nodes.get(vehicle.0).ok_or(SimError::UnknownNode(vehicle))?;
        let v = node.as_vehicle().ok_or(SimError::NotAVehicle(vehicle))?;
        let host = node.host_view();
        let candidates = candidates(&self.nodes, v.remotes())?;
        let decision = v.policy().decide(&task, &host, &candidates, &mut self.ctx.rng)?;
        debug!(vehicle = ?vehicle, ?decision, "🧭 决策完成 {}", task);

        let id = Some(task.id());
        let value = if decision.is_remote() { 1.0 } else { 0.0 };
        self.emit(now, vehicle, MetricName::DecisionComplete, value, decision.tag(), id);

        match decision {
            Decision::Local => {
                if !self.accept_processing_task(vehicle, task, sim)? {
                    self.stats.rejected += 1;
                    self.emit(now, vehicle, MetricName::FullQueueError, 1.0, "Local", id);
                }
            }
            Decision::Remote(target) => {
                task.mark_offloaded(self.energy.transfer_time_s(task.size_bytes()));
                let tx_j = self.energy.transmission_energy_j(&task, &self.ctx.chaos);
                if self.accept_processing_task(target, task, sim)? {
                    node_slot(&mut self.nodes, vehicle)?.battery.consume(tx_j);
                    self.emit(now, vehicle, MetricName::EnergyConsumption, tx_j, "TxOnly", id);
                } else {
                    self.stats.rejected += 1;
                    self.emit(now, target, MetricName::FullQueueError, 1.0, "Remote", id);
                }
            }
        }

        let v = vehicle_slot(&mut self.nodes, vehicle)?;
        if v.decision_queue_len() > 0 {
            sim.schedule(now, NodeEvent::new(vehicle, NodeEventKind::DecisionStart))?;
        }
        Ok(())
    }
}

/// 按车辆链接顺序构造候选列表
fn candidates(nodes: &[Node], remotes: &[NodeId]) -> Result<Vec<Candidate>, SimError> {
    remotes
        .iter()
        .map(|&id| {
            let n = nodes.get(id.0).ok_or(SimError::UnknownNode(id))?;
            Ok(Candidate {
                id,
                frequency_hz: n.cpu.frequency_hz(),
            })
        })
        .collect()
}
