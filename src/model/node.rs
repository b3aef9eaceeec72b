//! 节点
//!
//! 车辆与 RSU 共用同一个节点结构：CPU、电池、有界处理队列、正在处理的任务。
//! 车辆额外持有决策队列、一个策略实例和候选 RSU 列表（以 `NodeId` 引用）。

use std::collections::VecDeque;

use super::battery::Battery;
use super::cpu::Cpu;
use super::id::NodeId;
use super::task::Task;
use crate::config::NodeDefaults;
use crate::error::SimError;
use crate::policy::{HostView, Policy};
use crate::queue::DropTailQueue;

/// 构造节点所需的资源参数
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub frequency_hz: f64,
    pub battery_j: Option<f64>,
    pub queue_capacity: usize,
}

impl NodeSpec {
    pub fn from_defaults(name: impl Into<String>, d: &NodeDefaults) -> Self {
        Self {
            name: name.into(),
            frequency_hz: d.frequency_hz,
            battery_j: d.battery_j,
            queue_capacity: d.queue_capacity,
        }
    }

    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_battery(mut self, battery_j: Option<f64>) -> Self {
        self.battery_j = battery_j;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    fn validate(&self) -> Result<(), SimError> {
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(SimError::invalid_config(format!(
                "node {}: frequency must be > 0, got {}",
                self.name, self.frequency_hz
            )));
        }
        if self.queue_capacity == 0 {
            return Err(SimError::invalid_config(format!(
                "node {}: queue capacity must be >= 1",
                self.name
            )));
        }
        Ok(())
    }
}

/// 车辆特有的状态
#[derive(Debug)]
pub struct Vehicle {
    decision_queue: VecDeque<Task>,
    deciding: Option<Task>,
    policy: Policy,
    remotes: Vec<NodeId>,
}

impl Vehicle {
    fn new(policy: Policy) -> Self {
        Self {
            decision_queue: VecDeque::new(),
            deciding: None,
            policy,
            remotes: Vec::new(),
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn remotes(&self) -> &[NodeId] {
        &self.remotes
    }

    pub fn decision_queue_len(&self) -> usize {
        self.decision_queue.len()
    }

    /// 策略是否空闲（没有正在决策的任务）
    pub fn is_deciding(&self) -> bool {
        self.deciding.is_some()
    }

    pub(crate) fn set_remotes(&mut self, remotes: Vec<NodeId>) {
        self.remotes = remotes;
    }

    pub(crate) fn push_decision(&mut self, task: Task) {
        self.decision_queue.push_back(task);
    }

    /// 弹出队首任务并进入决策状态；已在决策中或队列为空时返回 None
    pub(crate) fn begin_decision(&mut self) -> Option<&Task> {
        if self.deciding.is_some() {
            return None;
        }
        let task = self.decision_queue.pop_front()?;
        Some(self.deciding.insert(task))
    }

    pub(crate) fn finish_decision(&mut self) -> Option<Task> {
        self.deciding.take()
    }
}

#[derive(Debug)]
pub enum Role {
    Vehicle(Vehicle),
    Rsu,
}

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    pub cpu: Cpu,
    pub battery: Battery,
    queue: DropTailQueue,
    processing: Option<Task>,
    role: Role,
}

impl Node {
    pub(crate) fn vehicle(id: NodeId, spec: NodeSpec, policy: Policy) -> Result<Self, SimError> {
        Self::build(id, spec, Role::Vehicle(Vehicle::new(policy)))
    }

    pub(crate) fn rsu(id: NodeId, spec: NodeSpec) -> Result<Self, SimError> {
        Self::build(id, spec, Role::Rsu)
    }

    fn build(id: NodeId, spec: NodeSpec, role: Role) -> Result<Self, SimError> {
        spec.validate()?;
        Ok(Self {
            id,
            name: spec.name,
            cpu: Cpu::new(spec.frequency_hz),
            battery: Battery::from_capacity(spec.battery_j),
            queue: DropTailQueue::new(spec.queue_capacity),
            processing: None,
            role,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_vehicle(&self) -> bool {
        matches!(self.role, Role::Vehicle(_))
    }

    pub fn as_vehicle(&self) -> Option<&Vehicle> {
        match &self.role {
            Role::Vehicle(v) => Some(v),
            Role::Rsu => None,
        }
    }

    pub(crate) fn as_vehicle_mut(&mut self) -> Option<&mut Vehicle> {
        match &mut self.role {
            Role::Vehicle(v) => Some(v),
            Role::Rsu => None,
        }
    }

    pub fn queue(&self) -> &DropTailQueue {
        &self.queue
    }

    pub(crate) fn queue_mut(&mut self) -> &mut DropTailQueue {
        &mut self.queue
    }

    pub fn processing(&self) -> Option<&Task> {
        self.processing.as_ref()
    }

    pub(crate) fn set_processing(&mut self, task: Task) -> &Task {
        self.processing.insert(task)
    }

    pub(crate) fn take_processing(&mut self) -> Option<Task> {
        self.processing.take()
    }

    /// 策略看到的本节点快照
    pub fn host_view(&self) -> HostView {
        let in_service = self.processing.as_ref().map_or(0, Task::total_cycles);
        HostView {
            queue_len: self.queue.len(),
            queue_capacity: self.queue.capacity(),
            queued_cycles: self.queue.queued_cycles().saturating_add(in_service),
            frequency_hz: self.cpu.frequency_hz(),
        }
    }
}
