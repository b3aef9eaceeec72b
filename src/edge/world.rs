//! 边缘计算世界
//!
//! `EdgeWorld` 是节点注册表：节点按 `NodeId`（下标）寻址，事件只携带 id，
//! 执行时再解析。仿真上下文（随机源、混沌过程、id 生成器）和指标输出也挂在这里。

use std::any::Any;
use std::collections::HashMap;

use super::stats::WorldStats;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::metrics::{MetricName, MetricRecord, MetricsSink};
use crate::model::{EnergyModel, Node, NodeId, NodeSpec, Task, TaskId, Vehicle};
use crate::policy::Policy;
use crate::sim::{SimContext, SimTime, Simulator, World};
use crate::workload::ScenarioFeed;
use tracing::{debug, info, trace};

pub struct EdgeWorld {
    pub(crate) cfg: SimConfig,
    pub(crate) ctx: SimContext,
    pub(crate) energy: EnergyModel,
    pub(crate) nodes: Vec<Node>,
    pub(crate) feeds: HashMap<NodeId, ScenarioFeed>,
    sink: Box<dyn MetricsSink>,
    pub stats: WorldStats,
}

impl World for EdgeWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.stats.events = self.stats.events.saturating_add(1);
    }
}

impl EdgeWorld {
    /// 以 `cfg.seed` 为种子创建世界；配置非法时返回错误。
    pub fn new(cfg: SimConfig, sink: impl MetricsSink + 'static) -> Result<Self, SimError> {
        cfg.validate()
            .map_err(|e| SimError::invalid_config(e.to_string()))?;
        info!(seed = cfg.seed, chaos = cfg.chaos.enabled, "🌍 创建边缘计算世界");
        Ok(Self {
            ctx: SimContext::new(cfg.seed, &cfg.chaos),
            energy: EnergyModel::new(cfg.energy.clone()),
            cfg,
            nodes: Vec::new(),
            feeds: HashMap::new(),
            sink: Box::new(sink),
            stats: WorldStats::default(),
        })
    }

    /// 事件拿到的 `dyn World` 还原为 `EdgeWorld`
    pub fn from_dyn(world: &mut dyn World) -> Result<&mut EdgeWorld, SimError> {
        world
            .as_any_mut()
            .downcast_mut::<EdgeWorld>()
            .ok_or(SimError::UnexpectedWorld)
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SimError> {
        self.nodes.get(id.0).ok_or(SimError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SimError> {
        node_slot(&mut self.nodes, id)
    }

    pub fn vehicle(&self, id: NodeId) -> Result<&Vehicle, SimError> {
        self.node(id)?.as_vehicle().ok_or(SimError::NotAVehicle(id))
    }

    /// 使用配置中的车辆默认参数
    pub fn vehicle_spec(&self, name: impl Into<String>) -> NodeSpec {
        NodeSpec::from_defaults(name, &self.cfg.vehicle)
    }

    /// 使用配置中的 RSU 默认参数
    pub fn rsu_spec(&self, name: impl Into<String>) -> NodeSpec {
        NodeSpec::from_defaults(name, &self.cfg.rsu)
    }

    pub fn add_vehicle(&mut self, spec: NodeSpec, policy: Policy) -> Result<NodeId, SimError> {
        let id = NodeId(self.nodes.len());
        debug!(node = ?id, name = %spec.name, policy = policy.label(), "🚗 添加车辆");
        self.nodes.push(Node::vehicle(id, spec, policy)?);
        Ok(id)
    }

    pub fn add_rsu(&mut self, spec: NodeSpec) -> Result<NodeId, SimError> {
        let id = NodeId(self.nodes.len());
        debug!(node = ?id, name = %spec.name, "📡 添加 RSU");
        self.nodes.push(Node::rsu(id, spec)?);
        Ok(id)
    }

    /// 设置车辆的候选远端节点（按给定顺序，脚本中的下标即指这个顺序）
    pub fn link(&mut self, vehicle: NodeId, remotes: &[NodeId]) -> Result<(), SimError> {
        for &r in remotes {
            self.node(r)?;
        }
        vehicle_slot(&mut self.nodes, vehicle)?.set_remotes(remotes.to_vec());
        debug!(vehicle = ?vehicle, remotes = ?remotes, "🔗 链接候选节点");
        Ok(())
    }

    /// 用上下文分配 id 创建任务
    pub fn new_task(
        &mut self,
        created_at: SimTime,
        size_bytes: u64,
        density_cycles_per_byte: u64,
        deadline_s: f64,
    ) -> Result<Task, SimError> {
        let id = self.ctx.next_task_id();
        Task::new(id, created_at, size_bytes, density_cycles_per_byte, deadline_s)
    }

    /// 车辆的策略名；非车辆节点返回空串
    pub(crate) fn policy_label(&self, id: NodeId) -> &'static str {
        self.vehicle(id).map_or("", |v| v.policy().label())
    }

    /// 记录一条指标
    pub(crate) fn emit(
        &mut self,
        now: SimTime,
        entity: NodeId,
        metric: MetricName,
        value: f64,
        tag: &str,
        task: Option<TaskId>,
    ) {
        trace!(t = now.as_secs_f64(), entity = entity.0, ?metric, value, tag, "📊 指标");
        self.sink.record(MetricRecord {
            time_s: now.as_secs_f64(),
            entity,
            metric,
            value,
            tag: tag.to_string(),
            task,
        });
    }
}

pub(crate) fn node_slot(nodes: &mut [Node], id: NodeId) -> Result<&mut Node, SimError> {
    nodes.get_mut(id.0).ok_or(SimError::UnknownNode(id))
}

pub(crate) fn vehicle_slot(nodes: &mut [Node], id: NodeId) -> Result<&mut Vehicle, SimError> {
    node_slot(nodes, id)?
        .as_vehicle_mut()
        .ok_or(SimError::NotAVehicle(id))
}
