//! 节点事件
//!
//! 事件只携带节点 id 和类型标签，执行时经注册表分派到对应的处理函数。

use super::world::EdgeWorld;
use crate::error::SimError;
use crate::model::NodeId;
use crate::sim::{Event, Simulator, World};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEventKind {
    DecisionStart,
    DecisionComplete,
    ProcessingStart,
    ProcessingComplete,
}

/// 事件：驱动某个节点的决策/处理状态机。
#[derive(Debug)]
pub struct NodeEvent {
    pub node: NodeId,
    pub kind: NodeEventKind,
}

impl NodeEvent {
    pub fn new(node: NodeId, kind: NodeEventKind) -> Self {
        Self { node, kind }
    }
}

impl Event for NodeEvent {
    #[tracing::instrument(skip(self, sim, world), fields(node = ?self.node, kind = ?self.kind))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        let NodeEvent { node, kind } = *self;
        trace!(now = ?sim.now(), "节点事件执行");

        let w = EdgeWorld::from_dyn(world)?;
        match kind {
            NodeEventKind::DecisionStart => w.on_decision_start(node, sim),
            NodeEventKind::DecisionComplete => w.on_decision_complete(node, sim),
            NodeEventKind::ProcessingStart => w.on_processing_start(node, sim),
            NodeEventKind::ProcessingComplete => w.on_processing_complete(node, sim),
        }
    }
}
