//! 错误类型
//!
//! 仿真核心只把真正的不变量破坏当作错误向上传播；队列满、能量不足等资源状况
//! 通过指标记录并在本地吸收，不会出现在这里。

use crate::model::{NodeId, TaskId};
use crate::sim::SimTime;
use thiserror::Error;

/// 仿真运行期错误（出现即终止本次运行）。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// 试图把事件调度到过去
    #[error("causality violation: event at {at:?} scheduled while now is {now:?}")]
    CausalityViolation { at: SimTime, now: SimTime },

    /// 从空集合中均匀采样（通常意味着配置错误，例如没有任何 RSU）
    #[error("cannot sample {what} from an empty set")]
    EmptySample { what: &'static str },

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not a vehicle")]
    NotAVehicle(NodeId),

    #[error("invalid task {id:?}: {reason}")]
    InvalidTask { id: TaskId, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// 事件拿到的 World 不是 `EdgeWorld`
    #[error("world is not an EdgeWorld")]
    UnexpectedWorld,
}

impl SimError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
