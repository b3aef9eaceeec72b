//! 指标输出契约
//!
//! 节点在事件处理中同步调用 [`MetricsSink::record`]；核心不关心指标如何存储。

mod metric_log;
mod summary;

pub use metric_log::MetricLog;
pub use summary::RunSummary;

use crate::model::{NodeId, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricName {
    /// 任务进入系统，value = 总周期数
    TaskGenerated,
    /// 队列深度，tag 区分 Decision / Processing
    QueueSize,
    /// value: 0 = Local, 1 = Remote
    DecisionComplete,
    TaskLatency,
    /// 0 / 1
    TaskSuccess,
    /// deadline - latency
    TaskMargin,
    /// 0 = Local, 1 = Remote
    OffloadingType,
    /// tag 区分 CpuOnly / TxOnly
    EnergyConsumption,
    BatteryRemaining,
    /// 以下三个是事件标记，value 恒为 1
    FullQueueError,
    BatteryDepleted,
    LowEnergyFail,
}

/// 一条指标记录：`(time, entity, metric, value, tag, task)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub time_s: f64,
    pub entity: NodeId,
    pub metric: MetricName,
    pub value: f64,
    pub tag: String,
    pub task: Option<TaskId>,
}

pub trait MetricsSink {
    fn record(&mut self, rec: MetricRecord);
}

/// 丢弃所有记录
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn record(&mut self, _rec: MetricRecord) {}
}
