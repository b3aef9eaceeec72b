//! 内存指标日志
//!
//! 克隆得到的是同一份日志的另一个句柄：把一个句柄交给世界，
//! 另一个留在调用方，仿真结束后读取。

use super::{MetricName, MetricRecord, MetricsSink};
use crate::model::{NodeId, TaskId};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default, Clone)]
pub struct MetricLog {
    records: Arc<Mutex<Vec<MetricRecord>>>,
}

impl MetricLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MetricRecord>> {
        // 记录只做追加，中毒后数据依然完整
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 当前全部记录的拷贝
    pub fn snapshot(&self) -> Vec<MetricRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn of(&self, metric: MetricName) -> Vec<MetricRecord> {
        self.lock()
            .iter()
            .filter(|r| r.metric == metric)
            .cloned()
            .collect()
    }

    pub fn count(&self, metric: MetricName) -> usize {
        self.lock().iter().filter(|r| r.metric == metric).count()
    }

    pub fn for_task(&self, task: TaskId) -> Vec<MetricRecord> {
        self.lock()
            .iter()
            .filter(|r| r.task == Some(task))
            .cloned()
            .collect()
    }

    pub fn for_entity(&self, entity: NodeId) -> Vec<MetricRecord> {
        self.lock()
            .iter()
            .filter(|r| r.entity == entity)
            .cloned()
            .collect()
    }
}

impl MetricsSink for MetricLog {
    fn record(&mut self, rec: MetricRecord) {
        self.lock().push(rec);
    }
}
