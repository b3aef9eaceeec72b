//! 任务
//!
//! 创建后特征不再变化；只有卸载标记、传输时间、来源节点和混沌状态在进入系统时写入一次。

use super::id::{NodeId, TaskId};
use crate::error::SimError;
use crate::sim::SimTime;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    created_at: SimTime,
    origin: Option<NodeId>,
    size_bytes: u64,
    density_cycles_per_byte: u64,
    deadline_s: f64,
    offloaded: bool,
    transfer_time_s: f64,
    /// 任务进入系统时的混沌状态 z，该任务所有被扰动的量都用它
    chaos_z: f64,
}

impl Task {
    /// 创建任务；要求尺寸、密度、截止期都严格为正。
    pub fn new(
        id: TaskId,
        created_at: SimTime,
        size_bytes: u64,
        density_cycles_per_byte: u64,
        deadline_s: f64,
    ) -> Result<Self, SimError> {
        let reason = if size_bytes == 0 {
            Some("size_bytes must be > 0".to_string())
        } else if density_cycles_per_byte == 0 {
            Some("density_cycles_per_byte must be > 0".to_string())
        } else if !(deadline_s.is_finite() && deadline_s > 0.0) {
            Some(format!("deadline must be > 0, got {deadline_s}"))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SimError::InvalidTask { id, reason });
        }
        Ok(Self {
            id,
            created_at,
            origin: None,
            size_bytes,
            density_cycles_per_byte,
            deadline_s,
            offloaded: false,
            transfer_time_s: 0.0,
            chaos_z: 0.0,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    pub fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn density_cycles_per_byte(&self) -> u64 {
        self.density_cycles_per_byte
    }

    pub fn deadline_s(&self) -> f64 {
        self.deadline_s
    }

    pub fn is_offloaded(&self) -> bool {
        self.offloaded
    }

    pub fn transfer_time_s(&self) -> f64 {
        self.transfer_time_s
    }

    pub fn chaos_z(&self) -> f64 {
        self.chaos_z
    }

    /// size * density
    pub fn total_cycles(&self) -> u64 {
        self.size_bytes.saturating_mul(self.density_cycles_per_byte)
    }

    /// 从创建到 `now` 已经过去的时间（秒）
    pub fn spent_time_s(&self, now: SimTime) -> f64 {
        now.since(self.created_at).as_secs_f64()
    }

    pub(crate) fn set_origin(&mut self, node: NodeId) {
        self.origin = Some(node);
    }

    pub(crate) fn set_chaos_z(&mut self, z: f64) {
        self.chaos_z = z;
    }

    pub(crate) fn mark_offloaded(&mut self, transfer_time_s: f64) {
        self.offloaded = true;
        self.transfer_time_s = transfer_time_s;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task {{ id={}, created_at={:.6}s, size_bytes={}, density={}, total_cycles={}, deadline={:.3}s }}",
            self.id.0,
            self.created_at.as_secs_f64(),
            self.size_bytes,
            self.density_cycles_per_byte,
            self.total_cycles(),
            self.deadline_s
        )
    }
}
