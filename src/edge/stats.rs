//! 统计信息

/// 世界级计数器
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorldStats {
    /// 已执行的事件数
    pub events: u64,
    /// 进入系统的任务（生成或脚本注入）
    pub generated: u64,
    pub completed: u64,
    /// 因处理队列满被拒绝
    pub rejected: u64,
    pub energy_failures: u64,
}
