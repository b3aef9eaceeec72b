//! 仿真上下文
//!
//! 取代全局单例：主随机源、混沌过程、任务 id 生成器都挂在这里，
//! 由世界持有并显式借用。

use super::chaos::ChaosState;
use super::rng::SimRng;
use crate::config::ChaosConfig;
use crate::model::TaskId;

/// 混沌随机流的种子派生常数（异或后永远不等于主种子）
const CHAOS_STREAM: u64 = 0x517c_c1b7_2722_0a95;

#[derive(Debug, Clone)]
pub struct SimContext {
    seed: u64,
    pub rng: SimRng,
    pub chaos: ChaosState,
    next_task_id: u64,
}

impl SimContext {
    pub fn new(seed: u64, chaos: &ChaosConfig) -> Self {
        Self {
            seed,
            rng: SimRng::seed_from_u64(seed),
            chaos: ChaosState::new(chaos, chaos_seed(seed)),
            next_task_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 分配下一个任务 id（从 1 开始严格递增）
    pub fn next_task_id(&mut self) -> TaskId {
        let id = TaskId(self.next_task_id);
        self.next_task_id = self.next_task_id.saturating_add(1);
        id
    }
}

fn chaos_seed(seed: u64) -> u64 {
    seed ^ CHAOS_STREAM
}
