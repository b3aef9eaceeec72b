//! 场景输入
//!
//! 预先构造好的任务序列取代随机生成器：事件链在每个任务的时间戳触发，
//! 送入一个任务后调度下一个；序列耗尽后不再调度任何事件。

use std::collections::VecDeque;

use crate::edge::EdgeWorld;
use crate::error::SimError;
use crate::model::{NodeId, Task};
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::{debug, info};

/// 某辆车尚未送出的场景任务
#[derive(Debug, Default)]
pub struct ScenarioFeed {
    pending: VecDeque<Task>,
}

impl ScenarioFeed {
    pub fn new(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            pending: tasks.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 下一个任务的时间戳
    pub fn next_at(&self) -> Option<SimTime> {
        self.pending.front().map(Task::created_at)
    }

    fn pop(&mut self) -> Option<Task> {
        self.pending.pop_front()
    }
}

/// 事件：把场景中的下一个任务送进车辆。
#[derive(Debug)]
pub struct FeedScenario {
    pub vehicle: NodeId,
}

impl Event for FeedScenario {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        let w = EdgeWorld::from_dyn(world)?;
        w.feed_next(self.vehicle, sim)
    }
}

impl EdgeWorld {
    /// 为车辆装入场景任务（按时间顺序）。已有未送完的序列时追加到末尾。
    pub fn feed_tasks(
        &mut self,
        sim: &mut Simulator,
        vehicle: NodeId,
        tasks: Vec<Task>,
    ) -> Result<(), SimError> {
        self.vehicle(vehicle)?;
        info!(vehicle = ?vehicle, tasks = tasks.len(), "📜 装入场景任务");
        let feed = self.feeds.entry(vehicle).or_default();
        let idle = feed.is_empty();
        feed.pending.extend(tasks);
        if idle {
            if let Some(at) = feed.next_at() {
                sim.schedule(at, FeedScenario { vehicle })?;
            }
        }
        Ok(())
    }

    /// 车辆还有多少场景任务未送出
    pub fn pending_feed(&self, vehicle: NodeId) -> usize {
        self.feeds.get(&vehicle).map_or(0, ScenarioFeed::len)
    }

    fn feed_next(&mut self, vehicle: NodeId, sim: &mut Simulator) -> Result<(), SimError> {
        let Some(task) = self.feeds.get_mut(&vehicle).and_then(ScenarioFeed::pop) else {
            debug!(vehicle = ?vehicle, "场景任务已送完");
            return Ok(());
        };
        self.ctx.chaos.update();
        self.admit_new_task(vehicle, task, sim)?;

        if let Some(at) = self.feeds.get(&vehicle).and_then(ScenarioFeed::next_at) {
            // 时间戳倒退时这里返回 CausalityViolation
            sim.schedule(at, FeedScenario { vehicle })?;
        }
        Ok(())
    }
}
