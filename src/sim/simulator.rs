//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与未来事件表。单线程、无抢占：
//! 每个事件在下一次出队之前同步执行完毕。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use crate::error::SimError;
use std::collections::BinaryHeap;
use tracing::{debug, error, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 下一个待执行事件的时间
    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(ScheduledEvent::at)
    }

    /// 调度事件在指定时间执行。
    ///
    /// `at < now` 返回 [`SimError::CausalityViolation`]，事件不会入队。
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> Result<(), SimError> {
        if at < self.now {
            error!(now = ?self.now, "❌ 试图调度到过去的事件");
            return Err(SimError::CausalityViolation { at, now: self.now });
        }

        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        debug!(queue_size = self.q.len(), "事件已加入队列");
        Ok(())
    }

    /// 在 `now + delay` 调度事件
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) -> Result<(), SimError> {
        self.schedule(self.now.saturating_add(delay), ev)
    }

    /// 运行直到事件队列为空或到达 `until`。
    ///
    /// 时间晚于 `until` 的事件只被 peek，不会被消费。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) -> Result<(), SimError> {
        info!(until = ?until, "▶️  开始运行仿真");
        let mut event_count: u64 = 0;
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            self.now = item.at;
            event_count += 1;
            item.ev.execute(self, world)?;
            world.on_tick(self);
        }
        self.now = self.now.max(until);
        info!(
            total_events = event_count,
            final_time = ?self.now,
            remaining_queue = self.q.len(),
            "✅ 仿真完成"
        );
        Ok(())
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> Result<(), SimError> {
        info!("▶️  开始运行仿真（直到队列为空）");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count: u64 = 0;
        while let Some(item) = self.q.pop() {
            event_count += 1;
            self.now = item.at;

            trace!(
                event_num = event_count,
                now = ?self.now,
                seq = item.seq,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            item.ev.execute(self, world)?;
            world.on_tick(self);
        }

        info!(
            total_events = event_count,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
        Ok(())
    }
}
