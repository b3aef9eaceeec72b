//! DropTail（尾丢弃）任务队列
//!
//! 当队列已满时，新到达的任务原样退回给调用方。

use std::collections::VecDeque;

use crate::model::Task;

#[derive(Debug)]
pub struct DropTailQueue {
    capacity: usize,
    q: VecDeque<Task>,
}

impl DropTailQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            q: VecDeque::with_capacity(capacity),
        }
    }

    /// 入队：成功返回 Ok；若队列已满则返回 Err(task)
    pub fn enqueue(&mut self, task: Task) -> Result<(), Task> {
        if self.q.len() >= self.capacity {
            return Err(task);
        }
        self.q.push_back(task);
        Ok(())
    }

    /// 出队：FIFO
    pub fn dequeue(&mut self) -> Option<Task> {
        self.q.pop_front()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.q.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 排队中所有任务的总周期数
    pub fn queued_cycles(&self) -> u64 {
        self.q
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.total_cycles()))
    }
}
