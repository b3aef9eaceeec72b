//! 队列
//!
//! 节点的处理队列是按任务个数计容量的 DropTail 队列：满了就拒绝新任务，
//! 既不阻塞也不静默丢弃，拒绝由调用方记为 `FullQueueError`。

mod drop_tail;

pub use drop_tail::DropTailQueue;
