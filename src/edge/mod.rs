//! 车联网边缘计算模块
//!
//! 此模块包含节点注册表（世界）、节点事件以及决策/处理两个状态机。

// 子模块声明
mod world;
mod stats;
mod node_event;
mod decision;
mod processing;

// 重新导出公共接口
pub use world::EdgeWorld;
pub use stats::WorldStats;
pub use node_event::{NodeEvent, NodeEventKind};
