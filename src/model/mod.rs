//! 节点与资源模型
//!
//! 任务、CPU、电池、能耗模型，以及车辆/RSU 共用的节点结构。

mod battery;
mod cpu;
mod energy;
mod id;
mod node;
mod task;

pub use battery::Battery;
pub use cpu::{Cpu, CpuState};
pub use energy::EnergyModel;
pub use id::{NodeId, TaskId};
pub use node::{Node, NodeSpec, Role, Vehicle};
pub use task::Task;
