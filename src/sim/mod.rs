//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件：仿真时间、事件、调度器、世界，
//! 以及可复现的随机源与共享混沌过程。

// 子模块声明
mod chaos;
mod context;
mod event;
mod rng;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use chaos::{ChaosState, DRIFT_FLOOR, apply_drift};
pub use context::SimContext;
pub use event::Event;
pub use rng::SimRng;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
