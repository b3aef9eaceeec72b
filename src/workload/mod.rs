//! 任务来源
//!
//! 随机生成器（指数到达）与脚本化的场景输入，两者都把任务送进车辆的决策队列。

mod generator;
mod feed;
mod scenario;

pub use generator::GenerateTask;
pub use feed::{FeedScenario, ScenarioFeed};
pub use scenario::{Scenario, ScenarioRun, ScenarioTask, run_scenario};
