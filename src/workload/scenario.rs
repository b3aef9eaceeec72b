//! 内置场景
//!
//! 场景只是数据：一张带时间戳的任务表，每个任务附带一个预先写好的决策。
//! `EdgeWorld::prepare_scenario` 把表转换成任务序列和对应的决策脚本。

use std::fmt;
use std::str::FromStr;

use crate::config::SimConfig;
use crate::edge::EdgeWorld;
use crate::error::SimError;
use crate::metrics::{MetricLog, MetricRecord, RunSummary};
use crate::model::Task;
use crate::policy::{DecisionScript, PolicyKind, ScriptedDecision};
use crate::sim::{SimTime, Simulator};
use tracing::info;

/// 场景表中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioTask {
    pub at_s: f64,
    pub size_bytes: u64,
    pub density: u64,
    pub deadline_s: f64,
    pub decision: ScriptedDecision,
}

impl ScenarioTask {
    pub const fn new(
        at_s: f64,
        size_bytes: u64,
        density: u64,
        deadline_s: f64,
        decision: ScriptedDecision,
    ) -> Self {
        Self {
            at_s,
            size_bytes,
            density,
            deadline_s,
            decision,
        }
    }
}

const L: ScriptedDecision = ScriptedDecision::Local;
const R0: ScriptedDecision = ScriptedDecision::Remote(Some(0));

/// 基本功能验证：两个本地任务夹一个卸载任务
const SIMPLE: [ScenarioTask; 3] = [
    ScenarioTask::new(1.0, 50_000, 800, 1.0, L),
    ScenarioTask::new(2.0, 150_000, 1000, 1.5, R0),
    ScenarioTask::new(3.0, 60_000, 900, 1.0, L),
];

/// 三个阶段：正常负载、突发、恢复。小而急的任务留在本地，重任务卸载。
const ORACLE: [ScenarioTask; 23] = [
    // 正常负载
    ScenarioTask::new(1.0, 50_000, 800, 0.5, L),
    ScenarioTask::new(1.2, 60_000, 900, 0.4, L),
    ScenarioTask::new(1.5, 55_000, 850, 0.6, L),
    ScenarioTask::new(2.0, 200_000, 1000, 1.0, R0),
    ScenarioTask::new(2.5, 70_000, 750, 0.5, L),
    ScenarioTask::new(3.0, 45_000, 800, 0.4, L),
    ScenarioTask::new(3.5, 350_000, 1200, 1.5, R0),
    ScenarioTask::new(4.0, 80_000, 900, 0.6, L),
    ScenarioTask::new(4.5, 65_000, 850, 0.5, L),
    // 突发
    ScenarioTask::new(5.0, 280_000, 1100, 0.8, R0),
    ScenarioTask::new(5.1, 300_000, 1000, 0.9, R0),
    ScenarioTask::new(5.2, 250_000, 1200, 0.7, R0),
    ScenarioTask::new(5.5, 40_000, 600, 0.3, L),
    ScenarioTask::new(6.0, 320_000, 1100, 1.0, R0),
    ScenarioTask::new(6.2, 290_000, 950, 0.9, R0),
    ScenarioTask::new(6.5, 35_000, 700, 0.4, L),
    ScenarioTask::new(7.0, 270_000, 1050, 1.1, R0),
    ScenarioTask::new(7.5, 310_000, 1150, 1.2, R0),
    // 恢复
    ScenarioTask::new(10.0, 150_000, 900, 0.8, L),
    ScenarioTask::new(11.0, 180_000, 950, 1.0, R0),
    ScenarioTask::new(12.0, 100_000, 800, 0.6, L),
    ScenarioTask::new(13.0, 220_000, 1000, 1.2, R0),
    ScenarioTask::new(14.0, 90_000, 850, 0.5, L),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Simple,
    Oracle,
    StressTest,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Simple, Scenario::Oracle, Scenario::StressTest];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Simple => "SimpleValidation",
            Scenario::Oracle => "OracleOptimal",
            Scenario::StressTest => "StressTest",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Simple => "Simple scenario for validating basic functionality",
            Scenario::Oracle => {
                "Oracle with perfect knowledge - optimal decisions for chaotic environment"
            }
            Scenario::StressTest => "Extreme stress test - high load with tight deadlines",
        }
    }

    /// 预期成功率（0..=1）
    pub fn expected_success_rate(self) -> f64 {
        match self {
            Scenario::Simple => 1.0,
            Scenario::Oracle => 0.95,
            Scenario::StressTest => 0.70,
        }
    }

    pub fn tasks(self) -> Vec<ScenarioTask> {
        match self {
            Scenario::Simple => SIMPLE.to_vec(),
            Scenario::Oracle => ORACLE.to_vec(),
            Scenario::StressTest => stress_tasks(),
        }
    }

    /// 最后一个任务之后再留 10 秒；空表时 20 秒
    pub fn duration_s(self) -> f64 {
        self.tasks().last().map_or(20.0, |t| t.at_s + 10.0)
    }
}

/// 2 秒内 20 个重任务，本地与卸载交替
fn stress_tasks() -> Vec<ScenarioTask> {
    (0..20u64)
        .map(|i| {
            let decision = if i % 2 == 0 { R0 } else { L };
            ScenarioTask::new(
                1.0 + i as f64 * 0.1,
                200_000 + (i % 5) * 50_000,
                900 + (i % 3) * 100,
                0.5 + (i % 4) as f64 * 0.2,
                decision,
            )
        })
        .collect()
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "simplevalidation" => Ok(Scenario::Simple),
            "oracle" | "oracleoptimal" => Ok(Scenario::Oracle),
            "stress" | "stresstest" => Ok(Scenario::StressTest),
            _ => Err(format!(
                "unknown scenario: {s} (expected one of: simple, oracle, stress)"
            )),
        }
    }
}

impl EdgeWorld {
    /// 按表创建任务（id 由上下文分配），同时生成与之对应的决策脚本。
    pub fn prepare_scenario(
        &mut self,
        rows: &[ScenarioTask],
    ) -> Result<(Vec<Task>, DecisionScript), SimError> {
        let mut tasks = Vec::with_capacity(rows.len());
        let mut script = DecisionScript::new();
        for row in rows {
            let task = self.new_task(
                SimTime::from_secs_f64(row.at_s),
                row.size_bytes,
                row.density,
                row.deadline_s,
            )?;
            script.insert(task.id(), row.decision);
            tasks.push(task);
        }
        Ok((tasks, script))
    }
}

/// 一次场景运行的结果
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub summary: RunSummary,
    pub records: Vec<MetricRecord>,
    /// 混沌过程 ρ 的估计值（未开启混沌时为 0）
    pub rho_hat: f64,
}

/// 一辆车 + 一个 RSU，按 `kind` 选择策略运行场景。
///
/// 每次调用都从同一个种子重新开始，不同策略看到的是完全相同的任务序列；
/// Oracle 策略使用场景表里的决策。
pub fn run_scenario(
    cfg: SimConfig,
    scenario: Scenario,
    kind: PolicyKind,
) -> Result<ScenarioRun, SimError> {
    let log = MetricLog::new();
    let mut world = EdgeWorld::new(cfg, log.clone())?;
    let rows = scenario.tasks();
    let (tasks, script) = world.prepare_scenario(&rows)?;
    let total = tasks.len();

    let policy = kind.build(&world.config().decision, Some(script));
    let vehicle = world.add_vehicle(world.vehicle_spec("vehicle-0"), policy)?;
    let rsu = world.add_rsu(world.rsu_spec("rsu-0"))?;
    world.link(vehicle, &[rsu])?;

    let mut sim = Simulator::default();
    world.feed_tasks(&mut sim, vehicle, tasks)?;
    sim.run_until(SimTime::from_secs_f64(scenario.duration_s()), &mut world)?;

    let records = log.snapshot();
    let summary = RunSummary::from_records(&records, total);
    info!(
        scenario = scenario.name(),
        policy = kind.label(),
        success_rate = summary.success_rate,
        "🏁 场景运行结束"
    );
    Ok(ScenarioRun {
        summary,
        records,
        rho_hat: world.context().chaos.estimate_rho(),
    })
}
