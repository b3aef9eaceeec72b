//! 卸载决策策略
//!
//! 五种策略组成一个封闭的枚举，`match` 穷尽所有情况。策略不持有对宿主车辆的
//! 回指引用：决策时由世界传入宿主快照 [`HostView`] 和候选节点列表。

mod intelligent;
mod scripted;

pub use intelligent::IntelligentParams;
pub use scripted::{DecisionScript, ScriptedDecision};

use crate::config::DecisionConfig;
use crate::error::SimError;
use crate::model::{NodeId, Task};
use crate::sim::{ChaosState, SimRng};
use std::fmt;
use std::str::FromStr;

/// 决策结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Local,
    Remote(NodeId),
}

impl Decision {
    pub fn is_remote(&self) -> bool {
        matches!(self, Decision::Remote(_))
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Decision::Local => "Local",
            Decision::Remote(_) => "Remote",
        }
    }
}

/// 决策时宿主车辆的状态快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostView {
    pub queue_len: usize,
    pub queue_capacity: usize,
    /// 排队任务 + 正在处理任务的周期数
    pub queued_cycles: u64,
    pub frequency_hz: f64,
}

/// 可卸载的远端节点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: NodeId,
    pub frequency_hz: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Policy {
    /// 总是本地执行
    Local,
    /// 50/50：本地或均匀选取一个候选
    Random,
    /// 总是第一个候选（没有候选则本地）
    FirstRemote,
    /// 基于队列深度与截止期可行性的启发式
    Intelligent(IntelligentParams),
    /// 按脚本执行（oracle 基线）
    Scripted(DecisionScript),
}

impl Policy {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Local => PolicyKind::Local,
            Policy::Random => PolicyKind::Random,
            Policy::FirstRemote => PolicyKind::FirstRemote,
            Policy::Intelligent(_) => PolicyKind::Intelligent,
            Policy::Scripted(_) => PolicyKind::Oracle,
        }
    }

    /// 指标 tag 中使用的名字
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    pub fn decide(
        &self,
        task: &Task,
        host: &HostView,
        candidates: &[Candidate],
        rng: &mut SimRng,
    ) -> Result<Decision, SimError> {
        let decision = match self {
            Policy::Local => Decision::Local,
            Policy::Random => {
                if candidates.is_empty() {
                    return Ok(Decision::Local);
                }
                if rng.uniform(0.0, 1.0) >= 0.5 {
                    Decision::Remote(rng.choose(candidates, "remote candidate")?.id)
                } else {
                    Decision::Local
                }
            }
            Policy::FirstRemote => candidates
                .first()
                .map_or(Decision::Local, |c| Decision::Remote(c.id)),
            Policy::Intelligent(params) => params.decide(task, host, candidates),
            Policy::Scripted(script) => script.decide(task.id(), candidates),
        };
        Ok(decision)
    }

    /// 做出一次决策所花费的仿真时间（秒）；`z` 是被决策任务进入系统时的混沌状态
    pub fn decision_time_s(
        &self,
        cfg: &DecisionConfig,
        rng: &mut SimRng,
        chaos: &ChaosState,
        z: f64,
    ) -> f64 {
        match self {
            Policy::Local => rng.uniform(cfg.local_s.0, cfg.local_s.1),
            Policy::Random => chaos.drift_with(rng.uniform(cfg.random_s.0, cfg.random_s.1), z),
            Policy::FirstRemote => {
                chaos.drift_with(rng.uniform(cfg.first_remote_s.0, cfg.first_remote_s.1), z)
            }
            Policy::Intelligent(_) => rng.uniform(cfg.intelligent_s.0, cfg.intelligent_s.1),
            Policy::Scripted(_) => cfg.scripted_s,
        }
    }
}

/// 策略种类（供前端按名字选择）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Local,
    Random,
    FirstRemote,
    Intelligent,
    Oracle,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Oracle,
        PolicyKind::Local,
        PolicyKind::Random,
        PolicyKind::FirstRemote,
        PolicyKind::Intelligent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::Local => "Local",
            PolicyKind::Random => "Random",
            PolicyKind::FirstRemote => "FirstRemote",
            PolicyKind::Intelligent => "Intelligent",
            PolicyKind::Oracle => "Oracle",
        }
    }

    /// 构造策略实例；Oracle 使用传入的脚本（没有则为空脚本，全部本地）。
    pub fn build(self, cfg: &DecisionConfig, script: Option<DecisionScript>) -> Policy {
        match self {
            PolicyKind::Local => Policy::Local,
            PolicyKind::Random => Policy::Random,
            PolicyKind::FirstRemote => Policy::FirstRemote,
            PolicyKind::Intelligent => Policy::Intelligent(IntelligentParams {
                safety_margin: cfg.safety_margin,
            }),
            PolicyKind::Oracle => Policy::Scripted(script.unwrap_or_default()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "local" => Ok(PolicyKind::Local),
            "random" => Ok(PolicyKind::Random),
            "first-remote" | "firstremote" => Ok(PolicyKind::FirstRemote),
            "intelligent" => Ok(PolicyKind::Intelligent),
            "oracle" | "scripted" | "deterministic" => Ok(PolicyKind::Oracle),
            other => Err(format!(
                "unknown policy: {other} (expected local, random, first-remote, intelligent or oracle)"
            )),
        }
    }
}
