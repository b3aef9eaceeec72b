//! 脚本化（oracle）决策
//!
//! 脚本把任务 id 映射到预先写好的决策。脚本里没有的任务在本地执行；
//! 远端下标缺失或越界时退回第 0 个候选，没有候选时本地执行。

use super::{Candidate, Decision};
use crate::model::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedDecision {
    Local,
    /// 车辆候选列表中的下标
    Remote(Option<usize>),
}

impl ScriptedDecision {
    pub fn remote(index: usize) -> Self {
        ScriptedDecision::Remote(Some(index))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionScript {
    decisions: BTreeMap<TaskId, ScriptedDecision>,
}

impl DecisionScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, task: TaskId, decision: ScriptedDecision) {
        self.decisions.insert(task, decision);
    }

    pub fn get(&self, task: TaskId) -> Option<ScriptedDecision> {
        self.decisions.get(&task).copied()
    }

    pub fn set_all_local(&mut self, ids: RangeInclusive<u64>) {
        for id in ids {
            self.insert(TaskId(id), ScriptedDecision::Local);
        }
    }

    pub fn set_all_remote(&mut self, ids: RangeInclusive<u64>, index: usize) {
        for id in ids {
            self.insert(TaskId(id), ScriptedDecision::remote(index));
        }
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    pub(super) fn decide(&self, task: TaskId, candidates: &[Candidate]) -> Decision {
        match self.get(task) {
            None | Some(ScriptedDecision::Local) => Decision::Local,
            Some(ScriptedDecision::Remote(index)) => {
                let chosen = index
                    .and_then(|i| candidates.get(i))
                    .or_else(|| candidates.first());
                chosen.map_or(Decision::Local, |c| Decision::Remote(c.id))
            }
        }
    }
}

impl FromIterator<(TaskId, ScriptedDecision)> for DecisionScript {
    fn from_iter<I: IntoIterator<Item = (TaskId, ScriptedDecision)>>(iter: I) -> Self {
        Self {
            decisions: iter.into_iter().collect(),
        }
    }
}
