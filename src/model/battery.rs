//! 电池
//!
//! 容量与剩余能量（焦耳）。`consume` 把剩余量钳制在 0 以上；
//! `predict_energy_consumption` 只做预测，用于可行性检查。

#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    capacity_j: f64,
    remaining_j: f64,
    infinite: bool,
}

impl Battery {
    pub fn new(capacity_j: f64) -> Self {
        Self {
            capacity_j,
            remaining_j: capacity_j,
            infinite: false,
        }
    }

    pub fn infinite() -> Self {
        Self {
            capacity_j: f64::INFINITY,
            remaining_j: f64::INFINITY,
            infinite: true,
        }
    }

    /// `None` 表示无限电量
    pub fn from_capacity(capacity_j: Option<f64>) -> Self {
        capacity_j.map_or_else(Self::infinite, Self::new)
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    pub fn consume(&mut self, energy_j: f64) {
        if self.infinite {
            return;
        }
        self.remaining_j = (self.remaining_j - energy_j).max(0.0);
    }

    /// 消耗 `energy_j` 之后的剩余量（可能为负），不修改状态
    pub fn predict_energy_consumption(&self, energy_j: f64) -> f64 {
        if self.infinite {
            return f64::INFINITY;
        }
        self.remaining_j - energy_j
    }

    pub fn remaining_j(&self) -> f64 {
        self.remaining_j
    }

    pub fn capacity_j(&self) -> f64 {
        self.capacity_j
    }

    pub fn percentage(&self) -> f64 {
        if self.infinite {
            100.0
        } else if self.capacity_j > 0.0 {
            self.remaining_j / self.capacity_j * 100.0
        } else {
            0.0
        }
    }

    pub fn is_depleted(&self) -> bool {
        !self.infinite && self.remaining_j <= 0.0
    }
}
