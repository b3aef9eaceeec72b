//! 混沌过程
//!
//! 全局共享的隐变量 z 服从 AR(1)：
//!
//! ```text
//! z_t = ρ·z_{t-1} + σ·ε_t,   ε_t ~ U(-1, 1)
//! ```
//!
//! 每个进入系统的任务只推进一次 z，之后该任务相关的所有被扰动量
//! （到达率、尺寸、密度、截止期、处理时间、能耗）都用同一个 z，
//! 从而得到结构相关的非平稳性，而不是各参数独立的噪声。

use super::rng::SimRng;
use crate::config::ChaosConfig;
use tracing::trace;

/// 扰动后的下限，保证结果严格为正
pub const DRIFT_FLOOR: f64 = 1e-6;

/// `max(base * (1 + z), DRIFT_FLOOR)`
pub fn apply_drift(base: f64, z: f64) -> f64 {
    (base * (1.0 + z)).max(DRIFT_FLOOR)
}

#[derive(Debug, Clone)]
pub struct ChaosState {
    z: f64,
    rho: f64,
    sigma: f64,
    enabled: bool,
    cfg: ChaosConfig,
    rng: SimRng,
    history: Vec<f64>,
}

impl ChaosState {
    /// `seed` 是混沌过程自己的随机流，与主随机源相互独立。
    pub fn new(cfg: &ChaosConfig, seed: u64) -> Self {
        Self {
            z: 0.0,
            rho: cfg.rho,
            sigma: cfg.intensity,
            enabled: cfg.enabled,
            cfg: cfg.clone(),
            rng: SimRng::seed_from_u64(seed),
            history: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> f64 {
        self.z
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn config(&self) -> &ChaosConfig {
        &self.cfg
    }

    /// 推进一步 AR(1)。关闭混沌模式时不做任何事（也不消耗随机数）。
    pub fn update(&mut self) {
        if !self.enabled {
            return;
        }
        let eps = self.rng.uniform(-1.0, 1.0);
        self.z = self.rho * self.z + self.sigma * eps;
        self.history.push(self.z);
        trace!(z = self.z, "混沌状态更新");
    }

    /// 用当前 z 扰动 `base`
    pub fn apply_drift(&self, base: f64) -> f64 {
        apply_drift(base, self.z)
    }

    /// 仅在混沌模式下扰动
    pub fn drift(&self, base: f64) -> f64 {
        self.drift_with(base, self.z)
    }

    /// 仅在混沌模式下用给定的 z（任务进入系统时记下的值）扰动
    pub fn drift_with(&self, base: f64, z: f64) -> f64 {
        if self.enabled { apply_drift(base, z) } else { base }
    }

    /// 混沌模式下的有效到达率：抖动、低概率突发、钳制到安全区间，再叠加 z 扰动。
    pub fn arrival_rate(&mut self, base: f64) -> f64 {
        if !self.enabled {
            return base;
        }
        let j = self.cfg.arrival_jitter;
        let mut rate = base * self.rng.uniform(1.0 - j, 1.0 + j);
        if self.rng.chance(self.cfg.burst_probability) {
            rate *= self.cfg.burst_factor;
        }
        let lo = base * self.cfg.rate_floor_factor;
        let hi = base * self.cfg.rate_ceiling_factor;
        self.apply_drift(rate.clamp(lo, hi))
    }

    /// 用历史样本估计 ρ：Σ z_t z_{t-1} / Σ z_{t-1}²。样本不足 3 个时返回 0。
    pub fn estimate_rho(&self) -> f64 {
        let z = &self.history;
        if z.len() < 3 {
            return 0.0;
        }
        let (num, den) = z
            .windows(2)
            .fold((0.0, 0.0), |(n, d), w| (n + w[1] * w[0], d + w[0] * w[0]));
        if den > 0.0 { num / den } else { 0.0 }
    }

    pub fn reset(&mut self) {
        self.z = 0.0;
        self.history.clear();
    }
}
