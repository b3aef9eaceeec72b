//! 仿真配置
//!
//! 所有参数在构造时显式注入；库代码不读取环境变量。JSON 中缺省的字段使用
//! `Default` 中的取值，因此一个空对象 `{}` 就是完整的默认配置。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub traffic: TrafficConfig,
    pub chaos: ChaosConfig,
    pub vehicle: NodeDefaults,
    pub rsu: NodeDefaults,
    pub energy: EnergyConfig,
    pub decision: DecisionConfig,
    /// 处理完一个任务后，启动下一个任务前的微小延迟（秒，必须 > 0）
    pub micro_step_s: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1978,
            traffic: TrafficConfig::default(),
            chaos: ChaosConfig::default(),
            vehicle: NodeDefaults {
                frequency_hz: 1e9,
                battery_j: Some(10_000.0),
                queue_capacity: 3,
            },
            rsu: NodeDefaults {
                frequency_hz: 3e9,
                battery_j: None,
                queue_capacity: 3,
            },
            energy: EnergyConfig::default(),
            decision: DecisionConfig::default(),
            micro_step_s: 1e-4,
        }
    }
}

/// 任务到达与任务特征
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    /// 到达率 λ（任务/秒）
    pub arrival_rate: f64,
    pub size_min_bytes: f64,
    pub size_max_bytes: f64,
    pub density_mean: f64,
    pub density_std: f64,
    pub deadline_min_s: f64,
    pub deadline_max_s: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 1.0 / 0.08,
            size_min_bytes: 100_000.0,
            size_max_bytes: 300_000.0,
            density_mean: 1_000.0,
            density_std: 100.0,
            deadline_min_s: 0.4,
            deadline_max_s: 0.5,
        }
    }
}

/// 混沌模式：共享 AR(1) 隐变量 + 到达率的状态切换
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChaosConfig {
    pub enabled: bool,
    /// σ
    pub intensity: f64,
    /// ρ ∈ (0, 1)
    pub rho: f64,
    /// 到达率乘性抖动幅度 j：rate * U(1-j, 1+j)
    pub arrival_jitter: f64,
    pub burst_probability: f64,
    pub burst_factor: f64,
    /// 到达率安全区间 [floor*λ, ceiling*λ]
    pub rate_floor_factor: f64,
    pub rate_ceiling_factor: f64,
    pub size_burst_probability: f64,
    pub size_burst_min_bytes: f64,
    pub size_burst_max_bytes: f64,
    pub density_std_factor: f64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.1,
            rho: 0.9,
            arrival_jitter: 0.2,
            burst_probability: 0.05,
            burst_factor: 3.0,
            rate_floor_factor: 0.25,
            rate_ceiling_factor: 4.0,
            size_burst_probability: 0.15,
            size_burst_min_bytes: 300_000.0,
            size_burst_max_bytes: 600_000.0,
            density_std_factor: 2.0,
        }
    }
}

/// 一类节点的默认资源参数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDefaults {
    pub frequency_hz: f64,
    /// `None` 表示无限电量
    #[serde(default)]
    pub battery_j: Option<f64>,
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// 有效开关电容 K
    pub capacitance: f64,
    pub tx_joules_per_mb: f64,
    pub bandwidth_bytes_per_s: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            capacitance: 1e-28,
            tx_joules_per_mb: 5.0,
            bandwidth_bytes_per_s: 4.0 * 1024.0 * 1024.0,
        }
    }
}

/// 各策略的决策耗时（秒）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionConfig {
    pub local_s: (f64, f64),
    pub random_s: (f64, f64),
    pub first_remote_s: (f64, f64),
    pub intelligent_s: (f64, f64),
    pub scripted_s: f64,
    /// Intelligent 策略的截止期安全余量（0.1 表示估计值放大 10%）
    pub safety_margin: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            local_s: (0.003, 0.005),
            random_s: (0.003, 0.005),
            first_remote_s: (0.003, 0.005),
            intelligent_s: (0.004, 0.006),
            scripted_s: 0.001,
            safety_margin: 0.1,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 检查参数合法性；前端在构造世界之前调用。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.traffic;
        positive("traffic.arrival_rate", t.arrival_rate)?;
        positive("traffic.size_min_bytes", t.size_min_bytes)?;
        ordered("traffic.size", t.size_min_bytes, t.size_max_bytes)?;
        positive("traffic.density_mean", t.density_mean)?;
        non_negative("traffic.density_std", t.density_std)?;
        positive("traffic.deadline_min_s", t.deadline_min_s)?;
        ordered("traffic.deadline", t.deadline_min_s, t.deadline_max_s)?;

        let c = &self.chaos;
        non_negative("chaos.intensity", c.intensity)?;
        if !(c.rho > 0.0 && c.rho < 1.0) {
            return Err(invalid(format!("chaos.rho must be in (0, 1), got {}", c.rho)));
        }
        if !(0.0..1.0).contains(&c.arrival_jitter) {
            return Err(invalid(format!(
                "chaos.arrival_jitter must be in [0, 1), got {}",
                c.arrival_jitter
            )));
        }
        probability("chaos.burst_probability", c.burst_probability)?;
        probability("chaos.size_burst_probability", c.size_burst_probability)?;
        positive("chaos.burst_factor", c.burst_factor)?;
        positive("chaos.rate_floor_factor", c.rate_floor_factor)?;
        ordered("chaos.rate band", c.rate_floor_factor, c.rate_ceiling_factor)?;
        positive("chaos.size_burst_min_bytes", c.size_burst_min_bytes)?;
        ordered("chaos.size burst", c.size_burst_min_bytes, c.size_burst_max_bytes)?;
        non_negative("chaos.density_std_factor", c.density_std_factor)?;

        for (name, n) in [("vehicle", &self.vehicle), ("rsu", &self.rsu)] {
            positive(&format!("{name}.frequency_hz"), n.frequency_hz)?;
            if n.queue_capacity == 0 {
                return Err(invalid(format!("{name}.queue_capacity must be >= 1")));
            }
            if let Some(b) = n.battery_j {
                non_negative(&format!("{name}.battery_j"), b)?;
            }
        }

        let e = &self.energy;
        non_negative("energy.capacitance", e.capacitance)?;
        non_negative("energy.tx_joules_per_mb", e.tx_joules_per_mb)?;
        positive("energy.bandwidth_bytes_per_s", e.bandwidth_bytes_per_s)?;

        let d = &self.decision;
        for (name, (lo, hi)) in [
            ("decision.local_s", d.local_s),
            ("decision.random_s", d.random_s),
            ("decision.first_remote_s", d.first_remote_s),
            ("decision.intelligent_s", d.intelligent_s),
        ] {
            non_negative(name, lo)?;
            ordered(name, lo, hi)?;
        }
        non_negative("decision.scripted_s", d.scripted_s)?;
        non_negative("decision.safety_margin", d.safety_margin)?;

        positive("micro_step_s", self.micro_step_s)?;
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}

fn positive(name: &str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be > 0, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be >= 0, got {v}")))
    }
}

fn probability(name: &str, v: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in [0, 1], got {v}")))
    }
}

fn ordered(name: &str, lo: f64, hi: f64) -> Result<(), ConfigError> {
    if lo <= hi {
        Ok(())
    } else {
        Err(invalid(format!("{name}: min {lo} exceeds max {hi}")))
    }
}
