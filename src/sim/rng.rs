//! 可复现的随机源
//!
//! ChaCha8 + `rand_distr`，同一种子在任何平台上给出同一序列。

use crate::error::SimError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};

#[derive(Debug, Clone)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// U[a, b)；退化区间（a >= b）直接返回 `a`，不消耗随机数。
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        if a < b { self.inner.gen_range(a..b) } else { a }
    }

    /// 以概率 `p` 返回 true
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform(0.0, 1.0) < p
    }

    pub fn normal(&mut self, mean: f64, std: f64) -> Result<f64, SimError> {
        let dist = Normal::new(mean, std)
            .map_err(|e| SimError::invalid_config(format!("normal({mean}, {std}): {e}")))?;
        Ok(dist.sample(&mut self.inner))
    }

    /// 指数分布，参数为速率 λ
    pub fn exponential(&mut self, rate: f64) -> Result<f64, SimError> {
        let dist = Exp::new(rate)
            .map_err(|e| SimError::invalid_config(format!("exponential({rate}): {e}")))?;
        Ok(dist.sample(&mut self.inner))
    }

    /// 从切片中均匀选取一个元素；空切片返回 [`SimError::EmptySample`]。
    pub fn choose<'a, T>(&mut self, items: &'a [T], what: &'static str) -> Result<&'a T, SimError> {
        if items.is_empty() {
            return Err(SimError::EmptySample { what });
        }
        let idx = self.inner.gen_range(0..items.len());
        Ok(&items[idx])
    }
}
