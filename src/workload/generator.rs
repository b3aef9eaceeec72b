//! 随机任务生成器
//!
//! 每次触发：推进一次混沌状态，采样一个任务送入决策队列，然后按指数分布的
//! 间隔重新调度自己。间隔至少一个 tick，避免大时间值下的零间隔碰撞。

use crate::edge::EdgeWorld;
use crate::error::SimError;
use crate::model::{NodeId, Task};
use crate::sim::{Event, SimTime, Simulator, World};
use tracing::trace;

/// 事件：为某辆车生成下一个任务。
#[derive(Debug)]
pub struct GenerateTask {
    pub vehicle: NodeId,
}

impl Event for GenerateTask {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        let w = EdgeWorld::from_dyn(world)?;
        w.generate_task(self.vehicle, sim)
    }
}

impl EdgeWorld {
    /// 在 `at` 启动车辆的随机生成器
    pub fn start_generator(
        &self,
        sim: &mut Simulator,
        vehicle: NodeId,
        at: SimTime,
    ) -> Result<(), SimError> {
        self.vehicle(vehicle)?;
        sim.schedule(at, GenerateTask { vehicle })
    }

    fn generate_task(&mut self, vehicle: NodeId, sim: &mut Simulator) -> Result<(), SimError> {
        self.ctx.chaos.update();
        let task = self.sample_task(sim.now())?;
        self.admit_new_task(vehicle, task, sim)?;

        let rate = self.ctx.chaos.arrival_rate(self.cfg.traffic.arrival_rate);
        let gap = SimTime::from_secs_f64(self.ctx.rng.exponential(rate)?).max(SimTime::TICK);
        trace!(vehicle = ?vehicle, rate, gap = ?gap, "下一次到达");
        sim.schedule_in(gap, GenerateTask { vehicle })
    }

    /// 按流量配置采样一个任务；混沌模式下尺寸可能落入突发区间，密度方差放大，
    /// 所有边界都叠加当前 z。
    pub(crate) fn sample_task(&mut self, now: SimTime) -> Result<Task, SimError> {
        let t = &self.cfg.traffic;
        let chaos = &self.ctx.chaos;
        let rng = &mut self.ctx.rng;
        let c = chaos.config();

        let size = if chaos.is_enabled() && rng.chance(c.size_burst_probability) {
            rng.uniform(chaos.drift(c.size_burst_min_bytes), chaos.drift(c.size_burst_max_bytes))
        } else {
            rng.uniform(chaos.drift(t.size_min_bytes), chaos.drift(t.size_max_bytes))
        };

        let std = if chaos.is_enabled() {
            t.density_std * c.density_std_factor
        } else {
            t.density_std
        };
        let density = rng.normal(chaos.drift(t.density_mean), chaos.drift(std))?;
        let deadline = rng.uniform(chaos.drift(t.deadline_min_s), chaos.drift(t.deadline_max_s));

        let size_bytes = size.round().max(1.0) as u64;
        let density = density.round().max(1.0) as u64;
        self.new_task(now, size_bytes, density, deadline)
    }
}
