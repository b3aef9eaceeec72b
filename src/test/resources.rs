use super::task;
use crate::config::{ChaosConfig, EnergyConfig};
use crate::model::{Battery, Cpu, CpuState, EnergyModel};
use crate::sim::{ChaosState, SimTime};

fn calm() -> ChaosState {
    ChaosState::new(&ChaosConfig::default(), 1)
}

#[test]
fn battery_consume_clamps_at_zero_and_predict_does_not_mutate() {
    let mut b = Battery::new(10.0);
    assert_eq!(b.predict_energy_consumption(4.0), 6.0);
    assert_eq!(b.predict_energy_consumption(14.0), -4.0);
    assert_eq!(b.remaining_j(), 10.0);

    b.consume(4.0);
    assert_eq!(b.remaining_j(), 6.0);
    assert!((b.percentage() - 60.0).abs() < 1e-12);
    assert!(!b.is_depleted());

    b.consume(100.0);
    assert_eq!(b.remaining_j(), 0.0);
    assert!(b.is_depleted());
}

#[test]
fn infinite_battery_never_runs_out() {
    let mut b = Battery::from_capacity(None);
    assert!(b.is_infinite());
    b.consume(1e12);
    assert!(!b.is_depleted());
    assert_eq!(b.predict_energy_consumption(1e12), f64::INFINITY);
    assert_eq!(b.percentage(), 100.0);

    let finite = Battery::from_capacity(Some(5.0));
    assert!(!finite.is_infinite());
    assert_eq!(finite.capacity_j(), 5.0);
}

#[test]
fn cpu_processing_time_is_cycles_over_frequency() {
    let mut cpu = Cpu::new(1e9);
    assert_eq!(cpu.state(), CpuState::Idle);
    let t = task(1, SimTime::ZERO, 1_000, 1_000, 1.0);
    assert!((cpu.processing_time_s(&t, &calm()) - 1e-3).abs() < 1e-15);

    cpu.start();
    assert!(cpu.is_busy());
    cpu.complete();
    assert!(cpu.is_idle());
}

#[test]
fn chaos_drifts_processing_time() {
    let cfg = ChaosConfig {
        enabled: true,
        intensity: 0.3,
        ..ChaosConfig::default()
    };
    let mut chaos = ChaosState::new(&cfg, 5);
    chaos.update();
    let cpu = Cpu::new(1e9);
    let mut t = task(1, SimTime::ZERO, 1_000, 1_000, 1.0);
    t.set_chaos_z(chaos.state());
    let expected = 1e-3 * (1.0 + chaos.state());
    assert!((cpu.processing_time_s(&t, &chaos) - expected).abs() < 1e-15);

    // 之后 z 再怎么变，这个任务的处理时间都不变
    chaos.update();
    chaos.update();
    assert!((cpu.processing_time_s(&t, &chaos) - expected).abs() < 1e-15);
}

#[test]
fn energy_model_uses_effective_capacitance_and_linear_tx_cost() {
    let m = EnergyModel::new(EnergyConfig::default());
    let chaos = calm();
    // 1e-28 * (1e9)^2 * 1e6
    let t = task(1, SimTime::ZERO, 1_000, 1_000, 1.0);
    assert!((m.processing_energy_j(1e9, &t, &chaos) - 1e-4).abs() < 1e-15);
    // 5 J/MB * 0.2 MB
    let t = task(2, SimTime::ZERO, 200_000, 1, 1.0);
    assert!((m.transmission_energy_j(&t, &chaos) - 1.0).abs() < 1e-12);
    assert!((m.transfer_time_s(4 * 1024 * 1024) - 1.0).abs() < 1e-12);
}

#[test]
fn energy_drifts_with_the_task_z_not_the_current_one() {
    let m = EnergyModel::new(EnergyConfig::default());
    let cfg = ChaosConfig {
        enabled: true,
        intensity: 0.5,
        ..ChaosConfig::default()
    };
    let mut chaos = ChaosState::new(&cfg, 9);
    chaos.update();
    let mut t = task(1, SimTime::ZERO, 200_000, 5, 1.0);
    t.set_chaos_z(-0.2);

    assert!((m.processing_energy_j(1e9, &t, &chaos) - 1e-4 * 0.8).abs() < 1e-15);
    assert!((m.transmission_energy_j(&t, &chaos) - 0.8).abs() < 1e-12);
}
