use crate::config::ChaosConfig;
use crate::sim::{ChaosState, DRIFT_FLOOR, apply_drift};

fn chaos_cfg(intensity: f64) -> ChaosConfig {
    ChaosConfig {
        enabled: true,
        intensity,
        ..ChaosConfig::default()
    }
}

#[test]
fn zero_intensity_keeps_state_at_zero_and_drift_is_identity() {
    let mut chaos = ChaosState::new(&chaos_cfg(0.0), 7);
    for _ in 0..1_000 {
        chaos.update();
        assert_eq!(chaos.state(), 0.0);
    }
    for base in [1e-3, 0.5, 1.0, 12.5, 3e9] {
        assert_eq!(chaos.apply_drift(base), base);
        assert_eq!(chaos.drift(base), base);
    }
}

#[test]
fn disabled_chaos_does_not_move_or_record() {
    let cfg = ChaosConfig {
        enabled: false,
        intensity: 0.5,
        ..ChaosConfig::default()
    };
    let mut chaos = ChaosState::new(&cfg, 7);
    for _ in 0..100 {
        chaos.update();
    }
    assert!(!chaos.is_enabled());
    assert_eq!(chaos.state(), 0.0);
    assert!(chaos.history().is_empty());
    assert_eq!(chaos.drift(2.0), 2.0);
    assert_eq!(chaos.arrival_rate(12.5), 12.5);
}

#[test]
fn drift_is_floored_at_a_small_positive_value() {
    assert_eq!(apply_drift(1.0, -2.0), DRIFT_FLOOR);
    assert_eq!(apply_drift(0.0, 0.3), DRIFT_FLOOR);
    assert!((apply_drift(2.0, 0.25) - 2.5).abs() < 1e-12);
}

#[test]
fn same_seed_gives_same_trajectory() {
    let mut a = ChaosState::new(&chaos_cfg(0.2), 42);
    let mut b = ChaosState::new(&chaos_cfg(0.2), 42);
    let mut c = ChaosState::new(&chaos_cfg(0.2), 43);
    for _ in 0..200 {
        a.update();
        b.update();
        c.update();
    }
    assert_eq!(a.history(), b.history());
    assert_ne!(a.history(), c.history());
    assert_eq!(a.history().len(), 200);
}

#[test]
fn state_stays_within_stationary_bound() {
    // |z| <= σ / (1 - ρ)
    let mut chaos = ChaosState::new(&chaos_cfg(0.1), 3);
    for _ in 0..5_000 {
        chaos.update();
        assert!(chaos.state().abs() <= 0.1 / (1.0 - 0.9) + 1e-9);
    }
}

#[test]
fn estimated_persistence_matches_configured_rho() {
    let mut chaos = ChaosState::new(&chaos_cfg(0.1), 1978);
    assert_eq!(chaos.estimate_rho(), 0.0);
    for _ in 0..5_000 {
        chaos.update();
    }
    let rho_hat = chaos.estimate_rho();
    assert!((rho_hat - 0.9).abs() < 0.05, "rho_hat = {rho_hat}");

    chaos.reset();
    assert_eq!(chaos.state(), 0.0);
    assert!(chaos.history().is_empty());
}

#[test]
fn arrival_rate_stays_inside_the_drifted_safety_band() {
    let mut chaos = ChaosState::new(&chaos_cfg(0.1), 11);
    let base = 12.5;
    for _ in 0..2_000 {
        chaos.update();
        let scale = 1.0 + chaos.state();
        let rate = chaos.arrival_rate(base);
        assert!(rate >= 0.25 * base * scale - 1e-9, "rate {rate} below band");
        assert!(rate <= 4.0 * base * scale + 1e-9, "rate {rate} above band");
    }
}
