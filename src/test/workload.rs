use super::{quiet_config, task, world_with_log};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::metrics::{MetricLog, MetricName, RunSummary};
use crate::model::TaskId;
use crate::policy::{Policy, PolicyKind, ScriptedDecision};
use crate::sim::{SimTime, Simulator};
use crate::workload::{Scenario, ScenarioTask, run_scenario};

fn generator_run(cfg: SimConfig, until: SimTime) -> (MetricLog, u64) {
    let (mut world, log) = world_with_log(cfg);
    let v = world
        .add_vehicle(world.vehicle_spec("v0"), Policy::Random)
        .expect("vehicle");
    let rsu = world.add_rsu(world.rsu_spec("rsu0")).expect("rsu");
    world.link(v, &[rsu]).expect("link");

    let mut sim = Simulator::default();
    world.start_generator(&mut sim, v, SimTime::ZERO).expect("start");
    sim.run_until(until, &mut world).expect("run");
    (log, world.stats.generated)
}

#[test]
fn same_seed_reproduces_tasks_and_metrics() {
    let mut cfg = SimConfig::default();
    cfg.seed = 7;
    cfg.chaos.enabled = true;

    let (a, na) = generator_run(cfg.clone(), SimTime::from_secs(5));
    let (b, nb) = generator_run(cfg.clone(), SimTime::from_secs(5));
    assert!(na > 10);
    assert_eq!(na, nb);
    assert_eq!(a.snapshot(), b.snapshot());

    cfg.seed = 8;
    let (c, _) = generator_run(cfg, SimTime::from_secs(5));
    assert_ne!(a.snapshot(), c.snapshot());
}

#[test]
fn generated_tasks_follow_traffic_configuration() {
    let (log, generated) = generator_run(SimConfig::default(), SimTime::from_secs(20));

    // λ = 12.5/s，20 s 内大约 250 个任务
    assert!((150..350).contains(&generated), "generated = {generated}");
    let cycles = log.of(MetricName::TaskGenerated);
    assert_eq!(cycles.len() as u64, generated);
    // 尺寸 100–300 KB，密度约 1000 ± 几个标准差
    assert!(cycles.iter().all(|r| r.value >= 100_000.0 * 500.0 && r.value <= 300_000.0 * 1_500.0));

    let ids: Vec<_> = cycles.iter().filter_map(|r| r.task).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids[0], TaskId(1));

    let times: Vec<_> = cycles.iter().map(|r| r.time_s).collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn feed_parks_after_the_last_task() {
    let (mut world, log) = world_with_log(quiet_config());
    let v = world
        .add_vehicle(world.vehicle_spec("v0"), Policy::Local)
        .expect("vehicle");
    let tasks = vec![
        world.new_task(SimTime::from_secs(1), 1_000, 100, 1.0).expect("task"),
        world.new_task(SimTime::from_secs(2), 1_000, 100, 1.0).expect("task"),
    ];

    let mut sim = Simulator::default();
    world.feed_tasks(&mut sim, v, tasks).expect("feed");
    assert_eq!(world.pending_feed(v), 2);
    sim.run_until(SimTime::from_secs(100), &mut world).expect("run");

    assert_eq!(world.pending_feed(v), 0);
    assert_eq!(sim.pending(), 0);
    assert_eq!(log.count(MetricName::TaskGenerated), 2);
    let times: Vec<_> = log
        .of(MetricName::TaskGenerated)
        .iter()
        .map(|r| r.time_s)
        .collect();
    assert_eq!(times, vec![1.0, 2.0]);
}

#[test]
fn feed_with_a_task_in_the_past_aborts_with_causality_violation() {
    let (mut world, _log) = world_with_log(quiet_config());
    let v = world
        .add_vehicle(world.vehicle_spec("v0"), Policy::Local)
        .expect("vehicle");
    let tasks = vec![
        task(1, SimTime::from_secs(2), 1_000, 100, 1.0),
        task(2, SimTime::from_secs(1), 1_000, 100, 1.0),
    ];

    let mut sim = Simulator::default();
    world.feed_tasks(&mut sim, v, tasks).expect("feed");
    let err = sim.run(&mut world).expect_err("past task");
    assert_eq!(
        err,
        SimError::CausalityViolation {
            at: SimTime::from_secs(1),
            now: SimTime::from_secs(2)
        }
    );
}

#[test]
fn prepare_scenario_builds_tasks_and_matching_script() {
    let (mut world, _log) = world_with_log(quiet_config());
    let rows = Scenario::Simple.tasks();
    let (tasks, script) = world.prepare_scenario(&rows).expect("scenario");

    assert_eq!(tasks.len(), 3);
    assert_eq!(script.len(), 3);
    assert_eq!(tasks[0].created_at(), SimTime::from_secs(1));
    assert_eq!(tasks[1].total_cycles(), 150_000_000);
    assert_eq!(script.get(tasks[0].id()), Some(ScriptedDecision::Local));
    assert_eq!(script.get(tasks[1].id()), Some(ScriptedDecision::remote(0)));

    let bad = [ScenarioTask::new(1.0, 0, 100, 1.0, ScriptedDecision::Local)];
    assert!(matches!(
        world.prepare_scenario(&bad),
        Err(SimError::InvalidTask { .. })
    ));
}

#[test]
fn builtin_scenarios_have_expected_shape() {
    assert_eq!(Scenario::Simple.tasks().len(), 3);
    assert_eq!(Scenario::Oracle.tasks().len(), 23);

    let stress = Scenario::StressTest.tasks();
    assert_eq!(stress.len(), 20);
    assert!(stress.iter().all(|t| t.at_s >= 1.0 && t.at_s < 3.0));
    assert_eq!(stress[0].decision, ScriptedDecision::remote(0));
    assert_eq!(stress[1].decision, ScriptedDecision::Local);

    for s in Scenario::ALL {
        let rows = s.tasks();
        assert!(rows.windows(2).all(|w| w[0].at_s <= w[1].at_s), "{s} not sorted");
        assert!((0.0..=1.0).contains(&s.expected_success_rate()));
        assert_eq!(s.to_string().parse::<Scenario>(), Ok(s));
    }
    assert!((Scenario::Oracle.duration_s() - 24.0).abs() < 1e-12);
    assert_eq!("stress".parse::<Scenario>(), Ok(Scenario::StressTest));
    assert!("bogus".parse::<Scenario>().is_err());
}

#[test]
fn simple_scenario_with_oracle_script_fully_succeeds() {
    let (mut world, log) = world_with_log(SimConfig::default());
    let rows = Scenario::Simple.tasks();
    let (tasks, script) = world.prepare_scenario(&rows).expect("scenario");
    let total = tasks.len();

    let policy = PolicyKind::Oracle.build(&world.config().decision, Some(script));
    let v = world
        .add_vehicle(world.vehicle_spec("v0"), policy)
        .expect("vehicle");
    let rsu = world.add_rsu(world.rsu_spec("rsu0")).expect("rsu");
    world.link(v, &[rsu]).expect("link");

    let mut sim = Simulator::default();
    world.feed_tasks(&mut sim, v, tasks).expect("feed");
    let end = SimTime::from_secs_f64(Scenario::Simple.duration_s());
    sim.run_until(end, &mut world).expect("run");

    let summary = RunSummary::from_records(&log.snapshot(), total);
    assert_eq!(summary.total_tasks, 3);
    assert_eq!(summary.successful, 3);
    assert_eq!(summary.local_count, 2);
    assert_eq!(summary.remote_count, 1);
    assert!((summary.success_rate - 100.0).abs() < 1e-9);
}

#[test]
fn scenario_runner_is_deterministic_and_policies_see_the_same_tasks() {
    let mut cfg = SimConfig::default();
    cfg.chaos.enabled = true;

    let a = run_scenario(cfg.clone(), Scenario::Oracle, PolicyKind::Random).expect("run");
    let b = run_scenario(cfg.clone(), Scenario::Oracle, PolicyKind::Random).expect("run");
    assert_eq!(a.records, b.records);
    assert_eq!(a.summary, b.summary);
    assert!(a.rho_hat.is_finite());

    for kind in PolicyKind::ALL {
        let run = run_scenario(cfg.clone(), Scenario::Oracle, kind).expect("run");
        assert_eq!(run.summary.total_tasks, 23);
        let generated: Vec<_> = run
            .records
            .iter()
            .filter(|r| r.metric == MetricName::TaskGenerated)
            .map(|r| (r.time_s, r.value))
            .collect();
        let reference: Vec<_> = a
            .records
            .iter()
            .filter(|r| r.metric == MetricName::TaskGenerated)
            .map(|r| (r.time_s, r.value))
            .collect();
        assert_eq!(generated, reference, "{kind}");
    }

    let local = run_scenario(SimConfig::default(), Scenario::Simple, PolicyKind::Local).expect("run");
    assert_eq!(local.summary.remote_count, 0);
    assert_eq!(local.summary.local_count, 3);
}

#[test]
fn burst_sizes_drift_with_the_chaos_state() {
    let mut cfg = SimConfig::default();
    cfg.chaos.enabled = true;
    cfg.chaos.intensity = 0.5;
    cfg.chaos.size_burst_probability = 1.0;
    cfg.chaos.size_burst_min_bytes = 1_000_000.0;
    cfg.chaos.size_burst_max_bytes = 1_000_000.0;
    let (mut world, _log) = world_with_log(cfg);

    for _ in 0..5 {
        world.context_mut().chaos.update();
        let z = world.context().chaos.state();
        let t = world.sample_task(SimTime::ZERO).expect("task");
        let expected = (1_000_000.0 * (1.0 + z)).round() as u64;
        assert_eq!(t.size_bytes(), expected, "z = {z}");
    }
}
