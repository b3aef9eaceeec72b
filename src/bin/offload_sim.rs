use clap::Parser;
use edge_offload_sim::config::SimConfig;
use edge_offload_sim::edge::EdgeWorld;
use edge_offload_sim::metrics::{MetricLog, RunSummary};
use edge_offload_sim::policy::PolicyKind;
use edge_offload_sim::sim::{SimTime, Simulator};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "offload-sim",
    about = "Stochastic vehicle/RSU computation-offloading simulation"
)]
struct Args {
    /// Offloading policy: local, random, first-remote, intelligent or oracle
    #[arg(long, default_value = "intelligent")]
    policy: PolicyKind,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 10.0)]
    duration_s: f64,

    /// Override the seed from the config
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1)]
    vehicles: usize,

    #[arg(long, default_value_t = 1)]
    rsus: usize,

    /// Enable chaos mode (non-stationary environment)
    #[arg(long)]
    chaos: bool,

    /// Override chaos intensity (sigma)
    #[arg(long)]
    intensity: Option<f64>,

    /// Override the arrival rate (tasks per second per vehicle)
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write every metric record to this JSON file
    #[arg(long)]
    metrics_json: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing（输出到 stderr，stdout 留给结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("offload_sim: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if args.chaos {
        cfg.chaos.enabled = true;
    }
    if let Some(intensity) = args.intensity {
        cfg.chaos.intensity = intensity;
    }
    if let Some(rate) = args.arrival_rate {
        cfg.traffic.arrival_rate = rate;
    }
    if !(args.duration_s.is_finite() && args.duration_s > 0.0) {
        return Err(format!("duration_s must be > 0, got {}", args.duration_s).into());
    }
    if args.vehicles == 0 {
        return Err("at least one vehicle is required".into());
    }

    let log = MetricLog::new();
    let mut world = EdgeWorld::new(cfg.clone(), log.clone())?;
    let mut sim = Simulator::default();

    let mut rsus = Vec::with_capacity(args.rsus);
    for i in 0..args.rsus {
        rsus.push(world.add_rsu(world.rsu_spec(format!("rsu-{i}")))?);
    }
    for i in 0..args.vehicles {
        let policy = args.policy.build(&cfg.decision, None);
        let v = world.add_vehicle(world.vehicle_spec(format!("vehicle-{i}")), policy)?;
        world.link(v, &rsus)?;
        world.start_generator(&mut sim, v, SimTime::ZERO)?;
    }

    sim.run_until(SimTime::from_secs_f64(args.duration_s), &mut world)?;

    let records = log.snapshot();
    let summary = RunSummary::from_records(&records, 0);
    println!(
        "policy={} vehicles={} rsus={} duration_s={} seed={} chaos={}",
        args.policy,
        args.vehicles,
        args.rsus,
        args.duration_s,
        cfg.seed,
        if cfg.chaos.enabled { "on" } else { "off" }
    );
    print_summary(&summary);
    println!(
        "events={} generated={} completed={} rejected={} energy_failures={}",
        world.stats.events,
        world.stats.generated,
        world.stats.completed,
        world.stats.rejected,
        world.stats.energy_failures
    );
    if cfg.chaos.enabled {
        println!("chaos rho_hat={:.4}", world.context().chaos.estimate_rho());
    }

    if let Some(path) = &args.metrics_json {
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        eprintln!("wrote {} metric records to {}", records.len(), path.display());
    }
    Ok(())
}

fn print_summary(s: &RunSummary) {
    println!(
        "summary total={} successful={} failed={} success_rate={:.2}% avg_latency_ms={:.3} local={} remote={} rejected={} low_energy={} energy_j={:.4}",
        s.total_tasks,
        s.successful,
        s.failed,
        s.success_rate,
        s.avg_latency_s * 1e3,
        s.local_count,
        s.remote_count,
        s.rejected,
        s.low_energy_failures,
        s.energy_j
    );
}
