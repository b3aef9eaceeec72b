use clap::Parser;
use edge_offload_sim::config::SimConfig;
use edge_offload_sim::metrics::RunSummary;
use edge_offload_sim::policy::PolicyKind;
use edge_offload_sim::workload::{Scenario, run_scenario};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "run-scenario",
    about = "Run a built-in deterministic scenario with its scripted decisions"
)]
struct Args {
    /// Scenario name: simple, oracle or stress
    scenario: Scenario,

    /// Enable chaos mode (non-stationary environment)
    #[arg(long)]
    chaos: bool,

    #[arg(long, default_value_t = 1978)]
    seed: u64,

    /// Run with another policy instead of the scenario script
    #[arg(long, default_value = "oracle")]
    policy: PolicyKind,

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
        eprintln!("run_scenario: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    cfg.seed = args.seed;
    if args.chaos {
        cfg.chaos.enabled = true;
    }

    let scenario = args.scenario;
    println!("scenario={} policy={} seed={}", scenario.name(), args.policy, cfg.seed);
    println!("description: {}", scenario.description());
    println!(
        "tasks={} duration_s={} expected_success_rate={:.0}%",
        scenario.tasks().len(),
        scenario.duration_s(),
        scenario.expected_success_rate() * 100.0
    );
    if cfg.chaos.enabled {
        println!("chaos=on intensity={} rho={}", cfg.chaos.intensity, cfg.chaos.rho);
    }

    let chaos = cfg.chaos.enabled;
    let result = run_scenario(cfg, scenario, args.policy)?;
    print_summary(&result.summary);
    if chaos {
        println!("chaos rho_hat={:.4}", result.rho_hat);
    }

    if let Some(path) = &args.metrics_json {
        fs::write(path, serde_json::to_string_pretty(&result.records)?)?;
        eprintln!("wrote {} metric records to {}", result.records.len(), path.display());
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
