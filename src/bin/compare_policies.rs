use clap::Parser;
use edge_offload_sim::config::SimConfig;
use edge_offload_sim::policy::PolicyKind;
use edge_offload_sim::workload::{Scenario, run_scenario};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "compare-policies",
    about = "Run every offloading policy over the same scenario tasks"
)]
struct Args {
    /// Scenario name: simple, oracle or stress
    #[arg(long, default_value = "oracle")]
    scenario: Scenario,

    /// Enable chaos mode (non-stationary environment)
    #[arg(long)]
    chaos: bool,

    #[arg(long, default_value_t = 1978)]
    seed: u64,

    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per policy instead of the table
    #[arg(long)]
    json: bool,
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
        eprintln!("compare_policies: {e}");
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

    if !args.json {
        println!(
            "scenario={} tasks={} seed={} chaos={}",
            args.scenario.name(),
            args.scenario.tasks().len(),
            cfg.seed,
            if cfg.chaos.enabled { "on" } else { "off" }
        );
        println!(
            "{:<12} {:>6} {:>6} {:>9} {:>12} {:>6} {:>6} {:>10}",
            "policy", "ok", "total", "success%", "latency_ms", "local", "remote", "energy_j"
        );
    }

    for kind in PolicyKind::ALL {
        // 每个策略都从同一个种子重新开始
        let result = run_scenario(cfg.clone(), args.scenario, kind)?;
        let s = &result.summary;
        if args.json {
            let line = serde_json::json!({
                "policy": kind.label(),
                "summary": s,
            });
            println!("{line}");
        } else {
            println!(
                "{:<12} {:>6} {:>6} {:>8.2}% {:>12.3} {:>6} {:>6} {:>10.4}",
                kind.label(),
                s.successful,
                s.total_tasks,
                s.success_rate,
                s.avg_latency_s * 1e3,
                s.local_count,
                s.remote_count,
                s.energy_j
            );
        }
    }
    Ok(())
}
