use std::process::Command;

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_run_scenario"))
        .args(args)
        .output()
        .expect("run run_scenario");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn simple_scenario_reports_full_success() {
    let (ok, stdout, stderr) = run(&["simple"]);
    assert!(ok, "run_scenario failed: stderr={stderr}");
    assert!(stdout.contains("scenario=SimpleValidation"), "stdout={stdout}");
    assert!(stdout.contains("expected_success_rate=100%"), "stdout={stdout}");

    let summary = stdout
        .lines()
        .find(|l| l.starts_with("summary "))
        .expect("summary line");
    assert!(summary.contains("total=3"), "{summary}");
    assert!(summary.contains("successful=3"), "{summary}");
    assert!(summary.contains("local=2"), "{summary}");
    assert!(summary.contains("remote=1"), "{summary}");
}

#[test]
fn chaos_run_prints_rho_estimate() {
    let (ok, stdout, stderr) = run(&["oracle", "--chaos", "--seed", "42"]);
    assert!(ok, "run_scenario failed: stderr={stderr}");
    assert!(stdout.contains("chaos=on"), "stdout={stdout}");
    assert!(
        stdout.lines().any(|l| l.starts_with("chaos rho_hat=")),
        "stdout={stdout}"
    );
}

#[test]
fn unknown_scenario_is_rejected() {
    let (ok, _stdout, stderr) = run(&["nope"]);
    assert!(!ok);
    assert!(stderr.contains("unknown scenario"), "stderr={stderr}");
}
