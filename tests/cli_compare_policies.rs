use serde_json::Value;
use std::process::Command;

#[test]
fn compare_policies_emits_one_row_per_policy() {
    let output = Command::new(env!("CARGO_BIN_EXE_compare_policies"))
        .args(["--scenario", "simple", "--json"])
        .output()
        .expect("run compare_policies");
    assert!(
        output.status.success(),
        "compare_policies failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    let labels: Vec<_> = rows
        .iter()
        .map(|r| r["policy"].as_str().expect("policy").to_string())
        .collect();
    assert_eq!(
        labels,
        ["Oracle", "Local", "Random", "FirstRemote", "Intelligent"]
    );
    for row in &rows {
        assert_eq!(row["summary"]["total_tasks"].as_u64(), Some(3));
    }
    let local = &rows[1]["summary"];
    assert_eq!(local["remote_count"].as_u64(), Some(0));
}
