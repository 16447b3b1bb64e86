use serde_json::Value;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quorate"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to execute quorate")
}

fn run_json(args: &[&str]) -> Value {
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["--format", "json"]);
    let output = run(&full);
    assert!(
        output.status.success(),
        "quorate {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "--format json output should be valid JSON (stdout={}). parse error: {e}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn sweep_json_reports_every_quorum_in_range() {
    let report = run_json(&["sweep", "--endorsers", "150", "--low", "60", "--high", "70"]);

    assert_eq!(report["summary"]["network"], 1000);
    assert_eq!(report["summary"]["honest"], 670);
    assert_eq!(report["summary"]["faulty"], 330);
    assert!(report.get("bits").is_none());

    let rows = report["rows"].as_array().expect("rows should be an array");
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0]["quorum_percent"], 60);
    assert_eq!(rows[10]["quorum_percent"], 70);
    for row in rows {
        let safety = row["safety"].as_f64().unwrap();
        let liveness = row["liveness"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&safety));
        assert!((0.0..=1.0).contains(&liveness));
    }
}

#[test]
fn biased_sweep_json_carries_bits() {
    let plain = run_json(&["sweep", "--low", "70", "--high", "72"]);
    let biased = run_json(&["sweep", "--low", "70", "--high", "72", "--bits", "4"]);
    assert_eq!(biased["bits"], 4);

    let plain_rows = plain["rows"].as_array().unwrap();
    let biased_rows = biased["rows"].as_array().unwrap();
    for (p, b) in plain_rows.iter().zip(biased_rows) {
        assert!(b["safety"].as_f64().unwrap() >= p["safety"].as_f64().unwrap());
    }
}

#[test]
fn quorum_search_json_meets_epsilon() {
    let report = run_json(&["quorum", "--endorsers", "150", "--epsilon", "1e-9", "--low", "50"]);
    let outcome = &report["outcome"];
    assert_eq!(outcome["status"], "found");
    let threshold = outcome["threshold"].as_u64().unwrap();
    assert!((50..=100).contains(&threshold));
    assert!(outcome["probability"].as_f64().unwrap() <= 1e-9);
    assert!(report["liveness"].is_number());
}

#[test]
fn quorum_search_json_reports_not_found() {
    // Half the network is faulty and 10 endorsers all could be faulty.
    let report = run_json(&[
        "quorum",
        "--network",
        "100",
        "--honest-percent",
        "50",
        "--endorsers",
        "10",
        "--epsilon",
        "0",
    ]);
    assert_eq!(report["outcome"]["status"], "not_found");
    assert!(report["liveness"].is_null());
}

#[test]
fn endorsers_search_json_lands_on_step_grid() {
    let report = run_json(&[
        "endorsers",
        "--epsilon",
        "1e-9",
        "--quorum",
        "80",
        "--low",
        "100",
        "--step",
        "10",
    ]);
    let outcome = &report["outcome"];
    assert_eq!(outcome["status"], "found");
    let size = outcome["threshold"].as_u64().unwrap();
    assert!(size >= 100 && size <= 1000);
    assert_eq!((size - 100) % 10, 0);
    assert!(outcome["probability"].as_f64().unwrap() <= 1e-9);
}

#[test]
fn text_report_mirrors_reference_layout() {
    let output = run(&["sweep", "--low", "79", "--high", "80"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=> Total Nodes: 1000"));
    assert!(stdout.contains("=> # Good Nodes: 670"));
    assert!(stdout.contains("=> # Bad Nodes: 330"));
    assert!(stdout.contains("Quorum percentage 79%: p(safety) = "));
    assert!(stdout.contains("Quorum percentage 80%: p(safety) = "));
    assert!(stdout.contains("years"));
    assert!(stdout.contains("finality = 1.00 seconds"));

    // Probabilities print as d.dddddde±XX with at least two exponent digits.
    for line in stdout.lines().filter(|l| l.starts_with("Quorum percentage")) {
        let value = line
            .split("p(safety) = ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap();
        let (mantissa, exponent) = value.split_once('e').unwrap();
        assert_eq!(mantissa.len(), 8, "{value}");
        assert!(exponent.starts_with('-') || exponent.starts_with('+'), "{value}");
        assert!(exponent.len() >= 3, "{value}");
        assert!(value.parse::<f64>().is_ok(), "{value}");
    }
}

#[test]
fn invalid_inputs_fail_with_diagnostics() {
    let cases: &[&[&str]] = &[
        &["sweep", "--low", "80", "--high", "50"],
        &["sweep", "--endorsers", "2000"],
        &["quorum", "--low", "101"],
        &["endorsers", "--step", "0"],
        &["endorsers", "--low", "1001"],
        &["sweep", "--honest-percent", "120"],
        &["sweep", "--format", "yaml"],
    ];
    for args in cases {
        let output = run(args);
        assert!(
            !output.status.success(),
            "quorate {args:?} should fail, stdout={}",
            String::from_utf8_lossy(&output.stdout)
        );
        assert!(
            !output.stderr.is_empty(),
            "quorate {args:?} should explain the failure on stderr"
        );
    }
}
