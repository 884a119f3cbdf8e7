extern crate assert_cmd;
extern crate serde_json;
extern crate tempfile;

use assert_cmd::prelude::*;
use std::io::Write as _;
use std::process::Command;

fn dckernel() -> Command {
    Command::cargo_bin("dckernel").expect("binary should be built")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = dckernel().args(args).output().expect("binary should run");
    assert!(
        output.status.success(),
        "dckernel {:?} failed\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr),
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write_csv(dir: &tempfile::TempDir, name: &str, rows: &[&[f64]]) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", (0..rows[0].len()).map(|i| format!("f{}", i)).collect::<Vec<_>>().join(",")).unwrap();
    for row in rows {
        let line = row.iter().map(f64::to_string).collect::<Vec<_>>().join(",");
        writeln!(file, "{}", line).unwrap();
    }
    path.to_string_lossy().into_owned()
}

#[test]
fn version_is_reported() {
    let output = dckernel().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1.0.0"));
}

#[test]
fn two_sample_on_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let x: Vec<[f64; 1]> = (0..30).map(|i| [f64::from(i) * 0.1]).collect();
    let y: Vec<[f64; 1]> = (0..30).map(|i| [10.0 + f64::from(i) * 0.1]).collect();
    let x_rows: Vec<&[f64]> = x.iter().map(|r| &r[..]).collect();
    let y_rows: Vec<&[f64]> = y.iter().map(|r| &r[..]).collect();
    let x_path = write_csv(&dir, "x.csv", &x_rows);
    let y_path = write_csv(&dir, "y.csv", &y_rows);
    let perm_path = dir.path().join("permutations.csv");

    let result = run_json(&[
        "--quiet",
        "two-sample",
        "--x",
        &x_path,
        "--y",
        &y_path,
        "--headers",
        "--permutations",
        "49",
        "--corruptions",
        "1",
        "--write-csv",
        &perm_path.to_string_lossy(),
    ]);

    assert_eq!(result["test"], "mmd");
    assert_eq!(result["reject"], true);
    assert_eq!(result["permutations"], 49);
    let written = std::fs::read_to_string(&perm_path).unwrap();
    assert_eq!(written.lines().count(), 50, "header plus one row per permutation");
}

#[test]
fn simulate_independence_runs() {
    let result = run_json(&[
        "--quiet",
        "simulate",
        "--setting",
        "independence",
        "--n",
        "50",
        "--effect",
        "0.0",
        "--permutations",
        "19",
        "--kernel",
        "laplace",
    ]);
    assert_eq!(result["test"], "hsic");
    assert_eq!(result["bandwidths"].as_array().unwrap().len(), 2);
}

#[test]
fn simulate_with_corruption_and_32_bit_runs() {
    let result = run_json(&[
        "simulate",
        "--n",
        "40",
        "--corrupt",
        "2",
        "--corruption",
        "noise:3",
        "--corruptions",
        "2",
        "--permutations",
        "19",
        "--use-32",
    ]);
    assert_eq!(result["corruptions"], 2);
}

#[test]
fn summary_table_is_printed_without_quiet() {
    let output = dckernel()
        .args(&["simulate", "--n", "40", "--permutations", "19"])
        .output()
        .unwrap();
    assert!(output.status.success(), "status: {:?}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max tolerated corruptions"), "stderr: {}", stderr);
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["fixed_bandwidth"], false);
}

#[test]
fn invalid_input_fails_with_an_error_message() {
    let output = dckernel()
        .args(&["two-sample", "--x", "/nonexistent/x.csv", "--y", "/nonexistent/y.csv"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR"));

    dckernel()
        .args(&["simulate", "--alpha", "2.0", "--permutations", "9"])
        .assert()
        .failure();

    dckernel()
        .args(&["simulate", "--corrupt", "1", "--corruption", "noise:inf"])
        .assert()
        .failure();
}
