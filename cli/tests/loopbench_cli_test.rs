use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::process::Command;

#[test]
fn prints_every_strategy_for_small_n() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.arg("5");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Length of the sequence: 5"))
        .stdout(predicate::str::contains("Accumulator with a for: "))
        .stdout(predicate::str::contains("Accumulator with a while: "))
        .stdout(predicate::str::contains("Accumulator with a for of: "))
        .stdout(predicate::str::contains("Accumulator with a for in: "))
        .stdout(predicate::str::contains("Accumulator with a for each: "))
        .stdout(predicate::str::contains("Sums consistent: yes"));

    Ok(())
}

#[test]
fn rejects_zero_length() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.arg("0");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid input"));

    Ok(())
}

#[test]
fn rejects_negative_length() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.args(["--", "-12"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must be a positive integer"));

    Ok(())
}

#[test]
fn rejects_length_too_large_to_allocate() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.arg(i64::MAX.to_string());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid input"))
        .stderr(predicate::str::contains("panicked").not());

    Ok(())
}

#[test]
fn rejects_zero_rounds() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.args(["10", "--rounds", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("rounds must be at least 1"));

    Ok(())
}

#[test]
fn json_report_is_reproducible_apart_from_timings() -> Result<(), Box<dyn Error>> {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let output = Command::cargo_bin("loopbench")?
            .args([
                "1000",
                "--rounds",
                "2",
                "--format",
                "json",
                "--timestamp",
                "2024-05-01T12:00:00Z",
            ])
            .output()?;
        assert!(
            output.status.success(),
            "run failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        runs.push(value);
    }

    for value in &runs {
        assert_eq!(value["generated_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["expected_sum"], 500_500);
        assert_eq!(value["consistent"], true);
    }
    let sums = |v: &serde_json::Value| -> Vec<serde_json::Value> {
        v["metrics"]
            .as_array()
            .map(|m| m.iter().map(|entry| entry["sum"].clone()).collect())
            .unwrap_or_default()
    };
    assert_eq!(sums(&runs[0]), sums(&runs[1]));
    assert_eq!(sums(&runs[0]).len(), 5);

    Ok(())
}

#[test]
fn csv_report_with_strategy_subset() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.args(["4", "--format", "csv", "--strategy", "for_each", "--strategy", "while"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("strategy,label,sum,samples,"))
        .stdout(predicate::str::contains("callback_for_each,Accumulator with a for each,10,1,"))
        .stdout(predicate::str::contains("pre_test_while,Accumulator with a while,10,1,"))
        .stdout(predicate::str::contains("indexed_counter").not());

    Ok(())
}

#[test]
fn trace_output_goes_to_stderr() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("loopbench")?;
    cmd.env("LOOPBENCH_TRACE", "loopbench::runner=debug")
        .args(["3", "--format", "json"]);
    let output = cmd.output()?;
    assert!(output.status.success());
    let _: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("timed sample"), "stderr was: {}", stderr);

    Ok(())
}
