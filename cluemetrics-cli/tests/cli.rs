use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn clm() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("clm")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn eval_reports_word_exact_match() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let preds = dir.child("preds.txt");
    preds.write_str("cat\ndog\nbird\n")?;
    let targets = dir.child("targets.txt");
    targets.write_str("cat\ndog\nfish\n")?;

    clm()?
        .arg("--quiet")
        .arg("eval")
        .arg("--predictions")
        .arg(preds.path())
        .arg("--targets")
        .arg(targets.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Word exact match: 0.6667 (2/3)"));
    Ok(())
}

#[test]
fn eval_is_case_sensitive_across_batches() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let preds = dir.child("preds.txt");
    preds.write_str("a\nb\nCat\n")?;
    let targets = dir.child("targets.txt");
    targets.write_str("a\nx\ncat\n")?;

    clm()?
        .arg("--quiet")
        .arg("eval")
        .arg("-p")
        .arg(preds.path())
        .arg("-t")
        .arg(targets.path())
        .arg("--batch-size")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1/3)"));
    Ok(())
}

#[test]
fn eval_fails_on_mismatched_line_counts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let preds = dir.child("preds.txt");
    preds.write_str("a\nb\nc\n")?;
    let targets = dir.child("targets.txt");
    targets.write_str("a\nb\n")?;

    clm()?
        .arg("--quiet")
        .arg("eval")
        .arg("-p")
        .arg(preds.path())
        .arg("-t")
        .arg(targets.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Length of predictions and targets do not match: (3), (2)",
        ));
    Ok(())
}

#[test]
fn eval_of_empty_files_is_not_computable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let preds = dir.child("preds.txt");
    preds.touch()?;
    let targets = dir.child("targets.txt");
    targets.touch()?;

    clm()?
        .arg("--quiet")
        .arg("eval")
        .arg("-p")
        .arg(preds.path())
        .arg("-t")
        .arg(targets.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not computable"));
    Ok(())
}

#[test]
fn reduce_combines_worker_states() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let preds = dir.child("preds.txt");
    preds.write_str("a\nb\n")?;
    let targets = dir.child("targets.txt");
    targets.write_str("a\nx\n")?;
    let state_a = dir.child("a.json");

    clm()?
        .arg("--quiet")
        .arg("eval")
        .arg("-p")
        .arg(preds.path())
        .arg("-t")
        .arg(targets.path())
        .arg("--state-out")
        .arg(state_a.path())
        .assert()
        .success();
    state_a.assert(predicate::str::contains("\"correct\": 1"));

    let state_b = dir.child("b.json");
    state_b.write_str(r#"{"correct": 1, "total": 1}"#)?;

    clm()?
        .arg("reduce")
        .arg(state_a.path())
        .arg(state_b.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Word exact match: 0.6667 (2/3)"));
    Ok(())
}

#[test]
fn reduce_rejects_invalid_state() -> Result<(), Box<dyn std::error::Error>> {
    let state = assert_fs::NamedTempFile::new("state.json")?;
    state.write_str(r#"{"correct": 5, "total": 1}"#)?;

    clm()?
        .arg("reduce")
        .arg(state.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse state file"));
    Ok(())
}

#[test]
fn reduce_rejects_overflowing_totals() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let full = dir.child("a.json");
    full.write_str(&format!(r#"{{"correct": 0, "total": {}}}"#, u64::MAX))?;
    let one = dir.child("b.json");
    one.write_str(r#"{"correct": 1, "total": 1}"#)?;

    clm()?
        .arg("reduce")
        .arg(full.path())
        .arg(one.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to combine metric states"))
        .stderr(predicate::str::contains("counter overflow"));
    Ok(())
}

#[test]
fn reduce_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let state = assert_fs::NamedTempFile::new("state.json")?;
    state.write_str(r#"{"correct": 3, "total": 4}"#)?;

    let output = clm()?.arg("reduce").arg("--json").arg(state.path()).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["value"], 0.75);
    assert_eq!(value["total"], 4);
    Ok(())
}

#[test]
fn invalid_config_fails_check() -> Result<(), Box<dyn std::error::Error>> {
    let file = assert_fs::NamedTempFile::new("config.json")?;
    file.write_str(r#"{"step": 0}"#)?;

    clm()?
        .arg("config")
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
    Ok(())
}

#[test]
fn yaml_config_passes_check() -> Result<(), Box<dyn std::error::Error>> {
    let file = assert_fs::NamedTempFile::new("config.yaml")?;
    file.write_str("end: 5000\noutputDir: out\n")?;

    clm()?
        .arg("config")
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("ok\n"));
    Ok(())
}

#[test]
fn new_config_is_valid() -> Result<(), Box<dyn std::error::Error>> {
    let output = clm()?.arg("config").arg("new").output()?;
    assert!(output.status.success());

    let file = assert_fs::NamedTempFile::new("config.json")?;
    file.write_binary(&output.stdout)?;
    clm()?
        .arg("config")
        .arg("check")
        .arg(file.path())
        .assert()
        .success();
    Ok(())
}

#[test]
fn schema_describes_fetch_config() -> Result<(), Box<dyn std::error::Error>> {
    clm()?
        .arg("gen-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("urlTemplate"));
    Ok(())
}

#[test]
fn fetch_aborts_when_server_is_unreachable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    clm()?
        .arg("--quiet")
        .arg("fetch")
        .arg("--url-template")
        .arg("http://127.0.0.1:1/clues.csv?_next={offset}&_size=max")
        .arg("--end")
        .arg("2000")
        .arg("--timeout-secs")
        .arg("2")
        .arg("--output-dir")
        .arg(dir.child("raw").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch dataset"))
        .stderr(predicate::str::contains("offset 0"));
    dir.child("raw/clues_0.csv")
        .assert(predicate::path::missing());
    Ok(())
}

#[test]
fn fetch_rejects_template_without_offset() -> Result<(), Box<dyn std::error::Error>> {
    clm()?
        .arg("--quiet")
        .arg("fetch")
        .arg("--url-template")
        .arg("http://127.0.0.1:1/clues.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not contain {offset}"));
    Ok(())
}
