//! End-to-end runs of the `composer` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn composer_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_composer"))
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(composer_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute composer CLI")
}

fn assert_success(output: &Output, args: &[&str]) {
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "failed to parse JSON output: {}\nstdout:\n{}",
            err,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_sample(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

const REFERENCE_CSV: &str = "id,name,created_at,is_active,score\n12345,John Doe,2024-01-01,true,85.5\n";

#[test]
fn es_mapping_from_csv() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample(dir.path(), "datatable1.csv", REFERENCE_CSV);

    let args = ["es-mapping", "--file", &csv, "--index", "datatable1"];
    let output = run_cli(&args);
    assert_success(&output, &args);

    let mapping = stdout_json(&output);
    assert_eq!(mapping["index_patterns"][0], "datatable1-*");
    let properties = &mapping["mappings"]["properties"]["data"]["properties"];
    assert_eq!(properties["id"]["type"], "integer");
    assert_eq!(properties["created_at"]["type"], "date");
    assert!(properties["submission_metadata"].is_object());
}

#[test]
fn es_mapping_from_json_to_file() {
    let dir = TempDir::new().unwrap();
    let json = write_sample(
        dir.path(),
        "donor.json",
        r#"{"donor": {"id": 7, "visits": [{"date": "2024-02-01"}]}}"#,
    );
    let out = dir.path().join("mapping.json");
    let out_str = out.to_string_lossy().into_owned();

    let args = ["es-mapping", "--json", &json, "--index", "donors", "-o", &out_str];
    let output = run_cli(&args);
    assert_success(&output, &args);

    let mapping: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let donor = &mapping["mappings"]["properties"]["data"]["properties"]["donor"];
    assert_eq!(donor["type"], "object");
    assert_eq!(donor["properties"]["visits"]["type"], "nested");
}

#[test]
fn postgres_table_from_csv() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample(dir.path(), "datatable1.csv", REFERENCE_CSV);

    let args = ["postgres-table", "--file", &csv];
    let output = run_cli(&args);
    assert_success(&output, &args);

    let sql = String::from_utf8_lossy(&output.stdout);
    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS datatable1 ("), "{}", sql);
    assert!(sql.contains("  created_at DATE,"));
    assert!(sql.contains("  submission_metadata JSONB\n);"));
}

#[test]
fn dictionary_from_two_files() {
    let dir = TempDir::new().unwrap();
    let donors = write_sample(dir.path(), "donors.csv", "donor_id,age\nDO1,42\n");
    let samples = write_sample(dir.path(), "samples.csv", "sample_id,weight\nSA1,1.5\n");

    let args = ["dictionary", "--file", &donors, &samples, "--name", "study"];
    let output = run_cli(&args);
    assert_success(&output, &args);

    let dictionary = stdout_json(&output);
    assert_eq!(dictionary["name"], "study");
    assert_eq!(dictionary["version"], "1.0");
    let schemas = dictionary["schemas"].as_array().unwrap();
    assert_eq!(schemas.len(), 2);
    assert_eq!(schemas[0]["name"], "donors");
    assert_eq!(schemas[1]["fields"][1]["valueType"], "number");
}

#[test]
fn arranger_from_generated_mapping() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample(dir.path(), "datatable1.csv", REFERENCE_CSV);
    let mapping = dir.path().join("mapping.json");
    let mapping_str = mapping.to_string_lossy().into_owned();

    let args = ["es-mapping", "-f", &csv, "-i", "datatable1", "-o", &mapping_str];
    assert_success(&run_cli(&args), &args);

    let configs = dir.path().join("arranger");
    let configs_str = configs.to_string_lossy().into_owned();
    let args = ["arranger", "--mapping", &mapping_str, "--output-dir", &configs_str];
    assert_success(&run_cli(&args), &args);

    for name in ["base.json", "extended.json", "table.json", "facets.json"] {
        assert!(configs.join(name).is_file(), "missing {}", name);
    }
    let base: Value =
        serde_json::from_str(&fs::read_to_string(configs.join("base.json")).unwrap()).unwrap();
    assert_eq!(base["index"], "datatable1_centric");
}

#[test]
fn missing_file_reports_suggestion() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let missing_str = missing.to_string_lossy().into_owned();

    let output = run_cli(&["postgres-table", "--file", &missing_str]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
    assert!(stderr.contains("Suggestion:"), "{}", stderr);
}

#[test]
fn output_may_not_overwrite_input() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample(dir.path(), "datatable1.csv", REFERENCE_CSV);

    let output = run_cli(&["postgres-table", "--file", &csv, "--output", &csv]);
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&csv).unwrap(), REFERENCE_CSV);
}
