use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally() -> Command {
    Command::cargo_bin("tally").expect("binary exists")
}

fn fixture(name: &str) -> String {
    format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    )
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    tally()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("copy-paste detection"));
}

#[test]
fn test_requires_files() {
    tally().assert().failure();
}

#[test]
fn test_cli_report_runs_successfully() {
    tally()
        .args([fixture("orders.php"), fixture("util.php")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lines of Code (LOC)"))
        .stdout(predicate::str::contains("Classes"));
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn test_json_metrics_for_fixture() {
    let output = tally()
        .args([fixture("util.php"), "-t".into(), "json".into()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = parsed["metrics"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["functions"], 4);
    assert_eq!(files[0]["classes"], 0);
    // Test counting disabled by default.
    assert_eq!(files[0]["test_functions"], 0);
}

#[test]
fn test_count_tests_flag() {
    let output = tally()
        .args([
            fixture("util.php"),
            "--count-tests".into(),
            "-t".into(),
            "json".into(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // testVatRateGermany by name, checksShippingIsLinear by @test annotation.
    assert_eq!(parsed["metrics"]["files"][0]["test_functions"], 2);
}

#[test]
fn test_empty_file_yields_zero_metrics() {
    let output = tally()
        .args([fixture("empty.php"), "-t".into(), "json".into()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let file = &parsed["metrics"]["files"][0];
    assert_eq!(file["total_lines"], 0);
    assert_eq!(file["logical_lines"], 0);
    assert_eq!(file["functions"], 0);
}

#[test]
fn test_totals_are_additive() {
    let both = tally()
        .args([
            fixture("orders.php"),
            fixture("util.php"),
            "-t".into(),
            "json".into(),
        ])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&both.stdout).unwrap();
    let files = parsed["metrics"]["files"].as_array().unwrap();
    let sum: u64 = files
        .iter()
        .map(|f| f["logical_lines"].as_u64().unwrap())
        .sum();
    assert_eq!(parsed["metrics"]["totals"]["logical_lines"], sum);
}

// ---------------------------------------------------------------------------
// Duplicates
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_block_detected_across_fixtures() {
    let output = tally()
        .args([
            fixture("orders.php"),
            fixture("invoice.php"),
            "-t".into(),
            "json".into(),
            "--min-lines".into(),
            "5".into(),
            "--min-tokens".into(),
            "20".into(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let duplicates = parsed["duplicates"].as_array().unwrap();
    assert_eq!(duplicates.len(), 1);
    let occurrences = duplicates[0]["occurrences"].as_array().unwrap();
    assert_eq!(occurrences.len(), 2);
    assert!(occurrences[0]["file"]
        .as_str()
        .unwrap()
        .ends_with("orders.php"));
    assert!(occurrences[1]["file"]
        .as_str()
        .unwrap()
        .ends_with("invoice.php"));
    assert!(duplicates[0]["lines"].as_u64().unwrap() >= 12);
}

#[test]
fn test_no_duplicates_flag_suppresses_detection() {
    let output = tally()
        .args([
            fixture("orders.php"),
            fixture("invoice.php"),
            "--no-duplicates".into(),
            "-t".into(),
            "json".into(),
        ])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["duplicates"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Formatters and sinks
// ---------------------------------------------------------------------------

#[test]
fn test_xml_report_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("report.xml");
    tally()
        .args([
            fixture("orders.php"),
            "-t".into(),
            "xml".into(),
            "-o".into(),
            out.display().to_string(),
        ])
        .assert()
        .success();
    let xml = std::fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<metrics files=\"1\">"));
    assert!(xml.contains("orders.php"));
}

#[test]
fn test_csv_report() {
    tally()
        .args([fixture("orders.php"), "-t".into(), "csv".into()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "path,loc,cloc,ncloc,blank,lloc,classes,functions,test_functions",
        ))
        .stdout(predicate::str::contains("TOTAL,"));
}

#[test]
fn test_pmd_report_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("cpd.xml");
    tally()
        .args([
            fixture("orders.php"),
            fixture("invoice.php"),
            "-t".into(),
            "pmd".into(),
            "-o".into(),
            out.display().to_string(),
            "--min-tokens".into(),
            "20".into(),
        ])
        .assert()
        .success();
    let xml = std::fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<pmd-cpd>"));
    assert!(xml.contains("<duplication"));
}

#[test]
fn test_pmd_without_output_is_config_error() {
    // Fails fast: the missing input file is never touched.
    tally()
        .args(["/nonexistent/never-read.php", "-t", "pmd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_report_type_is_config_error() {
    tally()
        .args([fixture("orders.php"), "-t".into(), "html".into()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized report type"));
}

// ---------------------------------------------------------------------------
// Partial failure tolerance
// ---------------------------------------------------------------------------

#[test]
fn test_unreadable_file_is_warning_not_fatal() {
    let output = tally()
        .args([
            fixture("orders.php"),
            "/nonexistent/gone.php".into(),
            fixture("util.php"),
            "-t".into(),
            "json".into(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["metrics"]["files"].as_array().unwrap().len(), 2);
    let warnings = parsed["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0]["path"].as_str().unwrap().ends_with("gone.php"));
}

#[test]
fn test_suffix_filter() {
    let dir = TempDir::new().unwrap();
    let keep = dir.path().join("keep.php");
    let skip = dir.path().join("skip.txt");
    std::fs::write(&keep, "$a = 1;\n").unwrap();
    std::fs::write(&skip, "$b = 2;\n").unwrap();

    let output = tally()
        .args([
            keep.display().to_string(),
            skip.display().to_string(),
            "--suffixes".into(),
            "php".into(),
            "-t".into(),
            "json".into(),
        ])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = parsed["metrics"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["path"].as_str().unwrap().ends_with("keep.php"));
}
