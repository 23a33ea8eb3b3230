//! Integration tests for the packload binary.
//!
//! These tests verify end-to-end behavior including:
//! - Ad hoc calculations and their rendered output
//! - Input validation messages
//! - Profile management and calculations from a selected profile
//! - JSON payload output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory with an empty config file
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

/// CLI pointed at an isolated config and data directory
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("packload"));
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn calc_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = cli(dir)
        .arg("calc")
        .args(args)
        .arg("--json")
        .output()
        .expect("Failed to run packload");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn add_profile(dir: &Path, args: &[&str]) {
    cli(dir)
        .args(["profile", "add"])
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved profile"));
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("packload"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Safe pack load estimates for hiking dogs",
        ));
}

#[test]
fn test_default_scenario_text_output() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--units", "us", "--weight", "45", "--age-years", "4", "--distance", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hike: 6 miles, easy terrain\n"))
        .stdout(predicate::str::contains("Target Pack Weight\n  5.40 lb"))
        .stdout(predicate::str::contains("4.50 lb – 6.30 lb"))
        .stdout(predicate::str::contains("10.00% – 14.00%"))
        .stdout(predicate::str::contains("9.00 lb"))
        .stdout(predicate::str::contains("0.65 gallons"))
        .stdout(predicate::str::contains("Warnings").not())
        .stdout(predicate::str::contains("not veterinary advice"));
}

#[test]
fn test_explain_lists_adjustments() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "calc", "--units", "us", "--weight", "45", "--age-years", "4",
            "--distance", "13", "--terrain", "rugged", "--explain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.00% – 8.00%"))
        .stdout(predicate::str::contains("How this was calculated"))
        .stdout(predicate::str::contains("• Distance > 12 miles (additional -2% min/max)."))
        .stdout(predicate::str::contains("• Terrain rugged (-2% min/max)."));
}

#[test]
fn test_json_payload() {
    let temp_dir = setup_test_dir();

    let value = calc_json(
        temp_dir.path(),
        &[
            "--units", "metric", "--weight", "30", "--age-years", "6", "--age-months", "6",
            "--size", "giant", "--experience", "new", "--distance", "8",
            "--temperature", "-5",
        ],
    );

    assert_eq!(value["input"]["units"], "metric");
    assert_eq!(value["result"]["min_pct"], 5.0);
    assert_eq!(value["result"]["max_pct"], 9.0);
    assert_eq!(value["result"]["hard_cap_weight"], 6.0);
    assert_eq!(value["result"]["warnings"][0], "Senior dog adjustment applied (-3% min/max).");
    assert_eq!(value["result"]["water_equivalent"]["secondary"], "2100 mL");
}

#[test]
fn test_puppy_calculation() {
    let temp_dir = setup_test_dir();

    let value = calc_json(
        temp_dir.path(),
        &[
            "--units", "us", "--weight", "12", "--age-years", "0", "--age-months", "8",
            "--size", "toy", "--fitness", "high", "--distance", "3",
        ],
    );

    assert_eq!(value["result"]["min_pct"], 0.0);
    assert_eq!(value["result"]["max_pct"], 5.0);
    assert_eq!(
        value["result"]["warnings"][0],
        "Puppy detected (< 1.5 years): load is capped to 0–5%."
    );
}

#[test]
fn test_invalid_months_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "calc", "--weight", "45", "--age-years", "4", "--age-months", "12", "--distance", "6",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid input: Please check values for weight, distance, and age fields.",
        ));
}

#[test]
fn test_non_finite_input_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--weight", "NaN", "--age-years", "4", "--distance", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter valid numbers before calculating.",
        ));

    cli(temp_dir.path())
        .args([
            "calc", "--weight", "45", "--age-years", "4", "--distance", "6", "--elevation", "inf",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Elevation and temperature must be valid numbers when provided.",
        ));
}

#[test]
fn test_missing_dog_details_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--distance", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide --weight and --age-years"));
}

#[test]
fn test_unknown_terrain_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "calc", "--weight", "45", "--age-years", "4", "--distance", "6", "--terrain", "swamp",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown terrain: swamp"));
}

#[test]
fn test_config_default_units() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[defaults]\nunits = \"metric\"\n",
    )
    .unwrap();

    let value = calc_json(
        temp_dir.path(),
        &["--weight", "20", "--age-years", "4", "--distance", "10"],
    );

    assert_eq!(value["input"]["units"], "metric");
    assert_eq!(value["result"]["water_equivalent"]["primary"], "2.4 liters");
}

#[test]
fn test_profile_lifecycle() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    cli(dir)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved profiles."));

    add_profile(
        dir,
        &[
            "--name", "Juniper", "--units", "metric", "--weight", "20.41", "--age-years", "4",
            "--select",
        ],
    );
    assert!(dir.join("data/profiles.json").exists());

    cli(dir)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* "))
        .stdout(predicate::str::contains("Juniper"))
        .stdout(predicate::str::contains("20.41 kg"));

    // Selected profile supplies the dog; hike is in the profile's units
    cli(dir)
        .args(["calc", "--distance", "9.656"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using profile: Juniper"))
        .stdout(predicate::str::contains("10.00% – 14.00%"))
        .stdout(predicate::str::contains("kg"));

    cli(dir)
        .args(["profile", "clear"])
        .assert()
        .success();

    cli(dir)
        .args(["calc", "--distance", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide --weight and --age-years"));

    cli(dir)
        .args(["profile", "delete", "juniper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Juniper"));

    cli(dir)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved profiles."));
}

#[test]
fn test_explicit_profile_and_no_profile() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    add_profile(
        dir,
        &[
            "--name", "Scout", "--units", "us", "--weight", "70", "--age-years", "8", "--size",
            "large",
        ],
    );
    add_profile(
        dir,
        &[
            "--name", "Pip", "--units", "us", "--weight", "10", "--age-years", "1", "--size", "toy",
            "--select",
        ],
    );

    // --profile wins over the selection
    let value = calc_json(dir, &["--profile", "Scout", "--distance", "5"]);
    assert_eq!(value["input"]["dog_weight"], 70.0);
    assert_eq!(value["result"]["max_pct"], 11.0);

    // Selected puppy profile
    let value = calc_json(dir, &["--distance", "5"]);
    assert_eq!(value["result"]["max_pct"], 5.0);

    // --no-profile falls back to flags
    let value = calc_json(
        dir,
        &["--no-profile", "--units", "us", "--weight", "45", "--age-years", "4", "--distance", "6"],
    );
    assert_eq!(value["input"]["dog_weight"], 45.0);

    cli(dir)
        .args(["calc", "--profile", "Rex", "--distance", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile matching 'Rex'"));
}

#[test]
fn test_dog_flags_rejected_alongside_profile() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    add_profile(
        dir,
        &["--name", "Pip", "--units", "us", "--weight", "10", "--age-years", "1", "--select"],
    );

    // Selected profile plus dog flags
    cli(dir)
        .args([
            "calc", "--units", "metric", "--weight", "30", "--age-years", "5", "--distance", "6",
            "--json",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Invalid input: Profile 'Pip' already supplies the dog; pass --no-profile",
        ));

    // Explicit profile plus a single dog flag
    cli(dir)
        .args(["calc", "--profile", "Pip", "--fitness", "high", "--distance", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --no-profile to use the dog flags"));

    // --no-profile makes the flags count
    let value = calc_json(
        dir,
        &[
            "--no-profile", "--units", "metric", "--weight", "30", "--age-years", "5",
            "--distance", "6",
        ],
    );
    assert_eq!(value["input"]["units"], "metric");
    assert_eq!(value["input"]["dog_weight"], 30.0);
}

#[test]
fn test_duplicate_names_need_the_id() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    add_profile(dir, &["--name", "Scout", "--weight", "70", "--age-years", "8"]);
    add_profile(dir, &["--name", "scout", "--weight", "20", "--age-years", "2"]);

    cli(dir)
        .args(["profile", "delete", "Scout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Several profiles are named 'Scout'; use the profile id instead",
        ));

    cli(dir)
        .args(["calc", "--profile", "SCOUT", "--distance", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Several profiles are named 'SCOUT'"));

    // Nothing was deleted, and the id still resolves
    let contents = fs::read_to_string(dir.join("data/profiles.json")).unwrap();
    let store: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let profiles = store["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 2);

    let id = profiles[0]["id"].as_str().unwrap();
    cli(dir)
        .args(["profile", "delete", id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("({})", id)));
}

#[test]
fn test_hike_summary_uses_metric_suffixes() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "calc", "--units", "metric", "--weight", "20", "--age-years", "4", "--distance", "10",
            "--terrain", "mixed", "--elevation", "600", "--temperature", "28",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hike: 10 km, mixed terrain, 600 m gain, 28°C"));
}

#[test]
fn test_profile_add_validation() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["profile", "add", "--name", "  ", "--weight", "20", "--age-years", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide a profile name."));

    cli(temp_dir.path())
        .args([
            "profile", "add", "--name", "Scout", "--weight", "20", "--age-years", "3",
            "--age-months", "-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please use positive values and keep months between 0 and 11.",
        ));

    assert!(!temp_dir.path().join("data/profiles.json").exists());
}

#[test]
fn test_resources() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pack fit checklist"))
        .stdout(predicate::str::contains("Signs your dog may be over-tired"));
}
