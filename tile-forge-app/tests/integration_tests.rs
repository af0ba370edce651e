use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::fs;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile::{tempdir, TempDir}; // Create temporary directories for testing

const UNIFORM_RULES: &str = r#"
    (
        compatibility: [("A", "A")],
        tiles: [
            (name: "plain", north: "A", east: "A", south: "A", west: "A"),
        ],
    )
"#;

// Valid table, but the only tile can never sit next to itself.
const LONELY_RULES: &str = r#"
    (
        compatibility: [("A", "B"), ("B", "A")],
        tiles: [
            (name: "lonely", north: "A", east: "A", south: "A", west: "A"),
        ],
    )
"#;

// Asymmetric: Pipe -> Socket without Socket -> Pipe.
const INVALID_RULES: &str = r#"
    (
        compatibility: [("Pipe", "Socket"), ("Socket", "Socket")],
        tiles: [
            (name: "pipe", north: "Pipe", east: "Pipe", south: "Pipe", west: "Pipe"),
        ],
    )
"#;

fn write_rules(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).expect("Failed to write rule file");
    file_path
}

fn tile_forge() -> Command {
    let mut cmd = Command::cargo_bin("tile-forge").expect("binary is built");
    cmd.env("RUST_LOG", "info"); // Set log level for test run
    cmd.env_remove("TILE_FORGE_WIDTH");
    cmd.env_remove("TILE_FORGE_HEIGHT");
    cmd
}

#[test]
fn test_basic_run() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let rule_file = write_rules(&tmp_dir, "rules.ron", UNIFORM_RULES);
    let output_file = tmp_dir.path().join("output.txt");

    tile_forge()
        .arg("--rule-file")
        .arg(rule_file)
        .args(["--width", "3", "--height", "2", "--seed", "7"])
        .arg("--output-path")
        .arg(&output_file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Generation completed successfully"));

    assert_eq!(fs::read_to_string(&output_file)?, "0 0 0\n0 0 0\n");
    Ok(())
}

#[test]
fn test_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let rule_file = write_rules(&tmp_dir, "rules.ron", UNIFORM_RULES);
    let output_file = tmp_dir.path().join("output.json");

    tile_forge()
        .arg("-r")
        .arg(rule_file)
        .args(["--width", "2", "--height", "2", "--seed", "3", "--output-format", "json"])
        .arg("-o")
        .arg(&output_file)
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output_file)?)?;
    assert_eq!(report["status"], "Success");
    assert_eq!(report["seed"], 3);
    assert_eq!(report["cells"].as_array().map(Vec::len), Some(4));
    Ok(())
}

#[test]
fn test_invalid_rules_fail_before_generation() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let rule_file = write_rules(&tmp_dir, "bad.ron", INVALID_RULES);
    let output_file = tmp_dir.path().join("never.txt");

    tile_forge()
        .arg("--rule-file")
        .arg(rule_file)
        .arg("--output-path")
        .arg(&output_file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Rule violation"))
        .stderr(predicate::str::contains("Pipe"));

    assert!(!output_file.exists(), "No output is written for invalid rules");
    Ok(())
}

#[test]
fn test_incomplete_run_exits_with_code_two() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let rule_file = write_rules(&tmp_dir, "lonely.ron", LONELY_RULES);
    let output_file = tmp_dir.path().join("partial.txt");

    tile_forge()
        .arg("--rule-file")
        .arg(rule_file)
        .args(["--width", "3", "--height", "1", "--attempts", "2"])
        .arg("--output-path")
        .arg(&output_file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("retrying"));

    assert_eq!(fs::read_to_string(&output_file)?, "0 X 0\n");
    Ok(())
}

#[test]
fn test_environment_and_config_file_layers() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let rule_file = write_rules(&tmp_dir, "rules.json", "");
    fs::write(
        &rule_file,
        r#"{"compatibility": [["A", "A"]], "tiles": [{"name": "plain", "north": "A", "east": "A", "south": "A", "west": "A"}]}"#,
    )?;
    let output_file = tmp_dir.path().join("layered.txt");
    let config_file = tmp_dir.path().join("forge.toml");
    fs::write(
        &config_file,
        format!(
            "rule_file = {:?}\nwidth = 2\nheight = 2\noutput_path = {:?}\n",
            rule_file.to_string_lossy(),
            output_file.to_string_lossy()
        ),
    )?;

    tile_forge()
        .arg("--config")
        .arg(&config_file)
        .env("TILE_FORGE_WIDTH", "4")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output_file)?, "0 0 0 0\n0 0 0 0\n");
    Ok(())
}

#[test]
fn test_missing_rule_file() {
    tile_forge()
        .args(["--rule-file", "does/not/exist.ron"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rule File Error"));
}

#[test]
fn test_rule_file_is_required() {
    tile_forge()
        .args(["--width", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rule file given"));
}

#[test]
fn test_bundled_rule_files_validate() {
    let rules_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../rules");
    for name in ["coastline.ron", "roads.json"] {
        let (catalog, table) = wfc_rules::loader::load_from_file(&rules_dir.join(name))
            .unwrap_or_else(|e| panic!("{name} should load: {e}"));
        let report = table.validate(&catalog);
        assert!(report.is_valid(), "{name}: {report}");
    }
}
