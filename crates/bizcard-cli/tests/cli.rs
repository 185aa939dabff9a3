use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const JANE_DOE: &str = "Jane Doe\nCTO\nACME CORP\n+91-9876543210\njane@acme.com\nwww.acme.com\n123 Main Street Chennai\n600028\n";

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn db(&self) -> PathBuf {
        self.path("cards.db")
    }

    /// `bizcard` with config and data directories pointing into the sandbox.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bizcard").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.path("config"))
            .env("XDG_DATA_HOME", self.path("data"))
            .arg("--db")
            .arg(self.db());
        cmd
    }

    fn save_card(&self, text: &str) {
        self.cmd()
            .args(["classify", "-", "--save"])
            .write_stdin(text)
            .assert()
            .success();
    }

    fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(name);
        image::RgbImage::from_pixel(width, height, image::Rgb([200, 10, 30]))
            .save(&path)
            .unwrap();
        path
    }
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

fn card(name: &str, designation: &str) -> String {
    format!("{name}\n{designation}\nACME CORP\n+91-111\n")
}

#[test]
fn test_classify_prints_fields() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("classify")
        .write_stdin(JANE_DOE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("COMPANY NAME"))
        .stdout(predicate::str::contains("ACME CORP"))
        .stdout(predicate::str::contains("123 Main Street Chennai"));
}

#[test]
fn test_classify_json_has_every_field() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .cmd()
        .args(["classify", "-", "--format", "json"])
        .write_stdin("Jane Doe\nCTO\n+91-111\n+91-222\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    assert_eq!(json["NAME"], "Jane Doe");
    assert_eq!(json["DESIGNATION"], "CTO");
    assert_eq!(json["CONTACT"], "+91-111, +91-222");
    assert_eq!(json["EMAIL"], "NA");
    assert_eq!(json.as_object().unwrap().len(), 8);
}

#[test]
fn test_classify_reads_file() {
    let sandbox = Sandbox::new();
    let input = sandbox.path("card.txt");
    std::fs::write(&input, JANE_DOE).unwrap();

    sandbox
        .cmd()
        .args(["classify", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "NAME,DESIGNATION,COMPANY NAME,CONTACT,EMAIL,WEBSITE,ADDRESS,PINCODE",
        ))
        .stdout(predicate::str::contains("600028"));
}

#[test]
fn test_classify_without_enough_text_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("classify")
        .write_stdin("Jane Doe\n\n   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable text found"));

    assert!(!sandbox.db().exists());
}

#[test]
fn test_saved_cards_are_listed() {
    let sandbox = Sandbox::new();
    sandbox.save_card(JANE_DOE);
    sandbox.save_card(&card("John Roe", "CEO"));

    let output = sandbox
        .cmd()
        .args(["list", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    let cards = json.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["NAME"], "Jane Doe");
    assert_eq!(cards[0]["WEBSITE"], "www.acme.com");
    assert_eq!(cards[1]["NAME"], "John Roe");
}

#[test]
fn test_names_and_designations() {
    let sandbox = Sandbox::new();
    sandbox.save_card(&card("John Roe", "CEO"));
    sandbox.save_card(&card("Jane Doe", "CTO"));
    sandbox.save_card(&card("Jane Doe", "Advisor"));

    sandbox
        .cmd()
        .arg("names")
        .assert()
        .success()
        .stdout("Jane Doe\nJohn Roe\n");

    sandbox
        .cmd()
        .args(["designations", "Jane Doe"])
        .assert()
        .success()
        .stdout("CTO\nAdvisor\n");
}

#[test]
fn test_delete_by_name_and_designation() {
    let sandbox = Sandbox::new();
    sandbox.save_card(&card("Jane Doe", "CTO"));
    sandbox.save_card(&card("Jane Doe", "Advisor"));

    sandbox
        .cmd()
        .args(["delete", "Jane Doe", "CTO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 card(s)"));

    sandbox
        .cmd()
        .args(["designations", "Jane Doe"])
        .assert()
        .success()
        .stdout("Advisor\n");

    sandbox
        .cmd()
        .args(["delete", "Jane Doe", "--all"])
        .assert()
        .success();

    sandbox.cmd().arg("names").assert().success().stdout("");
}

#[test]
fn test_delete_requires_designation_or_all() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["delete", "Jane Doe"])
        .assert()
        .failure();
}

#[test]
fn test_modify_replaces_rows() {
    let sandbox = Sandbox::new();
    sandbox.save_card(JANE_DOE);

    sandbox
        .cmd()
        .args([
            "modify",
            "Jane Doe",
            "--set",
            "name=Jane Smith",
            "--set",
            "email=jane.smith@acme.com",
        ])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["show", "Jane Doe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No card named"));

    let output = sandbox
        .cmd()
        .args(["show", "Jane Smith", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    assert_eq!(json[0]["EMAIL"], "jane.smith@acme.com");
    assert_eq!(json[0]["COMPANY NAME"], "ACME CORP");
}

#[test]
fn test_modify_rejects_unknown_field() {
    let sandbox = Sandbox::new();
    sandbox.save_card(JANE_DOE);

    sandbox
        .cmd()
        .args(["modify", "Jane Doe", "--set", "fax=123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_saved_image_can_be_exported() {
    let sandbox = Sandbox::new();
    let image = sandbox.write_png("card.png", 6, 3);

    sandbox
        .cmd()
        .args(["classify", "-", "--save", "--image"])
        .arg(&image)
        .write_stdin(JANE_DOE)
        .assert()
        .success();

    let exported = sandbox.path("exported.png");
    sandbox
        .cmd()
        .args(["show", "Jane Doe", "--image-out"])
        .arg(&exported)
        .assert()
        .success();

    let decoded = image::open(&exported).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (6, 3));
    assert_eq!(decoded.get_pixel(0, 0), &image::Rgb([200, 10, 30]));
}

#[test]
fn test_config_set_and_get() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("bizcard.json");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.region", "Tamil Nadu"])
        .assert()
        .success();

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.region"])
        .assert()
        .success()
        .stdout("\"Tamil Nadu\"\n");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.colour", "red"])
        .assert()
        .failure();
}

#[test]
fn test_region_from_config_is_used() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("bizcard.json");
    std::fs::write(&config, r#"{"extraction": {"region": "Tamil Nadu"}}"#).unwrap();

    let output = sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["classify", "-", "--format", "json"])
        .write_stdin("Jane Doe\nCTO\nChennai, Tamil Nadu, 600028\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output.stdout);
    assert_eq!(json["PINCODE"], "Chennai, 600028");
    assert_eq!(json["ADDRESS"], "NA");
}

#[test]
fn test_missing_explicit_config_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("--config")
        .arg(sandbox.path("missing.json"))
        .arg("names")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_scan_rejects_missing_and_unsupported_files() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["scan"])
        .arg(sandbox.path("nope.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let text = sandbox.path("card.txt");
    std::fs::write(&text, JANE_DOE).unwrap();
    sandbox
        .cmd()
        .arg("scan")
        .arg(&text)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_scan_without_models_explains_setup() {
    let sandbox = Sandbox::new();
    let image = sandbox.write_png("card.png", 8, 8);
    let models: &Path = &sandbox.path("no-models");

    sandbox
        .cmd()
        .arg("scan")
        .arg(&image)
        .arg("--model-dir")
        .arg(models)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load OCR models"));
}
