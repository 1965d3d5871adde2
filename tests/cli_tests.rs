use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn quote_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("quote"))
}

fn init_config(config_path: &Path) {
    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    quote_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quotation builder with PDF export"));
}

#[test]
fn test_version() {
    quote_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quote"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized quotation config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quotation Status"))
        .stdout(predicate::str::contains("YOUR COMPANY PVT. LTD."))
        .stdout(predicate::str::contains("GST 18%"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn test_broken_config_reports_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);
    fs::write(config_path.join("config.toml"), "[letterhead\nname = ").unwrap();

    quote_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_invalid_tax_rate_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);
    let template = fs::read_to_string(config_path.join("config.toml")).unwrap();

    for rate in ["nan", "inf", "-0.18"] {
        let config = template.replace("tax_rate = 0.18", &format!("tax_rate = {rate}"));
        fs::write(config_path.join("config.toml"), config).unwrap();

        quote_cmd()
            .args(["-C", config_path.to_str().unwrap(), "status"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid tax_rate"));
    }
}

#[test]
fn test_generate_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "-i",
            "Sorter A:2:1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quote init"));
}

#[test]
fn test_generate_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "--client-address",
            "12 Mill Road",
            "--client-gst",
            "06ABCDE1234F1Z5",
            "--subject",
            "Colour sorter",
            "--date",
            "2024-06-27",
            "--terms",
            "pre-delivery",
            "-i",
            "Sorter A:2:1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Acme Corp_quotation.pdf"))
        .stdout(predicate::str::contains("2360.00"));

    let pdf = config_path.join("output").join("Acme Corp_quotation.pdf");
    assert!(pdf.exists());
    let bytes = fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(!config_path
        .join("output")
        .join("Acme Corp_quotation.pdf.part")
        .exists());
}

#[test]
fn test_generate_to_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");
    let output = temp_dir.path().join("custom.pdf");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "-i",
            "Sorter A:2:1000",
            "-i",
            "Conveyor:1:500",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Items:  2"));

    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn test_generate_into_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");
    let out_dir = temp_dir.path().join("pdfs");
    fs::create_dir_all(&out_dir).unwrap();

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "a/b:c",
            "-o",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out_dir.join("a_b_c_quotation.pdf").exists());
}

#[test]
fn test_generate_with_missing_logo() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);
    let config = fs::read_to_string(config_path.join("config.toml")).unwrap();
    let config = config.replace("# logo = \"logo.png\"", "logo = \"logo.png\"");
    fs::write(config_path.join("config.toml"), config).unwrap();

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read logo"));
}

#[test]
fn test_generate_invalid_item_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "-i",
            "Sorter A",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid item format"));
}

#[test]
fn test_generate_invalid_terms() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "--terms",
            "net 30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown terms of payment"));
}

#[test]
fn test_generate_invalid_date() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "--date",
            "27/06/2024",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_generate_non_numeric_quantity_still_renders() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "generate",
            "--client-name",
            "Acme Corp",
            "-i",
            "Sorter A:abc:1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total:  0.00"));

    assert!(config_path
        .join("output")
        .join("Acme Corp_quotation.pdf")
        .exists());
}

#[test]
fn test_totals_without_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "totals",
            "-i",
            "Sorter A:2:1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorter A"))
        .stdout(predicate::str::contains("2000.00"))
        .stdout(predicate::str::contains("GST (18%)"))
        .stdout(predicate::str::contains("360.00"))
        .stdout(predicate::str::contains("2360.00"));
}

#[test]
fn test_totals_name_with_colon() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "totals",
            "-i",
            "Model: X1:1:100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model: X1"))
        .stdout(predicate::str::contains("118.00"));
}

#[test]
fn test_totals_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    let output = quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "totals",
            "--json",
            "-i",
            "Sorter A:2:1000",
            "-i",
            "Conveyor:1:500",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
    assert_eq!(value["items"][1]["name"], "Conveyor");
    assert_eq!(value["totals"]["total_amount"], 2500.0);
    let grand_total = value["totals"]["grand_total"].as_f64().unwrap();
    assert!((grand_total - 2950.0).abs() < 1e-6);
}

#[test]
fn test_totals_uses_configured_rate() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("quote-config");

    init_config(&config_path);
    let config = fs::read_to_string(config_path.join("config.toml")).unwrap();
    let config = config
        .replace("tax_rate = 0.18", "tax_rate = 0.05")
        .replace("tax_label = \"GST\"", "tax_label = \"VAT\"");
    fs::write(config_path.join("config.toml"), config).unwrap();

    quote_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "totals",
            "-i",
            "Service:1:200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("VAT (5%)"))
        .stdout(predicate::str::contains("210.00"));
}
