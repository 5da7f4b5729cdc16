//! Settings file loading and its effect on output

mod common;

use std::fs;

use common::*;
use java2go_ir::{translate, translate_file, MigrationConfig, Mode};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LEDGER: &str = "class Ledger {\n    BigDecimal total;\n}";

#[test]
fn test_yaml_settings_apply_to_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("java2go.yaml");
    fs::write(
        &path,
        "package_name: accounts\n\
         license_header: |\n\
         \x20 // Copyright Example\n\
         type_mappings:\n\
         \x20 BigDecimal: float64\n",
    )
    .unwrap();

    let config = MigrationConfig::load(&path);
    assert_eq!(config.package_name, "accounts");

    let output = translate(LEDGER, "Ledger.java", &config, Mode::Strict).unwrap();
    assert!(output.text.starts_with("// Copyright Example\n\npackage accounts\n"));
    assert_contains(&output, "type Ledger struct {\n\ttotal float64\n}");
}

#[test]
fn test_missing_or_malformed_settings_fall_back() {
    let dir = TempDir::new().unwrap();
    let missing = MigrationConfig::load(dir.path().join("absent.yaml"));
    assert_eq!(missing.package_name, MigrationConfig::default().package_name);

    let path = dir.path().join("bad.yaml");
    fs::write(&path, "package_name: [unterminated").unwrap();
    let malformed = MigrationConfig::load(&path);
    assert_eq!(malformed.package_name, "main");
    assert!(malformed.type_mappings.is_empty());
}

#[test]
fn test_translate_file_reads_source() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Ledger.java");
    fs::write(&source, "class Ledger { int count; }").unwrap();

    let output = translate_file(&source, &MigrationConfig::default(), Mode::Strict).unwrap();
    assert_complete(&output);
    assert_contains(&output, "type Ledger struct {\n\tcount int32\n}");
}
