//! Common test utilities for java2go-ir
//!
//! Shared Java fixtures, translation helpers and text assertions for the
//! scenario tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;

use java2go_ir::{translate, MigrationConfig, Mode, TranslationOutput};

/// Translate in tolerant mode with default settings
pub fn tolerant(source: &str) -> TranslationOutput {
    translate(source, "Test.java", &MigrationConfig::default(), Mode::Tolerant)
        .expect("tolerant translation never fails on parseable input")
}

/// Translate in strict mode with default settings, panicking on failure
pub fn strict(source: &str) -> TranslationOutput {
    match translate(source, "Test.java", &MigrationConfig::default(), Mode::Strict) {
        Ok(output) => output,
        Err(e) => panic!("strict translation failed: {}", e),
    }
}
