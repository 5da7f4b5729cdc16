//! Text assertions for rendered Go output

use java2go_ir::TranslationOutput;

/// Assert that the rendered Go text contains `needle`
pub fn assert_contains(output: &TranslationOutput, needle: &str) {
    assert!(
        output.text.contains(needle),
        "Expected output to contain:\n{needle}\n--- got ---\n{}",
        output.text
    );
}

/// Assert that the rendered Go text does not contain `needle`
pub fn assert_not_contains(output: &TranslationOutput, needle: &str) {
    assert!(
        !output.text.contains(needle),
        "Expected output not to contain:\n{needle}\n--- got ---\n{}",
        output.text
    );
}

/// Assert that translation recorded no failures
pub fn assert_complete(output: &TranslationOutput) {
    assert!(
        output.diagnostics.is_empty(),
        "Expected no diagnostics, got: {:?}",
        output.diagnostics
    );
    assert!(output.file.failed.is_empty());
}
