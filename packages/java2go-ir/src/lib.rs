/*
 * java2go IR - Java to Go source translator
 *
 * Feature-First Architecture:
 * - shared/      : Common models (Span) and naming utilities
 * - config/      : YAML settings (package, license header, type overrides)
 * - features/    : Vertical slices (parsing → signatures → declarations → lowering → go_ir)
 * - pipeline/    : Per-file orchestration
 */

#![allow(clippy::too_many_arguments)] // Converters thread tree, context and frame
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Error types
pub mod errors;

/// Shared models and utilities
pub mod shared;

/// Translation settings
pub mod config;

/// Feature modules (vertical slices)
pub mod features;

/// Per-file translation pipeline
pub mod pipeline;

pub use config::{MigrationConfig, Mode};
pub use errors::{MigrationError, Result};
pub use features::migration::Diagnostic;
pub use pipeline::{translate, translate_file, TranslationOutput};
