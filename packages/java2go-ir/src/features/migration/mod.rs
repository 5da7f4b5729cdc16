//! Migration Feature
//!
//! Shared translation state and the failure boundary around each member.
//!
//! ## Structure
//! - `context` - MigrationContext (symbol tables, caches, diagnostics, IR root)
//! - `registry` - declared-type facts gathered by the analysis pass
//! - `recovery` - strict/tolerant member boundary

pub mod context;
pub mod recovery;
pub mod registry;

pub use context::{Diagnostic, MigrationContext};
pub use registry::{FieldInfo, MethodInfo, TypeInfo, TypeKind};
