//! Type Mapping Feature
//!
//! Java type syntax → Go type expressions.
//!
//! Rules apply in a fixed order: user overrides from configuration, the
//! built-in primitive and boxed table, then structural rules (arrays,
//! wildcards, collections, generics, declared types).

mod builtins;
mod mapper;

pub use builtins::{builtin, is_list_like, is_map_like, BUILTIN_EXCEPTIONS};
pub use mapper::{wrap_dims, TypeMapper, TypeScope};
