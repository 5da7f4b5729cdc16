//! Feature modules
//!
//! Each feature is a vertical slice with its own domain models and, where
//! it talks to something external, an infrastructure adapter.

pub mod declarations;
pub mod go_ir;
pub mod lowering;
pub mod migration;
pub mod parsing;
pub mod signatures;
pub mod type_mapping;
