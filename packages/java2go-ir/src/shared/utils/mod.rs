//! Shared utilities

pub mod naming;

pub use naming::{capitalize, decapitalize, escape_identifier, exported_name, static_name};
