//! Signatures Feature
//!
//! Pre-pass over the whole tree that records every method and constructor
//! signature, assigns collision-free Go names to overloads and answers
//! call-site resolution queries.
//!
//! ## Structure
//! - `domain` - Signature, OverloadEntry, Resolution
//! - `mangler` - deterministic overload name derivation
//! - `overloads` - OverloadTable (dedup, mangling, arity resolution)
//! - `analyzer` - SignatureAnalyzer (the single traversal)

pub mod analyzer;
pub mod domain;
pub mod mangler;
pub mod overloads;

pub use analyzer::{
    constructor_base, dims_of, formal_parameters, simple_type_name, type_parameter_names, ParamDecl,
    SignatureAnalyzer,
};
pub use domain::{fold_throws, OverloadEntry, Resolution, Signature, SignatureKind};
pub use mangler::{mangle, type_fragment};
pub use overloads::OverloadTable;
