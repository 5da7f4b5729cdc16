//! Property tests over generated Java inputs

mod common;

use common::*;
use java2go_ir::{translate, MigrationConfig, Mode};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_every_generated_method_is_emitted(n in 0usize..20) {
        let output = tolerant(&fixture_n_methods("Gen", n));
        prop_assert!(output.is_complete());
        prop_assert_eq!(output.text.matches("func (g *Gen) method").count(), n);
    }

    #[test]
    fn prop_package_name_heads_output(name in "[a-z][a-z0-9]{0,8}") {
        let config = MigrationConfig::default().with_package(name.clone());
        let output = translate("class A {}", "A.java", &config, Mode::Strict).unwrap();
        let expected = format!("package {}\n", name);
        prop_assert!(output.text.starts_with(&expected));
    }

    #[test]
    fn prop_same_arity_overloads_get_distinct_names(n in 2usize..6) {
        let types = ["int", "long", "String", "double", "boolean", "char"];
        let methods: String = types[..n]
            .iter()
            .map(|t| format!("    void put({} v) {{}}\n", t))
            .collect();
        let output = tolerant(&format!("class Sink {{\n{}}}\n", methods));
        prop_assert!(output.is_complete());
        let count = output.text.matches("func (s *Sink) put").count();
        prop_assert_eq!(count, n);
        prop_assert_eq!(output.text.matches("func (s *Sink) put(v int32)").count(), 1);
    }
}
