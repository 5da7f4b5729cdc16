//! Overload table
//!
//! Buckets keyed by the original Java name. Each bucket holds one entry per
//! distinct parameter-type list; the first registration keeps the base name
//! and every later one is mangled.

use rustc_hash::FxHashMap;

use super::domain::{OverloadEntry, Resolution};
use super::mangler::mangle;

#[derive(Debug, Clone, Default)]
pub struct OverloadTable {
    buckets: FxHashMap<String, Vec<OverloadEntry>>,
}

impl OverloadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter list under `name`, returning its entry index
    ///
    /// An identical list merges into the existing entry (export flags OR
    /// together); a new list gets a mangled name unique within the bucket.
    pub fn insert(
        &mut self,
        name: &str,
        param_types: Vec<String>,
        exported: bool,
        varargs: bool,
    ) -> usize {
        self.insert_with_base(name, name, param_types, exported, varargs)
    }

    /// Like `insert`, but names derive from `base` instead of the bucket key
    pub fn insert_with_base(
        &mut self,
        key: &str,
        base: &str,
        param_types: Vec<String>,
        exported: bool,
        varargs: bool,
    ) -> usize {
        let bucket = self.buckets.entry(key.to_string()).or_default();

        if let Some(index) = bucket.iter().position(|e| e.param_types == param_types) {
            let entry = &mut bucket[index];
            entry.exported |= exported;
            entry.varargs |= varargs;
            return index;
        }

        let mut mangled = if bucket.is_empty() {
            base.to_string()
        } else {
            mangle(base, &param_types)
        };
        let stem = mangled.clone();
        let mut counter = 2;
        while bucket.iter().any(|e| e.mangled == mangled) {
            mangled = format!("{}{}", stem, counter);
            counter += 1;
        }

        bucket.push(OverloadEntry {
            param_types,
            mangled,
            exported,
            varargs,
        });
        bucket.len() - 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    pub fn entries(&self, name: &str) -> &[OverloadEntry] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entry(&self, name: &str, index: usize) -> Option<&OverloadEntry> {
        self.buckets.get(name).and_then(|b| b.get(index))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Pick the Go name for a call to `name` with `argc` arguments
    ///
    /// A single candidate, or a single arity match, resolves cleanly. Several
    /// arity matches resolve to the first-registered one and are flagged
    /// ambiguous; so does a call no entry accepts.
    pub fn resolve(&self, name: &str, argc: usize) -> Option<Resolution> {
        let bucket = self.buckets.get(name)?;
        let first = bucket.first()?;

        if bucket.len() == 1 {
            return Some(Resolution {
                target: first.target_name(),
                ambiguous: false,
                candidates: 1,
            });
        }

        let matching: Vec<&OverloadEntry> = bucket.iter().filter(|e| e.accepts(argc)).collect();
        let resolution = match matching.as_slice() {
            [only] => Resolution {
                target: only.target_name(),
                ambiguous: false,
                candidates: 1,
            },
            [chosen, ..] => Resolution {
                target: chosen.target_name(),
                ambiguous: true,
                candidates: matching.len(),
            },
            [] => Resolution {
                target: first.target_name(),
                ambiguous: true,
                candidates: bucket.len(),
            },
        };
        Some(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_keeps_base_name() {
        let mut table = OverloadTable::new();
        table.insert("bar", types(&["Foo"]), false, false);
        table.insert("bar", types(&["Baz"]), false, false);

        let names: Vec<&str> = table.entries("bar").iter().map(|e| e.mangled.as_str()).collect();
        assert_eq!(names, vec!["bar", "barWithBaz"]);
    }

    #[test]
    fn test_identical_lists_merge_and_or_export() {
        let mut table = OverloadTable::new();
        let a = table.insert("area", types(&[]), false, false);
        let b = table.insert("area", types(&[]), true, false);

        assert_eq!(a, b);
        assert_eq!(table.entries("area").len(), 1);
        assert_eq!(table.entries("area")[0].target_name(), "Area");
    }

    #[test]
    fn test_resolve_by_arity() {
        let mut table = OverloadTable::new();
        table.insert("add", types(&["int"]), true, false);
        table.insert("add", types(&["int", "int"]), true, false);

        let res = table.resolve("add", 2).unwrap();
        assert_eq!(res.target, "AddWithIntInt");
        assert!(!res.ambiguous);
        assert!(table.resolve("missing", 0).is_none());
    }

    #[test]
    fn test_resolve_same_arity_is_ambiguous() {
        let mut table = OverloadTable::new();
        table.insert("bar", types(&["Foo"]), false, false);
        table.insert("bar", types(&["Baz"]), false, false);

        let res = table.resolve("bar", 1).unwrap();
        assert_eq!(res.target, "bar");
        assert!(res.ambiguous);
        assert_eq!(res.candidates, 2);
        assert!(res.warning("bar", 1).unwrap().contains("ambiguous"));
    }

    #[test]
    fn test_resolve_without_arity_match_falls_back_to_first() {
        let mut table = OverloadTable::new();
        table.insert("run", types(&["int"]), false, false);
        table.insert("run", types(&["String"]), false, false);

        let res = table.resolve("run", 3).unwrap();
        assert_eq!(res.target, "run");
        assert!(res.ambiguous);
    }

    #[test]
    fn test_constructor_names_derive_from_base() {
        let mut table = OverloadTable::new();
        table.insert_with_base("Point", "NewPoint", types(&[]), true, false);
        table.insert_with_base("Point", "NewPoint", types(&["int", "int"]), true, false);

        assert_eq!(table.resolve("Point", 0).unwrap().target, "NewPoint");
        assert_eq!(table.resolve("Point", 2).unwrap().target, "NewPointWithIntInt");
    }

    #[test]
    fn test_mangled_collision_gets_counter() {
        let mut table = OverloadTable::new();
        table.insert("f", types(&["int"]), false, false);
        table.insert("f", types(&["Int"]), false, false);
        table.insert("f", types(&["java.lang.Int"]), false, false);

        let names: Vec<&str> = table.entries("f").iter().map(|e| e.mangled.as_str()).collect();
        assert_eq!(names, vec!["f", "fWithInt", "fWithInt2"]);
    }

    fn param_lists() -> impl Strategy<Value = Vec<Vec<String>>> {
        let ty = prop::sample::select(vec!["int", "long", "String", "int[]", "List<String>", "Foo"]);
        prop::collection::vec(prop::collection::vec(ty.prop_map(String::from), 0..3), 1..8)
    }

    proptest! {
        #[test]
        fn prop_distinct_lists_get_distinct_names(lists in param_lists()) {
            let mut table = OverloadTable::new();
            for list in &lists {
                table.insert("op", list.clone(), false, false);
            }

            let entries = table.entries("op");
            let mut distinct = lists.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(entries.len(), distinct.len());

            let mut names: Vec<&str> = entries.iter().map(|e| e.mangled.as_str()).collect();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), entries.len());
            prop_assert_eq!(entries[0].mangled.as_str(), "op");
        }

        #[test]
        fn prop_insertion_is_idempotent(lists in param_lists()) {
            let mut table = OverloadTable::new();
            let first: Vec<usize> = lists.iter().map(|l| table.insert("op", l.clone(), false, false)).collect();
            let second: Vec<usize> = lists.iter().map(|l| table.insert("op", l.clone(), false, false)).collect();
            prop_assert_eq!(first, second);
        }
    }
}
