//! IR root for one translation unit

use std::collections::BTreeSet;

use super::declarations::{
    ConstBlock, FailedMigration, GoFunction, GoInterface, GoStruct, TypeDef, ValueSpec,
};

/// Snapshot taken before a member conversion so a failure can be undone
#[derive(Debug, Clone)]
pub struct Checkpoint {
    imports: BTreeSet<String>,
    lens: [usize; 9],
}

/// Accumulates every declaration of the emitted Go file
///
/// Converters only append; nothing is removed once pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoFile {
    pub package: String,
    pub license_header: Option<String>,
    pub imports: BTreeSet<String>,
    pub interfaces: Vec<GoInterface>,
    pub structs: Vec<GoStruct>,
    pub type_defs: Vec<TypeDef>,
    pub const_blocks: Vec<ConstBlock>,
    pub consts: Vec<ValueSpec>,
    pub vars: Vec<ValueSpec>,
    pub functions: Vec<GoFunction>,
    pub methods: Vec<GoFunction>,
    pub failed: Vec<FailedMigration>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn add_import(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    /// Route to `functions` or `methods` by receiver
    pub fn push_function(&mut self, function: GoFunction) {
        if function.is_method() {
            self.methods.push(function);
        } else {
            self.functions.push(function);
        }
    }

    pub fn find_struct(&self, name: &str) -> Option<&GoStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_interface(&self, name: &str) -> Option<&GoInterface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn find_function(&self, name: &str) -> Option<&GoFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Method `name` declared on receiver type `type_name`
    pub fn find_method(&self, type_name: &str, name: &str) -> Option<&GoFunction> {
        self.methods.iter().find(|m| {
            m.name == name
                && m
                    .receiver
                    .as_ref()
                    .and_then(|r| r.ty.base_name())
                    .map_or(false, |base| base == type_name)
        })
    }

    /// Record the current length of every declaration list
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            imports: self.imports.clone(),
            lens: [
                self.interfaces.len(),
                self.structs.len(),
                self.type_defs.len(),
                self.const_blocks.len(),
                self.consts.len(),
                self.vars.len(),
                self.functions.len(),
                self.methods.len(),
                self.failed.len(),
            ],
        }
    }

    /// Drop everything appended since `checkpoint`
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        let [interfaces, structs, type_defs, const_blocks, consts, vars, functions, methods, failed] =
            checkpoint.lens;
        self.imports = checkpoint.imports;
        self.interfaces.truncate(interfaces);
        self.structs.truncate(structs);
        self.type_defs.truncate(type_defs);
        self.const_blocks.truncate(const_blocks);
        self.consts.truncate(consts);
        self.vars.truncate(vars);
        self.functions.truncate(functions);
        self.methods.truncate(methods);
        self.failed.truncate(failed);
    }

    /// Number of translated (non-placeholder) declarations
    pub fn declaration_count(&self) -> usize {
        self.interfaces.len()
            + self.structs.len()
            + self.type_defs.len()
            + self.const_blocks.len()
            + self.consts.len()
            + self.vars.len()
            + self.functions.len()
            + self.methods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::go_ir::domain::{GoType, Receiver};

    #[test]
    fn test_push_function_routes_by_receiver() {
        let mut file = GoFile::new("main");
        file.push_function(GoFunction::new("NewFoo"));
        let mut method = GoFunction::new("Area");
        method.receiver = Some(Receiver {
            name: "c".to_string(),
            ty: GoType::pointer(GoType::named("Circle")),
        });
        file.push_function(method);

        assert_eq!(file.functions.len(), 1);
        assert_eq!(file.methods.len(), 1);
        assert!(file.find_method("Circle", "Area").is_some());
        assert_eq!(file.declaration_count(), 2);
    }

    #[test]
    fn test_rollback_discards_partial_output() {
        let mut file = GoFile::new("main");
        file.push_function(GoFunction::new("keep"));
        let checkpoint = file.checkpoint();
        file.add_import("fmt");
        file.push_function(GoFunction::new("discard"));
        file.rollback(checkpoint);

        assert_eq!(file.functions.len(), 1);
        assert!(file.imports.is_empty());
    }
}
