//! Go IR domain models

mod declarations;
mod expressions;
mod file;
mod statements;
mod types;

pub use declarations::{
    ConstBlock, FailedMigration, GoField, GoFunction, GoInterface, GoParam, GoStruct, MethodSpec,
    Receiver, TypeDef, TypeParam, ValueSpec, Visibility,
};
pub use expressions::GoExpr;
pub use file::{Checkpoint, GoFile};
pub use statements::{GoStmt, SwitchCase};
pub use types::GoType;
