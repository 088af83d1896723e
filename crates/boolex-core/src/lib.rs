pub mod ast;
pub mod registry;

// Test utilities (available in tests and when used as a dependency with the `testing` feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use ast::{Expression, NoExtension};
pub use registry::{Category, Registry, VarType, VariableId};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown variable type: {0}")]
    UnknownVarType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
