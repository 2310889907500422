//! Symbol tables consulted while resolving expressions
//!
//! [`GlobalsLookup`] is shared read-only across functions; each function is
//! compiled against its own [`FunctionScope`].

pub mod error;
pub mod globals;
pub mod scope;

pub use error::{SymbolError, SymbolResult};
pub use globals::{Define, Function, GlobalVariable, GlobalsLookup, Parameter};
pub use scope::{FunctionScope, LocalVariable};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalId(pub usize);

/// Where a resolved variable lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableRef {
    Local(LocalId),
    Global(GlobalId),
}
