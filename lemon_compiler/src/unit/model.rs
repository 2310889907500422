//! Serialized form of a compilation unit

use serde::{Deserialize, Serialize};

/// One lexer token as written in a unit file, e.g. `{"operator": "+"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawToken {
    Identifier(String),
    Constant(i64),
    Operator(String),
    Type(String),
    Keyword(String),
}

/// How the pipeline treats a statement's tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Plain expression statement
    #[default]
    Expression,
    /// Typed against the function's return type
    Return,
    /// Header of a `for` loop with `;` separated parts
    ForHeader,
    /// Opens a nested block; carries no tokens
    BlockBegin,
    /// Closes the innermost block; carries no tokens
    BlockEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDefine {
    pub name: String,
    pub tokens: Vec<RawToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatement {
    pub line: u32,
    #[serde(default)]
    pub kind: StatementKind,
    #[serde(default)]
    pub tokens: Vec<RawToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFunction {
    pub name: String,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<UnitVariable>,
    #[serde(default)]
    pub statements: Vec<UnitStatement>,
}

fn default_return_type() -> String {
    "void".to_string()
}

/// Everything one compilation run needs: program-wide symbols plus function bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub defines: Vec<UnitDefine>,
    #[serde(default)]
    pub globals: Vec<UnitVariable>,
    #[serde(default)]
    pub functions: Vec<UnitFunction>,
}

impl CompilationUnit {
    pub fn statement_count(&self) -> usize {
        self.functions.iter().map(|f| f.statements.len()).sum()
    }
}
