use super::result::PipelineResult;
use super::stats::PipelineStats;
use crate::tokens::TokenList;
use crate::unit::StatementKind;
use serde::Serialize;

/// JSON view of a pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub functions: Vec<FunctionEntry>,
    pub errors: Vec<ErrorEntry>,
    pub stats: PipelineStats,
}

#[derive(Debug, Serialize)]
pub struct FunctionEntry {
    pub name: String,
    pub signature: String,
    pub statements: Vec<StatementEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatementEntry {
    pub line: u32,
    pub kind: StatementKind,
    pub tree: String,
    pub roots: TokenList,
}

#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub function: String,
    pub line: u32,
    pub code: String,
    pub kind: String,
    pub message: String,
}

impl PipelineOutput {
    pub fn from_result(result: &PipelineResult) -> Self {
        let functions = result
            .functions
            .iter()
            .map(|function| FunctionEntry {
                name: function.name.clone(),
                signature: function.signature.clone(),
                statements: function
                    .statements
                    .iter()
                    .map(|statement| StatementEntry {
                        line: statement.line,
                        kind: statement.kind,
                        tree: statement.render(),
                        roots: statement.roots.clone(),
                    })
                    .collect(),
            })
            .collect();

        let errors = result
            .failures()
            .map(|(function, failure)| ErrorEntry {
                function: function.to_string(),
                line: failure.line,
                code: failure.error.error_code().to_string(),
                kind: failure.error.kind_name().to_string(),
                message: failure.error.message().to_string(),
            })
            .collect();

        Self {
            functions,
            errors,
            stats: result.stats.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
