use super::stats::{FunctionStats, PipelineStats};
use crate::logging::codes;
use crate::processing::CompileError;
use crate::tokens::TokenList;
use crate::unit::StatementKind;

/// Typed roots of one successfully processed statement
#[derive(Debug, Clone)]
pub struct CompiledStatement {
    pub line: u32,
    pub kind: StatementKind,
    pub roots: TokenList,
}

impl CompiledStatement {
    /// Roots rendered as S-expressions, space separated
    pub fn render(&self) -> String {
        self.roots
            .iter()
            .map(|root| root.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct StatementFailure {
    pub line: u32,
    pub error: CompileError,
}

#[derive(Debug, Clone)]
pub struct FunctionOutput {
    pub name: String,
    pub signature: String,
    pub statements: Vec<CompiledStatement>,
    pub failures: Vec<StatementFailure>,
    pub stats: FunctionStats,
    /// Set when a failure stopped the remaining statements of this function
    pub aborted: bool,
}

impl FunctionOutput {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of compiling a whole unit
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub functions: Vec<FunctionOutput>,
    pub stats: PipelineStats,
}

impl PipelineResult {
    pub fn new(functions: Vec<FunctionOutput>, mut stats: PipelineStats) -> Self {
        for function in &functions {
            stats.absorb(&function.stats);
        }
        Self { functions, stats }
    }

    pub fn is_success(&self) -> bool {
        self.functions.iter().all(FunctionOutput::is_success)
    }

    pub fn failure_count(&self) -> usize {
        self.functions.iter().map(|f| f.failures.len()).sum()
    }

    /// Every failure with the name of its function, in unit order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &StatementFailure)> {
        self.functions.iter().flat_map(|function| {
            function
                .failures
                .iter()
                .map(move |failure| (function.name.as_str(), failure))
        })
    }

    pub fn function(&self, name: &str) -> Option<&FunctionOutput> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn log_success(&self, source: &str) {
        crate::log_success!(
            codes::success::UNIT_COMPILED,
            "Compilation unit processed",
            "source" => source,
            "functions" => self.stats.functions_compiled,
            "statements" => self.stats.statements_compiled,
            "failed" => self.stats.statements_failed,
            "duration_ms" => format!("{:.2}", self.stats.processing_duration.as_secs_f64() * 1000.0),
            "tokens_per_sec" => format!("{:.0}", self.stats.tokens_per_second())
        );
    }
}
