use crate::logging::codes::{self, Code};
use crate::processing::CompileError;
use crate::symbols::SymbolError;
use crate::unit::UnitError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Unit loading failed: {0}")]
    Unit(#[from] UnitError),

    #[error("Symbol setup failed: {0}")]
    Symbols(#[from] SymbolError),

    #[error("Compilation of '{function}' halted: {error}")]
    Halted {
        function: String,
        error: CompileError,
    },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn halted(function: &str, error: CompileError) -> Self {
        Self::Halted {
            function: function.to_string(),
            error,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Unit(error) => error.error_code(),
            Self::Symbols(error) => error.error_code(),
            Self::Halted { error, .. } => error.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
