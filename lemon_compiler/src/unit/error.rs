use crate::logging::codes;
use crate::symbols::SymbolError;

pub type UnitResult<T> = Result<T, UnitError>;

/// Failures while loading a compilation unit
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("I/O error reading unit '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid unit file: {message}")]
    Parse { message: String },

    #[error("Unknown type name '{name}'")]
    UnknownType { name: String },

    #[error("Unknown operator '{symbol}'")]
    UnknownOperator { symbol: String },

    #[error("Unknown keyword '{word}'")]
    UnknownKeyword { word: String },

    #[error("Symbol registration failed: {0}")]
    Symbol(#[from] SymbolError),
}

impl UnitError {
    pub fn io_error(path: &str, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            message: error.to_string(),
        }
    }

    pub fn parse_error(error: &serde_json::Error) -> Self {
        Self::Parse {
            message: error.to_string(),
        }
    }

    pub fn unknown_type(name: &str) -> Self {
        Self::UnknownType {
            name: name.to_string(),
        }
    }

    pub fn unknown_operator(symbol: &str) -> Self {
        Self::UnknownOperator {
            symbol: symbol.to_string(),
        }
    }

    pub fn unknown_keyword(word: &str) -> Self {
        Self::UnknownKeyword {
            word: word.to_string(),
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Io { .. } => codes::unit::UNIT_IO_ERROR,
            Self::Parse { .. } | Self::UnknownKeyword { .. } => codes::unit::UNIT_PARSE_ERROR,
            Self::UnknownType { .. } => codes::unit::UNKNOWN_TYPE_NAME,
            Self::UnknownOperator { .. } => codes::unit::UNKNOWN_OPERATOR,
            Self::Symbol(error) => error.error_code(),
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
