//! Error types for symbol registration

/// Result type for symbol table operations
pub type SymbolResult<T> = Result<T, SymbolError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SymbolError {
    #[error("Function '{name}' with signature ({signature}) is already registered")]
    DuplicateFunction { name: String, signature: String },

    #[error("Global name '{name}' is already used by a {existing}")]
    DuplicateGlobal { name: String, existing: String },

    #[error("Too many {what}: limit is {limit}")]
    LimitExceeded { what: String, limit: usize },

    #[error("Invalid symbol name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Internal symbol table error: {message}")]
    Internal { message: String },
}

impl SymbolError {
    pub fn duplicate_function(name: &str, signature: &str) -> Self {
        Self::DuplicateFunction {
            name: name.to_string(),
            signature: signature.to_string(),
        }
    }

    pub fn duplicate_global(name: &str, existing: &str) -> Self {
        Self::DuplicateGlobal {
            name: name.to_string(),
            existing: existing.to_string(),
        }
    }

    pub fn limit_exceeded(what: &str, limit: usize) -> Self {
        Self::LimitExceeded {
            what: what.to_string(),
            limit,
        }
    }

    pub fn invalid_name(name: &str, reason: &str) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        matches!(self, Self::LimitExceeded { .. } | Self::Internal { .. })
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::DuplicateFunction { .. } => codes::symbols::DUPLICATE_FUNCTION,
            Self::DuplicateGlobal { .. } => codes::symbols::DUPLICATE_GLOBAL,
            Self::LimitExceeded { .. } => codes::symbols::SYMBOL_LIMIT_EXCEEDED,
            Self::InvalidName { .. } => codes::symbols::INVALID_SYMBOL_NAME,
            Self::Internal { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

/// Reject empty or over-long names
pub(crate) fn validate_name(name: &str) -> SymbolResult<()> {
    use crate::config::compile_time::symbols::MAX_IDENTIFIER_LENGTH;

    if name.is_empty() {
        return Err(SymbolError::invalid_name(name, "name is empty"));
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(SymbolError::invalid_name(
            name,
            &format!("longer than {} characters", MAX_IDENTIFIER_LENGTH),
        ));
    }
    Ok(())
}
