//! Errors raised while turning a statement's tokens into a typed tree

use crate::logging::codes::{self, Code};
use crate::symbols::SymbolError;
use crate::tokens::Operator;
use crate::types::DataType;

/// Result type for token processing
pub type CompileResult<T> = Result<T, CompileError>;

/// Statement compilation error; the first error aborts the statement
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Line {line}: {message}")]
    Structural { message: String, line: u32, code: Code },

    #[error("Line {line}: {message}")]
    Resolution { message: String, line: u32, code: Code },

    #[error("Line {line}: {message}")]
    Type { message: String, line: u32, code: Code },

    #[error("Line {line}: internal error: {message}")]
    Internal { message: String, line: u32, code: Code },
}

impl CompileError {
    fn structural(code: Code, message: String, line: u32) -> Self {
        Self::Structural { message, line, code }
    }

    fn resolution(code: Code, message: String, line: u32) -> Self {
        Self::Resolution { message, line, code }
    }

    fn type_error(code: Code, message: String, line: u32) -> Self {
        Self::Type { message, line, code }
    }

    pub fn unmatched_parenthesis(too_many_open: bool, line: u32) -> Self {
        let which = if too_many_open { "open" } else { "closed" };
        Self::structural(
            codes::structural::UNMATCHED_PARENTHESIS,
            format!("Parenthesis not matching (too many {})", which),
            line,
        )
    }

    pub fn operator_not_allowed(op: Operator, line: u32) -> Self {
        Self::structural(
            codes::structural::OPERATOR_NOT_ALLOWED,
            op.not_allowed_message(),
            line,
        )
    }

    /// An operator or keyword without the operand it needs
    pub fn misplaced_operand(message: &str, line: u32) -> Self {
        Self::structural(
            codes::structural::OPERATOR_NOT_ALLOWED,
            message.to_string(),
            line,
        )
    }

    pub fn malformed_content(message: &str, line: u32) -> Self {
        Self::structural(
            codes::structural::MALFORMED_CONTENT,
            message.to_string(),
            line,
        )
    }

    pub fn limit_exceeded(what: &str, limit: usize, line: u32) -> Self {
        Self::Internal {
            message: format!("Statement exceeds the limit of {} {}", limit, what),
            line,
            code: codes::structural::LIMIT_EXCEEDED,
        }
    }

    pub fn unresolved_identifier(name: &str, line: u32) -> Self {
        Self::resolution(
            codes::resolution::UNRESOLVED_IDENTIFIER,
            format!("Unable to resolve identifier: {}", name),
            line,
        )
    }

    pub fn unknown_function(name: &str, line: u32) -> Self {
        Self::resolution(
            codes::resolution::UNKNOWN_FUNCTION,
            format!("Unknown function name '{}'", name),
            line,
        )
    }

    pub fn duplicate_variable(line: u32) -> Self {
        Self::resolution(
            codes::resolution::DUPLICATE_VARIABLE,
            "Variable name already used".to_string(),
            line,
        )
    }

    pub fn void_variable(line: u32) -> Self {
        Self::resolution(
            codes::resolution::VOID_VARIABLE,
            "void variables not allowed".to_string(),
            line,
        )
    }

    pub fn no_implicit_cast(left: DataType, right: DataType, line: u32) -> Self {
        Self::type_error(
            codes::typing::NO_IMPLICIT_CAST,
            format!(
                "Can not implicitly cast between types '{}' and '{}'",
                left, right
            ),
            line,
        )
    }

    pub fn no_matching_overload(name: &str, line: u32) -> Self {
        Self::type_error(
            codes::typing::NO_MATCHING_OVERLOAD,
            format!(
                "No appropriate function overload found calling '{}', the number or types of parameters passed are wrong",
                name
            ),
            line,
        )
    }

    pub fn base_call_mismatch(message: String, line: u32) -> Self {
        Self::type_error(codes::typing::BASE_CALL_MISMATCH, message, line)
    }

    pub fn invalid_explicit_cast(line: u32) -> Self {
        Self::type_error(
            codes::typing::INVALID_EXPLICIT_CAST,
            "Explicit cast not possible".to_string(),
            line,
        )
    }

    pub fn internal(message: &str, line: u32) -> Self {
        Self::Internal {
            message: message.to_string(),
            line,
            code: codes::system::INTERNAL_ERROR,
        }
    }

    /// Symbol table failures surfacing while declaring locals
    pub fn from_symbol_error(error: SymbolError, line: u32) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        match error {
            SymbolError::LimitExceeded { .. } | SymbolError::Internal { .. } => {
                Self::Internal { message, line, code }
            }
            _ => Self::resolution(code, message, line),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Structural { message, .. }
            | Self::Resolution { message, .. }
            | Self::Type { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Self::Structural { line, .. }
            | Self::Resolution { line, .. }
            | Self::Type { line, .. }
            | Self::Internal { line, .. } => *line,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::Structural { code, .. }
            | Self::Resolution { code, .. }
            | Self::Type { code, .. }
            | Self::Internal { code, .. } => *code,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Structural { .. } => "structural",
            Self::Resolution { .. } => "resolution",
            Self::Type { .. } => "type",
            Self::Internal { .. } => "internal",
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_messages_and_lines() {
        let error = CompileError::unresolved_identifier("zzz", 42);
        assert_eq!(error.message(), "Unable to resolve identifier: zzz");
        assert_eq!(error.line(), 42);
        assert_eq!(error.to_string(), "Line 42: Unable to resolve identifier: zzz");
        assert_eq!(error.error_code(), codes::resolution::UNRESOLVED_IDENTIFIER);
    }

    #[test]
    fn test_kinds() {
        assert_matches!(
            CompileError::unmatched_parenthesis(true, 1),
            CompileError::Structural { .. }
        );
        assert_matches!(
            CompileError::no_implicit_cast(DataType::Float, DataType::S8, 1),
            CompileError::Type { .. }
        );
        let limit = CompileError::limit_exceeded("tokens", 10, 1);
        assert_eq!(limit.kind_name(), "internal");
        assert!(limit.requires_halt());
    }

    #[test]
    fn test_symbol_errors_map_to_resolution() {
        let error = CompileError::from_symbol_error(SymbolError::invalid_name("", "name is empty"), 5);
        assert_matches!(error, CompileError::Resolution { line: 5, .. });
    }
}
