//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Structural errors raised while grouping and reducing token lists
pub mod structural {
    use super::Code;

    pub const UNMATCHED_PARENTHESIS: Code = Code::new("E030");
    pub const OPERATOR_NOT_ALLOWED: Code = Code::new("E031");
    pub const MALFORMED_CONTENT: Code = Code::new("E032");
    pub const LIMIT_EXCEEDED: Code = Code::new("E033");
}

/// Name resolution errors
pub mod resolution {
    use super::Code;

    pub const UNRESOLVED_IDENTIFIER: Code = Code::new("E050");
    pub const UNKNOWN_FUNCTION: Code = Code::new("E051");
    pub const DUPLICATE_VARIABLE: Code = Code::new("E052");
    pub const VOID_VARIABLE: Code = Code::new("E053");
}

/// Type assignment errors
pub mod typing {
    use super::Code;

    pub const NO_IMPLICIT_CAST: Code = Code::new("E070");
    pub const NO_MATCHING_OVERLOAD: Code = Code::new("E071");
    pub const BASE_CALL_MISMATCH: Code = Code::new("E072");
    pub const INVALID_EXPLICIT_CAST: Code = Code::new("E073");
}

/// Symbol table registration errors
pub mod symbols {
    use super::Code;

    pub const DUPLICATE_FUNCTION: Code = Code::new("E090");
    pub const DUPLICATE_GLOBAL: Code = Code::new("E091");
    pub const SYMBOL_LIMIT_EXCEEDED: Code = Code::new("E092");
    pub const INVALID_SYMBOL_NAME: Code = Code::new("E093");
}

/// Compilation unit loading errors
pub mod unit {
    use super::Code;

    pub const UNIT_IO_ERROR: Code = Code::new("E110");
    pub const UNIT_PARSE_ERROR: Code = Code::new("E111");
    pub const UNKNOWN_TYPE_NAME: Code = Code::new("E112");
    pub const UNKNOWN_OPERATOR: Code = Code::new("E113");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const STATEMENT_COMPILED: Code = Code::new("I010");
    pub const FUNCTION_COMPILED: Code = Code::new("I011");
    pub const UNIT_COMPILED: Code = Code::new("I012");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                true,
                "Internal compiler invariant violated",
                "Report the statement that triggered this error",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                true,
                "Logging or configuration initialization failure",
                "Check runtime configuration and environment variables",
            ),
            // Structural errors
            ErrorMetadata::new(
                "E030",
                "Structural",
                Severity::High,
                false,
                "Parentheses or brackets do not match",
                "Balance every opening parenthesis or bracket with a closing one",
            ),
            ErrorMetadata::new(
                "E031",
                "Structural",
                Severity::High,
                false,
                "Operator used in a position where it is not allowed",
                "Check operands on both sides of the operator",
            ),
            ErrorMetadata::new(
                "E032",
                "Structural",
                Severity::High,
                false,
                "Parenthesis, bracket or argument content is malformed",
                "Make sure each group contains exactly one expression",
            ),
            ErrorMetadata::new(
                "E033",
                "Structural",
                Severity::High,
                true,
                "Statement exceeds a configured compile-time limit",
                "Split the statement or raise the limit in the build profile",
            ),
            // Resolution errors
            ErrorMetadata::new(
                "E050",
                "Resolution",
                Severity::High,
                false,
                "Identifier does not name a local or global variable",
                "Declare the variable before use or fix the spelling",
            ),
            ErrorMetadata::new(
                "E051",
                "Resolution",
                Severity::High,
                false,
                "Called function is not registered",
                "Declare the function or fix the spelling",
            ),
            ErrorMetadata::new(
                "E052",
                "Resolution",
                Severity::Medium,
                false,
                "Variable name already declared in the current scope",
                "Rename the variable or remove the second declaration",
            ),
            ErrorMetadata::new(
                "E053",
                "Resolution",
                Severity::Medium,
                false,
                "Variables cannot be declared with type void",
                "Use a concrete value type",
            ),
            // Typing errors
            ErrorMetadata::new(
                "E070",
                "Typing",
                Severity::High,
                false,
                "No implicit cast exists between operand types",
                "Add an explicit cast to a compatible type",
            ),
            ErrorMetadata::new(
                "E071",
                "Typing",
                Severity::High,
                false,
                "No function overload accepts the given arguments",
                "Check the number and types of the arguments",
            ),
            ErrorMetadata::new(
                "E072",
                "Typing",
                Severity::High,
                false,
                "Base call signature differs from the enclosing function",
                "Pass exactly the parameter types of the enclosing function",
            ),
            ErrorMetadata::new(
                "E073",
                "Typing",
                Severity::High,
                false,
                "Explicit cast between incompatible type classes",
                "Only cast between integer types",
            ),
            // Symbol errors
            ErrorMetadata::new(
                "E090",
                "Symbols",
                Severity::Medium,
                false,
                "Function with identical signature already registered",
                "Remove the duplicate function or change its parameters",
            ),
            ErrorMetadata::new(
                "E091",
                "Symbols",
                Severity::Medium,
                false,
                "Global variable or define registered twice",
                "Rename one of the globals",
            ),
            ErrorMetadata::new(
                "E092",
                "Symbols",
                Severity::High,
                true,
                "Symbol table limit exceeded",
                "Reduce the number of symbols or raise the limit in the build profile",
            ),
            ErrorMetadata::new(
                "E093",
                "Symbols",
                Severity::Medium,
                false,
                "Symbol name is empty or too long",
                "Use a non-empty name within the configured length",
            ),
            // Unit errors
            ErrorMetadata::new(
                "E110",
                "Unit",
                Severity::Medium,
                true,
                "Compilation unit file could not be read",
                "Check the path and file permissions",
            ),
            ErrorMetadata::new(
                "E111",
                "Unit",
                Severity::Medium,
                true,
                "Compilation unit is not valid JSON",
                "Fix the unit file syntax",
            ),
            ErrorMetadata::new(
                "E112",
                "Unit",
                Severity::Medium,
                false,
                "Unknown data type name",
                "Use one of the predefined type names",
            ),
            ErrorMetadata::new(
                "E113",
                "Unit",
                Severity::Medium,
                false,
                "Unknown operator symbol",
                "Use one of the supported operator symbols",
            ),
            // Success codes
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                false,
                "Logging system initialized",
                "Continue with compilation",
            ),
            ErrorMetadata::new(
                "I010",
                "Processing",
                Severity::Low,
                false,
                "Statement compiled to a typed expression tree",
                "Continue with the next statement",
            ),
            ErrorMetadata::new(
                "I011",
                "Processing",
                Severity::Low,
                false,
                "All statements of a function compiled",
                "Continue with the next function",
            ),
            ErrorMetadata::new(
                "I012",
                "Processing",
                Severity::Low,
                false,
                "Compilation unit compiled",
                "Hand the typed trees to code generation",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            structural::UNMATCHED_PARENTHESIS,
            structural::OPERATOR_NOT_ALLOWED,
            structural::MALFORMED_CONTENT,
            structural::LIMIT_EXCEEDED,
            resolution::UNRESOLVED_IDENTIFIER,
            resolution::UNKNOWN_FUNCTION,
            resolution::DUPLICATE_VARIABLE,
            resolution::VOID_VARIABLE,
            typing::NO_IMPLICIT_CAST,
            typing::NO_MATCHING_OVERLOAD,
            typing::BASE_CALL_MISMATCH,
            typing::INVALID_EXPLICIT_CAST,
            symbols::DUPLICATE_FUNCTION,
            symbols::DUPLICATE_GLOBAL,
            symbols::SYMBOL_LIMIT_EXCEEDED,
            symbols::INVALID_SYMBOL_NAME,
            unit::UNIT_IO_ERROR,
            unit::UNIT_PARSE_ERROR,
            unit::UNKNOWN_TYPE_NAME,
            unit::UNKNOWN_OPERATOR,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::STATEMENT_COMPILED,
            success::FUNCTION_COMPILED,
            success::UNIT_COMPILED,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E050"), "Resolution");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("E033"));
        assert!(!requires_halt("E070"));
        assert_eq!(get_description("nope"), "Unknown error");
        assert_eq!(get_action("nope"), "No specific action available");
    }
}
