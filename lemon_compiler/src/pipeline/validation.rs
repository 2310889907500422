use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::logging::config::validate_config()?;

    // Every code the stages can raise must be registered
    let required = [
        codes::structural::UNMATCHED_PARENTHESIS,
        codes::structural::OPERATOR_NOT_ALLOWED,
        codes::structural::MALFORMED_CONTENT,
        codes::structural::LIMIT_EXCEEDED,
        codes::resolution::UNRESOLVED_IDENTIFIER,
        codes::resolution::UNKNOWN_FUNCTION,
        codes::typing::NO_IMPLICIT_CAST,
        codes::typing::NO_MATCHING_OVERLOAD,
        codes::unit::UNIT_PARSE_ERROR,
        codes::success::UNIT_COMPILED,
    ];
    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Code {} not found in metadata registry", code));
        }
    }

    let info = super::get_pipeline_info();
    if info.max_nesting_depth == 0 || info.max_tokens_per_statement == 0 {
        return Err("Expression limits must be positive".to_string());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => info.stages.len(),
        "limits" => info.config_source
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }
}
