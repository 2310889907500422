use crate::config::compile_time::{expression, symbols};

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub stages: Vec<&'static str>,
    pub max_tokens_per_statement: usize,
    pub max_nesting_depth: usize,
    pub max_comma_segments: usize,
    pub max_function_parameters: usize,
    pub max_overloads_per_name: usize,
    pub max_locals_per_function: usize,
    pub config_source: String,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Lemon Expression Pipeline:\n\
             - Stages: {}\n\
             - Max Tokens per Statement: {}\n\
             - Max Nesting Depth: {}\n\
             - Max Comma Segments: {}\n\
             - Max Function Parameters: {}\n\
             - Max Overloads per Name: {}\n\
             - Max Locals per Function: {}\n\
             - Limits: {}",
            self.stages.join(" -> "),
            self.max_tokens_per_statement,
            self.max_nesting_depth,
            self.max_comma_segments,
            self.max_function_parameters,
            self.max_overloads_per_name,
            self.max_locals_per_function,
            self.config_source
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage expression compiler ({})",
            self.stages.len(),
            self.config_source
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        stages: vec![
            "defines",
            "grouping",
            "commas",
            "recognition",
            "unary",
            "binary",
            "typing",
        ],
        max_tokens_per_statement: expression::MAX_TOKENS_PER_STATEMENT,
        max_nesting_depth: expression::MAX_NESTING_DEPTH,
        max_comma_segments: expression::MAX_COMMA_SEGMENTS,
        max_function_parameters: symbols::MAX_FUNCTION_PARAMETERS,
        max_overloads_per_name: symbols::MAX_OVERLOADS_PER_NAME,
        max_locals_per_function: symbols::MAX_LOCALS_PER_FUNCTION,
        config_source: crate::config::build_info::source_info(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_stages() {
        let info = get_pipeline_info();
        assert_eq!(info.stages.len(), 7);
        assert!(info.report().contains("defines -> grouping"));
        assert!(info.summary().starts_with("7-stage"));
    }
}
