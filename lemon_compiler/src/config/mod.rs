//! Configuration module for the lemonscript compiler
//! Compile-time limits are generated from the TOML profile by build.rs

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{LoggingPreferences, ProcessingPreferences, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LEMON_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LEMON_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(expression::MAX_NESTING_DEPTH > 0);
        assert!(expression::MAX_COMMA_SEGMENTS >= 2);
        assert!(symbols::MAX_FUNCTION_PARAMETERS <= 255);
        assert!(logging::MAX_LOG_MESSAGE_LENGTH <= logging::LOG_BUFFER_SIZE);
    }

    #[test]
    fn test_source_info_mentions_profile() {
        assert!(super::build_info::source_info().contains(super::build_info::profile()));
    }
}
