// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    expression: ExpressionLimits,
    symbols: SymbolLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ExpressionLimits {
    max_tokens_per_statement: usize,
    max_nesting_depth: usize,
    max_comma_segments: usize,
}

#[derive(serde::Deserialize)]
struct SymbolLimits {
    max_identifier_length: usize,
    max_function_parameters: usize,
    max_overloads_per_name: usize,
    max_locals_per_function: usize,
    max_global_variables: usize,
    max_define_tokens: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LEMON_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LEMON_CONFIG_DIR");

    let profile = env::var("LEMON_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LEMON_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of lemon_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_NESTING_DEPTH: usize = 1024;
    const ABSOLUTE_MAX_PARAMETERS: usize = 255;

    if config.expression.max_nesting_depth == 0
        || config.expression.max_nesting_depth > ABSOLUTE_MAX_NESTING_DEPTH
    {
        panic!("LIMITS: max_nesting_depth must be within 1..={}", ABSOLUTE_MAX_NESTING_DEPTH);
    }

    if config.symbols.max_function_parameters > ABSOLUTE_MAX_PARAMETERS {
        panic!("LIMITS: max_function_parameters exceeds absolute maximum");
    }

    if config.expression.max_comma_segments < 2 {
        panic!("LIMITS: max_comma_segments must allow at least two segments");
    }

    if config.logging.max_log_message_length > config.logging.log_buffer_size {
        panic!("LIMITS: max_log_message_length exceeds log_buffer_size");
    }

    if profile == "production" && config.expression.max_tokens_per_statement > 65_536 {
        panic!("PRODUCTION: max_tokens_per_statement too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod expression {{
        pub const MAX_TOKENS_PER_STATEMENT: usize = {};
        pub const MAX_NESTING_DEPTH: usize = {};
        pub const MAX_COMMA_SEGMENTS: usize = {};
    }}

    pub mod symbols {{
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_FUNCTION_PARAMETERS: usize = {};
        pub const MAX_OVERLOADS_PER_NAME: usize = {};
        pub const MAX_LOCALS_PER_FUNCTION: usize = {};
        pub const MAX_GLOBAL_VARIABLES: usize = {};
        pub const MAX_DEFINE_TOKENS: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        // Expression
        config.expression.max_tokens_per_statement,
        config.expression.max_nesting_depth,
        config.expression.max_comma_segments,
        // Symbols
        config.symbols.max_identifier_length,
        config.symbols.max_function_parameters,
        config.symbols.max_overloads_per_name,
        config.symbols.max_locals_per_function,
        config.symbols.max_global_variables,
        config.symbols.max_define_tokens,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
