//! Global logging module for the lemonscript compiler
//!
//! Provides thread-safe global logging, a per-thread statement context
//! (enclosing function and source line) and a small macro interface.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Where in the unit the current thread is compiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementContext {
    pub function: Option<String>,
    pub line: u32,
}

thread_local! {
    static STATEMENT_CONTEXT: RefCell<Option<StatementContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the installed preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(LoggingService::with_config());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether a debug event would reach the global logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// STATEMENT CONTEXT MANAGEMENT
// ============================================================================

pub fn set_statement_context(function: Option<&str>, line: u32) {
    STATEMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(StatementContext {
            function: function.map(str::to_string),
            line,
        });
    });
}

pub fn clear_statement_context() {
    STATEMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with statement context; the previous context is restored afterwards
pub fn with_statement_context<F, R>(function: Option<&str>, line: u32, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_statement_context();
    set_statement_context(function, line);
    let result = f();
    STATEMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn get_current_statement_context() -> Option<StatementContext> {
    STATEMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_statement_context(event: LogEvent) -> LogEvent {
    if !config::include_statement_context() {
        return event;
    }
    match get_current_statement_context() {
        Some(StatementContext { function, line }) => {
            let event = event.with_line(line);
            match function {
                Some(name) => event.with_function(&name),
                None => event,
            }
        }
        None => event,
    }
}

fn emit(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }
    event.message = config::truncate_message(&event.message).to_string();
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    logger.log_event(attach_statement_context(event));
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::error(code, message), context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::success(code, message), context);
}

/// Log an uncoded event at the given level (info, warning and debug macros)
pub fn log_with_level(level: LogLevel, message: &str, context: Vec<(&str, &str)>) {
    let event = match level {
        LogLevel::Error => LogEvent::error(codes::system::INTERNAL_ERROR, message),
        LogLevel::Warning => LogEvent::warning(message),
        LogLevel::Info => LogEvent::info(message),
        LogLevel::Debug => LogEvent::debug(message),
    };
    emit(event, context);
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
