// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod pipeline;
pub mod processing;
pub mod symbols;
pub mod tokens;
pub mod types;
pub mod unit;

// Re-export key types for library consumers
pub use pipeline::{PipelineError, PipelineOptions, PipelineResult};
pub use processing::{CompileError, CompileResult, TokenProcessor};
pub use symbols::{FunctionScope, GlobalsLookup};
pub use tokens::{Operator, Token, TokenList};
pub use types::DataType;

// Re-export pipeline output for JSON consumers
pub use pipeline::output::PipelineOutput;
