//! Compilation units
//!
//! A unit is a JSON document listing defines, global variables and functions
//! whose statements are already split into raw lexer tokens:
//!
//! ```json
//! {
//!   "globals": [{ "name": "counter", "type": "u32" }],
//!   "functions": [{
//!     "name": "main",
//!     "parameters": [{ "name": "a", "type": "s32" }],
//!     "statements": [
//!       { "line": 3, "tokens": [{ "type": "s32" }, { "identifier": "x" },
//!                               { "operator": "=" }, { "identifier": "a" }] }
//!     ]
//!   }]
//! }
//! ```

mod builder;
mod error;
mod model;

pub use builder::{
    convert_token, convert_tokens, parse_type, BuiltUnit, FunctionBody, PreparedStatement,
    UnitBuilder,
};
pub use error::{UnitError, UnitResult};
pub use model::{
    CompilationUnit, RawToken, StatementKind, UnitDefine, UnitFunction, UnitStatement,
    UnitVariable,
};

use std::fs;
use std::path::Path;

/// Parse a unit from its JSON text
pub fn parse_unit(json: &str) -> UnitResult<CompilationUnit> {
    serde_json::from_str(json).map_err(|error| {
        let error = UnitError::parse_error(&error);
        log_error!(error.error_code(), "Failed to parse compilation unit",
            "error" => error.to_string()
        );
        error
    })
}

/// Read and parse a unit file
pub fn load_unit_file(path: &Path) -> UnitResult<CompilationUnit> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|error| {
        let error = UnitError::io_error(&display, &error);
        log_error!(error.error_code(), "Failed to read compilation unit",
            "file" => &display
        );
        error
    })?;

    log_debug!("Unit file read", "file" => &display, "bytes" => content.len());
    parse_unit(&content)
}

/// Register a parsed unit's symbols and prepare its function bodies
pub fn build_unit(unit: &CompilationUnit) -> UnitResult<BuiltUnit> {
    UnitBuilder::new().build(unit)
}
