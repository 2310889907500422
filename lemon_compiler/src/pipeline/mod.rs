mod error;
mod info;
pub mod output;
mod result;
mod stats;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::{CompiledStatement, FunctionOutput, PipelineResult, StatementFailure};
pub use stats::{FunctionStats, PipelineStats};
pub use validation::validate_pipeline;

use crate::config::ProcessingPreferences;
use crate::logging::{self, codes};
use crate::processing::{CompileError, CompileResult, TokenProcessor};
use crate::symbols::{FunctionScope, GlobalsLookup};
use crate::types::DataType;
use crate::unit::{self, BuiltUnit, CompilationUnit, FunctionBody, PreparedStatement, StatementKind};
use std::path::Path;
use std::thread;
use std::time::Instant;

/// How a unit is compiled
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Stop a function at its first failing statement
    pub fail_fast: bool,
    /// Upper bound on worker threads; functions are split into contiguous chunks
    pub max_threads: usize,
    pub processing: ProcessingPreferences,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_threads: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            processing: ProcessingPreferences::default(),
        }
    }
}

impl PipelineOptions {
    pub fn sequential() -> Self {
        Self {
            max_threads: 1,
            ..Self::default()
        }
    }

    fn threads_for(&self, function_count: usize) -> usize {
        self.max_threads.max(1).min(function_count.max(1))
    }
}

/// Read a unit file and compile every function in it
pub fn compile_file(path: &Path, options: &PipelineOptions) -> Result<PipelineResult, PipelineError> {
    let source = path.display().to_string();
    log_info!("Compiling unit file", "file" => &source);

    let unit = unit::load_unit_file(path)?;
    let result = compile_unit(&unit, options)?;
    result.log_success(&source);
    Ok(result)
}

/// Register a unit's symbols, then compile its function bodies
pub fn compile_unit(unit: &CompilationUnit, options: &PipelineOptions) -> Result<PipelineResult, PipelineError> {
    let built = unit::build_unit(unit).map_err(|error| {
        log_error!(error.error_code(), "Failed to build compilation unit",
            "error" => error.to_string()
        );
        error
    })?;
    compile_built_unit(&built, options)
}

/// Compile already registered function bodies
pub fn compile_built_unit(built: &BuiltUnit, options: &PipelineOptions) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let threads = options.threads_for(built.bodies.len());

    log_debug!("Starting unit compilation",
        "functions" => built.bodies.len(),
        "statements" => built.statement_count(),
        "threads" => threads
    );

    let functions = if threads <= 1 {
        built
            .bodies
            .iter()
            .map(|body| compile_function(&built.globals, body, options))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        compile_parallel(&built.globals, &built.bodies, options, threads)?
    };

    let stats = PipelineStats {
        threads_used: threads,
        processing_duration: start_time.elapsed(),
        ..PipelineStats::default()
    };
    Ok(PipelineResult::new(functions, stats))
}

/// Each worker compiles one contiguous chunk; outputs keep unit order
fn compile_parallel(
    globals: &GlobalsLookup,
    bodies: &[FunctionBody],
    options: &PipelineOptions,
    threads: usize,
) -> Result<Vec<FunctionOutput>, PipelineError> {
    let chunk_size = bodies.len().div_ceil(threads);

    thread::scope(|scope| {
        let handles: Vec<_> = bodies
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|body| compile_function(globals, body, options))
                        .collect::<Result<Vec<_>, PipelineError>>()
                })
            })
            .collect();

        let mut functions = Vec::with_capacity(bodies.len());
        for handle in handles {
            let chunk = handle
                .join()
                .map_err(|_| PipelineError::pipeline_error("Function compilation thread panicked"))?;
            functions.extend(chunk?);
        }
        Ok(functions)
    })
}

/// Compile every statement of one function in a fresh scope.
///
/// Failing statements are recorded and compilation continues with the next
/// one, unless the options ask for fail-fast or the error requires halting.
pub fn compile_function(
    globals: &GlobalsLookup,
    body: &FunctionBody,
    options: &PipelineOptions,
) -> Result<FunctionOutput, PipelineError> {
    let definition = globals.function(body.function).ok_or_else(|| {
        PipelineError::pipeline_error(&format!("Function '{}' is not registered", body.name))
    })?;
    let return_type = definition.return_type;
    let signature = format!("{} {}({})", return_type, body.name, definition.signature());

    let mut scope = FunctionScope::for_function(globals, body.function)?;
    let parameter_count = scope.locals().len();

    let mut output = FunctionOutput {
        name: body.name.clone(),
        signature,
        statements: Vec::new(),
        failures: Vec::new(),
        stats: FunctionStats::default(),
        aborted: false,
    };

    {
        let mut processor =
            TokenProcessor::new(globals, &mut scope).with_preferences(options.processing.clone());

        for statement in &body.statements {
            let outcome = logging::with_statement_context(Some(body.name.as_str()), statement.line, || {
                compile_statement(&mut processor, statement, return_type)
            });

            match outcome {
                Ok(Some(compiled)) => {
                    output.stats.statements_compiled += 1;
                    output.stats.tokens_processed += statement.tokens.len();
                    output.statements.push(compiled);
                }
                Ok(None) => {}
                Err(error) => {
                    output.stats.statements_failed += 1;
                    if error.requires_halt() {
                        return Err(PipelineError::halted(&body.name, error));
                    }
                    output.failures.push(StatementFailure {
                        line: statement.line,
                        error,
                    });
                    if options.fail_fast {
                        output.aborted = true;
                        break;
                    }
                }
            }
        }
    }

    output.stats.locals_declared = scope.locals().len().saturating_sub(parameter_count);

    if output.is_success() {
        log_success!(codes::success::FUNCTION_COMPILED, "Function compiled",
            "function" => &body.name,
            "statements" => output.stats.statements_compiled,
            "locals" => output.stats.locals_declared
        );
    }
    Ok(output)
}

/// Run one statement through the processor; block markers only adjust the scope
fn compile_statement(
    processor: &mut TokenProcessor<'_>,
    statement: &PreparedStatement,
    return_type: DataType,
) -> CompileResult<Option<CompiledStatement>> {
    let line = statement.line;
    let mut tokens = statement.tokens.clone();

    match statement.kind {
        StatementKind::Expression => processor.process_tokens(&mut tokens, line, None)?,
        StatementKind::Return => {
            let context = (!return_type.is_void()).then_some(return_type);
            processor.process_tokens(&mut tokens, line, context)?
        }
        StatementKind::ForHeader => processor.process_for_preprocessor(&mut tokens, line)?,
        StatementKind::BlockBegin | StatementKind::BlockEnd => {
            let scope = processor
                .scope_mut()
                .ok_or_else(|| CompileError::internal("Block marker outside of a function", line))?;
            if statement.kind == StatementKind::BlockBegin {
                scope.begin_block();
            } else {
                scope
                    .end_block()
                    .map_err(|error| CompileError::from_symbol_error(error, line))?;
            }
            return Ok(None);
        }
    }

    log_success!(codes::success::STATEMENT_COMPILED, "Statement compiled",
        "roots" => tokens.len()
    );
    Ok(Some(CompiledStatement {
        line,
        kind: statement.kind,
        roots: tokens,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::parse_unit;
    use assert_matches::assert_matches;
    use std::io::Write;

    const UNIT: &str = r#"{
        "defines": [{ "name": "SCALE", "tokens": [{ "constant": 2 }] }],
        "globals": [{ "name": "total", "type": "u32" }],
        "functions": [
            {
                "name": "compute",
                "return_type": "s32",
                "parameters": [
                    { "name": "a", "type": "s32" },
                    { "name": "b", "type": "s32" }
                ],
                "statements": [
                    { "line": 2, "tokens": [
                        { "type": "s32" }, { "identifier": "x" }, { "operator": "=" },
                        { "identifier": "a" }, { "operator": "+" }, { "identifier": "b" },
                        { "operator": "*" }, { "identifier": "SCALE" }
                    ] },
                    { "line": 3, "kind": "block_begin" },
                    { "line": 4, "tokens": [
                        { "type": "u8" }, { "identifier": "t" }, { "operator": "=" }, { "constant": 1 }
                    ] },
                    { "line": 5, "kind": "block_end" },
                    { "line": 6, "tokens": [{ "identifier": "t" }] },
                    { "line": 7, "kind": "return", "tokens": [{ "identifier": "x" }] }
                ]
            },
            {
                "name": "loop_header",
                "statements": [
                    { "line": 10, "kind": "for_header", "tokens": [
                        { "constant": 0 }, { "operator": ";" },
                        { "constant": 1 }, { "operator": "<" }, { "constant": 2 },
                        { "operator": ";" }, { "constant": 3 }
                    ] }
                ]
            }
        ]
    }"#;

    fn compile(options: &PipelineOptions) -> PipelineResult {
        compile_unit(&parse_unit(UNIT).unwrap(), options).unwrap()
    }

    #[test]
    fn test_compile_unit_sequential() {
        let result = compile(&PipelineOptions::sequential());

        let compute = result.function("compute").unwrap();
        assert_eq!(compute.signature, "s32 compute(s32, s32)");
        assert_eq!(
            compute.statements[0].render(),
            "(= x:s32 (+ a:s32 (* b:s32 2:s32)))"
        );
        assert_eq!(compute.statements.last().unwrap().render(), "x:s32");

        // `t` left scope with its block
        assert_eq!(compute.failures.len(), 1);
        assert_eq!(compute.failures[0].line, 6);
        assert_eq!(
            compute.failures[0].error.message(),
            "Unable to resolve identifier: t"
        );
        assert_eq!(compute.stats.locals_declared, 2);

        let header = result.function("loop_header").unwrap();
        assert_eq!(header.statements[0].render(), "0 ; (< 1 2) ; 3");

        assert!(!result.is_success());
        assert_eq!(result.failure_count(), 1);
        assert_eq!(result.stats.functions_compiled, 2);
        assert_eq!(result.stats.statements_failed, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = compile(&PipelineOptions::sequential());
        let parallel = compile(&PipelineOptions {
            max_threads: 4,
            ..PipelineOptions::sequential()
        });

        let render = |result: &PipelineResult| -> Vec<String> {
            result
                .functions
                .iter()
                .flat_map(|f| f.statements.iter().map(|s| s.render()))
                .collect()
        };
        assert_eq!(render(&sequential), render(&parallel));
        assert_eq!(parallel.stats.threads_used, 2);
    }

    #[test]
    fn test_fail_fast_stops_function() {
        let json = r#"{ "functions": [{ "name": "main", "statements": [
            { "line": 1, "tokens": [{ "identifier": "missing" }] },
            { "line": 2, "tokens": [{ "constant": 1 }] }
        ] }] }"#;
        let options = PipelineOptions {
            fail_fast: true,
            ..PipelineOptions::sequential()
        };
        let result = compile_unit(&parse_unit(json).unwrap(), &options).unwrap();
        let main = result.function("main").unwrap();
        assert!(main.aborted);
        assert!(main.statements.is_empty());
    }

    #[test]
    fn test_limit_errors_halt() {
        let mut tokens = Vec::new();
        for _ in 0..=crate::config::compile_time::expression::MAX_TOKENS_PER_STATEMENT {
            tokens.push(r#"{ "constant": 1 }"#);
        }
        let json = format!(
            r#"{{ "functions": [{{ "name": "main", "statements": [{{ "line": 9, "tokens": [{}] }}] }}] }}"#,
            tokens.join(",")
        );
        let error = compile_unit(&parse_unit(&json).unwrap(), &PipelineOptions::sequential()).unwrap_err();
        assert_matches!(error, PipelineError::Halted { ref function, .. } if function == "main");
    }

    #[test]
    fn test_unit_errors_propagate() {
        let json = r#"{ "globals": [{ "name": "g", "type": "u7" }] }"#;
        let error = compile_unit(&parse_unit(json).unwrap(), &PipelineOptions::sequential()).unwrap_err();
        assert_matches!(error, PipelineError::Unit(_));
    }

    #[test]
    fn test_compile_file_and_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(UNIT.as_bytes()).unwrap();

        let result = compile_file(file.path(), &PipelineOptions::sequential()).unwrap();
        let output = PipelineOutput::from_result(&result);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].code, "E050");

        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["functions"][0]["name"], "compute");
        assert_eq!(json["errors"][0]["line"], 6);
    }
}
