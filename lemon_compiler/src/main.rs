use lemon_compiler::config::RuntimeConfig;
use lemon_compiler::{logging, pipeline};
use std::env;
use std::path::Path;

/// Command line options after the unit path
#[derive(Debug, Default)]
struct CliOptions {
    json: bool,
    fail_fast: bool,
    threads: Option<usize>,
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <unit.json> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let cli = parse_options(&args[2..]);

    let runtime = match &cli.config {
        Some(path) => RuntimeConfig::from_toml_file(Path::new(path))?,
        None => RuntimeConfig::default(),
    };
    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let mut options = pipeline::PipelineOptions {
        fail_fast: cli.fail_fast,
        processing: runtime.processing,
        ..pipeline::PipelineOptions::default()
    };
    if let Some(threads) = cli.threads {
        options.max_threads = threads;
    }

    let unit_path = Path::new(&args[1]);
    if !unit_path.is_file() {
        eprintln!("Error: Input must be a compilation unit file (.json)");
        eprintln!("  File: {}", unit_path.display());
        std::process::exit(1);
    }

    match pipeline::compile_file(unit_path, &options) {
        Ok(result) => {
            if cli.json {
                let output = lemon_compiler::PipelineOutput::from_result(&result);
                println!("{}", output.to_json()?);
            } else {
                print_result(&result);
            }

            if !result.is_success() {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_detailed_error(&error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Lemon expression compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Resolves, reduces and types the statements of a compilation unit");
    println!();
    println!("USAGE:");
    println!("    {} <unit.json> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print the compiled unit as JSON");
    println!("    --fail-fast         Stop a function at its first failing statement");
    println!("    --sequential        Compile functions on one thread");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --config FILE       Read runtime preferences from a TOML file");
    println!();
    println!("OUTPUT:");
    println!("    One S-expression tree per statement, grouped by function");
    println!("    Errors as `function:line: [code] message`");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                options.json = true;
            }
            "--fail-fast" => {
                options.fail_fast = true;
            }
            "--sequential" => {
                options.threads = Some(1);
            }
            "--threads" => {
                if i + 1 < args.len() {
                    if let Ok(threads) = args[i + 1].parse::<usize>() {
                        options.threads = Some(threads.clamp(1, 32));
                    } else {
                        eprintln!(
                            "Warning: Invalid thread count '{}', using default",
                            args[i + 1]
                        );
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

fn print_result(result: &pipeline::PipelineResult) {
    for function in &result.functions {
        println!("{}", function.signature);
        for statement in &function.statements {
            println!("  {:>4}: {}", statement.line, statement.render());
        }
        if function.aborted {
            println!("  (stopped after first error)");
        }
    }

    if result.failure_count() > 0 {
        eprintln!("\nErrors:");
        for (function, failure) in result.failures() {
            eprintln!(
                "  {}:{}: [{}] {}",
                function,
                failure.line,
                failure.error.error_code(),
                failure.error.message()
            );
        }
    }

    let stats = &result.stats;
    println!();
    println!("Summary:");
    println!("  Functions: {}", stats.functions_compiled);
    println!(
        "  Statements: {} compiled, {} failed ({:.1}% success)",
        stats.statements_compiled,
        stats.statements_failed,
        stats.success_rate() * 100.0
    );
    println!("  Locals declared: {}", stats.locals_declared);
    println!(
        "  Time: {:.2}ms on {} thread(s)",
        stats.processing_duration.as_secs_f64() * 1000.0,
        stats.threads_used
    );
}

fn print_detailed_error(error: &pipeline::PipelineError) {
    match error {
        pipeline::PipelineError::Unit(ref unit_err) => {
            eprintln!("Unit loading failed:");
            eprintln!("  {}", unit_err);
        }
        pipeline::PipelineError::Symbols(ref symbol_err) => {
            eprintln!("Symbol setup failed:");
            eprintln!("  {}", symbol_err);
        }
        pipeline::PipelineError::Halted { function, error } => {
            eprintln!("Compilation halted in '{}':", function);
            eprintln!("  [{}] {}", error.error_code(), error);
        }
        pipeline::PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
    eprintln!(
        "  Recommended action: {}",
        logging::codes::get_action(error.error_code().as_str())
    );
}
