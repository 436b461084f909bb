//! hydro-validate CLI
//!
//! Validates an exported model snapshot before it is handed to the
//! computational core.

use anyhow::{bail, Context, Result};
use hydro_validate::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options of the `check` command.
#[derive(Debug, Default)]
struct CheckOptions {
    model: PathBuf,
    settings: Option<PathBuf>,
    min_segment_length: Option<f64>,
    parallel: bool,
    json: bool,
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hydro-validate");

    if args.len() < 2 {
        print_usage(program);
        return ExitCode::from(2);
    }

    match args[1].as_str() {
        "check" => match parse_check(&args[2..]) {
            Ok(options) => {
                init_logging(options.verbose);
                match check(&options) {
                    Ok(true) => ExitCode::SUCCESS,
                    Ok(false) => ExitCode::FAILURE,
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        ExitCode::from(2)
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                print_usage(program);
                ExitCode::from(2)
            }
        },
        "help" | "--help" | "-h" => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("{} {}", hydro_validate::NAME, hydro_validate::VERSION);
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            ExitCode::from(2)
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  check <model.json> [options]  Validate a model snapshot");
    println!("  help                          Show this help message");
    println!();
    println!("Check options:");
    println!("  --settings <file.toml>      Load validation settings from a TOML file");
    println!("  --min-segment-length <x>    Short segment threshold (default: 1.0)");
    println!("  --parallel                  Run validators in parallel");
    println!("  --json                      Print the report as JSON");
    println!("  --verbose                   Log validator progress");
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn parse_check(args: &[String]) -> Result<CheckOptions> {
    let mut options = CheckOptions::default();
    let mut model = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--settings" => {
                let value = args.get(i + 1).context("--settings needs a file")?;
                options.settings = Some(PathBuf::from(value));
                i += 2;
            }
            "--min-segment-length" => {
                let value = args.get(i + 1).context("--min-segment-length needs a value")?;
                let length = value
                    .parse()
                    .with_context(|| format!("invalid segment length '{}'", value))?;
                options.min_segment_length = Some(length);
                i += 2;
            }
            "--parallel" => {
                options.parallel = true;
                i += 1;
            }
            "--json" => {
                options.json = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                options.verbose = true;
                i += 1;
            }
            flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
            path => {
                if model.is_some() {
                    bail!("only one model file can be checked at a time");
                }
                model = Some(PathBuf::from(path));
                i += 1;
            }
        }
    }

    options.model = model.context("missing model file")?;
    Ok(options)
}

/// Load settings, overlaying the command line options.
fn load_settings(options: &CheckOptions) -> Result<ValidationSettings> {
    let mut settings = match &options.settings {
        Some(path) => ValidationSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => ValidationSettings::default(),
    };
    if let Some(length) = options.min_segment_length {
        settings = settings.with_min_segment_length(length);
    }
    if options.parallel {
        settings = settings.with_parallel(true);
    }
    if settings.model_directory.is_none() {
        if let Some(directory) = options.model.parent().filter(|d| !d.as_os_str().is_empty()) {
            settings = settings.with_model_directory(directory);
        }
    }
    Ok(settings)
}

fn load_model(path: &Path) -> Result<HydroModel> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model {}", path.display()))?;
    HydroModel::from_json(&text).with_context(|| format!("failed to parse model {}", path.display()))
}

/// Run the check; returns whether the model is free of errors.
fn check(options: &CheckOptions) -> Result<bool> {
    let settings = load_settings(options)?;
    let model = load_model(&options.model)?;

    let report = ValidationPipeline::default_pipeline()
        .validate(Some(&model), &settings)
        .context("validation could not start")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, 0);
        println!();
        println!("{}", report.summary());
    }

    Ok(!report.has_errors())
}

fn print_report(report: &ValidationReport, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = match report.severity() {
        None => "✓",
        Some(ValidationSeverity::Info) => "ℹ",
        Some(ValidationSeverity::Warning) => "⚠",
        Some(ValidationSeverity::Error) => "✗",
    };
    println!("{}{} {}", indent, marker, report.name());

    for issue in report.issues() {
        println!("{}    [{}] {}", indent, issue.severity(), issue.message());
    }
    for child in report.sub_reports() {
        print_report(child, depth + 1);
    }
}
