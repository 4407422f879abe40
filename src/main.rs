#![allow(non_snake_case)]
use RustedQuad::Utils::logger::{DEFAULT_LOGLEVEL, init_logger, parse_loglevel};
use RustedQuad::numerical::quadrature::{QuadratureRule, integrate};
use RustedQuad::numerical::ram_task::QuadratureTask;
use RustedQuad::numerical::ramlib::{extract_args, ramlib};
use RustedQuad::symbolic::symbolic_engine::Expr;
use RustedQuad::symbolic::symbolic_evaluator::SymbolicEvaluator;
use log::info;
use simplelog::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use strum::IntoEnumIterator;
use tabled::{builder::Builder, settings::Style};

const USAGE: &str = "usage:
  rustedquad <expression> <var> <lower_bounds> <upper_bounds> <number_of_steps> <function_index>
             [--all] [--log <level>] [--log-file <file>]
  rustedquad --task <file> [--all] [--log <level>] [--log-file <file>]
function index: 0 = left, 1 = middle, 2 = right riemann sum, 3 = trapezoid rule
--log and --log-file override the logging section of a task file";

#[derive(Debug, Default)]
struct CliOptions {
    positional: Vec<String>,
    task: Option<PathBuf>,
    all: bool,
    loglevel: Option<String>,
    log_file: Option<String>,
}

fn parse_cli(mut args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--all" => options.all = true,
            "--task" => options.task = Some(args.next().ok_or("--task needs a file")?.into()),
            "--log" => options.loglevel = Some(args.next().ok_or("--log needs a level")?),
            "--log-file" => {
                options.log_file = Some(args.next().ok_or("--log-file needs a file")?)
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => options.positional.push(arg),
        }
    }
    if options.task.is_some() && !options.positional.is_empty() {
        return Err(format!(
            "--task takes no expression arguments, got {}\n{}",
            options.positional.join(" "),
            USAGE
        ));
    }
    Ok(options)
}

/// ramlib arguments and logger settings for one run
#[derive(Debug)]
struct Job {
    args: Vec<Expr>,
    loglevel: LevelFilter,
    log_file: Option<String>,
}

/// Collects the job from a task file or the positional arguments; flags win over the task.
fn resolve_job(options: &CliOptions) -> Result<Job, String> {
    let mut job = match &options.task {
        Some(path) => {
            let task = QuadratureTask::from_file(path)?;
            Job {
                args: task.args,
                loglevel: task.loglevel,
                log_file: task.log_file,
            }
        }
        None => {
            let args = options
                .positional
                .iter()
                .map(|s| {
                    Expr::parse_expression(s).map_err(|e| format!("Invalid argument: {}", e))
                })
                .collect::<Result<Vec<Expr>, String>>()?;
            Job {
                args,
                loglevel: DEFAULT_LOGLEVEL,
                log_file: None,
            }
        }
    };
    if let Some(level) = &options.loglevel {
        job.loglevel = parse_loglevel(level)?;
    }
    if let Some(file) = &options.log_file {
        job.log_file = Some(file.clone());
    }
    Ok(job)
}

/// every rule on the same arguments, as a table
fn comparison_table(args: &[Expr], evaluator: &SymbolicEvaluator) -> Result<String, String> {
    let ram_args = extract_args(args, evaluator).map_err(|e| e.to_string())?;
    let mut builder = Builder::default();
    builder.push_record(["rule", "index", "result"]);
    for rule in QuadratureRule::iter() {
        let result = integrate(
            evaluator,
            ram_args.expression,
            ram_args.var,
            ram_args.lower_bounds,
            ram_args.upper_bounds,
            ram_args.numsteps,
            rule,
        )
        .map(|value| value.to_string())
        .unwrap_or_else(|e| e.to_string());
        builder.push_record([rule.to_string(), rule.index().to_string(), result]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    Ok(table.to_string())
}

/// Runs one job and writes its output to `out`. Nothing is written unless every step succeeds.
fn run(options: &CliOptions, out: &mut impl Write) -> Result<(), String> {
    let job = resolve_job(options)?;
    init_logger(job.loglevel, job.log_file.as_deref())?;
    info!("Program started with {} arguments", job.args.len());

    let evaluator = SymbolicEvaluator::new();
    let result = ramlib(&job.args, &evaluator).map_err(|e| e.to_string())?;
    let table = if options.all {
        Some(comparison_table(&job.args, &evaluator)?)
    } else {
        None
    };
    writeln!(out, "{}", result).map_err(|e| e.to_string())?;
    if let Some(table) = table {
        writeln!(out, "{}", table).map_err(|e| e.to_string())?;
    }
    info!("Program ended");
    Ok(())
}

fn main() -> ExitCode {
    let outcome = parse_cli(std::env::args().skip(1))
        .and_then(|options| run(&options, &mut std::io::stdout()));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{}", msg);
            ExitCode::FAILURE
        }
    }
}
