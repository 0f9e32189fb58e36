//! A command line interface to the *Vehicle Routing Problem* solver.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs::File;
use std::io::{stderr, stdout, BufReader, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vroom_core::models::solution::SolutionSummary;
use vroom_core::solver::{solve, SolverConfig};
use vroom_core::utils::Environment;
use vroom_core::Error;
use vroom_format::solution::{write_error, write_solution, ComputingTimes};

const INPUT_ARG_NAME: &str = "input";
const OUTPUT_ARG_NAME: &str = "output";
const THREADS_ARG_NAME: &str = "threads";
const EXPLORE_ARG_NAME: &str = "explore";
const LIMIT_ARG_NAME: &str = "limit";
const DISTANCES_ARG_NAME: &str = "report-distances";

/// The exploration level used when `--explore` is omitted. Its mappings below reproduce the
/// library defaults.
const DEFAULT_EXPLORE_LEVEL: usize = 3;

fn main() {
    let matches = get_app().get_matches();
    let out_path = matches.get_one::<String>(OUTPUT_ARG_NAME).cloned();

    match run(&matches) {
        Ok(()) => exit(0),
        Err(err) => {
            report_error(&err, out_path.as_deref());
            exit(err.code());
        }
    }
}

fn get_app() -> Command {
    Command::new("vroom")
        .about("Solves rich Vehicle Routing Problems given in json format")
        .arg(
            Arg::new(INPUT_ARG_NAME)
                .help("Sets the problem file to use")
                .short('i')
                .long(INPUT_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(OUTPUT_ARG_NAME)
                .help("Specifies the solution file, stdout when omitted")
                .short('o')
                .long(OUTPUT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(THREADS_ARG_NAME)
                .help("Specifies amount of solver threads")
                .short('t')
                .long(THREADS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(EXPLORE_ARG_NAME)
                .help("Specifies exploration level in [0, 5], higher searches longer")
                .short('x')
                .long(EXPLORE_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LIMIT_ARG_NAME)
                .help("Specifies a solving time limit in seconds")
                .short('l')
                .long(LIMIT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(DISTANCES_ARG_NAME)
                .help("Reports route distances even without distance matrices")
                .long(DISTANCES_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let loading_started = Instant::now();

    let input_path = matches.get_one::<String>(INPUT_ARG_NAME).expect("required by clap");
    let input_file =
        File::open(input_path).map_err(|err| Error::Input(format!("cannot open '{input_path}': {err}")))?;

    let (input, coords) = vroom_format::problem::read_problem(BufReader::new(input_file))?;
    let input = Arc::new(input);
    let loading = loading_started.elapsed().as_millis() as u64;

    let explore = parse_arg(matches, EXPLORE_ARG_NAME)?.unwrap_or(DEFAULT_EXPLORE_LEVEL);
    let config = SolverConfig {
        heuristics_count: explore_to_heuristics(explore),
        perturbation_passes: explore_to_perturbations(explore),
        thread_count: parse_arg(matches, THREADS_ARG_NAME)?.unwrap_or_else(vroom_core::utils::get_cpus),
        ..SolverConfig::default()
    };

    let mut environment = Environment::new(Arc::new(|message| {
        let _ = writeln!(stderr(), "{message}");
    }));
    if let Some(limit) = parse_arg::<u64>(matches, LIMIT_ARG_NAME)? {
        environment = environment.with_deadline(Instant::now() + Duration::from_secs(limit));
    }

    let solving_started = Instant::now();
    let solution = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| solve(&input, &config, &environment)))
        .map_err(|_| Error::Internal("solver panicked on an invariant violation".to_string()))??;
    let solving = solving_started.elapsed().as_millis() as u64;

    let mut summary = SolutionSummary::new(&input, &solution);
    if matches.get_flag(DISTANCES_ARG_NAME) {
        summary.report_distances = true;
    }

    let computing_times = ComputingTimes { loading, solving, routing: 0 };
    let mut writer = create_write_buffer(matches.get_one::<String>(OUTPUT_ARG_NAME).map(String::as_str))?;
    write_solution(&summary, &coords, computing_times, &mut writer)?;
    writer.flush().map_err(|err| Error::Internal(err.to_string()))?;

    Ok(())
}

/// Writes the error document to the same destination the solution would have gone to, falling
/// back to stderr when even that destination cannot be reached.
fn report_error(error: &Error, out_path: Option<&str>) {
    let written = create_write_buffer(out_path).and_then(|mut writer| {
        write_error(error, &mut writer)?;
        writer.flush().map_err(|err| Error::Internal(err.to_string()))
    });

    if written.is_err() {
        eprintln!("{error}");
    }
}

fn create_write_buffer(out_path: Option<&str>) -> Result<BufWriter<Box<dyn Write>>, Error> {
    match out_path {
        Some(path) => {
            let file =
                File::create(path).map_err(|err| Error::Input(format!("cannot create '{path}': {err}")))?;
            Ok(BufWriter::new(Box::new(file)))
        }
        None => Ok(BufWriter::new(Box::new(stdout()))),
    }
}

fn parse_arg<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Error> {
    matches
        .get_one::<String>(name)
        .map(|value| value.parse::<T>().map_err(|_| Error::Input(format!("invalid value for --{name}"))))
        .transpose()
}

/// Maps the exploration level to the amount of construction seeds. Level three reproduces the
/// [`SolverConfig`] default.
fn explore_to_heuristics(level: usize) -> usize {
    match level {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        4 => 6,
        _ => 8,
    }
}

/// Maps the exploration level to the amount of ruin and recreate passes. Level three reproduces
/// the [`SolverConfig`] default.
fn explore_to_perturbations(level: usize) -> usize {
    match level {
        0 => 0,
        1 | 2 => 1,
        3 => 2,
        4 => 3,
        _ => 4,
    }
}
