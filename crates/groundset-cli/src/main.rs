//! Grounding-set analysis CLI.
//!
//! Provides the `groundset` binary with one subcommand per analysis of a
//! dictionary definition graph: `mandatory`, `verify`, `greedy`,
//! `rank-search` and `sweep`. Results are JSON on stdout or in a file; logs
//! go to stderr.
//!
//! Exit codes: 0 = success, 1 = invalid grounding set or bad arguments,
//! 2 = malformed graph or grounding file, 3 = I/O error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use groundset_core::{DanglingWords, GraphError};
use groundset_io::IoError;
use groundset_search::greedy::{self, Backoff, GreedyConfig, InitialGrounding};
use groundset_search::sweep::{self, SweepConfig};
use groundset_search::{mandatory_set, mandatory_words, rank_search, verify_words, FrontierOrder, SearchError};

const DEFAULT_INPUT: &str = "data/graph/incoming_adj_list.json";

/// Grounding-set analysis of dictionary definition graphs.
#[derive(Parser)]
#[command(name = "groundset", about = "Grounding-set analysis of dictionary definition graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Treat defining words missing from the key set as undefined words
    /// instead of rejecting the graph.
    #[arg(long, global = true)]
    implicit_words: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct InputArgs {
    /// Incoming adjacency list: word -> words used in its definition.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input_path: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List mandatory words and the rules that make them mandatory.
    Mandatory {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON file, or `-` for tab-separated lines on stdout.
        #[arg(long, default_value = "-")]
        output_path: PathBuf,
    },

    /// Check whether a grounding set reaches every word.
    Verify {
        #[command(flatten)]
        input: InputArgs,

        /// JSON file with a `grounding_set` word list.
        #[arg(long)]
        grounding_file: PathBuf,

        /// Also write the verification report to this JSON file.
        #[arg(long)]
        output_path: Option<PathBuf>,
    },

    /// Build a grounding set greedily.
    Greedy {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON file, or `-` for stdout.
        #[arg(long, default_value = "data/experiments/greedy_deductive_grounding.json")]
        output_path: PathBuf,

        /// Starting grounding set.
        #[arg(long, value_enum, default_value_t = InitialArg::Mandatory)]
        initial_grounding: InitialArg,

        /// Frontier order.
        #[arg(long, value_enum, default_value_t = StrategyArg::Queue)]
        strategy: StrategyArg,

        /// Word to force when propagation stalls.
        #[arg(long, value_enum, default_value_t = BackoffArg::MaxOutDegree)]
        backoff: BackoffArg,

        #[arg(long, default_value_t = 42)]
        random_seed: u64,
    },

    /// Find the smallest out-degree prefix that grounds the graph.
    RankSearch {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON file, or `-` for stdout.
        #[arg(long, default_value = "data/experiments/greedy_outdegree_grounding.json")]
        output_path: PathBuf,
    },

    /// Estimate how often random word sets of each size ground the graph.
    Sweep {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON file, or `-` for stdout.
        #[arg(long, default_value = "data/experiments/random_grounding.json")]
        output_path: PathBuf,

        /// Smallest number of random words added to the mandatory set.
        #[arg(long, default_value_t = 0)]
        min_k: usize,

        /// Largest number of random words (default: every non-mandatory word).
        #[arg(long)]
        max_k: Option<usize>,

        #[arg(long, default_value_t = 1000)]
        step_k: usize,

        /// Random sets drawn per size.
        #[arg(long, default_value_t = 100)]
        trials: usize,

        /// Bootstrap resamples per confidence interval.
        #[arg(long, default_value_t = 1000)]
        resamples: usize,

        #[arg(long, default_value_t = 42)]
        random_seed: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InitialArg {
    Empty,
    Mandatory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Queue,
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackoffArg {
    Random,
    #[value(name = "max_out_degree")]
    MaxOutDegree,
}

impl From<InitialArg> for InitialGrounding {
    fn from(arg: InitialArg) -> Self {
        match arg {
            InitialArg::Empty => InitialGrounding::Empty,
            InitialArg::Mandatory => InitialGrounding::Mandatory,
        }
    }
}

impl From<StrategyArg> for FrontierOrder {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Queue => FrontierOrder::Queue,
            StrategyArg::Stack => FrontierOrder::Stack,
        }
    }
}

impl From<BackoffArg> for Backoff {
    fn from(arg: BackoffArg) -> Self {
        match arg {
            BackoffArg::Random => Backoff::Random,
            BackoffArg::MaxOutDegree => Backoff::MaxOutDegree,
        }
    }
}

/// A subcommand failure, mapped to an exit code.
#[derive(Debug)]
enum Failure {
    Io(IoError),
    Search(SearchError),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Io(e) if e.is_malformed_input() => 2,
            Failure::Io(_) => 3,
            Failure::Search(SearchError::Graph(GraphError::InvalidGroundingSet { .. })) => 1,
            Failure::Search(SearchError::Graph(_)) => 2,
            Failure::Search(_) => 1,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Io(e) => write!(f, "{e}"),
            Failure::Search(e) => write!(f, "{e}"),
        }
    }
}

impl From<IoError> for Failure {
    fn from(e: IoError) -> Self {
        Failure::Io(e)
    }
}

impl From<SearchError> for Failure {
    fn from(e: SearchError) -> Self {
        Failure::Search(e)
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);
    let dangling = if cli.implicit_words {
        DanglingWords::Insert
    } else {
        DanglingWords::Reject
    };

    let exit_code = match execute(cli.command, dangling) {
        Ok(code) => code,
        Err(failure) => {
            eprintln!("Error: {failure}");
            failure.exit_code()
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one subcommand, returning its exit code.
fn execute(command: Commands, dangling: DanglingWords) -> Result<i32, Failure> {
    match command {
        Commands::Mandatory { input, output_path } => run_mandatory(&input.input_path, dangling, &output_path),
        Commands::Verify {
            input,
            grounding_file,
            output_path,
        } => run_verify(&input.input_path, dangling, &grounding_file, output_path.as_deref()),
        Commands::Greedy {
            input,
            output_path,
            initial_grounding,
            strategy,
            backoff,
            random_seed,
        } => {
            let config = GreedyConfig {
                initial: initial_grounding.into(),
                order: strategy.into(),
                backoff: backoff.into(),
            };
            run_greedy(&input.input_path, dangling, &output_path, &config, random_seed)
        }
        Commands::RankSearch { input, output_path } => run_rank_search(&input.input_path, dangling, &output_path),
        Commands::Sweep {
            input,
            output_path,
            min_k,
            max_k,
            step_k,
            trials,
            resamples,
            random_seed,
        } => run_sweep(
            &input.input_path,
            dangling,
            &output_path,
            SweepRange { min_k, max_k, step_k },
            trials,
            resamples,
            random_seed,
        ),
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Writes `value` as JSON to `path`, or to stdout for `-`.
fn emit<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    if is_stdout(path) {
        let json = groundset_io::to_json_string(value).map_err(|source| IoError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        println!("{json}");
        Ok(())
    } else {
        groundset_io::save_json(path, value)
    }
}

fn run_mandatory(input: &Path, dangling: DanglingWords, output_path: &Path) -> Result<i32, Failure> {
    let graph = groundset_io::load_graph(input, dangling)?;
    let words = mandatory_words(&graph);
    tracing::info!(mandatory = words.len(), total = graph.word_count(), "found mandatory words");

    if is_stdout(output_path) {
        for entry in &words {
            let reasons: Vec<&str> = entry.reasons.iter().map(|r| r.as_str()).collect();
            println!("{}\t{}", entry.word, reasons.join(";"));
        }
    } else {
        groundset_io::save_json(output_path, &words)?;
    }
    Ok(0)
}

/// Exit code 1 when the set is readable but does not ground the graph.
fn run_verify(
    input: &Path,
    dangling: DanglingWords,
    grounding_file: &Path,
    output_path: Option<&Path>,
) -> Result<i32, Failure> {
    let graph = groundset_io::load_graph(input, dangling)?;
    let words = groundset_io::load_grounding_file(grounding_file)?;
    let report = verify_words(&graph, words.iter().map(String::as_str))?;

    if let Some(path) = output_path {
        emit(path, &report)?;
    }

    if report.valid {
        println!(
            "valid: {} grounding words reach all {} words",
            report.grounding_set_size, report.total_nodes
        );
        Ok(0)
    } else {
        println!(
            "invalid: closure reaches {} of {} words; {} missing:",
            report.closure_size,
            report.total_nodes,
            report.missing.len()
        );
        for word in &report.missing {
            println!("{word}");
        }
        Ok(1)
    }
}

fn run_greedy(
    input: &Path,
    dangling: DanglingWords,
    output_path: &Path,
    config: &GreedyConfig,
    random_seed: u64,
) -> Result<i32, Failure> {
    let graph = groundset_io::load_graph(input, dangling)?;
    let mut rng = ChaCha8Rng::seed_from_u64(random_seed);
    let result = greedy::build(&graph, config, &mut rng)?;
    emit(output_path, &result)?;
    Ok(0)
}

fn run_rank_search(input: &Path, dangling: DanglingWords, output_path: &Path) -> Result<i32, Failure> {
    let graph = groundset_io::load_graph(input, dangling)?;
    let mandatory = mandatory_set(&graph);
    let result = rank_search::search(&graph, &mandatory)?;
    emit(output_path, &result)?;
    Ok(0)
}

/// Sample sizes requested for a sweep.
#[derive(Debug, Clone, Copy)]
struct SweepRange {
    min_k: usize,
    max_k: Option<usize>,
    step_k: usize,
}

fn run_sweep(
    input: &Path,
    dangling: DanglingWords,
    output_path: &Path,
    range: SweepRange,
    trials: usize,
    resamples: usize,
    random_seed: u64,
) -> Result<i32, Failure> {
    let graph = groundset_io::load_graph(input, dangling)?;
    let mandatory = mandatory_set(&graph);
    let max_k = range
        .max_k
        .unwrap_or_else(|| graph.word_count() - mandatory.len());
    let config = SweepConfig {
        ks: sweep::descending_ks(range.min_k, max_k, range.step_k),
        trials,
        resamples,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(random_seed);
    let result = sweep::sweep(&graph, &mandatory, &config, &mut rng)?;
    emit(output_path, &result)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;

    const SCENARIO: &str = r#"{"a": [], "b": ["a"], "c": ["a", "b"], "d": ["d"]}"#;

    fn scenario_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("incoming_adj_list.json");
        fs::write(&path, SCENARIO).unwrap();
        path
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn greedy_defaults_follow_the_reference_scripts() {
        let cli = Cli::try_parse_from(["groundset", "greedy"]).unwrap();
        match cli.command {
            Commands::Greedy {
                input,
                output_path,
                initial_grounding,
                strategy,
                backoff,
                random_seed,
            } => {
                assert_eq!(input.input_path, PathBuf::from(DEFAULT_INPUT));
                assert_eq!(
                    output_path,
                    PathBuf::from("data/experiments/greedy_deductive_grounding.json")
                );
                assert_eq!(initial_grounding, InitialArg::Mandatory);
                assert_eq!(strategy, StrategyArg::Queue);
                assert_eq!(backoff, BackoffArg::MaxOutDegree);
                assert_eq!(random_seed, 42);
            }
            _ => panic!("expected greedy"),
        }
    }

    #[test]
    fn snake_case_choices_parse() {
        let cli = Cli::try_parse_from([
            "groundset",
            "greedy",
            "--backoff",
            "max_out_degree",
            "--strategy",
            "stack",
            "--initial-grounding",
            "empty",
            "--implicit-words",
            "-vv",
        ])
        .unwrap();
        assert!(cli.implicit_words);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Greedy {
                backoff: BackoffArg::MaxOutDegree,
                strategy: StrategyArg::Stack,
                initial_grounding: InitialArg::Empty,
                ..
            }
        ));
    }

    #[test]
    fn verify_requires_a_grounding_file() {
        assert!(Cli::try_parse_from(["groundset", "verify"]).is_err());
    }

    #[test]
    fn greedy_writes_the_result_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let output = dir.path().join("out").join("greedy.json");
        let code = run_greedy(&input, DanglingWords::Reject, &output, &GreedyConfig::default(), 42).unwrap();
        assert_eq!(code, 0);

        let json = read_json(&output);
        assert_eq!(json["grounding_set"], serde_json::json!(["a", "d"]));
        assert_eq!(json["extra_grounding_set"], serde_json::json!([]));
        assert_eq!(json["backoff"], "max_out_degree");
    }

    #[test]
    fn verify_round_trips_a_greedy_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let output = dir.path().join("greedy.json");
        run_greedy(&input, DanglingWords::Reject, &output, &GreedyConfig::default(), 42).unwrap();

        let code = run_verify(&input, DanglingWords::Reject, &output, None).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn verify_reports_an_incomplete_set() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let grounding = dir.path().join("grounding.json");
        fs::write(&grounding, r#"{"grounding_set": ["a"]}"#).unwrap();
        let report = dir.path().join("report.json");

        let code = run_verify(&input, DanglingWords::Reject, &grounding, Some(report.as_path())).unwrap();
        assert_eq!(code, 1);
        assert_eq!(read_json(&report)["missing"], serde_json::json!(["d"]));
    }

    #[test]
    fn unknown_grounding_words_exit_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let grounding = dir.path().join("grounding.json");
        fs::write(&grounding, r#"{"grounding_set": ["a", "zzz"]}"#).unwrap();

        let failure = run_verify(&input, DanglingWords::Reject, &grounding, None).unwrap_err();
        assert_eq!(failure.exit_code(), 1);
        assert!(failure.to_string().contains("zzz"));
    }

    #[test]
    fn malformed_and_missing_inputs_map_to_distinct_codes() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"a": ["missing"]}"#).unwrap();
        let out = dir.path().join("out.json");

        let failure = run_rank_search(&bad, DanglingWords::Reject, &out).unwrap_err();
        assert_eq!(failure.exit_code(), 2);

        let failure = run_rank_search(&dir.path().join("absent.json"), DanglingWords::Reject, &out).unwrap_err();
        assert_eq!(failure.exit_code(), 3);

        assert_eq!(run_rank_search(&bad, DanglingWords::Insert, &out).unwrap(), 0);
    }

    #[test]
    fn empty_graph_is_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.json");
        fs::write(&empty, "{}").unwrap();
        let failure = run_greedy(
            &empty,
            DanglingWords::Reject,
            &dir.path().join("out.json"),
            &GreedyConfig::default(),
            0,
        )
        .unwrap_err();
        assert_eq!(failure.exit_code(), 2);
    }

    #[test]
    fn sweep_defaults_to_every_candidate_size() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let output = dir.path().join("sweep.json");
        let range = SweepRange {
            min_k: 0,
            max_k: None,
            step_k: 1,
        };
        run_sweep(&input, DanglingWords::Reject, &output, range, 5, 50, 42).unwrap();

        let json = read_json(&output);
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert_eq!(json["0"]["grounding_set_size"], 2);
        assert_eq!(json["2"]["success_rate"], 1.0);
    }

    #[test]
    fn oversized_sweep_is_a_bad_argument() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let range = SweepRange {
            min_k: 0,
            max_k: Some(10),
            step_k: 5,
        };
        let failure = run_sweep(&input, DanglingWords::Reject, &dir.path().join("s.json"), range, 5, 50, 1)
            .unwrap_err();
        assert_eq!(failure.exit_code(), 1);
    }

    #[test]
    fn mandatory_writes_reasons() {
        let dir = tempfile::tempdir().unwrap();
        let input = scenario_file(&dir);
        let output = dir.path().join("mandatory.json");
        run_mandatory(&input, DanglingWords::Reject, &output).unwrap();
        assert_eq!(
            read_json(&output),
            serde_json::json!([
                {"word": "a", "reasons": ["no_predecessors"]},
                {"word": "d", "reasons": ["self_loop"]},
            ])
        );
    }
}
