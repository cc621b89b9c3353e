//! Unit tests for the CLI commands.

use super::commands::{ProgressLog, run_command};
use super::test_helpers::{create_cloud_file, run_command_for, run_expecting_error, temp_dir};
use super::{Cli, CliError, Command, PoolArg, derive_output_path, render_summary, run_cli};

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use voxclust_core::{ClusterError, PoolStrategy, Progress, ProgressObserver};
use voxclust_providers_csv::CsvProviderError;
use voxclust_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CLOUD: &str = "x,y,z\n0,0,0\n1,1,0\n10,0,0\n2,2,0\n";

#[rstest]
#[case::relative("scan.csv", "clusters_scan.csv")]
#[case::nested("data/in/scan.csv", "data/in/clusters_scan.csv")]
#[case::no_extension("/tmp/points", "/tmp/clusters_points")]
fn derive_output_path_prefixes_file_name(#[case] input: &str, #[case] expected: &str) {
    let output = derive_output_path(Path::new(input)).expect("input has a file name");
    assert_eq!(output, Path::new(expected));
}

#[rstest]
#[case::empty("")]
#[case::root("/")]
#[case::parent("data/..")]
fn derive_output_path_rejects_paths_without_names(#[case] input: &str) {
    let err = derive_output_path(Path::new(input)).expect_err("no file name");
    assert!(matches!(err, CliError::OutputPath { .. }));
}

#[rstest]
fn clap_parses_defaults() {
    let cli = Cli::try_parse_from(["voxclust", "run", "cloud.csv"]).expect("arguments parse");
    let Command::Run(run) = cli.command;
    assert_eq!(run.path, Path::new("cloud.csv"));
    assert!((run.threshold - std::f64::consts::SQRT_2).abs() < f64::EPSILON);
    assert_eq!(run.pool, PoolArg::Auto);
    assert_eq!(run.seed, None);
    assert!(!run.no_header);
    assert_eq!(run.output, None);
    assert_eq!(run.progress_every, None);
}

#[rstest]
fn clap_parses_every_flag() {
    let cli = Cli::try_parse_from([
        "voxclust",
        "run",
        "cloud.csv",
        "--threshold",
        "2.5",
        "--pool",
        "linear",
        "--seed",
        "9",
        "--no-header",
        "--output",
        "out.csv",
        "--progress-every",
        "100",
    ])
    .expect("arguments parse");
    let Command::Run(run) = cli.command;
    assert!((run.threshold - 2.5).abs() < f64::EPSILON);
    assert_eq!(PoolStrategy::from(run.pool), PoolStrategy::Linear);
    assert_eq!(run.seed, Some(9));
    assert!(run.no_header);
    assert_eq!(run.output.as_deref(), Some(Path::new("out.csv")));
    assert_eq!(run.progress_every, NonZeroUsize::new(100));
}

#[rstest]
#[case::zero_progress(&["voxclust", "run", "a.csv", "--progress-every", "0"])]
#[case::unknown_pool(&["voxclust", "run", "a.csv", "--pool", "kd"])]
#[case::missing_path(&["voxclust", "run"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_writes_grouped_clusters_beside_input(
    #[values(PoolArg::Auto, PoolArg::Linear, PoolArg::Grid)] pool: PoolArg,
) -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", CLOUD)?;
    let mut command = run_command_for(&path);
    command.pool = pool;

    let summary = run_cli(Cli {
        command: Command::Run(command),
    })?;

    assert_eq!(summary.data_source, "cloud.csv");
    assert_eq!(summary.output, dir.path().join("clusters_cloud.csv"));
    assert_eq!(summary.partition.cluster_count(), 2);
    assert_eq!(summary.written.cluster_sizes, vec![3, 1]);
    let written = fs::read_to_string(&summary.output)?;
    assert_eq!(written, "0,0,0,0\n0,1,1,0\n0,2,2,0\n1,10,0,0\n");
    Ok(())
}

#[rstest]
fn run_honours_threshold_header_and_output() -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", "0,0,0\n3,0,0\n6,0,0\n")?;
    let output = dir.path().join("custom.csv");
    let mut command = run_command_for(&path);
    command.threshold = 3.0;
    command.no_header = true;
    command.output = Some(output.clone());
    command.seed = Some(5);

    let summary = run_command(command)?;
    assert_eq!(summary.output, output);
    assert_eq!(summary.partition.cluster_count(), 1);
    assert_eq!(summary.written.total(), 3);
    Ok(())
}

#[rstest]
fn run_reports_dropped_records() -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", "x,y,z\n0,0,0\nbroken\n1,0,0\n")?;
    let summary = run_command(run_command_for(&path))?;
    assert_eq!(summary.dropped_records, 1);
    assert_eq!(summary.partition.len(), 2);

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert!(String::from_utf8(buffer)?.ends_with("dropped records 1\n"));
    Ok(())
}

#[rstest]
fn run_rejects_invalid_threshold() {
    let dir = temp_dir();
    let mut command = run_command_for(&dir.path().join("never-read.csv"));
    command.threshold = -1.0;
    let err = run_expecting_error(command, "negative thresholds must fail");
    assert!(matches!(err, CliError::Core(ClusterError::InvalidThreshold { .. })));
    assert_eq!(err.code(), Some("VOXCLUST_INVALID_THRESHOLD"));
}

#[rstest]
fn run_reports_missing_input() {
    let dir = temp_dir();
    let err = run_expecting_error(
        run_command_for(&dir.path().join("absent.csv")),
        "missing input must fail",
    );
    assert!(matches!(err, CliError::Csv(CsvProviderError::Io { .. })));
    assert_eq!(err.code(), None);
}

#[rstest]
fn run_rejects_input_without_records() -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", "x,y,z\n")?;
    let err = run_expecting_error(run_command_for(&path), "empty input must fail");
    assert!(matches!(err, CliError::Csv(CsvProviderError::EmptyInput { .. })));
    assert!(!dir.path().join("clusters_cloud.csv").exists());
    Ok(())
}

#[rstest]
fn render_summary_reports_every_group() -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", CLOUD)?;
    let summary = run_command(run_command_for(&path))?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    let lines: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(
        lines,
        vec![
            "cluster -1 contains 0 elements",
            "cluster 0 contains 3 elements",
            "cluster 1 contains 1 elements",
            "total elements 4",
            "dropped records 0",
        ]
    );
    Ok(())
}

#[rstest]
fn run_records_cli_tracing() -> TestResult {
    let dir = temp_dir();
    let path = create_cloud_file(&dir, "cloud.csv", CLOUD)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let command = run_command_for(&path);
    tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Run(command),
        })
    })?;

    let run_span = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run_span.fields.get("command"), Some(&"run".to_owned()));
    let execute = layer
        .span_named("cli.execute")
        .expect("cli.execute span must exist");
    assert_eq!(execute.fields.get("pool"), Some(&"Auto".to_owned()));
    let expected_output = dir.path().join("clusters_cloud.csv");
    assert_eq!(
        execute.fields.get("output"),
        Some(&expected_output.display().to_string())
    );
    assert!(layer.span_named("core.run").is_some());
    assert!(layer.span_named("csv.read").is_some());
    assert!(layer.span_named("csv.write").is_some());

    let completed = layer.events_with_message("command completed");
    let event = completed.first().expect("completion must be logged");
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.field("clusters"), Some("2"));
    Ok(())
}

#[rstest]
fn progress_log_emits_every_n_assignments() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut log = ProgressLog::new(NonZeroUsize::new(2));
        for assigned in 1..=5 {
            log.observe(Progress {
                assigned,
                total: 5,
                clusters: 1,
            });
        }
        let mut silent = ProgressLog::new(None);
        silent.observe(Progress {
            assigned: 5,
            total: 5,
            clusters: 1,
        });
    });

    let reported: Vec<String> = layer
        .events_with_message("clustering progress")
        .iter()
        .filter_map(|event| event.field("assigned").map(ToOwned::to_owned))
        .collect();
    assert_eq!(reported, vec!["2", "4"]);
}
