//! Command implementations and argument parsing for the voxclust CLI.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};
use voxclust_core::{
    ClusterError, ClusterPartition, ClusteringBuilder, DEFAULT_THRESHOLD, PoolStrategy, Progress,
    ProgressObserver,
};
use voxclust_providers_csv::{
    CsvProviderError, PointCloud, ReadOptions, WriteSummary, write_partition_to_path,
};

const OUTPUT_PREFIX: &str = "clusters_";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "voxclust",
    about = "Cluster integer 3D point clouds by fixed-distance region growth."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a point cloud file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Comma-separated file with three integer coordinates per line.
    pub path: PathBuf,

    /// Maximum pairwise distance for two points to be considered directly
    /// connected.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Candidate pool used during region growth.
    #[arg(long, value_enum, default_value_t = PoolArg::Auto)]
    pub pool: PoolArg,

    /// Shuffle the seed order with this RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Treat the first line as data instead of a header.
    #[arg(long)]
    pub no_header: bool,

    /// Output file (defaults to `clusters_<input name>` beside the input).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log progress at debug level every N assigned points.
    #[arg(long)]
    pub progress_every: Option<NonZeroUsize>,
}

/// Pool choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PoolArg {
    /// Let the library pick.
    Auto,
    /// Scan every remaining point per query.
    Linear,
    /// Query neighbouring cells of a spatial hash.
    Grid,
}

impl From<PoolArg> for PoolStrategy {
    fn from(value: PoolArg) -> Self {
        match value {
            PoolArg::Auto => Self::Auto,
            PoolArg::Linear => Self::Linear,
            PoolArg::Grid => Self::Grid,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the input or writing the output failed.
    #[error(transparent)]
    Csv(#[from] CsvProviderError),
    /// The clustering configuration was rejected.
    #[error(transparent)]
    Core(#[from] ClusterError),
    /// No output file name could be derived from the input path.
    #[error("cannot derive an output path from `{path}`; pass --output")]
    OutputPath {
        /// Input path without a file name.
        path: PathBuf,
    },
}

impl CliError {
    /// Stable code of the underlying core error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => Some(core.code().as_str()),
            Self::Csv(_) | Self::OutputPath { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the input source.
    pub data_source: String,
    /// File the clustered records were written to.
    pub output: PathBuf,
    /// Number of input records dropped as malformed.
    pub dropped_records: usize,
    /// Points with their final clusters.
    pub partition: ClusterPartition,
    /// Record counts per written group.
    pub written: WriteSummary,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when ingestion, configuration or output fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use voxclust_cli::cli::{Cli, Command, PoolArg, RunCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("cloud.csv");
/// std::fs::write(&path, "x,y,z\n0,0,0\n1,1,0\n5,5,5\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path,
///         threshold: std::f64::consts::SQRT_2,
///         pool: PoolArg::Auto,
///         seed: None,
///         no_header: false,
///         output: None,
///         progress_every: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.partition.cluster_count(), 2);
/// assert!(summary.output.ends_with("clusters_cloud.csv"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        path = %command.path.display(),
        threshold = command.threshold,
        pool = ?command.pool,
        output = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let clusterer = ClusteringBuilder::new()
        .with_threshold(command.threshold)
        .with_pool_strategy(command.pool.into())
        .with_seed(command.seed)
        .build()?;

    let output = match command.output {
        Some(output) => output,
        None => derive_output_path(&command.path)?,
    };
    Span::current().record("output", field::display(output.display()));

    let cloud = PointCloud::try_from_path(
        &command.path,
        ReadOptions {
            header: !command.no_header,
        },
    )?;
    let data_source = cloud.name().to_owned();
    let dropped_records = cloud.dropped_records().len();

    let partition =
        clusterer.run_with_progress(cloud.into_points(), ProgressLog::new(command.progress_every));

    info!(path = %output.display(), "writing clusters");
    let written = write_partition_to_path(&partition, &output)?;

    info!(
        data_source = data_source.as_str(),
        clusters = partition.cluster_count(),
        records = written.total(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        output,
        dropped_records,
        partition,
        written,
    })
}

/// Emits a debug event each time another `every` points have been assigned.
pub(super) struct ProgressLog {
    every: Option<NonZeroUsize>,
    next: usize,
}

impl ProgressLog {
    pub(super) fn new(every: Option<NonZeroUsize>) -> Self {
        Self {
            every,
            next: every.map_or(usize::MAX, NonZeroUsize::get),
        }
    }
}

impl ProgressObserver for ProgressLog {
    fn observe(&mut self, progress: Progress) {
        let Some(every) = self.every else {
            return;
        };
        if progress.assigned < self.next {
            return;
        }
        debug!(
            assigned = progress.assigned,
            remaining = progress.remaining(),
            clusters = progress.clusters,
            "clustering progress"
        );
        let step = every.get();
        self.next = (progress.assigned / step).saturating_add(1).saturating_mul(step);
    }
}

/// Places the output beside `input`, named `clusters_<file name>`.
///
/// # Errors
/// Returns [`CliError::OutputPath`] when `input` has no file name.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use voxclust_cli::cli::derive_output_path;
///
/// let output = derive_output_path(Path::new("data/scan.csv"))?;
/// assert_eq!(output, Path::new("data/clusters_scan.csv"));
/// # Ok::<(), voxclust_cli::cli::CliError>(())
/// ```
pub fn derive_output_path(input: &Path) -> Result<PathBuf, CliError> {
    let name = input.file_name().ok_or_else(|| CliError::OutputPath {
        path: input.to_path_buf(),
    })?;
    let mut prefixed = std::ffi::OsString::from(OUTPUT_PREFIX);
    prefixed.push(name);
    Ok(input.with_file_name(prefixed))
}

/// Renders the per-cluster report of `summary` to `writer`, followed by
/// the record totals.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use voxclust_cli::cli::{ExecutionSummary, render_summary};
/// # use voxclust_core::{ClusteringBuilder, Point};
/// # use voxclust_providers_csv::WriteSummary;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let partition = ClusteringBuilder::new()
///     .build()?
///     .run(vec![Point::new(0, 0, 0), Point::new(1, 0, 0), Point::new(9, 0, 0)]);
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     output: "clusters_demo".into(),
///     dropped_records: 0,
///     written: WriteSummary { unassigned: 0, cluster_sizes: partition.cluster_sizes() },
///     partition,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("cluster 0 contains 2 elements\n"));
/// assert!(text.ends_with("total elements 3\ndropped records 0\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "clusters of {} written to {}",
        summary.data_source,
        summary.output.display()
    )?;
    for (label, size) in summary.written.groups() {
        writeln!(writer, "cluster {label} contains {size} elements")?;
    }
    writeln!(writer, "total elements {}", summary.written.total())?;
    writeln!(writer, "dropped records {}", summary.dropped_records)?;
    Ok(())
}
