//! Command-line interface orchestration for voxclust.
//!
//! The CLI offers a `run` command that loads a comma-separated point cloud,
//! clusters it and writes the grouped records next to the input.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, PoolArg, RunCommand, derive_output_path,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
