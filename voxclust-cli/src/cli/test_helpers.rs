//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, Command, PoolArg, RunCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_cloud_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// `run` command with default options for `path`.
pub(super) fn run_command_for(path: &Path) -> RunCommand {
    RunCommand {
        path: path.to_path_buf(),
        threshold: std::f64::consts::SQRT_2,
        pool: PoolArg::Auto,
        seed: None,
        no_header: false,
        output: None,
        progress_every: None,
    }
}

pub(super) fn run_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    match run_cli(Cli {
        command: Command::Run(command),
    }) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
