//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{
    Cli, CliError, Command, ExecutionSummary, FileArgs, GridSource, MergeCommand, OutputFormat,
    SurfaceArgs, render_summary, run_cli,
};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_grid_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn surface_source(name: &str, samples: usize) -> GridSource {
    GridSource::Surface(SurfaceArgs {
        name: name.to_owned(),
        x_min: -5.0,
        x_max: 5.0,
        y_min: -5.0,
        y_max: 5.0,
        samples,
        michalewicz_m: 10,
    })
}

pub(super) fn file_source(path: PathBuf) -> GridSource {
    GridSource::File(FileArgs { path })
}

pub(super) fn merge_cli(source: GridSource, format: OutputFormat) -> Cli {
    Cli {
        command: Command::Merge(MergeCommand {
            format,
            highlight: None,
            source,
        }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn render_to_string(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_summary(summary, &mut buffer) {
        panic!("rendering into memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("rendered output must be UTF-8: {err}"),
    }
}
