//! Command implementations and argument parsing for the toposurf CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use toposurf_core::{
    AxisRange, DEFAULT_MICHALEWICZ_M, FilteredComplex, GridPoint, HighlightError,
    MergeForest, SampledSurface, SamplingDomain, ScalarGrid, Scene, Surface, SurfaceError,
    Triangulation,
};
use tracing::{Span, field, info, instrument};

use super::grid_file::{GridFileError, read_grid};

const DEFAULT_AXIS_MIN: f64 = -5.0;
const DEFAULT_AXIS_MAX: f64 = 5.0;
const DEFAULT_SAMPLES: usize = 50;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "toposurf",
    about = "Summarise the sub-level set topology of scalar surfaces."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build the merge forest of a grid.
    Merge(MergeCommand),
    /// Build the filtered simplicial complex of a grid.
    Complex(ComplexCommand),
    /// List the built-in surfaces.
    Surfaces,
}

/// Options accepted by the `merge` command.
#[derive(Debug, Args, Clone)]
pub struct MergeCommand {
    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Points to report with their world coordinates.
    #[arg(long, value_enum)]
    pub highlight: Option<HighlightSet>,

    /// Grid to analyse.
    #[command(subcommand)]
    pub source: GridSource,
}

/// Options accepted by the `complex` command.
#[derive(Debug, Args, Clone)]
pub struct ComplexCommand {
    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// How each grid cell is split into simplices.
    #[arg(long, value_enum, default_value_t = TriangulationArg::Standard)]
    pub triangulation: TriangulationArg,

    /// Grid to analyse.
    #[command(subcommand)]
    pub source: GridSource,
}

/// Where the scalar grid comes from.
#[derive(Debug, Subcommand, Clone)]
pub enum GridSource {
    /// Sample a built-in surface.
    Surface(SurfaceArgs),
    /// Read a text grid, one row per line.
    File(FileArgs),
}

/// Surface sampling arguments.
#[derive(Debug, Args, Clone)]
pub struct SurfaceArgs {
    /// Surface identifier, as listed by `toposurf surfaces`.
    pub name: String,

    /// Lower bound of the x axis.
    #[arg(long, default_value_t = DEFAULT_AXIS_MIN, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the x axis.
    #[arg(long, default_value_t = DEFAULT_AXIS_MAX, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Lower bound of the y axis.
    #[arg(long, default_value_t = DEFAULT_AXIS_MIN, allow_hyphen_values = true)]
    pub y_min: f64,

    /// Upper bound of the y axis.
    #[arg(long, default_value_t = DEFAULT_AXIS_MAX, allow_hyphen_values = true)]
    pub y_max: f64,

    /// Samples per axis.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Steepness used when the surface is `michalewicz`.
    #[arg(long, default_value_t = DEFAULT_MICHALEWICZ_M)]
    pub michalewicz_m: u16,
}

impl SurfaceArgs {
    fn domain(&self) -> SamplingDomain {
        SamplingDomain::new(
            AxisRange::new(self.x_min, self.x_max, self.samples),
            AxisRange::new(self.y_min, self.y_max, self.samples),
        )
    }

    fn surface(&self) -> Result<Surface, SurfaceError> {
        match self.name.parse::<Surface>()? {
            Surface::Michalewicz { .. } => Ok(Surface::Michalewicz {
                m: self.michalewicz_m,
            }),
            surface => Ok(surface),
        }
    }
}

/// Text grid arguments.
#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Path to a UTF-8 text grid.
    pub path: PathBuf,
}

/// Output formats for command summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented text.
    #[default]
    Human,
    /// A single JSON document.
    Json,
}

/// Which merge-forest points to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HighlightSet {
    /// Surviving roots.
    Roots,
    /// Every merge-graph node.
    Nodes,
}

/// Triangulation choices exposed on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TriangulationArg {
    /// Two triangles per cell sharing the anti-diagonal.
    #[default]
    Standard,
    /// Standard plus the main diagonal of each cell.
    Detailed,
}

impl From<TriangulationArg> for Triangulation {
    fn from(value: TriangulationArg) -> Self {
        match value {
            TriangulationArg::Standard => Self::Standard,
            TriangulationArg::Detailed => Self::Detailed,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening an input file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A text grid could not be read.
    #[error("invalid grid file `{path}`: {source}")]
    GridFile {
        /// Path of the rejected file.
        path: PathBuf,
        /// Parse or validation failure.
        #[source]
        source: GridFileError,
    },
    /// Surface selection or sampling failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// A highlighted point fell outside the grid.
    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

impl CliError {
    /// Stable machine-readable code for logs, when one exists.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::GridFile { source, .. } => Some(source.code()),
            Self::Surface(error) => Some(error.code().as_str()),
            Self::Highlight(error) => Some(error.code().as_str()),
        }
    }

    /// Code of the underlying grid validation failure, if any.
    #[must_use]
    pub fn grid_code(&self) -> Option<&'static str> {
        match self {
            Self::GridFile {
                source: GridFileError::Grid(error),
                ..
            } => Some(error.code().as_str()),
            Self::Surface(error) => error.grid_code().map(|code| code.as_str()),
            _ => None,
        }
    }
}

/// A grid together with where it came from.
#[derive(Debug, Clone)]
pub enum LoadedGrid {
    /// Samples of a built-in surface.
    Sampled(SampledSurface),
    /// Values read from a text file.
    File {
        /// Source path.
        path: PathBuf,
        /// Parsed grid.
        grid: ScalarGrid,
    },
}

impl LoadedGrid {
    /// The scalar grid.
    #[must_use]
    pub const fn grid(&self) -> &ScalarGrid {
        match self {
            Self::Sampled(sampled) => sampled.grid(),
            Self::File { grid, .. } => grid,
        }
    }

    /// Short description used in summaries.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Sampled(sampled) => format!("surface {}", sampled.surface().slug()),
            Self::File { path, .. } => format!("file {}", path.display()),
        }
    }
}

/// A point reported alongside a merge forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRecord {
    /// Grid coordinate.
    pub point: GridPoint,
    /// World `(x, y)` for sampled surfaces.
    pub world: Option<(f64, f64)>,
    /// Grid value at the point.
    pub value: f64,
}

/// Outcome of the `merge` command.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Source description.
    pub source: String,
    /// Grid the forest was built from.
    pub grid: ScalarGrid,
    /// The merge forest.
    pub forest: MergeForest,
    /// Requested highlights, empty when none were asked for.
    pub highlights: Vec<HighlightRecord>,
}

/// Outcome of the `complex` command.
#[derive(Debug, Clone)]
pub struct ComplexSummary {
    /// Source description.
    pub source: String,
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Triangulation that was applied.
    pub triangulation: Triangulation,
    /// The filtered complex.
    pub complex: FilteredComplex,
}

/// Command-specific payload of an [`ExecutionSummary`].
#[derive(Debug, Clone)]
pub enum SummaryKind {
    /// Result of `merge`.
    Merge(Box<MergeSummary>),
    /// Result of `complex`.
    Complex(Box<ComplexSummary>),
    /// Result of `surfaces`.
    Surfaces(Vec<Surface>),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Requested output format.
    pub format: OutputFormat,
    /// Command payload.
    pub kind: SummaryKind,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the grid or resolving highlights fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use toposurf_cli::cli::{
/// #     Cli, Command, MergeCommand, GridSource, OutputFormat, SummaryKind, SurfaceArgs, run_cli,
/// # };
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Merge(MergeCommand {
///         format: OutputFormat::Human,
///         highlight: None,
///         source: GridSource::Surface(SurfaceArgs {
///             name: "himmelblau".into(),
///             x_min: -5.0,
///             x_max: 5.0,
///             y_min: -5.0,
///             y_max: 5.0,
///             samples: 41,
///             michalewicz_m: 10,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let SummaryKind::Merge(merge) = summary.kind else {
///     panic!("merge summary expected");
/// };
/// assert!(!merge.forest.roots().is_empty());
/// assert_eq!(merge.grid.rows(), 41);
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
    let span = Span::current();
    match cli.command {
        Command::Merge(merge) => {
            span.record("command", field::display("merge"));
            run_merge(merge)
        }
        Command::Complex(complex) => {
            span.record("command", field::display("complex"));
            run_complex(complex)
        }
        Command::Surfaces => {
            span.record("command", field::display("surfaces"));
            Ok(ExecutionSummary {
                format: OutputFormat::Human,
                kind: SummaryKind::Surfaces(Surface::ALL.to_vec()),
            })
        }
    }
}

#[instrument(
    name = "cli.merge",
    err,
    skip(command),
    fields(source = field::Empty, highlight = field::Empty),
)]
pub(super) fn run_merge(command: MergeCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load_grid(command.source)?;
    let span = Span::current();
    span.record("source", field::display(loaded.label()));
    span.record(
        "highlight",
        field::display(command.highlight.map_or("none", highlight_label)),
    );

    let forest = MergeForest::build(loaded.grid());
    let highlights = match command.highlight {
        None => Vec::new(),
        Some(HighlightSet::Roots) => highlight(&loaded, forest.roots().iter().copied())?,
        Some(HighlightSet::Nodes) => highlight(&loaded, forest.graph().nodes().iter().copied())?,
    };

    info!(
        roots = forest.roots().len(),
        merges = forest.graph().edge_count(),
        highlights = highlights.len(),
        "merge command completed"
    );
    Ok(ExecutionSummary {
        format: command.format,
        kind: SummaryKind::Merge(Box::new(MergeSummary {
            source: loaded.label(),
            grid: loaded.grid().clone(),
            forest,
            highlights,
        })),
    })
}

#[instrument(
    name = "cli.complex",
    err,
    skip(command),
    fields(source = field::Empty, triangulation = ?command.triangulation),
)]
pub(super) fn run_complex(command: ComplexCommand) -> Result<ExecutionSummary, CliError> {
    let loaded = load_grid(command.source)?;
    Span::current().record("source", field::display(loaded.label()));

    let triangulation = Triangulation::from(command.triangulation);
    let grid = loaded.grid();
    let complex = FilteredComplex::from_grid(grid, triangulation);
    info!(
        simplices = complex.len(),
        euler_characteristic = complex.euler_characteristic(),
        "complex command completed"
    );
    Ok(ExecutionSummary {
        format: command.format,
        kind: SummaryKind::Complex(Box::new(ComplexSummary {
            source: loaded.label(),
            rows: grid.rows(),
            cols: grid.cols(),
            triangulation,
            complex,
        })),
    })
}

const fn highlight_label(set: HighlightSet) -> &'static str {
    match set {
        HighlightSet::Roots => "roots",
        HighlightSet::Nodes => "nodes",
    }
}

fn highlight(
    loaded: &LoadedGrid,
    points: impl Iterator<Item = GridPoint>,
) -> Result<Vec<HighlightRecord>, CliError> {
    let points: Vec<GridPoint> = points.collect();
    match loaded {
        LoadedGrid::Sampled(sampled) => {
            let scene = Scene::new(sampled, &points)?;
            Ok(scene
                .highlights()
                .iter()
                .map(|highlighted| HighlightRecord {
                    point: highlighted.grid,
                    world: Some((highlighted.world.x, highlighted.world.y)),
                    value: highlighted.world.z,
                })
                .collect())
        }
        LoadedGrid::File { grid, .. } => points
            .into_iter()
            .map(|point| {
                grid.value(point)
                    .map(|value| HighlightRecord {
                        point,
                        world: None,
                        value,
                    })
                    .ok_or(CliError::Highlight(HighlightError::OutOfRange {
                        row: point.row(),
                        col: point.col(),
                        rows: grid.rows(),
                        cols: grid.cols(),
                    }))
            })
            .collect(),
    }
}

#[instrument(name = "cli.load_grid", err, skip(source), fields(kind = field::Empty))]
pub(super) fn load_grid(source: GridSource) -> Result<LoadedGrid, CliError> {
    let span = Span::current();
    match source {
        GridSource::Surface(args) => {
            span.record("kind", field::display("surface"));
            let surface = args.surface()?;
            let sampled = surface.sample(&args.domain())?;
            Ok(LoadedGrid::Sampled(sampled))
        }
        GridSource::File(args) => {
            span.record("kind", field::display("file"));
            let grid = read_grid_file(&args.path)?;
            Ok(LoadedGrid::File {
                path: args.path,
                grid,
            })
        }
    }
}

#[instrument(name = "cli.read_grid_file", err, fields(path = field::Empty))]
pub(super) fn read_grid_file(path: &Path) -> Result<ScalarGrid, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_grid(BufReader::new(file)).map_err(|source| CliError::GridFile {
        path: path.to_path_buf(),
        source,
    })
}
