//! Rendering of command summaries to text or JSON.

use std::io::{self, Write};

use serde::Serialize;
use toposurf_core::{GridPoint, MergeEdge, SweepStats, Triangulation};

use super::commands::{
    ComplexSummary, ExecutionSummary, HighlightRecord, MergeSummary, OutputFormat, SummaryKind,
};

/// Renders `summary` to `writer` in the format it was requested in.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use toposurf_cli::cli::{ExecutionSummary, OutputFormat, SummaryKind, render_summary};
/// # use toposurf_core::Surface;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     format: OutputFormat::Human,
///     kind: SummaryKind::Surfaces(vec![Surface::Ackley]),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "ackley\tAckley Function\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match (&summary.kind, summary.format) {
        (SummaryKind::Merge(merge), OutputFormat::Human) => render_merge_human(merge, writer),
        (SummaryKind::Merge(merge), OutputFormat::Json) => {
            write_json(&MergeReport::from(merge.as_ref()), &mut writer)
        }
        (SummaryKind::Complex(complex), OutputFormat::Human) => {
            render_complex_human(complex, writer)
        }
        (SummaryKind::Complex(complex), OutputFormat::Json) => {
            write_json(&ComplexReport::from(complex.as_ref()), &mut writer)
        }
        (SummaryKind::Surfaces(surfaces), _) => {
            for surface in surfaces {
                writeln!(writer, "{}\t{}", surface.slug(), surface.name())?;
            }
            Ok(())
        }
    }
}

fn write_json(report: &impl Serialize, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

fn render_merge_human(summary: &MergeSummary, mut writer: impl Write) -> io::Result<()> {
    let forest = &summary.forest;
    let stats = forest.stats();
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "grid: {}x{}", summary.grid.rows(), summary.grid.cols())?;
    writeln!(writer, "roots: {}", forest.roots().len())?;
    writeln!(writer, "merge edges: {}", forest.graph().edge_count())?;
    writeln!(
        writer,
        "births: {}, joins: {}, merges: {}",
        stats.births, stats.joins, stats.merges
    )?;
    for root in forest.roots() {
        let value = summary.grid.value(*root).unwrap_or(f64::NAN);
        writeln!(writer, "root\t{root}\t{value}")?;
    }
    for edge in forest.graph().edges() {
        writeln!(
            writer,
            "edge\t{}\t{}\t{}\t{}",
            edge.survivor(),
            edge.absorbed(),
            edge.level(),
            edge.step()
        )?;
    }
    for highlight in &summary.highlights {
        match highlight.world {
            Some((x, y)) => writeln!(
                writer,
                "highlight\t{}\t{x}\t{y}\t{}",
                highlight.point, highlight.value
            )?,
            None => writeln!(writer, "highlight\t{}\t{}", highlight.point, highlight.value)?,
        }
    }
    Ok(())
}

fn render_complex_human(summary: &ComplexSummary, mut writer: impl Write) -> io::Result<()> {
    let complex = &summary.complex;
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "grid: {}x{}", summary.rows, summary.cols)?;
    writeln!(
        writer,
        "triangulation: {}",
        triangulation_label(summary.triangulation)
    )?;
    writeln!(writer, "vertices: {}", complex.count(0))?;
    writeln!(writer, "edges: {}", complex.count(1))?;
    writeln!(writer, "triangles: {}", complex.count(2))?;
    writeln!(
        writer,
        "euler characteristic: {}",
        complex.euler_characteristic()
    )
}

const fn triangulation_label(triangulation: Triangulation) -> &'static str {
    match triangulation {
        Triangulation::Standard => "standard",
        Triangulation::Detailed => "detailed",
    }
}

#[derive(Serialize)]
struct MergeReport<'a> {
    source: &'a str,
    rows: usize,
    cols: usize,
    roots: Vec<PointReport>,
    edges: Vec<EdgeReport>,
    stats: StatsReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    highlights: Vec<HighlightReport>,
}

impl<'a> From<&'a MergeSummary> for MergeReport<'a> {
    fn from(summary: &'a MergeSummary) -> Self {
        let forest = &summary.forest;
        Self {
            source: &summary.source,
            rows: summary.grid.rows(),
            cols: summary.grid.cols(),
            roots: forest.roots().iter().copied().map(PointReport::from).collect(),
            edges: forest.graph().edges().iter().map(EdgeReport::from).collect(),
            stats: StatsReport::from(forest.stats()),
            highlights: summary
                .highlights
                .iter()
                .map(HighlightReport::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct PointReport {
    row: usize,
    col: usize,
}

impl From<GridPoint> for PointReport {
    fn from(point: GridPoint) -> Self {
        Self {
            row: point.row(),
            col: point.col(),
        }
    }
}

#[derive(Serialize)]
struct EdgeReport {
    survivor: PointReport,
    absorbed: PointReport,
    level: f64,
    step: usize,
}

impl From<&MergeEdge> for EdgeReport {
    fn from(edge: &MergeEdge) -> Self {
        Self {
            survivor: edge.survivor().into(),
            absorbed: edge.absorbed().into(),
            level: edge.level(),
            step: edge.step(),
        }
    }
}

#[derive(Serialize)]
struct StatsReport {
    points: usize,
    births: usize,
    joins: usize,
    merges: usize,
}

impl From<SweepStats> for StatsReport {
    fn from(stats: SweepStats) -> Self {
        Self {
            points: stats.points,
            births: stats.births,
            joins: stats.joins,
            merges: stats.merges,
        }
    }
}

#[derive(Serialize)]
struct HighlightReport {
    row: usize,
    col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    value: f64,
}

impl From<&HighlightRecord> for HighlightReport {
    fn from(record: &HighlightRecord) -> Self {
        Self {
            row: record.point.row(),
            col: record.point.col(),
            x: record.world.map(|(x, _)| x),
            y: record.world.map(|(_, y)| y),
            value: record.value,
        }
    }
}

#[derive(Serialize)]
struct ComplexReport<'a> {
    source: &'a str,
    rows: usize,
    cols: usize,
    triangulation: &'static str,
    vertices: usize,
    edges: usize,
    triangles: usize,
    euler_characteristic: i64,
}

impl<'a> From<&'a ComplexSummary> for ComplexReport<'a> {
    fn from(summary: &'a ComplexSummary) -> Self {
        let complex = &summary.complex;
        Self {
            source: &summary.source,
            rows: summary.rows,
            cols: summary.cols,
            triangulation: triangulation_label(summary.triangulation),
            vertices: complex.count(0),
            edges: complex.count(1),
            triangles: complex.count(2),
            euler_characteristic: complex.euler_characteristic(),
        }
    }
}
