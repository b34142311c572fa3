// src/lib.rs

pub mod aggregate;
pub mod emit;
pub mod error;
pub mod source;
pub mod table;

use std::{io::Write, path::Path};
use tracing::info;

pub use aggregate::{AreaIndex, GroupAggregate, Observation};
pub use emit::DialectKind;
pub use error::{Error, Result};
pub use source::ColumnMap;

/// How a run reads its input and shapes its output.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub columns: ColumnMap,
    pub dialect: DialectKind,
    /// Append average / difference / percentage assertions.
    pub stats: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub records: usize,
    pub groups: usize,
    pub areas: usize,
    pub lines: usize,
}

/// Build the assertion text for the document at `input` without writing it.
pub fn render<P: AsRef<Path>>(input: P, opts: &Options) -> Result<(String, Report)> {
    // 1) load + flatten
    let doc = table::load_document(&input)?;
    let raw = table::flatten(&doc, &opts.columns)?;
    drop(doc);

    // 2) coerce + sort
    let rows = table::normalize(raw)?;

    // 3) single aggregation pass, emitting row-level lines
    let mut out = emit::Emitter::new(opts.dialect.dialect());
    let mut agg = aggregate::Aggregator::new();
    for row in &rows {
        agg.push(row, &mut out);
    }
    let index = agg.finish();

    // 4) count, area, total (and stats) blocks
    out.summary(&index, opts.stats);

    let report = Report {
        records: rows.len(),
        groups: index.groups().count(),
        areas: index.len(),
        lines: out.line_count(),
    };
    Ok((out.into_string(), report))
}

/// Read `input`, and write the generated assertions to `sink`.
///
/// Output is produced only once the whole document has been processed, so a
/// failing run writes nothing.
pub fn generate<P: AsRef<Path>, W: Write>(input: P, opts: &Options, sink: &mut W) -> Result<Report> {
    let (text, report) = render(&input, opts)?;
    sink.write_all(text.as_bytes())?;
    sink.flush()?;
    info!(
        records = report.records,
        groups = report.groups,
        areas = report.areas,
        lines = report.lines,
        "fixtures generated"
    );
    Ok(report)
}
