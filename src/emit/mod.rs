// src/emit/mod.rs

pub mod dialect;
pub mod format;

use tracing::{debug, warn};

use crate::aggregate::AreaIndex;
use dialect::{Dialect, Stat};
use format::{render_float, trunc2};

pub use dialect::DialectKind;

/// Gap printed between blocks: two blank lines after the last statement.
const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Accumulates assertion text in memory; nothing reaches the sink until the
/// whole run has succeeded.
pub struct Emitter<'d> {
    dialect: &'d dyn Dialect,
    buf: String,
    lines: usize,
}

impl<'d> Emitter<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            buf: String::new(),
            lines: 0,
        }
    }

    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
        self.lines += 1;
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn separator(&mut self) {
        self.buf.push_str(BLOCK_SEPARATOR);
    }

    /// Row-level assertion. `year` is written as an unquoted literal.
    pub fn value_line(&mut self, area: &str, measure: &str, year: &str, value: f64) {
        let line = self
            .dialect
            .value(area, measure, year, &render_float(value));
        self.line(&line);
    }

    /// Emit everything that follows the row block: per-measure counts, per-area
    /// counts, the total and, when `stats` is set, the statistics block.
    pub fn summary(&mut self, index: &AreaIndex, stats: bool) {
        self.separator();

        for (area, measures) in index.areas() {
            for (measure, agg) in measures {
                let line = self.dialect.measure_count(area, measure, agg.count);
                self.line(&line);
            }
            self.blank();
        }
        self.separator();

        for (area, measures) in index.areas() {
            let line = self.dialect.area_count(area, measures.len());
            self.line(&line);
        }
        self.separator();

        let line = self.dialect.total(index.len());
        self.line(&line);
        self.separator();

        if stats {
            for stat in Stat::ALL {
                self.stat_block(index, stat);
                self.separator();
            }
        }
        debug!(lines = self.lines, stats, "summary emitted");
    }

    fn stat_block(&mut self, index: &AreaIndex, stat: Stat) {
        for (area, measures) in index.areas() {
            for (measure, agg) in measures {
                let figure = match stat {
                    Stat::Average => Some(agg.average()),
                    Stat::Difference => Some(agg.difference()),
                    Stat::DifferencePct => agg.difference_pct(),
                };
                match figure {
                    Some(v) => {
                        let expected = render_float(trunc2(v));
                        let line = self.dialect.stat(area, measure, stat, &expected);
                        self.line(&line);
                    }
                    None => warn!(
                        area,
                        measure,
                        year = %agg.min_year.year,
                        "first-year value is zero; skipping percentage assertion"
                    ),
                }
            }
            self.blank();
        }
    }

    /// Number of assertion lines written so far (blank lines excluded).
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
