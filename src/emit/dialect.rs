// src/emit/dialect.rs

use std::{fmt, str::FromStr};

use super::format::quote;

/// Derived figure asserted by the statistics block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Average,
    Difference,
    DifferencePct,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Average, Stat::Difference, Stat::DifferencePct];
}

/// Surface syntax of the generated assertions. Numbers arrive pre-rendered.
pub trait Dialect {
    fn value(&self, area: &str, measure: &str, year: &str, value: &str) -> String;
    fn measure_count(&self, area: &str, measure: &str, count: usize) -> String;
    fn area_count(&self, area: &str, count: usize) -> String;
    fn total(&self, count: usize) -> String;
    /// Prefix comparison of a statistic against its truncated rendering.
    fn stat(&self, area: &str, measure: &str, stat: Stat, expected: &str) -> String;
}

/// Catch2 `REQUIRE` statements against an `Areas` container.
#[derive(Debug, Default, Clone, Copy)]
pub struct Catch2;

impl Catch2 {
    fn measure(area: &str, measure: &str) -> String {
        format!(
            "areas.getArea({}).getMeasure({})",
            quote(area),
            quote(measure)
        )
    }
}

impl Dialect for Catch2 {
    fn value(&self, area: &str, measure: &str, year: &str, value: &str) -> String {
        format!(
            "REQUIRE( {}.getValue({}) == {} );",
            Self::measure(area, measure),
            year,
            value
        )
    }

    fn measure_count(&self, area: &str, measure: &str, count: usize) -> String {
        format!("REQUIRE( {}.size() == {} );", Self::measure(area, measure), count)
    }

    fn area_count(&self, area: &str, count: usize) -> String {
        format!("REQUIRE( areas.getArea({}).size() == {} );", quote(area), count)
    }

    fn total(&self, count: usize) -> String {
        format!("REQUIRE( areas.size() == {} );", count)
    }

    fn stat(&self, area: &str, measure: &str, stat: Stat, expected: &str) -> String {
        let getter = match stat {
            Stat::Average => "getAverage",
            Stat::Difference => "getDifference",
            Stat::DifferencePct => "getDifferenceAsPercentage",
        };
        format!(
            "REQUIRE( std::to_string({}.{}()).substr(0,{}) == {} );",
            Self::measure(area, measure),
            getter,
            expected.len(),
            quote(expected)
        )
    }
}

/// Framework-neutral `assert` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Plain {
    fn measure(area: &str, measure: &str) -> String {
        format!("area({}).measure({})", quote(area), quote(measure))
    }
}

impl Dialect for Plain {
    fn value(&self, area: &str, measure: &str, year: &str, value: &str) -> String {
        format!(
            "assert {}.value({}) == {}",
            Self::measure(area, measure),
            year,
            value
        )
    }

    fn measure_count(&self, area: &str, measure: &str, count: usize) -> String {
        format!("assert {}.count() == {}", Self::measure(area, measure), count)
    }

    fn area_count(&self, area: &str, count: usize) -> String {
        format!("assert area({}).count() == {}", quote(area), count)
    }

    fn total(&self, count: usize) -> String {
        format!("assert areas.count() == {}", count)
    }

    fn stat(&self, area: &str, measure: &str, stat: Stat, expected: &str) -> String {
        let method = match stat {
            Stat::Average => "average",
            Stat::Difference => "difference",
            Stat::DifferencePct => "difference_pct",
        };
        format!(
            "assert prefix({}.{}(), {}) == {}",
            Self::measure(area, measure),
            method,
            expected.len(),
            quote(expected)
        )
    }
}

/// Selectable dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialectKind {
    #[default]
    Catch2,
    Plain,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Catch2 => &Catch2,
            DialectKind::Plain => &Plain,
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "catch2" => Ok(DialectKind::Catch2),
            "plain" => Ok(DialectKind::Plain),
            other => Err(format!("unknown dialect `{}` (expected catch2 or plain)", other)),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DialectKind::Catch2 => "catch2",
            DialectKind::Plain => "plain",
        })
    }
}
