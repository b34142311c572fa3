// src/aggregate/mod.rs

use indexmap::IndexMap;
use tracing::trace;

use crate::emit::Emitter;
use crate::table::Record;

/// A (year, value) pair kept as a group's minimum or maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub year: String,
    pub value: f64,
}

/// Running totals for one (area, measure) key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub count: usize,
    pub sum: f64,
    pub min_year: Observation,
    pub max_year: Observation,
}

impl GroupAggregate {
    fn first(rec: &Record) -> Self {
        let obs = Observation {
            year: rec.year.clone(),
            value: rec.value,
        };
        Self {
            count: 1,
            sum: rec.value,
            min_year: obs.clone(),
            max_year: obs,
        }
    }

    /// Fold one more record in. Years compare as strings, not numbers.
    fn update(&mut self, rec: &Record) {
        self.count += 1;
        self.sum += rec.value;
        if rec.year.as_str() < self.min_year.year.as_str() {
            self.min_year = Observation {
                year: rec.year.clone(),
                value: rec.value,
            };
        }
        if rec.year.as_str() > self.max_year.year.as_str() {
            self.max_year = Observation {
                year: rec.year.clone(),
                value: rec.value,
            };
        }
    }

    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Change from the lexically first year to the lexically last one.
    pub fn difference(&self) -> f64 {
        self.max_year.value - self.min_year.value
    }

    /// [`difference`](Self::difference) relative to the first year, in percent.
    /// `None` when the first year's value is zero.
    pub fn difference_pct(&self) -> Option<f64> {
        if self.min_year.value == 0.0 {
            None
        } else {
            Some(self.difference() / self.min_year.value * 100.0)
        }
    }
}

/// Lower-cased measure name → aggregate, in first-seen order.
pub type MeasureIndex = IndexMap<String, GroupAggregate>;

/// Area code → measures, in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct AreaIndex {
    areas: IndexMap<String, MeasureIndex>,
}

impl AreaIndex {
    pub fn get(&self, area: &str, measure_key: &str) -> Option<&GroupAggregate> {
        self.areas.get(area)?.get(measure_key)
    }

    pub fn areas(&self) -> impl Iterator<Item = (&str, &MeasureIndex)> {
        self.areas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every group as (area, measure, aggregate), in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &str, &GroupAggregate)> {
        self.areas.iter().flat_map(|(area, measures)| {
            measures
                .iter()
                .map(move |(m, g)| (area.as_str(), m.as_str(), g))
        })
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns true when the record opened a new (area, measure) group.
    fn record(&mut self, rec: &Record, measure_key: String) -> bool {
        let measures = self.areas.entry(rec.area.clone()).or_default();
        match measures.get_mut(&measure_key) {
            Some(agg) => {
                agg.update(rec);
                false
            }
            None => {
                measures.insert(measure_key, GroupAggregate::first(rec));
                true
            }
        }
    }
}

/// Single forward pass over the sorted rows.
#[derive(Debug, Default)]
pub struct Aggregator {
    index: AreaIndex,
    prev: Option<(String, String)>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `rec` into the index and write its row-level assertion. A blank
    /// line precedes the first row of every run of a grouping key.
    pub fn push(&mut self, rec: &Record, out: &mut Emitter<'_>) {
        let measure_key = rec.measure_key();

        let same_run = matches!(
            &self.prev,
            Some((a, m)) if *a == rec.area && *m == measure_key
        );
        if !same_run {
            out.blank();
        }

        let opened = self.index.record(rec, measure_key.clone());
        trace!(area = %rec.area, measure = %measure_key, year = %rec.year, opened, "row");

        out.value_line(&rec.area, &measure_key, &rec.year, rec.value);
        self.prev = Some((rec.area.clone(), measure_key));
    }

    pub fn finish(self) -> AreaIndex {
        self.index
    }
}
