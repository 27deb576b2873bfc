//! @ai:module:intent Tabular projection of metrics for export sinks
//! @ai:module:layer infrastructure
//! @ai:module:public_api MetricTable, TabularSink
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::MetricsResult;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// @ai:intent Trait for sinks that accept a metric name to value mapping
pub trait TabularSink: Send + Sync {
    /// @ai:intent Write one metric table to the sink
    fn write_table(&self, table: &MetricTable) -> Result<()>;
}

/// @ai:intent Ordered mapping of metric name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    rows: Vec<(String, f64)>,
}

impl MetricTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Append a row, keeping insertion order
    /// @ai:effects state:write
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.rows.push((name.into(), value));
    }

    /// @ai:intent Look up a metric by name
    /// @ai:effects pure
    pub fn get(&self, name: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn rows(&self) -> &[(String, f64)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for MetricTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (name, value) in &self.rows {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl MetricsResult {
    /// @ai:intent Flatten the result into summary and per-period rows
    /// @ai:effects pure
    pub fn to_table(&self) -> MetricTable {
        let mut table = MetricTable::new();

        table.push("benchmark", self.benchmark);
        table.push("mean", self.mean);
        table.push("median", self.median);
        table.push("std_dev", self.std_dev);
        table.push("min", self.min);
        table.push("max", self.max);
        table.push("range", self.range);
        table.push("coefficient_of_variation", self.coefficient_of_variation);
        table.push("average_gap", self.average_gap);
        table.push("cumulative_gap", self.cumulative_gap());

        for period in &self.periods {
            table.push(format!("gap {}", period.label), period.gap);
        }

        for delta in &self.deltas {
            table.push(format!("delta {} -> {}", delta.from, delta.to), delta.change);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{RetentionMetrics, RetentionMetricsTrait};
    use crate::series::{Benchmark, Series};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_contains_summary_and_periods() {
        let series = Series::from_rates(&["Q1", "Q2"], &[70.0, 72.0]).unwrap();
        let result = RetentionMetrics::new()
            .compute(&series, Benchmark::new(80.0).unwrap())
            .unwrap();

        let table = result.to_table();

        assert_eq!(table.get("mean"), Some(71.0));
        assert_eq!(table.get("cumulative_gap"), Some(18.0));
        assert_eq!(table.get("gap Q1"), Some(10.0));
        assert_eq!(table.get("delta Q1 -> Q2"), Some(2.0));
        assert_eq!(table.rows()[0].0, "benchmark");
        assert_eq!(table.len(), 13);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut table = MetricTable::new();
        table.push("zeta", 1.0);
        table.push("alpha", 2.0);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zeta":1.0,"alpha":2.0}"#);
    }
}
