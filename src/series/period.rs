//! @ai:module:intent Period, series and benchmark value types
//! @ai:module:layer domain
//! @ai:module:public_api Period, Series, Benchmark
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// @ai:intent A single labelled observation of a retention rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    /// Retention rate in percent. 0-100 is expected but not enforced.
    pub rate: f64,
}

impl Period {
    /// @ai:intent Create a new period
    /// @ai:effects pure
    pub fn new(label: impl Into<String>, rate: f64) -> Self {
        Self {
            label: label.into(),
            rate,
        }
    }
}

/// @ai:intent Ordered, non-empty sequence of periods in chronological order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    periods: Vec<Period>,
}

impl Series {
    /// @ai:intent Build a validated series from periods
    /// @ai:pre periods is non-empty and every rate is finite
    /// @ai:effects pure
    pub fn new(periods: Vec<Period>) -> Result<Self> {
        validate_periods(&periods)?;
        Ok(Self { periods })
    }

    /// @ai:intent Build a series by pairing labels with rates
    /// @ai:pre labels.len() == rates.len()
    /// @ai:effects pure
    pub fn from_rates<S: AsRef<str>>(labels: &[S], rates: &[f64]) -> Result<Self> {
        if labels.len() != rates.len() {
            return Err(Error::InvalidInput(format!(
                "{} labels supplied for {} rates",
                labels.len(),
                rates.len()
            )));
        }

        let periods = labels
            .iter()
            .zip(rates)
            .map(|(label, rate)| Period::new(label.as_ref(), *rate))
            .collect();

        Self::new(periods)
    }

    /// @ai:intent Build a series with generated labels P1..Pn
    /// @ai:effects pure
    pub fn unlabelled(rates: &[f64]) -> Result<Self> {
        let labels: Vec<String> = (1..=rates.len()).map(|i| format!("P{}", i)).collect();
        Self::from_rates(&labels, rates)
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// @ai:intent Iterate rates in sequence order
    /// @ai:effects pure
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.periods.iter().map(|p| p.rate)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            periods: Vec<Period>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Series::new(raw.periods).map_err(serde::de::Error::custom)
    }
}

/// @ai:intent Validate that a period list can be analysed
/// @ai:effects pure
pub(crate) fn validate_periods(periods: &[Period]) -> Result<()> {
    if periods.is_empty() {
        return Err(Error::InvalidInput(
            "series must contain at least one period".to_string(),
        ));
    }

    if let Some(bad) = periods.iter().find(|p| !p.rate.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "period {} has non-finite rate {}",
            bad.label, bad.rate
        )));
    }

    Ok(())
}

/// @ai:intent Scalar target retention rate used for gap comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Benchmark(f64);

impl Benchmark {
    /// @ai:intent Create a benchmark from a finite target rate
    /// @ai:effects pure
    pub fn new(target: f64) -> Result<Self> {
        if !target.is_finite() {
            return Err(Error::InvalidInput(format!(
                "benchmark must be finite, got {}",
                target
            )));
        }
        Ok(Self(target))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Benchmark {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Benchmark> for f64 {
    fn from(benchmark: Benchmark) -> Self {
        benchmark.0
    }
}

impl std::fmt::Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rejects_empty() {
        let err = Series::new(vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_series_rejects_nan_rate() {
        let err = Series::new(vec![Period::new("Q1", f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_rates_length_mismatch() {
        let err = Series::from_rates(&["Q1", "Q2"], &[70.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_rates_preserves_order() {
        let series = Series::from_rates(&["Q1", "Q2", "Q3"], &[71.0, 69.0, 73.0]).unwrap();
        let labels: Vec<_> = series.periods().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(series.rates().collect::<Vec<_>>(), vec![71.0, 69.0, 73.0]);
    }

    #[test]
    fn test_unlabelled_generates_labels() {
        let series = Series::unlabelled(&[1.0, 2.0]).unwrap();
        assert_eq!(series.periods()[1].label, "P2");
    }

    #[test]
    fn test_benchmark_rejects_infinite() {
        assert!(Benchmark::new(f64::INFINITY).is_err());
        assert_eq!(Benchmark::new(85.0).unwrap().value(), 85.0);
    }

    #[test]
    fn test_deserialize_empty_series_fails() {
        let result: std::result::Result<Series, _> = serde_json::from_str(r#"{"periods": []}"#);
        assert!(result.is_err());
    }
}
