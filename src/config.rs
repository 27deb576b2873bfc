//! @ai:module:intent Configuration structs for retention analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api RetentionConfig, DatasetConfig, AssessmentConfig, Milestone
//! @ai:module:stateless true

use crate::error::Result;
use crate::series::{Benchmark, Period, Series};
use serde::{Deserialize, Serialize};

/// @ai:intent Main configuration for a retention analysis run
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
}

/// @ai:intent Input data: ordered periods and the benchmark target
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_benchmark")]
    pub benchmark: f64,
    pub periods: Vec<Period>,
}

/// @ai:intent Thresholds used when classifying a metrics result
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default = "default_volatility_threshold")]
    pub volatility_cv_threshold: f64,
    #[serde(default = "default_significant_gap")]
    pub significant_gap: f64,
    #[serde(default = "default_critical_gap")]
    pub critical_gap: f64,
    #[serde(default = "default_milestones")]
    pub milestones: Vec<Milestone>,
}

/// @ai:intent Named improvement target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub target: f64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            assessment: AssessmentConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            benchmark: default_benchmark(),
            periods: vec![
                Period::new("Q1 2024", 71.68),
                Period::new("Q2 2024", 72.07),
                Period::new("Q3 2024", 69.67),
                Period::new("Q4 2024", 71.91),
            ],
        }
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            volatility_cv_threshold: default_volatility_threshold(),
            significant_gap: default_significant_gap(),
            critical_gap: default_critical_gap(),
            milestones: default_milestones(),
        }
    }
}

fn default_benchmark() -> f64 {
    85.0
}

fn default_volatility_threshold() -> f64 {
    2.0
}

fn default_significant_gap() -> f64 {
    5.0
}

fn default_critical_gap() -> f64 {
    10.0
}

fn default_milestones() -> Vec<Milestone> {
    [("immediate", 75.0), ("6-month", 80.0), ("12-month", 85.0)]
        .into_iter()
        .map(|(name, target)| Milestone {
            name: name.to_string(),
            target,
        })
        .collect()
}

impl RetentionConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl DatasetConfig {
    /// @ai:intent Validate and convert the configured periods into a series
    /// @ai:effects pure
    pub fn series(&self) -> Result<Series> {
        Series::new(self.periods.clone())
    }

    /// @ai:intent Validate the configured benchmark
    /// @ai:effects pure
    pub fn benchmark(&self) -> Result<Benchmark> {
        Benchmark::new(self.benchmark)
    }
}
