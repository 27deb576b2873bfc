//! @ai:module:intent Classify volatility and benchmark gap from computed metrics
//! @ai:module:layer application
//! @ai:module:public_api Assessment, VolatilityLevel, GapSeverity, StagedTarget, assess
//! @ai:module:depends_on metrics::types, config
//! @ai:module:stateless true

use crate::config::AssessmentConfig;
use crate::metrics::types::{MetricsResult, PeriodDelta};
use serde::{Deserialize, Serialize};

/// @ai:intent Volatility classification based on coefficient of variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Moderate,
    High,
}

impl VolatilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::Moderate => "moderate",
            VolatilityLevel::High => "high",
        }
    }
}

impl std::fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Severity of the average shortfall against the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    OnTarget,
    Minor,
    Significant,
    Critical,
}

impl GapSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapSeverity::OnTarget => "on_target",
            GapSeverity::Minor => "minor",
            GapSeverity::Significant => "significant",
            GapSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Uplift required to reach a milestone target from the current mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedTarget {
    pub name: String,
    pub target: f64,
    pub uplift: f64,
}

/// @ai:intent Derived classification of a metrics result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub volatility: VolatilityLevel,
    pub gap_severity: GapSeverity,
    pub steepest_decline: Option<PeriodDelta>,
    pub staged_targets: Vec<StagedTarget>,
}

/// @ai:intent Assess a metrics result against configured thresholds
/// @ai:pre config.significant_gap <= config.critical_gap
/// @ai:effects pure
pub fn assess(result: &MetricsResult, config: &AssessmentConfig) -> Assessment {
    let volatility = if result.coefficient_of_variation > config.volatility_cv_threshold {
        VolatilityLevel::High
    } else {
        VolatilityLevel::Moderate
    };

    let staged_targets = config
        .milestones
        .iter()
        .map(|m| StagedTarget {
            name: m.name.clone(),
            target: m.target,
            uplift: m.target - result.mean,
        })
        .collect();

    Assessment {
        volatility,
        gap_severity: classify_gap(result.average_gap, config),
        steepest_decline: result.steepest_decline().cloned(),
        staged_targets,
    }
}

fn classify_gap(gap: f64, config: &AssessmentConfig) -> GapSeverity {
    if gap > config.critical_gap {
        GapSeverity::Critical
    } else if gap > config.significant_gap {
        GapSeverity::Significant
    } else if gap > 0.0 {
        GapSeverity::Minor
    } else {
        GapSeverity::OnTarget
    }
}
