//! Analysis summary returned by `GET /api/documents/{id}/analysis`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, RoadcostError};
use crate::timestamp::ServiceTime;

/// Read-only snapshot of a document's analysis.
///
/// Fetched fresh on every identifier change and replaced wholesale by the
/// next fetch. Use [`AnalysisSummary::validate`] after decoding: serde alone
/// cannot express the cost and timestamp invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_interventions: u64,
    pub total_cost: f64,
    pub analysis_started_at: ServiceTime,
    /// Absent while the report is still being produced.
    #[serde(default)]
    pub report_generated_at: Option<ServiceTime>,

    // Optional detail the service includes; carried through, never required.
    #[serde(default)]
    pub analysis_completed_at: Option<ServiceTime>,
    #[serde(default)]
    pub analysis_duration_seconds: Option<f64>,
    #[serde(default)]
    pub report_format: Option<String>,
    #[serde(default)]
    pub assumptions: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    #[serde(default)]
    pub summary_data: Option<SummaryData>,
}

/// Aggregates the service computes alongside the totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryData {
    #[serde(default)]
    pub interventions_by_type: BTreeMap<String, u64>,
}

impl AnalysisSummary {
    /// Builds a summary with only the required fields and validates it.
    pub fn new(
        total_interventions: u64,
        total_cost: f64,
        analysis_started_at: ServiceTime,
        report_generated_at: Option<ServiceTime>,
    ) -> Result<Self> {
        let summary = Self {
            total_interventions,
            total_cost,
            analysis_started_at,
            report_generated_at,
            analysis_completed_at: None,
            analysis_duration_seconds: None,
            report_format: None,
            assumptions: None,
            warnings: None,
            summary_data: None,
        };
        summary.validate()?;
        Ok(summary)
    }

    /// Checks the invariants serde cannot: a finite non-negative cost, and
    /// completion timestamps that do not precede the start.
    pub fn validate(&self) -> Result<()> {
        if !self.total_cost.is_finite() || self.total_cost < 0.0 {
            return Err(RoadcostError::invalid_summary(format!(
                "total_cost must be a non-negative amount, got {}",
                self.total_cost
            )));
        }
        if let Some(generated) = self.report_generated_at
            && generated < self.analysis_started_at
        {
            return Err(RoadcostError::invalid_summary(format!(
                "report_generated_at {} precedes analysis_started_at {}",
                generated, self.analysis_started_at
            )));
        }
        if let Some(completed) = self.analysis_completed_at
            && completed < self.analysis_started_at
        {
            return Err(RoadcostError::invalid_summary(format!(
                "analysis_completed_at {} precedes analysis_started_at {}",
                completed, self.analysis_started_at
            )));
        }
        Ok(())
    }

    /// Whether the downloadable report has been produced.
    pub fn is_report_ready(&self) -> bool {
        self.report_generated_at.is_some()
    }

    pub fn assumptions(&self) -> &[String] {
        self.assumptions.as_deref().unwrap_or_default()
    }

    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}
