//! The assessed view handed to report writers and the explainer.

use crate::core::{Error, Result, ZoneDataset, ZoneRecord};
use crate::risk::RiskDistribution;
use crate::simulation::{assess, Intervention, Scenario};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub interventions: Vec<Intervention>,
    pub zones: ZoneDataset,
    /// Scores before any intervention; absent for a baseline scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<ZoneDataset>,
    pub distribution: RiskDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl AssessmentReport {
    /// Run `scenario` over `dataset`; also scores the untouched data when the
    /// scenario changes anything, so reports can show the difference.
    pub fn build(dataset: &ZoneDataset, scenario: &Scenario) -> Result<Self> {
        let zones = scenario.run(dataset)?;
        let baseline = if scenario.is_baseline() {
            None
        } else {
            Some(assess(dataset)?)
        };

        Ok(Self {
            generated_at: Utc::now(),
            source: None,
            interventions: scenario.interventions().to_vec(),
            distribution: RiskDistribution::from_dataset(&zones),
            zones,
            baseline,
            selected_zone: None,
            explanation: None,
        })
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Focus the report on one zone; unknown names list the valid ones.
    pub fn select_zone(mut self, zone: &str) -> Result<Self> {
        if self.zones.find(zone).is_none() {
            return Err(Error::Validation(format!(
                "unknown zone '{}' (known zones: {})",
                zone,
                self.zones.zones().join(", ")
            )));
        }
        self.selected_zone = Some(zone.to_string());
        Ok(self)
    }

    pub fn with_explanation(mut self, explanation: String) -> Self {
        self.explanation = Some(explanation);
        self
    }

    pub fn selected(&self) -> Option<&ZoneRecord> {
        self.selected_zone
            .as_deref()
            .and_then(|zone| self.zones.find(zone))
    }

    /// Zones ordered by stress score, highest first; ties keep source order.
    pub fn ranked(&self) -> Vec<&ZoneRecord> {
        let mut ranked: Vec<&ZoneRecord> = self.zones.iter().collect();
        ranked.sort_by(|a, b| {
            b.stress_score
                .unwrap_or(0.0)
                .total_cmp(&a.stress_score.unwrap_or(0.0))
        });
        ranked
    }

    /// Score after interventions minus score before, for one zone.
    pub fn score_change(&self, zone: &str) -> Option<f64> {
        let before = self.baseline.as_ref()?.find(zone)?.stress_score?;
        let after = self.zones.find(zone)?.stress_score?;
        Some(after - before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> ZoneDataset {
        ZoneDataset::new(vec![
            ZoneRecord::new("Zone A", 200.0, 60.0, 30.0),
            ZoneRecord::new("Zone B", 100.0, 30.0, 20.0),
            ZoneRecord::new("Zone C", 250.0, 80.0, 35.0),
        ])
    }

    #[test]
    fn test_baseline_report_has_no_comparison() {
        let report = AssessmentReport::build(&city(), &Scenario::baseline()).unwrap();
        assert!(report.baseline.is_none());
        assert!(report.interventions.is_empty());
        assert_eq!(report.score_change("Zone A"), None);
        assert_eq!(report.distribution.total_zones, 3);
    }

    #[test]
    fn test_ranked_highest_first() {
        let report = AssessmentReport::build(&city(), &Scenario::baseline()).unwrap();
        let order: Vec<&str> = report.ranked().iter().map(|r| r.zone.as_str()).collect();
        assert_eq!(order, vec!["Zone C", "Zone A", "Zone B"]);
    }

    #[test]
    fn test_intervention_report_keeps_baseline() {
        let scenario = Scenario::from_percentages(50.0, 0.0);
        let report = AssessmentReport::build(&city(), &scenario).unwrap();
        let baseline = report.baseline.as_ref().unwrap();
        assert_eq!(baseline.find("Zone A").unwrap().waste_index, 60.0);
        assert_eq!(report.zones.find("Zone A").unwrap().waste_index, 30.0);
        assert!(report.score_change("Zone A").is_some());
    }

    #[test]
    fn test_select_unknown_zone_lists_known() {
        let report = AssessmentReport::build(&city(), &Scenario::baseline()).unwrap();
        let err = report.select_zone("Zone Q").unwrap_err();
        assert!(err.to_string().contains("Zone A, Zone B, Zone C"));
    }

    #[test]
    fn test_select_zone() {
        let report = AssessmentReport::build(&city(), &Scenario::baseline())
            .unwrap()
            .select_zone("Zone B")
            .unwrap();
        assert_eq!(report.selected().map(|r| r.aqi), Some(100.0));
    }
}
