use super::Intervention;
use crate::core::{Result, ZoneDataset, ZoneRecord};
use crate::risk::classify_risk;
use crate::scoring::calculate_stress_score;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

/// Re-run scoring and classification over the whole dataset.
///
/// This is the synchronization point after any intervention: every record
/// leaves with a fresh `stress_score` and a `risk_level` derived from it,
/// computed with the same formulas as the initial assessment.
pub fn recalculate_stress(dataset: &ZoneDataset) -> Result<ZoneDataset> {
    let _span = info_span!("recalculate_stress", zones = dataset.len()).entered();

    let scored = calculate_stress_score(dataset)?;
    let classified = scored.map_records(|record| ZoneRecord {
        risk_level: record.stress_score.map(classify_risk),
        ..record.clone()
    });

    debug!("classified {} zones", classified.len());
    Ok(classified)
}

/// Initial assessment of freshly loaded data.
pub fn assess(dataset: &ZoneDataset) -> Result<ZoneDataset> {
    Scenario::baseline().run(dataset)
}

/// An ordered set of interventions followed by exactly one recomputation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    interventions: Vec<Intervention>,
}

impl Scenario {
    /// No interventions: scoring only.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Build from the two policy percentages; a 0 percentage adds nothing.
    pub fn from_percentages(waste_reduction: f64, emission_control: f64) -> Self {
        Self::baseline()
            .with(Intervention::WasteReduction(waste_reduction))
            .with(Intervention::EmissionControl(emission_control))
    }

    /// Append an intervention unless it is a no-op.
    pub fn with(mut self, intervention: Intervention) -> Self {
        if !intervention.is_noop() {
            self.interventions.push(intervention);
        }
        self
    }

    pub fn interventions(&self) -> &[Intervention] {
        &self.interventions
    }

    pub fn is_baseline(&self) -> bool {
        self.interventions.is_empty()
    }

    /// Apply every intervention, then recompute scores and levels once.
    ///
    /// `dataset` is only read, so the same source can back repeated what-if
    /// runs.
    pub fn run(&self, dataset: &ZoneDataset) -> Result<ZoneDataset> {
        let _span = info_span!(
            "scenario",
            interventions = self.interventions.len(),
            zones = dataset.len()
        )
        .entered();

        let adjusted = self
            .interventions
            .iter()
            .fold(dataset.clone(), |current, intervention| {
                debug!(%intervention, "applying intervention");
                intervention.apply(&current)
            });

        recalculate_stress(&adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, Error};
    use crate::risk::RiskLevel;
    use crate::simulation::{simulate_emission_control, simulate_waste_reduction};

    fn city() -> ZoneDataset {
        ZoneDataset::new(vec![
            ZoneRecord::new("Zone A", 200.0, 60.0, 30.0),
            ZoneRecord::new("Zone B", 100.0, 30.0, 20.0),
            ZoneRecord::new("Zone C", 250.0, 80.0, 35.0),
        ])
    }

    #[test]
    fn test_recalculate_produces_consistent_levels() {
        let result = recalculate_stress(&city()).unwrap();
        assert!(result.is_assessed());
        for record in result.iter() {
            let score = record.stress_score.unwrap();
            assert!((0.0..=1.0).contains(&score));
            assert_eq!(record.risk_level, Some(classify_risk(score)));
        }
    }

    #[test]
    fn test_recalculate_known_values() {
        let result = recalculate_stress(&city()).unwrap();
        let b = result.find("Zone B").unwrap();
        let c = result.find("Zone C").unwrap();
        assert_eq!(b.stress_score, Some(0.0));
        assert_eq!(b.risk_level, Some(RiskLevel::Low));
        assert_eq!(c.stress_score, Some(1.0));
        assert_eq!(c.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_recalculate_empty_dataset_fails() {
        let result = recalculate_stress(&ZoneDataset::default());
        assert!(matches!(result, Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_from_percentages_skips_zero() {
        assert!(Scenario::from_percentages(0.0, 0.0).is_baseline());
        assert_eq!(
            Scenario::from_percentages(0.0, 40.0).interventions(),
            &[Intervention::EmissionControl(40.0)]
        );
        assert_eq!(Scenario::from_percentages(50.0, 40.0).interventions().len(), 2);
    }

    #[test]
    fn test_zero_scenario_matches_assess() {
        let dataset = city();
        assert_eq!(
            Scenario::from_percentages(0.0, 0.0).run(&dataset).unwrap(),
            assess(&dataset).unwrap()
        );
    }

    #[test]
    fn test_scenario_chain_then_recompute() {
        let dataset = city();
        let result = Scenario::from_percentages(50.0, 40.0).run(&dataset).unwrap();

        let a = result.find("Zone A").unwrap();
        assert!((a.waste_index - 30.0).abs() < 1e-9);
        assert!((a.aqi - 120.0).abs() < 1e-9);

        // Same scores as scoring the manually transformed data.
        let manual = recalculate_stress(&simulate_emission_control(
            &simulate_waste_reduction(&dataset, 50.0),
            40.0,
        ))
        .unwrap();
        assert_eq!(result, manual);
        assert_eq!(a.risk_level, Some(classify_risk(a.stress_score.unwrap())));
    }

    #[test]
    fn test_scenario_does_not_mutate_source() {
        let dataset = city();
        let before = dataset.clone();
        let _ = Scenario::from_percentages(30.0, 60.0).run(&dataset).unwrap();
        let _ = Scenario::from_percentages(10.0, 0.0).run(&dataset).unwrap();
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_intervention_order_does_not_change_result() {
        let dataset = city();
        let forward = Scenario::baseline()
            .with(Intervention::WasteReduction(25.0))
            .with(Intervention::EmissionControl(15.0))
            .run(&dataset)
            .unwrap();
        let reverse = Scenario::baseline()
            .with(Intervention::EmissionControl(15.0))
            .with(Intervention::WasteReduction(25.0))
            .run(&dataset)
            .unwrap();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_uniform_reduction_keeps_relative_scores() {
        // Scaling a column uniformly leaves its min-max normalization intact.
        let dataset = city();
        let baseline = assess(&dataset).unwrap();
        let reduced = Scenario::from_percentages(0.0, 20.0).run(&dataset).unwrap();
        let before = baseline.column(Column::StressScore).unwrap();
        let after = reduced.column(Column::StressScore).unwrap();
        for (b, a) in before.iter().zip(&after) {
            assert!((b - a).abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_elimination_drops_aqi_contribution() {
        let result = Scenario::from_percentages(0.0, 100.0).run(&city()).unwrap();
        let max_score = result
            .column(Column::StressScore)
            .unwrap()
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max_score <= 0.5 + 1e-12);
        assert!(result.iter().all(|r| r.aqi == 0.0));
    }
}
