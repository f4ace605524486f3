use super::resolve_data_path;
use crate::config::{load_config, UrbanStressConfig};
use crate::explain::{select_explainer, Credentials, ExplanationRequest, TextExplainer};
use crate::io::load_dataset;
use crate::report::AssessmentReport;
use crate::simulation::Scenario;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub struct ExplainConfig {
    pub zone: String,
    pub data: Option<PathBuf>,
    pub scenario: Scenario,
}

pub fn explain_zone(config: ExplainConfig) -> Result<()> {
    let settings = load_config();
    let text = render_explanation(&config, &settings, &Credentials::from_env())?;
    println!("{text}");
    Ok(())
}

pub fn render_explanation(
    config: &ExplainConfig,
    settings: &UrbanStressConfig,
    credentials: &Credentials,
) -> Result<String> {
    let data_path = resolve_data_path(config.data.clone(), settings);
    let dataset = load_dataset(&data_path)?;
    let report = AssessmentReport::build(&dataset, &config.scenario)?.select_zone(&config.zone)?;
    let record = report
        .selected()
        .ok_or_else(|| anyhow!("zone '{}' missing from report", config.zone))?;

    let request = ExplanationRequest::from_record(record)?;
    let explainer = select_explainer(&settings.explainer_config(), credentials);
    let explanation = explainer.explain(&request)?;

    Ok(format!(
        "{} ({} risk, stress score {:.3})\n\n{}",
        request.zone, request.risk_level, request.stress_score, explanation
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataConfig, ExplainerConfig, ExplainerProvider};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_explanation_for_zone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("zones.csv");
        fs::write(
            &path,
            "zone,AQI,waste_index,temperature\nZone A,200,60,30\nZone B,100,30,20\n",
        )
        .unwrap();
        let settings = UrbanStressConfig {
            data: Some(DataConfig { path: Some(path) }),
            explainer: Some(ExplainerConfig {
                provider: ExplainerProvider::Template,
                ..Default::default()
            }),
            ..Default::default()
        };
        let credentials = Credentials {
            gemini_api_key: Some("unused".to_string()),
            openai_api_key: None,
        };
        let config = ExplainConfig {
            zone: "Zone A".to_string(),
            data: None,
            scenario: Scenario::baseline(),
        };

        let text = render_explanation(&config, &settings, &credentials).unwrap();
        assert!(text.starts_with("Zone A (High risk, stress score 1.000)"));
        assert!(text.contains("Zone A has a High risk level with a stress score of 1.00."));
    }
}
