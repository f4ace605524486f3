use super::resolve_data_path;
use crate::config::{load_config, UrbanStressConfig};
use crate::explain::{select_explainer, Credentials, ExplanationRequest, TextExplainer};
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::output::{create_writer, OutputFormat};
use crate::io::{ensure_dir, load_dataset};
use crate::report::AssessmentReport;
use crate::simulation::Scenario;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub struct AssessConfig {
    pub data: Option<PathBuf>,
    pub scenario: Scenario,
    pub zone: Option<String>,
    pub explain: bool,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn handle_assess(config: AssessConfig) -> Result<()> {
    let settings = load_config();
    let credentials = Credentials::from_env();
    let report = build_report(&config, &settings, &credentials)?;

    let format = config
        .format
        .or_else(|| settings.default_format())
        .unwrap_or(OutputFormat::Terminal);
    write_report(&report, format, config.output.as_ref(), config.formatting)
}

/// Load, simulate, score and optionally explain; no output side effects.
pub fn build_report(
    config: &AssessConfig,
    settings: &UrbanStressConfig,
    credentials: &Credentials,
) -> Result<AssessmentReport> {
    let data_path = resolve_data_path(config.data.clone(), settings);
    let dataset = load_dataset(&data_path)?;
    debug!(zones = dataset.len(), path = %data_path.display(), "dataset loaded");

    let mut report = AssessmentReport::build(&dataset, &config.scenario)?.with_source(data_path);

    if let Some(zone) = &config.zone {
        report = report.select_zone(zone)?;
    }

    if config.explain {
        if report.selected_zone.is_none() {
            // Default to the first zone in file order
            if let Some(first) = report.zones.zones().first().map(|z| z.to_string()) {
                report = report.select_zone(&first)?;
            }
        }
        let request = report
            .selected()
            .map(ExplanationRequest::from_record)
            .transpose()?;
        if let Some(request) = request {
            let explainer = select_explainer(&settings.explainer_config(), credentials);
            let text = explainer.explain(&request)?;
            debug!(provider = explainer.provider(), "explanation generated");
            report = report.with_explanation(text);
        }
    }

    Ok(report)
}

fn write_report(
    report: &AssessmentReport,
    format: OutputFormat,
    output: Option<&PathBuf>,
    formatting: FormattingConfig,
) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            // No escape codes in files
            let formatting = FormattingConfig::new(ColorMode::Never, formatting.emoji);
            let mut writer = create_writer(format, Box::new(file), formatting);
            writer.write_report(report)?;
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let mut writer = create_writer(format, Box::new(std::io::stdout()), formatting);
            writer.write_report(report)?;
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}
