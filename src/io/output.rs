use crate::core::ZoneRecord;
use crate::formatting::{ColoredFormatter, FormattingConfig};
use crate::report::AssessmentReport;
use crate::risk::RiskLevel;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_interventions(report)?;
        self.write_zone_table(report)?;
        self.write_distribution(report)?;
        self.write_selected_zone(report)?;
        self.write_recommendations(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Urban Environmental Stress Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(source) = &report.source {
            writeln!(self.writer, "Source: `{}`", source.display())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_interventions(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Interventions")?;
        writeln!(self.writer)?;
        if report.interventions.is_empty() {
            writeln!(self.writer, "None (baseline assessment)")?;
        }
        for intervention in &report.interventions {
            writeln!(self.writer, "- {intervention}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_zone_table(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Zone Assessment")?;
        writeln!(self.writer)?;

        let mut table = markdown_table();
        table.set_header(vec![
            "Rank",
            "Zone",
            "AQI",
            "Waste Index",
            "Temperature (C)",
            "Stress Score",
            "Change",
            "Risk Level",
        ]);
        for (rank, record) in report.ranked().into_iter().enumerate() {
            table.add_row(vec![
                (rank + 1).to_string(),
                record.zone.clone(),
                format!("{:.0}", record.aqi),
                format!("{:.1}", record.waste_index),
                format!("{:.1}", record.temperature),
                score_text(record),
                change_text(report, record),
                risk_text(record).to_string(),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risk Distribution")?;
        writeln!(self.writer)?;

        let mut table = markdown_table();
        table.set_header(vec!["Risk Level", "Zones"]);
        for (level, count) in report.distribution.entries() {
            table.add_row(vec![level.to_string(), count.to_string()]);
        }
        table.add_row(vec![
            "**Total**".to_string(),
            report.distribution.total_zones.to_string(),
        ]);

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_selected_zone(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let Some(record) = report.selected() else {
            return Ok(());
        };

        writeln!(self.writer, "## Zone Focus: {}", record.zone)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- **Stress score**: {}", score_text(record))?;
        writeln!(self.writer, "- **Risk level**: {}", risk_text(record))?;
        if let Some(level) = record.risk_level {
            writeln!(self.writer, "- **Recommendation**: {}", level.recommendation())?;
        }
        if let Some(explanation) = &report.explanation {
            writeln!(self.writer)?;
            writeln!(self.writer, "> {explanation}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for (level, count) in report.distribution.entries() {
            if count > 0 {
                writeln!(
                    self.writer,
                    "- **{} risk ({} zones)**: {}",
                    level,
                    count,
                    level.recommendation()
                )?;
            }
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: ColoredFormatter,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: ColoredFormatter::new(config),
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_zone_table(report)?;
        self.print_distribution(report)?;
        self.print_selected_zone(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        writeln!(
            self.writer,
            "{}",
            f.header("Urban Environmental Stress Assessment")
        )?;
        writeln!(
            self.writer,
            "{}",
            f.header("=====================================")
        )?;
        if let Some(source) = &report.source {
            writeln!(self.writer, "  Data: {}", source.display())?;
        }
        let interventions = if report.interventions.is_empty() {
            "none (baseline)".to_string()
        } else {
            report
                .interventions
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(self.writer, "  Interventions: {interventions}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_zone_table(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let use_color = self.formatter.uses_color();
        let mut table = Table::new();
        if use_color {
            table.load_preset(UTF8_FULL).enforce_styling();
        } else {
            table.load_preset(ASCII_MARKDOWN).force_no_tty();
        }
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "Zone",
                "AQI",
                "Waste",
                "Temp (C)",
                "Humidity (%)",
                "Stress",
                "Change",
                "Risk",
            ]);

        for record in report.ranked() {
            let mut risk_cell = Cell::new(match record.risk_level {
                Some(level) => format!("{} {}", self.formatter.risk_marker(level), level),
                None => "-".to_string(),
            });
            if let (true, Some(level)) = (use_color, record.risk_level) {
                risk_cell = risk_cell.fg(risk_color(level));
            }

            table.add_row(vec![
                Cell::new(&record.zone),
                numeric(format!("{:.0}", record.aqi)),
                numeric(format!("{:.1}", record.waste_index)),
                numeric(format!("{:.1}", record.temperature)),
                numeric(
                    record
                        .humidity
                        .map_or_else(|| "-".to_string(), |h| format!("{h:.0}")),
                ),
                numeric(score_text(record)),
                numeric(change_text(report, record)),
                risk_cell,
            ]);
        }

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_distribution(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        writeln!(self.writer, "{}", f.bold("Risk distribution"))?;
        for (level, count) in report.distribution.entries() {
            let bar = "#".repeat(count);
            writeln!(
                self.writer,
                "  {:<9} {:>3}  {}",
                level.as_str(),
                count,
                f.risk(level, &bar)
            )?;
        }
        writeln!(
            self.writer,
            "  {}",
            f.dim(&format!("{} zones assessed", report.distribution.total_zones))
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_selected_zone(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let Some(record) = report.selected() else {
            return Ok(());
        };
        let f = &self.formatter;

        writeln!(self.writer, "{}", f.bold(&format!("Zone focus: {}", record.zone)))?;
        if let Some(level) = record.risk_level {
            writeln!(
                self.writer,
                "  {} {} (stress score {})",
                f.risk_marker(level),
                f.risk(level, level.as_str()),
                score_text(record)
            )?;
            writeln!(self.writer, "  {}", level.recommendation())?;
        }
        if let Some(explanation) = &report.explanation {
            writeln!(self.writer)?;
            writeln!(self.writer, "  {explanation}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn markdown_table() -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN).force_no_tty();
    table
}

fn numeric(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

fn score_text(record: &ZoneRecord) -> String {
    record
        .stress_score
        .map_or_else(|| "-".to_string(), |s| format!("{s:.3}"))
}

fn change_text(report: &AssessmentReport, record: &ZoneRecord) -> String {
    report
        .score_change(&record.zone)
        .map_or_else(|| "-".to_string(), |delta| format!("{delta:+.3}"))
}

fn risk_text(record: &ZoneRecord) -> &'static str {
    record.risk_level.map_or("-", |level| level.as_str())
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZoneDataset;
    use crate::simulation::Scenario;

    fn report(scenario: &Scenario) -> AssessmentReport {
        let dataset = ZoneDataset::new(vec![
            ZoneRecord::new("Zone A", 200.0, 60.0, 30.0),
            ZoneRecord::new("Zone B", 100.0, 30.0, 20.0),
            ZoneRecord::new("Zone C", 250.0, 80.0, 35.0),
        ]);
        AssessmentReport::build(&dataset, scenario).unwrap()
    }

    fn render(writer: &mut dyn FnMut(&mut Vec<u8>)) -> String {
        let mut buffer = Vec::new();
        writer(&mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    /// Trimmed cells of the first Markdown table row whose first or second cell is `key`.
    fn row_cells(text: &str, key: &str) -> Vec<String> {
        text.lines()
            .filter(|line| line.starts_with('|'))
            .map(|line| {
                line.trim_matches('|')
                    .split('|')
                    .map(|cell| cell.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .find(|cells| cells.iter().take(2).any(|cell| cell == key))
            .unwrap_or_else(|| panic!("no table row for {key}"))
    }

    #[test]
    fn test_json_writer_emits_zones_and_distribution() {
        let report = report(&Scenario::baseline());
        let text = render(&mut |buf| JsonWriter::new(buf).write_report(&report).unwrap());

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["zones"].as_array().unwrap().len(), 3);
        assert_eq!(value["zones"][2]["zone"], "Zone C");
        assert_eq!(value["zones"][2]["risk_level"], "High");
        assert_eq!(value["zones"][1]["stress_score"], 0.0);
        assert_eq!(value["distribution"]["total_zones"], 3);
        assert!(value.get("baseline").is_none());
    }

    #[test]
    fn test_json_writer_includes_interventions() {
        let report = report(&Scenario::from_percentages(20.0, 0.0));
        let text = render(&mut |buf| JsonWriter::new(buf).write_report(&report).unwrap());

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["interventions"][0]["kind"], "waste_reduction");
        assert_eq!(value["interventions"][0]["percent"], 20.0);
        assert_eq!(value["baseline"][0]["waste_index"], 60.0);
        assert_eq!(value["zones"][0]["waste_index"], 48.0);
    }

    #[test]
    fn test_markdown_writer_ranks_zones() {
        let report = report(&Scenario::baseline())
            .select_zone("Zone B")
            .unwrap()
            .with_explanation("Zone B is calm.".to_string());
        let text = render(&mut |buf| MarkdownWriter::new(buf).write_report(&report).unwrap());

        assert!(text.starts_with("# Urban Environmental Stress Report"));
        assert!(text.is_ascii());
        assert!(text.contains("Temperature (C)"));
        assert_eq!(&row_cells(&text, "Zone C")[..3], ["1", "Zone C", "250"]);
        assert_eq!(&row_cells(&text, "Zone B")[..3], ["3", "Zone B", "100"]);
        assert_eq!(row_cells(&text, "**Total**"), ["**Total**", "3"]);
        assert!(text.contains("None (baseline assessment)"));
        assert!(text.contains("## Zone Focus: Zone B"));
        assert!(text.contains("> Zone B is calm."));
    }

    #[test]
    fn test_terminal_writer_plain_output() {
        let report = report(&Scenario::from_percentages(0.0, 40.0));
        let text = render(&mut |buf| {
            TerminalWriter::new(buf, FormattingConfig::plain())
                .write_report(&report)
                .unwrap()
        });

        assert!(!text.contains('\u{1b}'));
        assert!(text.is_ascii());
        assert!(text.contains("Temp (C)"));
        assert!(text.contains("Emission control 40%"));
        assert!(text.contains("[HIGH] High"));
        assert!(text.contains("Risk distribution"));
        let c = text.find("Zone C").unwrap();
        let b = text.find("Zone B").unwrap();
        assert!(c < b);
    }

    #[test]
    fn test_output_format_deserializes_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(format, OutputFormat::Markdown);
    }
}
