//! Output formatters for match reports

use crate::analysis::MatchReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a textual proportion bar in place of
/// the donut chart
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for integration with other front-ends; embeds the chart
/// spec so a browser UI can render the donut directly
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Coordinates the formatters behind a single entry point
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const BAR_WIDTH: usize = 40;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(percentage: u8) -> Color {
        match percentage {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn proportion_bar(&self, matched: u8) -> String {
        let filled = (matched as usize * BAR_WIDTH) / 100;
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
        let colored_bar = if self.use_colors {
            bar.as_str().color(Self::score_color(matched)).to_string()
        } else {
            bar
        };
        format!("  [{}] {}% matched / {}% gap\n", colored_bar, matched, 100 - matched)
    }

    fn section(&self, title: &str, body: &str) -> String {
        format!("\n{}\n  {}\n", self.colorize(title, Color::Blue), body)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.colorize("\n█ RESUME MATCH ANALYSIS\n", Color::Blue));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        let label_color = report
            .analysis
            .matched_percentage
            .map(Self::score_color)
            .unwrap_or(Color::Red);
        output.push('\n');
        output.push_str(&self.colorize(&report.analysis.percentage_label, label_color));
        output.push('\n');

        if let Some(chart) = &report.chart {
            output.push_str(&self.proportion_bar(chart.values[0]));
        }

        if !report.analysis.reason.is_empty() {
            output.push_str(&self.section("▓ Reason", &report.analysis.reason));
        }
        if !report.analysis.skills_to_improve.is_empty() {
            output.push_str(&self.section(
                "▓ Skills To Improve",
                &report.analysis.skills_to_improve,
            ));
        }
        if !report.analysis.keywords.is_empty() {
            output.push_str(&self.section("▓ Keywords", &report.analysis.keywords));
        }

        output.push_str(&format!(
            "\nDeployment: {} | Job: {} | Resume: {}\n",
            report.metadata.deployment,
            file_name(&report.metadata.job_file),
            file_name(&report.metadata.resume_file)
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Match Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Deployment:** {}\n\n",
                report
                    .metadata
                    .generated_at
                    .format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.deployment
            ));
            output.push_str(&format!(
                "**Job:** `{}` | **Resume:** `{}`\n\n",
                file_name(&report.metadata.job_file),
                file_name(&report.metadata.resume_file)
            ));
        }

        output.push_str(&format!("## {}\n\n", report.analysis.percentage_label));

        if let Some(chart) = &report.chart {
            output.push_str("| Slice | Share |\n|-------|-------|\n");
            for (label, value) in chart.labels.iter().zip(chart.values.iter()) {
                output.push_str(&format!("| {} | {}% |\n", label, value));
            }
            output.push('\n');
        }

        if !report.analysis.reason.is_empty() {
            output.push_str(&format!("## Reason\n\n{}\n\n", report.analysis.reason));
        }
        if !report.analysis.skills_to_improve.is_empty() {
            output.push_str(&format!(
                "## Skills To Improve\n\n{}\n\n",
                report.analysis.skills_to_improve
            ));
        }
        if !report.analysis.keywords.is_empty() {
            output.push_str(&format!("## Keywords\n\n{}\n", report.analysis.keywords));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
