//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::*;
use crate::processing::records::MatchRecord;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a match report in one output format
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors and per-requirement detail
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Flat export with one row per requirement
pub struct CsvFormatter;

/// Report generator that coordinates the different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    csv_formatter: CsvFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Job Matching Results</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .summary {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .summary-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        table { border-collapse: collapse; width: 100%; font-size: 14px; }
        th, td { border: 1px solid #dee2e6; padding: 8px; text-align: left; vertical-align: top; }
        th { background: #007acc; color: white; }
        tr:nth-child(even) { background: #f8f9fa; }
        .empty { color: #dc3545; font-style: italic; }
        .footer {
            margin-top: 40px;
            text-align: center;
            color: #6c757d;
            font-size: 14px;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Job Matching Results</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="summary">
            <div class="summary-item"><h4>Total Companies</h4><p><strong>{{ total_companies }}</strong></p></div>
            <div class="summary-item"><h4>Total Eligible Candidates</h4><p><strong>{{ total_candidates }}</strong></p></div>
            <div class="summary-item"><h4>Avg Candidates per Company</h4><p><strong>{{ avg_candidates }}</strong></p></div>
            <div class="summary-item"><h4>Avg Top Match</h4><p><strong>{{ avg_top_match }}%</strong></p></div>
        </div>

        <table>
            <thead>
                <tr>
                {% for header in headers %}
                    <th>{{ header }}</th>
                {% endfor %}
                </tr>
            </thead>
            <tbody>
            {% for row in rows %}
                <tr>
                {% for cell in row %}
                    <td>{{ cell }}</td>
                {% endfor %}
                </tr>
            {% endfor %}
            </tbody>
        </table>
        {% if rows.is_empty() %}
        <p class="empty">No requirements to match.</p>
        {% endif %}

        <div class="footer">
            <p>Skill threshold: {{ threshold }}% | Requirements: {{ requirements_loaded }} loaded, {{ requirements_skipped }} skipped | Candidates: {{ candidates_loaded }} loaded, {{ candidates_skipped }} skipped</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    total_companies: usize,
    total_candidates: usize,
    avg_candidates: String,
    avg_top_match: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    threshold: String,
    requirements_loaded: usize,
    requirements_skipped: usize,
    candidates_loaded: usize,
    candidates_skipped: usize,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn match_color(percentage: f64) -> Color {
        if percentage >= 80.0 {
            Color::Green
        } else if percentage >= 60.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn format_record_detail(&self, output: &mut String, row: &MatchTableRow, record: &MatchRecord) {
        output.push_str(&self.format_header(&format!("{} - {}", row.company_name, row.role), 3));
        output.push_str(&format!("  Country: {}\n", row.country));
        output.push_str(&format!("  Required Skills: {}\n", row.required_skills));
        output.push_str(&format!("  Eligible Degrees: {}\n", row.eligible_degrees));
        output.push_str(&format!(
            "  Openings: {} | Eligible: {} | Selected: {}\n",
            row.requirement_count,
            row.candidates_count,
            record.selected.len()
        ));

        if record.selected.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No eligible candidates", Color::Red)));
            return;
        }

        for (i, candidate) in record.selected.iter().enumerate() {
            let pct = format!("{}%", format_percentage(candidate.skill_match_percentage));
            output.push_str(&format!(
                "  {}. {} ({}, {}) {}\n",
                i + 1,
                candidate.name,
                candidate.degree,
                candidate.country,
                self.colorize(&pct, Self::match_color(candidate.skill_match_percentage))
            ));
            if !candidate.matched_skills.is_empty() {
                let skills: Vec<&str> = candidate.matched_skills.iter().map(String::as_str).collect();
                output.push_str(&format!("     Matched: {}\n", skills.join(", ")));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("Job Matching Results", 1));

        let meta = &report.metadata;
        output.push_str(&format!(
            "Requirements: {} loaded, {} skipped | Candidates: {} loaded, {} skipped\n",
            meta.requirements_loaded, meta.requirements_skipped, meta.candidates_loaded, meta.candidates_skipped
        ));
        output.push_str(&format!(
            "Skill threshold: {}% | Processing time: {}ms\n",
            format_percentage(meta.skill_threshold),
            meta.processing_time_ms
        ));

        let summary = &report.summary;
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!("Total Companies: {}\n", summary.total_companies));
        output.push_str(&format!("Total Eligible Candidates: {}\n", summary.total_candidates));
        output.push_str(&format!("Total Selected: {}\n", summary.total_selected));
        output.push_str(&format!(
            "Avg Candidates per Company: {:.1}\n",
            summary.avg_candidates_per_company
        ));
        output.push_str(&format!(
            "Avg Top Match: {:.1}%\n",
            summary.avg_top_match_percentage
        ));
        if summary.requirements_without_candidates > 0 {
            output.push_str(&format!(
                "{}\n",
                self.colorize(
                    &format!("{} requirement(s) have no eligible candidates", summary.requirements_without_candidates),
                    Color::Yellow
                )
            ));
        }

        if report.table.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("No requirements to match.", Color::Yellow)));
            return Ok(output);
        }

        output.push_str(&self.format_header("Matches", 2));
        for row in &report.table {
            let selected = if row.eligible_students_selected.is_empty() {
                self.colorize("none", Color::Red)
            } else {
                self.colorize(&row.eligible_students_selected, Color::Cyan)
            };
            output.push_str(&format!(
                "  • {} ({}, {}): {} [{}/{} eligible, top {}%]\n",
                row.company_name,
                row.role,
                row.country,
                selected,
                row.requirement_count,
                row.candidates_count,
                format_percentage(row.top_candidate_match_percentage)
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Detailed Analysis", 2));
            for (row, record) in report.table.iter().zip(&report.records) {
                self.format_record_detail(&mut output, row, record);
            }
        }

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

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Job Matching Results\n\n");

        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str(&format!("- **Total Companies:** {}\n", summary.total_companies));
        output.push_str(&format!("- **Total Eligible Candidates:** {}\n", summary.total_candidates));
        output.push_str(&format!(
            "- **Avg Candidates per Company:** {:.1}\n",
            summary.avg_candidates_per_company
        ));
        output.push_str(&format!("- **Avg Top Match:** {:.1}%\n\n", summary.avg_top_match_percentage));

        output.push_str("## Matches\n\n");
        output.push_str(&format!("| {} |\n", TABLE_HEADERS.join(" | ")));
        output.push_str(&format!("|{}\n", "---|".repeat(TABLE_HEADERS.len())));
        for row in &report.table {
            let cells: Vec<String> = row.cells().iter().map(|c| Self::escape_cell(c)).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');

        if self.include_metadata {
            let meta = &report.metadata;
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated {} | skill threshold {}% | requirements {} loaded / {} skipped | candidates {} loaded / {} skipped*\n",
                meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                format_percentage(meta.skill_threshold),
                meta.requirements_loaded,
                meta.requirements_skipped,
                meta.candidates_loaded,
                meta.candidates_skipped
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let meta = &report.metadata;
        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: meta.processing_time_ms,
            total_companies: report.summary.total_companies,
            total_candidates: report.summary.total_candidates,
            avg_candidates: format!("{:.1}", report.summary.avg_candidates_per_company),
            avg_top_match: format!("{:.1}", report.summary.avg_top_match_percentage),
            headers: TABLE_HEADERS.to_vec(),
            rows: report.table.iter().map(|row| row.cells().to_vec()).collect(),
            threshold: format_percentage(meta.skill_threshold),
            requirements_loaded: meta.requirements_loaded,
            requirements_skipped: meta.requirements_skipped,
            candidates_loaded: meta.candidates_loaded,
            candidates_skipped: meta.candidates_skipped,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| MatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        if report.table.is_empty() {
            writer.write_record(TABLE_HEADERS)?;
        }
        for row in &report.table {
            writer.serialize(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| MatcherError::OutputFormatting(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| MatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
            csv_formatter: CsvFormatter,
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// `job_matching_results_<YYYYmmdd_HHMMSS>.<ext>`
pub fn suggest_filename(format: &OutputFormat, timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Csv => "csv",
    };
    format!("job_matching_results_{}.{}", timestamp.format("%Y%m%d_%H%M%S"), extension)
}
