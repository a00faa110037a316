//! Output formatters for rank reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RankReport;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankReport) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

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

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn score_color(score: f32) -> Color {
        match score {
            s if s >= 0.75 => Color::Green,
            s if s >= 0.5 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_score(&self, label: &str, score: f32) -> String {
        let percent = format!("{:.1}%", score * 100.0);
        format!("  {:<22} {}\n", label, self.colorize(&percent, Self::score_color(score)))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING"));
        output.push_str(&format!("  File: {}\n", report.filename));
        output.push_str(&format!(
            "  Model: {} | Generated: {} | {}ms\n\n",
            report.metadata.embedding_model,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_score("Semantic similarity:", report.semantic_score));
        output.push_str(&self.format_score("Keyword overlap:", report.keyword_overlap_score));

        output.push_str(&self.format_header(&format!(
            "MATCHED KEYWORDS (top {} from the job description)",
            report.metadata.top_n_keywords
        )));
        if report.matched_keywords.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("none", Color::Red)));
        } else {
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&report.matched_keywords.join(", "), Color::Green)
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

pub fn formatter_for(format: OutputFormat, use_colors: bool, pretty_json: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(pretty_json)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::ranker::ScoreResult;
    use chrono::{TimeZone, Utc};

    fn sample_report(matched: Vec<&str>) -> RankReport {
        RankReport::new(
            "resume.pdf",
            ScoreResult {
                semantic_score: 0.8,
                keyword_overlap_score: 0.25,
                matched_keywords: matched.into_iter().map(String::from).collect(),
            },
            ReportMetadata {
                embedding_model: "minishlab/potion-base-8M".to_string(),
                top_n_keywords: 30,
                generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                processing_time_ms: 42,
            },
        )
    }

    #[test]
    fn test_console_report_without_colors() {
        let output = ConsoleFormatter::new(false)
            .format_report(&sample_report(vec!["flask", "python"]))
            .unwrap();

        assert!(output.contains("File: resume.pdf"));
        assert!(output.contains("80.0%"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("flask, python"));
        assert!(output.contains("2024-05-01 12:00:00 UTC"));
    }

    #[test]
    fn test_console_report_with_no_matches() {
        let output = ConsoleFormatter::new(false)
            .format_report(&sample_report(vec![]))
            .unwrap();

        assert!(output.contains("none"));
    }

    #[test]
    fn test_json_report_keeps_wire_field_names() {
        let output = JsonFormatter::new(false)
            .format_report(&sample_report(vec!["rest"]))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["filename"], "resume.pdf");
        assert_eq!(json["semantic_score"], 0.8);
        assert_eq!(json["keyword_overlap_score"], 0.25);
        assert_eq!(json["matched_keywords"][0], "rest");
        assert_eq!(json["metadata"]["top_n_keywords"], 30);
    }

    #[test]
    fn test_formatter_selection() {
        let report = sample_report(vec!["rest"]);

        let json = formatter_for(OutputFormat::Json, false, true)
            .format_report(&report)
            .unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());

        let console = formatter_for(OutputFormat::Console, false, true)
            .format_report(&report)
            .unwrap();
        assert!(console.contains("File: resume.pdf"));
    }
}
