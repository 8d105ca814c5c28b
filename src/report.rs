use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::model::{EvaluationReport, ReportManifest};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

const ROW_LABEL: &str = "Percentage (%)";
const HIGHLIGHT: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

pub struct OutputOptions<'a> {
    pub json: bool,
    pub report_path: Option<&'a Path>,
    pub benchmark_path: Option<&'a Path>,
}

pub fn emit(report: &EvaluationReport, options: &OutputOptions<'_>) -> Result<()> {
    let stdout = io::stdout();
    let mut output = io::BufWriter::new(stdout.lock());
    if options.json {
        serde_json::to_writer_pretty(&mut output, report)
            .context("failed to serialize report json output")?;
        writeln!(output)?;
    } else {
        write_text_report(&mut output, report, true)?;
    }
    output.flush()?;

    if let Some(path) = options.report_path {
        let benchmark_sha256 = options.benchmark_path.map(sha256_file).transpose()?;
        let manifest = ReportManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            benchmark_sha256,
            report: report.clone(),
        };
        write_json_pretty(path, &manifest)?;
        info!(path = %path.display(), "wrote evaluation report");
    }

    Ok(())
}

pub fn write_text_report<W: Write>(
    output: &mut W,
    report: &EvaluationReport,
    color: bool,
) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "Task Paradigm : {}", report.paradigm)?;
    writeln!(output, "Model Name    : {}", report.model)?;
    writeln!(output, "Prompt Pattern: {}", report.prompt)?;
    writeln!(output)?;

    let headers: Vec<String> = std::iter::once("Metric".to_string())
        .chain(report.columns.iter().map(|column| column.header.clone()))
        .collect();
    let values: Vec<String> = std::iter::once(ROW_LABEL.to_string())
        .chain(report.values().iter().map(|value| format!("{value:.2}")))
        .collect();

    write!(output, "{}", render_table(&headers, &values, color))?;
    Ok(())
}

// Odd padding goes left when the target width is odd, right otherwise.
fn center(text: &str, width: usize) -> String {
    let margin = width.saturating_sub(text.chars().count());
    let left = margin / 2 + (margin & width & 1);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(margin - left))
}

pub fn render_table(headers: &[String], values: &[String], color: bool) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .zip(values)
        .map(|(header, value)| header.chars().count().max(value.chars().count()))
        .collect();

    let border = |left: &str, join: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|width| "─".repeat(width + 2)).collect();
        format!("{left}{}{right}\n", segments.join(join))
    };
    let row = |cells: &[String], highlight_numbers: bool| {
        let rendered: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(position, (cell, &width))| {
                let padded = center(cell, width);
                if highlight_numbers && position > 0 {
                    format!(" {HIGHLIGHT}{padded}{RESET} ")
                } else {
                    format!(" {padded} ")
                }
            })
            .collect();
        format!("│{}│\n", rendered.join("│"))
    };

    let mut table = String::new();
    table.push_str(&border("┌", "┬", "┐"));
    table.push_str(&row(headers, false));
    table.push_str(&border("├", "┼", "┤"));
    table.push_str(&row(values, color));
    table.push_str(&border("└", "┴", "┘"));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportColumn;

    fn sample_report() -> EvaluationReport {
        EvaluationReport {
            kind: "paradigm".to_string(),
            paradigm: "ebs-aos".to_string(),
            model: "gpt-4o".to_string(),
            prompt: "structured-prompt".to_string(),
            sample_count: 2,
            columns: vec![
                ReportColumn {
                    header: "ebs_r".to_string(),
                    value: 50.0,
                },
                ReportColumn {
                    header: "plg_gm".to_string(),
                    value: 70.71,
                },
            ],
        }
    }

    #[test]
    fn render_table_pads_cells_to_widest_entry() {
        let headers = vec!["Metric".to_string(), "aos_r".to_string()];
        let values = vec!["Percentage (%)".to_string(), "5.00".to_string()];
        let table = render_table(&headers, &values, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "┌────────────────┬───────┐");
        assert_eq!(lines[1], "│     Metric     │ aos_r │");
        assert_eq!(lines[3], "│ Percentage (%) │  5.00 │");
        assert_eq!(lines[4], "└────────────────┴───────┘");
    }

    #[test]
    fn center_places_odd_padding_by_target_width_parity() {
        assert_eq!(center("5.00", 5), " 5.00");
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("abcd", 6), " abcd ");
        assert_eq!(center("wide", 2), "wide");
    }

    #[test]
    fn render_table_highlights_only_numeric_cells() {
        let headers = vec!["Metric".to_string(), "OM".to_string()];
        let values = vec!["Percentage (%)".to_string(), "12.50".to_string()];
        let table = render_table(&headers, &values, true);
        let value_line = table.lines().nth(3).expect("value row");

        assert!(value_line.starts_with("│ Percentage (%) │"));
        assert!(value_line.contains("\x1b[92m12.50\x1b[0m"));
        assert!(!table.lines().nth(1).expect("header row").contains('\x1b'));
    }

    #[test]
    fn text_report_starts_with_run_banner() {
        let mut buffer = Vec::new();
        write_text_report(&mut buffer, &sample_report(), false).expect("write report");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.starts_with("\nTask Paradigm : ebs-aos\nModel Name    : gpt-4o\n"));
        assert!(text.contains("Prompt Pattern: structured-prompt\n\n┌"));
        assert!(text.contains("70.71"));
    }

    #[test]
    fn report_file_records_benchmark_digest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let benchmark = dir.path().join("KGDS.json");
        std::fs::write(&benchmark, "[]").expect("write benchmark");
        let report_path = dir.path().join("reports").join("run.json");

        let options = OutputOptions {
            json: true,
            report_path: Some(report_path.as_path()),
            benchmark_path: Some(benchmark.as_path()),
        };
        emit(&sample_report(), &options).expect("emit report");

        let written: serde_json::Value =
            crate::util::load_json(&report_path).expect("report should be readable");
        assert_eq!(written["manifest_version"], 1);
        assert_eq!(written["report"]["columns"][1]["header"], "plg_gm");
        assert_eq!(
            written["benchmark_sha256"].as_str().map(str::len),
            Some(64)
        );
    }
}
