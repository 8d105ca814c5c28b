use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ErrorsArgs;
use crate::collect::{RESULT_SUFFIX, list_ordered};
use crate::config::EvalConfig;
use crate::metrics::calculate_proportions;
use crate::model::{DetectionRecord, EvaluationReport, ReportColumn};
use crate::report::{self, OutputOptions};

/// Detection categories in report order, paired with their column header.
pub const ERROR_CATEGORIES: [(&str, &str); 5] = [
    ("Error Type5", "OFI"),
    ("Error Type4", "OSD"),
    ("Error Type3", "IRU"),
    ("Error Type2", "IRIC"),
    ("Error Type1", "OM"),
];

pub fn run(args: ErrorsArgs) -> Result<()> {
    let config = EvalConfig::from_selection(&args.selection);
    let report = evaluate(&config)?;

    report::emit(
        &report,
        &OutputOptions {
            json: args.selection.json,
            report_path: args.selection.report_path.as_deref(),
            benchmark_path: None,
        },
    )
}

pub fn evaluate(config: &EvalConfig) -> Result<EvaluationReport> {
    let detection_dir = config.opinion_detection_dir();
    info!(
        paradigm = config.paradigm.as_str(),
        model = config.model.as_str(),
        prompt = config.prompt.as_str(),
        source = %detection_dir.display(),
        "error distribution started"
    );

    let artifacts = list_ordered(&detection_dir, RESULT_SUFFIX)?;
    let records: Vec<DetectionRecord> = artifacts.load_all()?;
    let conclusions: Vec<&str> = records
        .iter()
        .map(|record| record.conclusion.as_str())
        .collect();
    let shares = calculate_proportions(&conclusions);

    for (category, share) in &shares {
        if !ERROR_CATEGORIES.iter().any(|(known, _)| *known == category.as_str()) {
            warn!(category = %category, share, "detection category is not reported");
        }
    }

    let columns = ERROR_CATEGORIES
        .iter()
        .map(|(category, header)| ReportColumn {
            header: header.to_string(),
            value: shares.get(*category).copied().unwrap_or(0.0),
        })
        .collect();

    info!(
        samples = records.len(),
        categories = shares.len(),
        "error distribution completed"
    );

    Ok(EvaluationReport {
        kind: "errors".to_string(),
        paradigm: config.paradigm.as_str().to_string(),
        model: config.model.as_str().to_string(),
        prompt: config.prompt.as_str().to_string(),
        sample_count: records.len(),
        columns,
    })
}
