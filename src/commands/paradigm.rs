use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::{Paradigm, ParadigmArgs};
use crate::collect::{
    FACT_SEPARATOR, OPINION_SEPARATOR, OrderedArtifacts, RESULT_SUFFIX, group_by_separator,
    list_ordered,
};
use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::metrics::{
    RecallPrecisionF1, acceptance_rate, extractive_rpf1, fact_rpf1, geometric_mean, macro_average,
};
use crate::model::{
    BenchmarkRecord, EvaluationReport, ExtractiveOutput, InferenceRecord, PerSampleMetrics,
    ReportColumn,
};
use crate::report::{self, OutputOptions};
use crate::util::load_json;

pub fn run(args: ParadigmArgs) -> Result<()> {
    let config = EvalConfig::from_selection(&args.selection);
    let report = evaluate(&config, &args.benchmark_path)?;

    report::emit(
        &report,
        &OutputOptions {
            json: args.selection.json,
            report_path: args.selection.report_path.as_deref(),
            benchmark_path: Some(args.benchmark_path.as_path()),
        },
    )
}

pub fn evaluate(config: &EvalConfig, benchmark_path: &Path) -> Result<EvaluationReport> {
    info!(
        paradigm = config.paradigm.as_str(),
        model = config.model.as_str(),
        prompt = config.prompt.as_str(),
        benchmark = %benchmark_path.display(),
        "paradigm evaluation started"
    );

    let benchmark: Vec<BenchmarkRecord> = load_json(benchmark_path)?;
    let model_outputs = list_ordered(&config.model_output_dir(), RESULT_SUFFIX)?;
    if model_outputs.is_empty() {
        warn!(dir = %config.model_output_dir().display(), "no model outputs found");
    }
    let gold = select_benchmark(&benchmark, &model_outputs)?;

    let opinion_artifacts = list_ordered(&config.opinion_verification_dir(), RESULT_SUFFIX)?;
    let opinion_groups: Vec<Vec<InferenceRecord>> =
        group_by_separator(&opinion_artifacts.handles, OPINION_SEPARATOR)?;

    let samples = match config.paradigm {
        Paradigm::EbsAos => {
            let outputs: Vec<ExtractiveOutput> = model_outputs.load_all()?;
            score_extractive(&gold, &outputs, &opinion_groups)?
        }
        Paradigm::AbsAos => {
            let fact_artifacts = list_ordered(&config.fact_verification_dir()?, RESULT_SUFFIX)?;
            let fact_groups: Vec<Vec<Vec<InferenceRecord>>> =
                group_by_separator(&fact_artifacts.handles, FACT_SEPARATOR)?;
            score_abstractive(&gold, &fact_groups, &opinion_groups)?
        }
    };

    let rows: Vec<Vec<f64>> = samples.iter().map(PerSampleMetrics::as_row).collect();
    let averaged = macro_average(&rows)?;

    let label = config.paradigm.label();
    let headers = [
        format!("{label}_r"),
        format!("{label}_p"),
        format!("{label}_f1"),
        "aos_r".to_string(),
        "plg_gm".to_string(),
    ];
    let columns = headers
        .into_iter()
        .zip(averaged)
        .map(|(header, value)| ReportColumn { header, value })
        .collect();

    info!(
        samples = samples.len(),
        model_outputs = model_outputs.len(),
        opinion_artifacts = opinion_artifacts.len(),
        "paradigm evaluation completed"
    );

    Ok(EvaluationReport {
        kind: "paradigm".to_string(),
        paradigm: config.paradigm.as_str().to_string(),
        model: config.model.as_str().to_string(),
        prompt: config.prompt.as_str().to_string(),
        sample_count: samples.len(),
        columns,
    })
}

// Sample indices are 1-based positions in the benchmark file.
fn select_benchmark<'a>(
    benchmark: &'a [BenchmarkRecord],
    artifacts: &OrderedArtifacts,
) -> EvalResult<Vec<&'a BenchmarkRecord>> {
    artifacts
        .handles
        .iter()
        .zip(&artifacts.indices)
        .map(|(handle, index)| {
            let index = index.ok_or_else(|| {
                EvalError::missing(&handle.path, "artifact name carries no sample index")
            })?;
            index
                .checked_sub(1)
                .and_then(|position| benchmark.get(usize::try_from(position).ok()?))
                .ok_or_else(|| {
                    EvalError::missing(
                        &handle.path,
                        format!(
                            "no benchmark record for sample {index} ({} records)",
                            benchmark.len()
                        ),
                    )
                })
        })
        .collect()
}

fn score_extractive(
    gold: &[&BenchmarkRecord],
    outputs: &[ExtractiveOutput],
    opinion_groups: &[Vec<InferenceRecord>],
) -> EvalResult<Vec<PerSampleMetrics>> {
    ensure_aligned(gold.len(), outputs.len(), opinion_groups.len(), "model_outputs")?;

    gold.iter()
        .zip(outputs)
        .zip(opinion_groups)
        .map(|((record, output), opinions)| {
            let scores = extractive_rpf1(&record.paragraph_labels(), &output.extracted_paragraphs);
            sample_metrics(scores, opinions)
        })
        .collect()
}

fn score_abstractive(
    gold: &[&BenchmarkRecord],
    fact_groups: &[Vec<Vec<InferenceRecord>>],
    opinion_groups: &[Vec<InferenceRecord>],
) -> EvalResult<Vec<PerSampleMetrics>> {
    ensure_aligned(gold.len(), fact_groups.len(), opinion_groups.len(), "fact_groups")?;

    gold.iter()
        .zip(fact_groups)
        .zip(opinion_groups)
        .map(|((record, facts), opinions)| sample_metrics(fact_rpf1(record, facts)?, opinions))
        .collect()
}

fn ensure_aligned(
    gold: usize,
    stage: usize,
    opinions: usize,
    stage_label: &str,
) -> EvalResult<()> {
    if gold == stage && stage == opinions {
        return Ok(());
    }
    Err(EvalError::length_mismatch(
        "paradigm samples",
        &[
            ("benchmark", gold),
            (stage_label, stage),
            ("opinion_groups", opinions),
        ],
    ))
}

fn sample_metrics(
    scores: RecallPrecisionF1,
    opinions: &[InferenceRecord],
) -> EvalResult<PerSampleMetrics> {
    let conclusions: Vec<&str> = opinions
        .iter()
        .map(|record| record.conclusion.as_str())
        .collect();
    let acceptance = acceptance_rate(&conclusions);
    let composite = geometric_mean(&[scores.f1, acceptance])?;

    let metrics = PerSampleMetrics {
        recall: scores.recall,
        precision: scores.precision,
        f1: scores.f1,
        acceptance_rate: acceptance,
        composite,
    };
    debug!(
        recall = metrics.recall,
        precision = metrics.precision,
        f1 = metrics.f1,
        acceptance_rate = metrics.acceptance_rate,
        composite = metrics.composite,
        "scored sample"
    );
    Ok(metrics)
}
