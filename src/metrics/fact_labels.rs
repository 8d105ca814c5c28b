use super::{RecallPrecisionF1, ratio};
use crate::error::{EvalError, EvalResult};
use crate::model::{ACCEPTED_CONCLUSION, BenchmarkRecord, InferenceRecord};

pub fn fact_rpf1(
    gold: &BenchmarkRecord,
    predicted: &[Vec<InferenceRecord>],
) -> EvalResult<RecallPrecisionF1> {
    let fact_labels = gold.fact_labels();
    let conclusions: Vec<&str> = predicted
        .iter()
        .flatten()
        .map(|record| record.conclusion.as_str())
        .collect();

    if fact_labels.len() != conclusions.len() {
        return Err(EvalError::length_mismatch(
            "atomic fact verification",
            &[
                ("gold_facts", fact_labels.len()),
                ("predicted_conclusions", conclusions.len()),
            ],
        ));
    }

    let mut need_recall = 0_usize;
    let mut actually_recalled = 0_usize;
    let mut unsupported_accepted = 0_usize;
    for (label, conclusion) in fact_labels.iter().zip(&conclusions) {
        let accepted = *conclusion == ACCEPTED_CONCLUSION;
        match *label {
            1 => {
                need_recall += 1;
                if accepted {
                    actually_recalled += 1;
                }
            }
            0 if accepted => unsupported_accepted += 1,
            _ => {}
        }
    }

    Ok(RecallPrecisionF1::from_ratios(
        ratio(actually_recalled, need_recall),
        ratio(actually_recalled, actually_recalled + unsupported_accepted),
    ))
}
