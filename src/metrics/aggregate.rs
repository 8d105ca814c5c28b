use crate::error::{EvalError, EvalResult};
use crate::util::round2;

/// Macro-average of per-sample rows, scaled to percent and rounded to two
/// decimals. Every row carries equal weight.
pub fn macro_average(rows: &[Vec<f64>]) -> EvalResult<Vec<f64>> {
    let Some(first) = rows.first() else {
        return Err(EvalError::ShapeMismatch(
            "cannot average an empty set of rows".to_string(),
        ));
    };

    let width = first.len();
    if let Some((position, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != width)
    {
        return Err(EvalError::ShapeMismatch(format!(
            "row {position} has {} columns, expected {width}",
            row.len()
        )));
    }

    let count = rows.len() as f64;
    Ok((0..width)
        .map(|column| {
            let total: f64 = rows.iter().map(|row| row[column] * 100.0).sum();
            round2(total / count)
        })
        .collect())
}
