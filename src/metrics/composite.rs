use crate::error::{EvalError, EvalResult};

/// Geometric mean of non-negative scores; an unbalanced pair scores lower
/// than its arithmetic mean.
pub fn geometric_mean(numbers: &[f64]) -> EvalResult<f64> {
    if numbers.is_empty() {
        return Err(EvalError::InvalidInput(
            "geometric mean input cannot be empty".to_string(),
        ));
    }
    if let Some(negative) = numbers.iter().find(|value| **value < 0.0) {
        return Err(EvalError::InvalidInput(format!(
            "geometric mean input must be non-negative, got {negative}"
        )));
    }

    let product: f64 = numbers.iter().product();
    Ok(product.powf(1.0 / numbers.len() as f64))
}
