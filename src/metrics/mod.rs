mod acceptance;
mod aggregate;
mod composite;
mod fact_labels;
mod proportions;
mod set_overlap;

pub use acceptance::acceptance_rate;
pub use aggregate::macro_average;
pub use composite::geometric_mean;
pub use fact_labels::fact_rpf1;
pub use proportions::calculate_proportions;
pub use set_overlap::extractive_rpf1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallPrecisionF1 {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

impl RecallPrecisionF1 {
    pub const ZERO: Self = Self {
        recall: 0.0,
        precision: 0.0,
        f1: 0.0,
    };

    pub fn from_ratios(recall: f64, precision: f64) -> Self {
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            recall,
            precision,
            f1,
        }
    }

    pub fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        Self::from_ratios(ratio(tp, tp + fn_), ratio(tp, tp + fp))
    }
}

pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
