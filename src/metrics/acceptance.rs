use super::ratio;
use crate::model::ACCEPTED_CONCLUSION;

pub fn acceptance_rate<S: AsRef<str>>(conclusions: &[S]) -> f64 {
    let accepted = conclusions
        .iter()
        .filter(|conclusion| AsRef::<str>::as_ref(*conclusion) == ACCEPTED_CONCLUSION)
        .count();
    ratio(accepted, conclusions.len())
}
