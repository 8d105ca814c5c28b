use std::collections::BTreeSet;

use super::RecallPrecisionF1;

// An empty prediction scores zero even against an empty gold set.
pub fn extractive_rpf1<S: AsRef<str>>(gold: &[S], predicted: &[S]) -> RecallPrecisionF1 {
    if predicted.is_empty() {
        return RecallPrecisionF1::ZERO;
    }

    let gold: BTreeSet<&str> = gold.iter().map(AsRef::<str>::as_ref).collect();
    let predicted: BTreeSet<&str> = predicted.iter().map(AsRef::<str>::as_ref).collect();

    let tp = gold.intersection(&predicted).count();
    let fp = predicted.difference(&gold).count();
    let fn_ = gold.difference(&predicted).count();

    RecallPrecisionF1::from_counts(tp, fp, fn_)
}
