use std::collections::{BTreeMap, HashMap};

use crate::util::round2;

/// Percentage share of each category, rounded to two decimals and adjusted
/// so the shares sum to exactly 100. The rounding remainder goes to the
/// smallest share; ties resolve to the category seen first.
pub fn calculate_proportions<S: AsRef<str>>(items: &[S]) -> BTreeMap<String, f64> {
    if items.is_empty() {
        return BTreeMap::new();
    }

    let mut positions = HashMap::<&str, usize>::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        let label = AsRef::<str>::as_ref(item);
        match positions.get(label) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    let total = items.len() as f64;
    let mut shares: Vec<(&str, f64)> = counts
        .iter()
        .map(|(label, count)| (*label, round2(*count as f64 / total * 100.0)))
        .collect();

    let remainder = round2(100.0 - shares.iter().map(|(_, share)| share).sum::<f64>());
    if remainder != 0.0 {
        let mut smallest = 0;
        for (position, (_, share)) in shares.iter().enumerate() {
            if *share < shares[smallest].1 {
                smallest = position;
            }
        }
        shares[smallest].1 = round2(shares[smallest].1 + remainder);
    }

    shares
        .into_iter()
        .map(|(label, share)| (label.to_string(), share))
        .collect()
}
