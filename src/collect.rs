use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{EvalError, EvalResult};
use crate::util::load_json;

pub const RESULT_SUFFIX: &str = "result.json";
pub const FACT_SEPARATOR: &str = "abs-";
pub const OPINION_SEPARATOR: &str = "aos-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    pub path: PathBuf,
    pub name: String,
    pub index: Option<u64>,
}

impl ArtifactHandle {
    fn sort_cmp(&self, other: &Self) -> Ordering {
        compare_index(self.index, other.index).then_with(|| self.name.cmp(&other.name))
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        load_json(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderedArtifacts {
    pub handles: Vec<ArtifactHandle>,
    pub indices: Vec<Option<u64>>,
}

impl OrderedArtifacts {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn load_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.handles.iter().map(ArtifactHandle::load).collect()
    }
}

// Unprefixed identifiers sort after every numbered one.
fn compare_index(left: Option<u64>, right: Option<u64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn extract_index(name: &str, pattern: &Regex) -> Option<u64> {
    pattern
        .captures(name)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

pub fn list_ordered(folder: &Path, suffix: &str) -> Result<OrderedArtifacts> {
    let pattern = Regex::new(r"^(\d+)\.").context("failed to compile sample index regex")?;

    let entries =
        fs::read_dir(folder).map_err(|err| EvalError::missing(folder, err.to_string()))?;

    let mut handles = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", folder.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            warn!(path = %path.display(), "skipping non UTF-8 artifact name");
            continue;
        };
        if !name.ends_with(suffix) {
            continue;
        }

        let name = name.to_string();
        let index = extract_index(&name, &pattern);
        handles.push(ArtifactHandle { path, name, index });
    }

    handles.sort_by(ArtifactHandle::sort_cmp);
    let indices = handles.iter().map(|handle| handle.index).collect();

    debug!(
        folder = %folder.display(),
        artifacts = handles.len(),
        "listed ordered artifacts"
    );

    Ok(OrderedArtifacts { handles, indices })
}

pub fn group_key<'a>(identifier: &'a str, separator: &str) -> EvalResult<&'a str> {
    identifier
        .split(separator)
        .nth(1)
        .and_then(|tail| tail.split('_').next())
        .ok_or_else(|| EvalError::MalformedIdentifier {
            identifier: identifier.to_string(),
            separator: separator.to_string(),
        })
}

/// Splits ordered handles into maximal runs sharing a group key.
///
/// Input must already be ordered by numeric prefix (as produced by
/// [`list_ordered`]); an unordered slice is rejected. A key that comes back
/// after its run has closed starts a new group and is reported as a warning.
pub fn group_runs<'a>(
    handles: &'a [ArtifactHandle],
    separator: &str,
) -> EvalResult<Vec<Vec<&'a ArtifactHandle>>> {
    if let Some(pair) = handles
        .windows(2)
        .find(|pair| compare_index(pair[0].index, pair[1].index) == Ordering::Greater)
    {
        return Err(EvalError::InvalidInput(format!(
            "artifacts must be ordered by numeric prefix before grouping: {} precedes {}",
            pair[0].name, pair[1].name
        )));
    }

    let mut groups: Vec<Vec<&ArtifactHandle>> = Vec::new();
    let mut closed_keys = HashSet::<&str>::new();
    let mut current_key: Option<&str> = None;

    for handle in handles {
        let key = group_key(&handle.name, separator)?;
        if current_key == Some(key) {
            if let Some(group) = groups.last_mut() {
                group.push(handle);
                continue;
            }
        }

        if let Some(previous) = current_key {
            closed_keys.insert(previous);
        }
        if closed_keys.contains(key) {
            warn!(
                key,
                artifact = %handle.name,
                "group key reappears non-contiguously; starting a new group"
            );
        }
        groups.push(vec![handle]);
        current_key = Some(key);
    }

    Ok(groups)
}

pub fn group_by_separator<T: DeserializeOwned>(
    handles: &[ArtifactHandle],
    separator: &str,
) -> Result<Vec<Vec<T>>> {
    group_runs(handles, separator)?
        .into_iter()
        .map(|group| group.into_iter().map(ArtifactHandle::load).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str, index: Option<u64>) -> ArtifactHandle {
        ArtifactHandle {
            path: PathBuf::from(name),
            name: name.to_string(),
            index,
        }
    }

    fn touch(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).expect("write fixture");
    }

    #[test]
    fn list_ordered_sorts_numerically_and_puts_unprefixed_last() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "10.sample_result.json", "{}");
        touch(dir.path(), "summary_result.json", "{}");
        touch(dir.path(), "2.sample_result.json", "{}");
        touch(dir.path(), "1.sample_result.json", "{}");
        touch(dir.path(), "3.sample_notes.json", "{}");
        fs::create_dir(dir.path().join("4.nested_result.json")).expect("mkdir");

        let ordered = list_ordered(dir.path(), RESULT_SUFFIX).expect("listing should succeed");
        let names: Vec<&str> = ordered.handles.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "1.sample_result.json",
                "2.sample_result.json",
                "10.sample_result.json",
                "summary_result.json",
            ]
        );
        assert_eq!(ordered.indices, vec![Some(1), Some(2), Some(10), None]);
    }

    #[test]
    fn list_ordered_reports_missing_folder() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = list_ordered(&dir.path().join("absent"), RESULT_SUFFIX)
            .expect_err("missing folder should fail");
        assert!(matches!(
            error.downcast_ref::<EvalError>(),
            Some(EvalError::MissingArtifact { .. })
        ));
    }

    #[test]
    fn extract_index_requires_leading_digits_and_dot() {
        let pattern = Regex::new(r"^(\d+)\.").expect("regex");
        assert_eq!(extract_index("12.aos-12_1_result.json", &pattern), Some(12));
        assert_eq!(extract_index("x12.result.json", &pattern), None);
        assert_eq!(extract_index("12_result.json", &pattern), None);
    }

    #[test]
    fn group_key_takes_text_between_separator_and_underscore() {
        assert_eq!(group_key("3.aos-17_2_result.json", "aos-"), Ok("17"));
        assert_eq!(group_key("3.abs-5_result.json", "abs-"), Ok("5"));
        assert!(matches!(
            group_key("3.other_result.json", "aos-"),
            Err(EvalError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn group_runs_collects_consecutive_keys() {
        let handles = vec![
            handle("1.aos-1_1_result.json", Some(1)),
            handle("1.aos-1_2_result.json", Some(1)),
            handle("2.aos-2_1_result.json", Some(2)),
            handle("3.aos-3_1_result.json", Some(3)),
            handle("3.aos-3_2_result.json", Some(3)),
        ];

        let groups = group_runs(&handles, OPINION_SEPARATOR).expect("grouping should succeed");
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 1, 2]);
        assert_eq!(groups[2][1].name, "3.aos-3_2_result.json");
    }

    #[test]
    fn group_runs_splits_reappearing_key_into_separate_groups() {
        let handles = vec![
            handle("1.aos-7_1_result.json", Some(1)),
            handle("2.aos-8_1_result.json", Some(2)),
            handle("3.aos-7_2_result.json", Some(3)),
        ];

        let groups = group_runs(&handles, OPINION_SEPARATOR).expect("grouping should succeed");
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn group_runs_rejects_unordered_input() {
        let handles = vec![
            handle("2.aos-2_1_result.json", Some(2)),
            handle("1.aos-1_1_result.json", Some(1)),
        ];

        let error = group_runs(&handles, OPINION_SEPARATOR).expect_err("unordered should fail");
        assert!(matches!(error, EvalError::InvalidInput(_)));
    }

    #[test]
    fn group_by_separator_loads_group_contents_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "1.aos-1_1_result.json", r#"{"Inference_Conclusion":"knowable"}"#);
        touch(dir.path(), "1.aos-1_2_result.json", r#"{"Inference_Conclusion":"unknowable"}"#);
        touch(dir.path(), "2.aos-2_1_result.json", r#"{"Inference_Conclusion":"knowable"}"#);

        let ordered = list_ordered(dir.path(), RESULT_SUFFIX).expect("listing");
        let groups: Vec<Vec<crate::model::InferenceRecord>> =
            group_by_separator(&ordered.handles, OPINION_SEPARATOR).expect("grouping");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].conclusion, "knowable");
        assert_eq!(groups[0][1].conclusion, "unknowable");
        assert_eq!(groups[1].len(), 1);
    }
}
