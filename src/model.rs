use serde::{Deserialize, Serialize};

pub const ACCEPTED_CONCLUSION: &str = "knowable";

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "BSP")]
    pub background_paragraphs: Vec<ParagraphRef>,
    #[serde(rename = "BSPAF")]
    pub positive_facts: Vec<FactGroup>,
    #[serde(rename = "BNPAF")]
    pub negative_facts: Vec<FactGroup>,
}

impl BenchmarkRecord {
    pub fn paragraph_labels(&self) -> Vec<String> {
        self.background_paragraphs
            .iter()
            .map(|paragraph| format!("<Paragraph_{}>", paragraph.paragraph_index))
            .collect()
    }

    pub fn fact_labels(&self) -> Vec<i64> {
        self.positive_facts
            .iter()
            .chain(&self.negative_facts)
            .flat_map(|group| group.atomic_facts.iter().map(|fact| fact.label))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParagraphRef {
    pub paragraph_index: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactGroup {
    pub atomic_facts: Vec<AtomicFact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AtomicFact {
    #[serde(rename = "type")]
    pub label: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractiveOutput {
    #[serde(rename = "Extractive_Background_Summary")]
    pub extracted_paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceRecord {
    #[serde(rename = "Inference_Conclusion")]
    pub conclusion: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionRecord {
    #[serde(rename = "Detection_Conclusion")]
    pub conclusion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerSampleMetrics {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
    pub acceptance_rate: f64,
    pub composite: f64,
}

impl PerSampleMetrics {
    pub fn as_row(&self) -> Vec<f64> {
        vec![
            self.recall,
            self.precision,
            self.f1,
            self.acceptance_rate,
            self.composite,
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportColumn {
    pub header: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub kind: String,
    pub paradigm: String,
    pub model: String,
    pub prompt: String,
    pub sample_count: usize,
    pub columns: Vec<ReportColumn>,
}

impl EvaluationReport {
    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|column| column.value).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub benchmark_sha256: Option<String>,
    pub report: EvaluationReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_record_flattens_positive_then_negative_fact_labels() {
        let raw = serde_json::json!({
            "BSP": [{ "paragraph_index": 3 }, { "paragraph_index": 7 }],
            "BSPAF": [
                { "atomic_facts": [{ "type": 1, "fact": "a" }, { "type": 1 }] },
                { "atomic_facts": [{ "type": 0 }] }
            ],
            "BNPAF": [{ "atomic_facts": [{ "type": 0 }, { "type": 1 }] }],
            "title": "ignored"
        });

        let record: BenchmarkRecord =
            serde_json::from_value(raw).expect("benchmark record should deserialize");
        assert_eq!(record.fact_labels(), vec![1, 1, 0, 0, 1]);
        assert_eq!(
            record.paragraph_labels(),
            vec!["<Paragraph_3>".to_string(), "<Paragraph_7>".to_string()]
        );
    }

    #[test]
    fn benchmark_record_without_fact_collection_is_rejected() {
        let error = serde_json::from_str::<BenchmarkRecord>(r#"{ "BSP": [], "BNPAF": [] }"#)
            .expect_err("record without BSPAF should not deserialize");
        assert!(error.to_string().contains("BSPAF"), "unexpected error: {error}");

        let error = serde_json::from_str::<BenchmarkRecord>(
            r#"{ "BSP": [], "BSPAF": [{}], "BNPAF": [] }"#,
        )
        .expect_err("fact group without atomic_facts should not deserialize");
        assert!(error.to_string().contains("atomic_facts"), "unexpected error: {error}");
    }

    #[test]
    fn extractive_output_requires_summary_field() {
        let error = serde_json::from_str::<ExtractiveOutput>("{}")
            .expect_err("empty output should not deserialize");
        assert!(
            error.to_string().contains("Extractive_Background_Summary"),
            "unexpected error: {error}"
        );
    }
}
