use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::cli::{Model, Paradigm, PromptPattern, SelectionArgs};

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub paradigm: Paradigm,
    pub model: Model,
    pub prompt: PromptPattern,
    pub outputs_root: PathBuf,
}

impl EvalConfig {
    pub fn new(
        paradigm: Paradigm,
        model: Model,
        prompt: PromptPattern,
        outputs_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            paradigm,
            model,
            prompt,
            outputs_root: outputs_root.into(),
        }
    }

    pub fn from_selection(selection: &SelectionArgs) -> Self {
        Self::new(
            selection.paradigm,
            selection.model,
            selection.prompt,
            selection.outputs_root.clone(),
        )
    }

    fn run_dir(&self, stage: &[&str]) -> PathBuf {
        let mut path = stage
            .iter()
            .fold(self.outputs_root.clone(), |path, part| path.join(part));
        for part in [
            self.paradigm.as_str(),
            self.prompt.as_str(),
            self.model.as_str(),
        ] {
            path.push(part);
        }
        path
    }

    pub fn model_output_dir(&self) -> PathBuf {
        self.run_dir(&["paradigms"])
    }

    pub fn fact_verification_dir(&self) -> Result<PathBuf> {
        if self.paradigm != Paradigm::AbsAos {
            bail!(
                "fact verification outputs only exist for {}, not {}",
                Paradigm::AbsAos.as_str(),
                self.paradigm.as_str()
            );
        }
        Ok(self.run_dir(&["verification", "fact"]))
    }

    pub fn opinion_verification_dir(&self) -> PathBuf {
        self.run_dir(&["verification", "opinion"])
    }

    pub fn opinion_detection_dir(&self) -> PathBuf {
        self.run_dir(&["detection", "opinion"])
    }
}
