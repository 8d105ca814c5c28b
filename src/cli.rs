use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "kgds-eval",
    version,
    about = "Score model outputs against the KGDS benchmark"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Paradigm metrics (recall, precision, F1, acceptance, composite).
    Paradigm(ParadigmArgs),
    /// Error-type distribution of opinion detection outputs.
    Errors(ErrorsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    #[arg(long, value_enum, default_value_t = Paradigm::EbsAos)]
    pub paradigm: Paradigm,

    #[arg(long, value_enum, default_value_t = Model::Gpt4o)]
    pub model: Model,

    #[arg(long, value_enum, default_value_t = PromptPattern::StructuredPrompt)]
    pub prompt: PromptPattern,

    #[arg(long, default_value = "outputs")]
    pub outputs_root: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ParadigmArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long, default_value = "benchmark/KGDS.json")]
    pub benchmark_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ErrorsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Paradigm {
    EbsAos,
    AbsAos,
}

impl Paradigm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EbsAos => "ebs-aos",
            Self::AbsAos => "abs-aos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EbsAos => "ebs",
            Self::AbsAos => "abs",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Model {
    #[value(name = "claude-3-opus")]
    Claude3Opus,
    #[value(name = "claude-3.5-haiku")]
    Claude35Haiku,
    #[value(name = "claude-3.5-sonnet")]
    Claude35Sonnet,
    #[value(name = "deepseek-v3")]
    DeepseekV3,
    #[value(name = "gemini-1.5-pro")]
    Gemini15Pro,
    #[value(name = "glm-4-plus")]
    Glm4Plus,
    #[value(name = "gpt-4-turbo")]
    Gpt4Turbo,
    #[value(name = "gpt-4o")]
    Gpt4o,
    #[value(name = "gpt-4o-mini")]
    Gpt4oMini,
    #[value(name = "llama-3.1-405b")]
    Llama31405b,
    #[value(name = "mistral-large")]
    MistralLarge,
    #[value(name = "qwen-max")]
    QwenMax,
}

impl Model {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude3Opus => "claude-3-opus",
            Self::Claude35Haiku => "claude-3.5-haiku",
            Self::Claude35Sonnet => "claude-3.5-sonnet",
            Self::DeepseekV3 => "deepseek-v3",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Glm4Plus => "glm-4-plus",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Llama31405b => "llama-3.1-405b",
            Self::MistralLarge => "mistral-large",
            Self::QwenMax => "qwen-max",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PromptPattern {
    StructuredPrompt,
    SelfReflection,
}

impl PromptPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StructuredPrompt => "structured-prompt",
            Self::SelfReflection => "self-reflection",
        }
    }
}
