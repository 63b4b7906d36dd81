use crate::app::question_form::{FormField, QuestionForm};
use crate::config::toml_config::QuizConfig;
use crate::domain::model::{Difficulty, OptionLabel};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "quiz")]
#[command(about = "Take a multiple-choice quiz and add questions, with or without the quiz server")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the quiz API")]
    pub api_base_url: Option<String>,

    #[arg(long, global = true, help = "Directory holding the local question store")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Per-request timeout for the quiz API")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Never call the quiz API")]
    pub offline: bool,

    #[arg(long, global = true, help = "Keep questions in memory only")]
    pub ephemeral: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (the default)
    Tui,
    /// Print every question
    List,
    /// Add a question
    Add(AddArgs),
    /// Submit answers such as `1=B 2=A` and print the score
    Submit {
        #[arg(required = true)]
        answers: Vec<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub text: String,
    #[arg(long)]
    pub option_a: Option<String>,
    #[arg(long)]
    pub option_b: Option<String>,
    #[arg(long)]
    pub option_c: Option<String>,
    #[arg(long)]
    pub option_d: Option<String>,
    #[arg(long)]
    pub correct: Option<OptionLabel>,
    #[arg(long, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,
}

impl AddArgs {
    /// Fills a form so the command line goes through the same validation as the UI.
    pub fn to_form(&self) -> QuestionForm {
        let mut form = QuestionForm::default();
        form.set_text(FormField::QuestionText, &self.text);

        let options = [&self.option_a, &self.option_b, &self.option_c, &self.option_d];
        for (label, option) in OptionLabel::ALL.into_iter().zip(options) {
            if let Some(text) = option {
                form.set_text(FormField::Option(label), text);
            }
        }

        form.set_correct_answer(self.correct);
        form.set_difficulty(self.difficulty);
        form
    }
}

impl CliConfig {
    /// Configuration file (or defaults) with command line overrides applied.
    pub fn resolve(&self) -> Result<QuizConfig> {
        let mut config = match &self.config {
            Some(path) => QuizConfig::from_file(path)?,
            None => QuizConfig::default(),
        };

        if let Some(url) = &self.api_base_url {
            config.api.base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = timeout;
        }
        if self.offline {
            config.api.enabled = false;
        }
        if self.ephemeral {
            config.storage.ephemeral = true;
        }

        Ok(config)
    }
}
