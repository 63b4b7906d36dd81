pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::QuizConfig;

pub use crate::adapters::http::{HttpQuestionApi, OfflineApi};
pub use crate::adapters::storage::{ConfiguredStore, JsonFileStore, MemoryStore};
pub use crate::core::{fallback::Served, service::QuizService};
pub use crate::domain::model::{AnswerSheet, Difficulty, NewQuestion, OptionLabel, Question, ScoreResult};
pub use crate::utils::error::{QuizError, Result};
