pub mod fallback;
pub mod seed;
pub mod service;

pub use crate::domain::model::{AnswerSheet, NewQuestion, Question, ScoreResult};
pub use crate::domain::ports::{ConfigProvider, QuestionApi, QuestionStore, QuizBackend};
pub use crate::utils::error::Result;
