use crate::domain::model::{AnswerSheet, NewQuestion, Question, ScoreResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Whole-collection persistence for the local question slot.
pub trait QuestionStore: Send + Sync {
    fn get(&self) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;
    fn set(&self, questions: &[Question]) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The remote quiz service.
#[async_trait]
pub trait QuestionApi: Send + Sync {
    async fn list_questions(&self) -> Result<Vec<Question>>;
    async fn create_question(&self, question: &NewQuestion) -> Result<Question>;
    async fn submit_answers(&self, answers: &AnswerSheet) -> Result<ScoreResult>;
}

#[async_trait]
impl<T: QuestionApi + ?Sized> QuestionApi for Box<T> {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        (**self).list_questions().await
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        (**self).create_question(question).await
    }

    async fn submit_answers(&self, answers: &AnswerSheet) -> Result<ScoreResult> {
        (**self).submit_answers(answers).await
    }
}

/// What the views talk to. The fallback policy lives behind this seam.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn list_questions(&self) -> Result<Vec<Question>>;
    async fn add_question(&self, question: NewQuestion) -> Result<Question>;
    async fn submit_quiz(&self, answers: &AnswerSheet) -> Result<ScoreResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_enabled(&self) -> bool;
    fn request_timeout_seconds(&self) -> u64;
    fn data_dir(&self) -> &str;
    fn storage_slot(&self) -> &str;
    fn ephemeral_storage(&self) -> bool;
    fn success_message_seconds(&self) -> u64;
}
