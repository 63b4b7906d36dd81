use crate::core::QuestionApi;
use crate::domain::model::{AnswerSheet, NewQuestion, Question, ScoreResult};
use crate::utils::error::{QuizError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// JSON client for the remote quiz service.
#[derive(Debug, Clone)]
pub struct HttpQuestionApi {
    client: Client,
    base_url: String,
}

impl HttpQuestionApi {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(QuizError::StatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl QuestionApi for HttpQuestionApi {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        let url = self.url("/questions");
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        let url = self.url("/questions");
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(question).send().await?;
        Self::decode(response).await
    }

    async fn submit_answers(&self, answers: &AnswerSheet) -> Result<ScoreResult> {
        let url = self.url("/quiz/submit");
        tracing::debug!("POST {} ({} answers)", url, answers.len());
        let response = self
            .client
            .post(&url)
            .json(&answers.to_submission())
            .send()
            .await?;
        Self::decode(response).await
    }
}

/// Stand-in used when the remote API is switched off; every call fails so the
/// local store serves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineApi;

#[async_trait]
impl QuestionApi for OfflineApi {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        Err(QuizError::OfflineError)
    }

    async fn create_question(&self, _question: &NewQuestion) -> Result<Question> {
        Err(QuizError::OfflineError)
    }

    async fn submit_answers(&self, _answers: &AnswerSheet) -> Result<ScoreResult> {
        Err(QuizError::OfflineError)
    }
}
