use crate::adapters::http::{HttpQuestionApi, OfflineApi};
use crate::adapters::storage::ConfiguredStore;
use crate::core::fallback::{remote_or_local, Served};
use crate::core::seed::sample_questions;
use crate::core::{ConfigProvider, QuestionApi, QuestionStore, QuizBackend};
use crate::domain::model::{AnswerSheet, NewQuestion, Question, ScoreResult};
use crate::domain::scoring::grade;
use crate::utils::error::{QuizError, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

/// Remote-first access to questions with a local store as fallback.
pub struct QuizService<A: QuestionApi, S: QuestionStore> {
    api: A,
    store: S,
    seed_checked: AtomicBool,
}

impl<A: QuestionApi, S: QuestionStore> QuizService<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            seed_checked: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: the local store answers when the API does not, and an
    /// unreadable store reads as empty.
    pub async fn list_questions(&self) -> Served<Vec<Question>> {
        let this = self;
        let served = remote_or_local("list questions", self.api.list_questions(), move || async move {
            Ok(this.read_local().await)
        })
        .await;

        served.unwrap_or_else(|e| {
            tracing::error!("Listing questions failed on both paths: {}", e);
            Served::Local(Vec::new())
        })
    }

    pub async fn add_question(&self, question: NewQuestion) -> Result<Served<Question>> {
        let this = self;
        let draft = &question;
        remote_or_local("add question", self.api.create_question(&question), move || async move {
            let mut questions = this.read_local().await;
            let record = draft.clone().with_id(next_question_id(&questions, Utc::now()));
            questions.push(record.clone());
            this.store.set(&questions).await?;
            tracing::info!("Stored question {} locally ({} total)", record.id, questions.len());
            Ok::<_, QuizError>(record)
        })
        .await
    }

    pub async fn submit_quiz(&self, answers: &AnswerSheet) -> Served<ScoreResult> {
        let this = self;
        let served = remote_or_local("submit quiz", self.api.submit_answers(answers), move || async move {
            let questions = this.read_local().await;
            Ok(grade(&questions, answers))
        })
        .await;

        match served {
            Ok(Served::Remote(mut result)) => {
                if result.answers.is_empty() {
                    result.answers = answers.clone();
                }
                Served::Remote(result)
            }
            Ok(local) => local,
            Err(e) => {
                tracing::error!("Submitting quiz failed on both paths: {}", e);
                Served::Local(grade(&[], answers))
            }
        }
    }

    /// Reads the local collection, seeding it on the first access if empty.
    async fn read_local(&self) -> Vec<Question> {
        let stored = self.store.get().await.unwrap_or_else(|e| {
            tracing::error!("Error reading local question store: {}", e);
            Vec::new()
        });

        if self.seed_checked.swap(true, Ordering::SeqCst) || !stored.is_empty() {
            return stored;
        }

        let samples = sample_questions();
        match self.store.set(&samples).await {
            Ok(()) => {
                tracing::info!("Seeded local question store with {} sample questions", samples.len());
                samples
            }
            Err(e) => {
                tracing::error!("Error seeding local question store: {}", e);
                stored
            }
        }
    }
}

impl QuizService<Box<dyn QuestionApi>, ConfiguredStore> {
    /// Wires the API client and store the configuration selects.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api: Box<dyn QuestionApi> = if config.api_enabled() {
            Box::new(HttpQuestionApi::new(
                config.api_base_url(),
                config.request_timeout_seconds(),
            )?)
        } else {
            Box::new(OfflineApi)
        };
        let store = ConfiguredStore::from_config(config);

        tracing::info!(
            "Quiz API: {}, local store: {}",
            if config.api_enabled() { config.api_base_url() } else { "disabled" },
            store.describe()
        );
        Ok(Self::new(api, store))
    }
}

#[async_trait::async_trait]
impl<A: QuestionApi, S: QuestionStore> QuizBackend for QuizService<A, S> {
    async fn list_questions(&self) -> Result<Vec<Question>> {
        Ok(QuizService::list_questions(self).await.into_inner())
    }

    async fn add_question(&self, question: NewQuestion) -> Result<Question> {
        QuizService::add_question(self, question)
            .await
            .map(Served::into_inner)
    }

    async fn submit_quiz(&self, answers: &AnswerSheet) -> Result<ScoreResult> {
        Ok(QuizService::submit_quiz(self, answers).await.into_inner())
    }
}

/// Id for a locally created question: the current time in milliseconds, or one
/// past the largest existing id when that is larger.
pub fn next_question_id(existing: &[Question], now: DateTime<Utc>) -> u64 {
    let now_millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let after_existing = existing
        .iter()
        .map(|q| q.id)
        .max()
        .map_or(0, |max| max.saturating_add(1));
    now_millis.max(after_existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::OfflineApi;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::model::{Difficulty, OptionLabel};
    use chrono::TimeZone;
    use httpmock::prelude::*;

    fn draft(text: &str) -> NewQuestion {
        NewQuestion {
            question_text: text.to_string(),
            option_a: Some("yes".to_string()),
            option_b: Some("no".to_string()),
            option_c: None,
            option_d: None,
            correct_answer: OptionLabel::A,
            difficulty_level: Difficulty::Medium,
        }
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl QuestionStore for ReadOnlyStore {
        async fn get(&self) -> Result<Vec<Question>> {
            Ok(Vec::new())
        }

        async fn set(&self, _questions: &[Question]) -> Result<()> {
            Err(QuizError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )))
        }
    }

    #[tokio::test]
    async fn test_first_local_list_returns_samples() {
        let service = QuizService::new(OfflineApi, MemoryStore::new());

        let served = service.list_questions().await;

        assert!(served.is_local());
        let questions = served.into_inner();
        assert_eq!(questions, sample_questions());
        assert_eq!(service.store().snapshot().await, sample_questions());
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let service = QuizService::new(OfflineApi, MemoryStore::new());

        let first = service.list_questions().await.into_inner();
        let second = service.list_questions().await.into_inner();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_existing_store_is_not_reseeded() {
        let existing = vec![draft("Mine?").with_id(42)];
        let service = QuizService::new(OfflineApi, MemoryStore::with_questions(existing.clone()));

        assert_eq!(service.list_questions().await.into_inner(), existing);
    }

    #[tokio::test]
    async fn test_local_add_appends_with_fresh_id() {
        let service = QuizService::new(OfflineApi, MemoryStore::new());

        let added = service.add_question(draft("Is Rust fun?")).await.unwrap();
        assert!(added.is_local());
        let added = added.into_inner();

        let questions = service.list_questions().await.into_inner();
        assert_eq!(questions.len(), 4);
        assert_eq!(questions.last(), Some(&added));
        assert!(questions[..3].iter().all(|q| q.id < added.id));
    }

    #[tokio::test]
    async fn test_local_add_ids_are_unique() {
        let service = QuizService::new(OfflineApi, MemoryStore::new());

        let first = service.add_question(draft("one")).await.unwrap().into_inner();
        let second = service.add_question(draft("two")).await.unwrap().into_inner();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_add_fails_when_both_paths_fail() {
        let service = QuizService::new(OfflineApi, ReadOnlyStore);

        let result = service.add_question(draft("lost")).await;

        assert!(matches!(result, Err(QuizError::FallbackFailed { .. })));
    }

    #[tokio::test]
    async fn test_local_submit_grades_against_samples() {
        let service = QuizService::new(OfflineApi, MemoryStore::new());
        let answers: AnswerSheet = [(1, OptionLabel::B), (2, OptionLabel::B), (3, OptionLabel::A)]
            .into_iter()
            .collect();

        let result = service.submit_quiz(&answers).await.into_inner();

        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.score, 67);
    }

    #[tokio::test]
    async fn test_remote_list_leaves_store_untouched() {
        let server = MockServer::start();
        let remote = serde_json::json!([{
            "id": 100,
            "questionText": "Remote?",
            "optionA": "a",
            "optionB": "b",
            "correctAnswer": "A",
            "difficultyLevel": "Hard"
        }]);
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/questions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(remote);
        });

        let api = crate::adapters::http::HttpQuestionApi::new(&server.base_url(), 5).unwrap();
        let service = QuizService::new(api, MemoryStore::new());

        let served = service.list_questions().await;

        api_mock.assert();
        assert!(!served.is_local());
        assert_eq!(served.into_inner()[0].id, 100);
        assert!(service.store().snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_remote_score_without_echo_gets_submitted_answers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/quiz/submit")
                .json_body(serde_json::json!([{"questionId": 1, "givenAnswer": "B"}]));
            then.status(200)
                .json_body(serde_json::json!({"score": 100, "correctAnswers": 1, "totalQuestions": 1}));
        });

        let api = crate::adapters::http::HttpQuestionApi::new(&server.base_url(), 5).unwrap();
        let service = QuizService::new(api, MemoryStore::new());
        let answers: AnswerSheet = [(1, OptionLabel::B)].into_iter().collect();

        let result = service.submit_quiz(&answers).await.into_inner();

        api_mock.assert();
        assert_eq!(result.score, 100);
        assert_eq!(result.answers, answers);
    }

    #[test]
    fn test_next_id_uses_clock_on_empty_store() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(next_question_id(&[], now), 1_700_000_000_000);
    }

    #[test]
    fn test_next_id_stays_above_existing() {
        let now = Utc.timestamp_millis_opt(50).unwrap();
        let existing = vec![draft("a").with_id(3), draft("b").with_id(70)];
        assert_eq!(next_question_id(&existing, now), 71);
    }
}
