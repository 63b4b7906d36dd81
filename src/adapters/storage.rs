use crate::core::{ConfigProvider, QuestionStore};
use crate::domain::model::Question;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One named slot on disk holding the whole question list as JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(data_dir: P, slot: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{}.json", slot)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionStore for JsonFileStore {
    async fn get(&self) -> Result<Vec<Question>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    async fn set(&self, questions: &[Question]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(questions)?;
        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Wrote {} questions to {}", questions.len(), self.path.display());
        Ok(())
    }
}

/// In-process slot; clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }

    pub async fn snapshot(&self) -> Vec<Question> {
        self.questions.lock().await.clone()
    }
}

impl QuestionStore for MemoryStore {
    async fn get(&self) -> Result<Vec<Question>> {
        Ok(self.questions.lock().await.clone())
    }

    async fn set(&self, questions: &[Question]) -> Result<()> {
        *self.questions.lock().await = questions.to_vec();
        Ok(())
    }
}

/// The store selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    File(JsonFileStore),
    Memory(MemoryStore),
}

impl ConfiguredStore {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        if config.ephemeral_storage() {
            ConfiguredStore::Memory(MemoryStore::new())
        } else {
            ConfiguredStore::File(JsonFileStore::new(config.data_dir(), config.storage_slot()))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ConfiguredStore::File(store) => store.path().display().to_string(),
            ConfiguredStore::Memory(_) => "in-memory".to_string(),
        }
    }
}

impl QuestionStore for ConfiguredStore {
    async fn get(&self) -> Result<Vec<Question>> {
        match self {
            ConfiguredStore::File(store) => store.get().await,
            ConfiguredStore::Memory(store) => store.get().await,
        }
    }

    async fn set(&self, questions: &[Question]) -> Result<()> {
        match self {
            ConfiguredStore::File(store) => store.set(questions).await,
            ConfiguredStore::Memory(store) => store.set(questions).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_questions;
    use crate::utils::error::QuizError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_slot_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path(), "quiz-app-questions");

        assert!(store.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_writes_whole_collection() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("nested"), "quiz-app-questions");

        store.set(&sample_questions()).await.unwrap();

        assert!(temp_dir.path().join("nested/quiz-app-questions.json").exists());
        assert_eq!(store.get().await.unwrap(), sample_questions());

        store.set(&sample_questions()[..1]).await.unwrap();
        assert_eq!(store.get().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path(), "broken");
        std::fs::write(store.path(), b"{ not a list").unwrap();

        let result = store.get().await;

        assert!(matches!(result, Err(QuizError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set(&sample_questions()).await.unwrap();

        assert_eq!(other.snapshot().await.len(), 3);
    }
}
