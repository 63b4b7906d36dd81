use crate::utils::error::{QuizError, Result};
use std::future::Future;

/// Which side of [`remote_or_local`] produced a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served<T> {
    Remote(T),
    Local(T),
}

impl<T> Served<T> {
    pub fn into_inner(self) -> T {
        match self {
            Served::Remote(value) | Served::Local(value) => value,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Served::Local(_))
    }
}

/// Runs `remote`; on any error runs the future built by `local`.
///
/// The local future is only constructed when the remote one failed. No retry
/// is attempted. When both fail the result is [`QuizError::FallbackFailed`]
/// carrying both causes.
pub async fn remote_or_local<T, R, L, LF>(operation: &str, remote: R, local: L) -> Result<Served<T>>
where
    R: Future<Output = Result<T>>,
    L: FnOnce() -> LF,
    LF: Future<Output = Result<T>>,
{
    let remote_err = match remote.await {
        Ok(value) => {
            tracing::debug!("{}: served by remote API", operation);
            return Ok(Served::Remote(value));
        }
        Err(e) => e,
    };

    tracing::warn!(
        "{}: backend not available ({}), using local store",
        operation,
        remote_err
    );

    match local().await {
        Ok(value) => Ok(Served::Local(value)),
        Err(local_err) => {
            tracing::error!("{}: local fallback failed: {}", operation, local_err);
            Err(QuizError::FallbackFailed {
                operation: operation.to_string(),
                remote: Box::new(remote_err),
                local: Box::new(local_err),
            })
        }
    }
}
