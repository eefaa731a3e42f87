//! Offloading synchronous port calls from async services.

use crate::error::{GignError, GignResult};

/// Run `work` on tokio's blocking pool.
///
/// Dropping the returned future detaches the work instead of stalling the
/// task that awaited it.
pub(crate) async fn run_blocking<T, F>(work: F) -> GignResult<T>
where
    F: FnOnce() -> GignResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| GignError::Internal {
            message: format!("blocking task failed: {e}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_closure_result() {
        assert_eq!(run_blocking(|| Ok(7)).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let err = run_blocking::<(), _>(|| panic!("boom")).await.unwrap_err();
        assert!(matches!(err, GignError::Internal { .. }));
    }
}
