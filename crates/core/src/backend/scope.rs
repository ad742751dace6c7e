use std::future::Future;

use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::errors::CoreError;

/// Lifetime of a page, as seen by its in-flight backend calls.
///
/// Dropping the scope (or calling [`ViewScope::cancel`]) cancels it; any
/// call run through [`ViewScope::run`] then resolves to
/// `CoreError::Cancelled` and its response is thrown away.
pub struct ViewScope {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ViewScope {
    pub fn new() -> Self {
        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// Token for work that outlives a borrow of the scope (spawned tasks).
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` unless the scope is cancelled first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        guarded(&self.token, fut).await
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewScope")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

/// Race `fut` against `token`. A result that lands after cancellation is discarded.
pub async fn guarded<T, F>(token: &CancellationToken, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    if token.is_cancelled() {
        return Err(CoreError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("scope cancelled, dropping in-flight request");
            Err(CoreError::Cancelled)
        }
        out = fut => {
            if token.is_cancelled() {
                debug!("response arrived after cancellation, discarded");
                Err(CoreError::Cancelled)
            } else {
                out
            }
        }
    }
}
