//! Cancellation and deadline for provider round-trips

use crate::error::PolicyError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-supplied cancellation signal and optional deadline.
///
/// Every network round-trip made on behalf of an invocation runs through
/// [`RequestContext::run`], which aborts it as soon as either fires.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline and a fresh cancellation token
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Set the deadline relative to now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Token that cancels this context
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drive `fut` until it completes, the token is cancelled, or the deadline passes.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, PolicyError>
    where
        F: Future<Output = Result<T, PolicyError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(PolicyError::Cancelled),
            _ = deadline => Err(PolicyError::DeadlineExceeded),
            result = fut => result,
        }
    }
}
