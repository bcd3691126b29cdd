//! Time and cancellation limits for a solve request.
//!
//! Enumeration has no natural suspension points, so both strategies poll a
//! [`Budget`] from their inner loops and stop once it is exhausted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A flag a caller can raise from another thread to stop a running solve.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the token. Every budget holding a clone sees it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a budget check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The deadline has passed.
    DeadlineExceeded,
    /// The token was raised.
    Cancelled,
}

/// Optional deadline plus optional cancellation token.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl Budget {
    /// No deadline, no cancellation.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
            cancel: None,
        }
    }

    /// Expires at `deadline`.
    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Also stops once `token` is raised.
    #[must_use]
    pub fn cancellable(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fails once the token is raised or the deadline has passed.
    ///
    /// # Errors
    ///
    /// The reason the budget is exhausted.
    pub fn check(&self) -> Result<(), Interruption> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Interruption::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Interruption::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
