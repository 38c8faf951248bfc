use std::fmt;
use std::sync::OnceLock;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{LifecycleError, StopResult};

/// Where an instance is in its life
///
/// `NotStarted → Starting → Running → Stopping → Stopped`, or
/// `Starting → Failed` when startup does not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    NotStarted,
    Starting,
    Running,
    Stopping,
    Stopped,
    Failed,
}

impl LifecycleState {
    /// Whether no further transition can happen
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared between an instance, its stop handles and its supervisor
pub(crate) struct Lifecycle {
    state: watch::Sender<LifecycleState>,
    stop_requested: CancellationToken,
    result: OnceLock<StopResult>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: watch::Sender::new(LifecycleState::NotStarted),
            stop_requested: CancellationToken::new(),
            result: OnceLock::new(),
        }
    }

    pub(crate) fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub(crate) fn transition(&self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        tracing::debug!(from = %previous, to = %next, "lifecycle transition");
    }

    /// Record the outcome and enter `Stopped`
    pub(crate) fn finish(&self, result: StopResult) {
        let _ = self.result.set(result);
        self.transition(LifecycleState::Stopped);
    }

    /// Ask the supervisor to stop; repeated requests are no-ops
    pub(crate) fn request_stop(&self) {
        if !self.stop_requested.is_cancelled() {
            tracing::info!(state = %self.state(), "stop requested");
        }
        self.stop_requested.cancel();
    }

    pub(crate) async fn stop_requested(&self) {
        self.stop_requested.cancelled().await;
    }

    /// Wait for a terminal state and return the stop outcome
    pub(crate) async fn stopped(&self) -> Result<StopResult, LifecycleError> {
        let mut receiver = self.state.subscribe();
        let state = match receiver.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };

        match (state, self.result.get()) {
            (LifecycleState::Stopped, Some(result)) => Ok(result.clone()),
            (state, _) => Err(LifecycleError::IllegalState {
                operation: "stop",
                state,
            }),
        }
    }
}
