//! Admin utilities: restart, reboot, training and friends.
//!
//! A utility action is fired and forgotten; the console then waits for the
//! assistant to come back by polling its readiness endpoint, shows `Done`
//! for a moment and returns to `Idle`. Only one action may run at a time.

use std::time::Duration;

use tokio::sync::{Mutex, watch};

use myhome_domain::error::MyHomeError;
use myhome_domain::utility::UtilityAction;

use crate::polling::{Probe, RetryPolicy, poll_until};
use crate::ports::ConsoleGateway;

/// Interval between readiness probes.
pub const READY_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long `Done` stays visible.
pub const DONE_HOLD: Duration = Duration::from_secs(3);

/// Readiness probes before an action is reported as failed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 300;

/// Progress of the current utility action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityStatus {
    Idle,
    /// Waiting for the assistant to report ready again.
    Running(UtilityAction),
    Done(UtilityAction),
    Failed(UtilityAction),
}

pub struct AdminConsole<G> {
    gateway: G,
    lock: Mutex<()>,
    status: watch::Sender<UtilityStatus>,
    max_attempts: u32,
}

impl<G: ConsoleGateway> AdminConsole<G> {
    pub fn new(gateway: G) -> Self {
        let (status, _) = watch::channel(UtilityStatus::Idle);
        Self {
            gateway,
            lock: Mutex::new(()),
            status,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Cap the number of readiness probes.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Follow the status of utility actions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UtilityStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn status(&self) -> UtilityStatus {
        *self.status.borrow()
    }

    /// Run `action` and wait until the assistant is ready again.
    ///
    /// The request itself is fire-and-forget: the backend may go down before
    /// answering, so its failure is only logged. Readiness probes that fail
    /// count as "not ready yet".
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::Busy`] while another action runs, or
    /// [`MyHomeError::TimedOut`] when the assistant never reports ready.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, action: UtilityAction) -> Result<(), MyHomeError> {
        let Ok(_guard) = self.lock.try_lock() else {
            tracing::debug!("utility action already in progress");
            return Err(MyHomeError::Busy);
        };
        self.status.send_replace(UtilityStatus::Running(action));
        if let Err(err) = self.gateway.run_utility(action).await {
            tracing::debug!(error = %err, "utility request did not answer");
        }

        let policy = RetryPolicy::new(action.settle_delay(), READY_POLL_INTERVAL, self.max_attempts);
        let gateway = &self.gateway;
        let ready = poll_until(&policy, |_| async move {
            Ok(match gateway.are_you_ready().await {
                Ok(true) => Probe::Ready(()),
                Ok(false) | Err(_) => Probe::Pending,
            })
        })
        .await;

        match ready {
            Ok(()) => {
                tracing::info!("assistant ready");
                self.status.send_replace(UtilityStatus::Done(action));
                tokio::time::sleep(DONE_HOLD).await;
                self.status.send_replace(UtilityStatus::Idle);
                Ok(())
            }
            Err(err) => {
                self.status.send_replace(UtilityStatus::Failed(action));
                Err(err)
            }
        }
    }
}
