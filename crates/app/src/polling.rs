//! Bounded polling with a fixed interval.

use std::future::Future;
use std::time::Duration;

use myhome_domain::error::MyHomeError;

/// How long to wait before the first probe, between probes, and how many
/// probes to make before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(initial_delay: Duration, interval: Duration, max_attempts: u32) -> Self {
        Self {
            initial_delay,
            interval,
            max_attempts,
        }
    }
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Ready(T),
    Pending,
}

/// Probe until it reports [`Probe::Ready`].
///
/// The probe receives the 1-based attempt number. A probe error stops polling
/// and is returned as is; probes that should tolerate failures map them to
/// [`Probe::Pending`] themselves.
///
/// # Errors
///
/// Returns [`MyHomeError::TimedOut`] once `max_attempts` probes were pending,
/// or the first probe error.
pub async fn poll_until<T, F, Fut>(policy: &RetryPolicy, mut probe: F) -> Result<T, MyHomeError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Probe<T>, MyHomeError>>,
{
    tokio::time::sleep(policy.initial_delay).await;
    for attempt in 1..=policy.max_attempts {
        if let Probe::Ready(value) = probe(attempt).await? {
            tracing::debug!(attempt, "poll succeeded");
            return Ok(value);
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    tracing::warn!(attempts = policy.max_attempts, "poll gave up");
    Err(MyHomeError::TimedOut {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use myhome_domain::error::RejectedError;
    use tokio::time::Instant;

    const POLICY: RetryPolicy =
        RetryPolicy::new(Duration::from_secs(10), Duration::from_secs(5), 3);

    #[tokio::test(start_paused = true)]
    async fn should_return_once_ready() {
        let start = Instant::now();
        let value = poll_until(&POLICY, |attempt| async move {
            Ok(if attempt == 2 {
                Probe::Ready("done")
            } else {
                Probe::Pending
            })
        })
        .await
        .unwrap();
        assert_eq!(value, "done");
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn should_time_out_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = poll_until(&POLICY, |_| {
            calls += 1;
            async { Ok(Probe::Pending) }
        })
        .await;
        assert!(matches!(result, Err(MyHomeError::TimedOut { attempts: 3 })));
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_on_probe_error() {
        let result: Result<(), _> = poll_until(&POLICY, |_| async {
            Err(RejectedError::new("nope").into())
        })
        .await;
        assert!(matches!(result, Err(MyHomeError::Rejected(_))));
    }
}
