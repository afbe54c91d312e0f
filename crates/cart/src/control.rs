//! Busy handling for controls that issue requests.
//!
//! A control (an "Add to cart" button, say) is marked busy while its request
//! runs. A failsafe timer releases it early if the request is slow, so the
//! control never stays stuck longer than the failsafe regardless of how long
//! the network takes.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Default time after which a busy control is released.
pub const DEFAULT_FAILSAFE: Duration = Duration::from_secs(4);

/// A UI control that can be disabled while its request is in flight.
pub trait Control: Send + Sync {
    fn set_busy(&self, busy: bool);
}

/// Run `task` with `control` marked busy.
///
/// The control is released when `task` finishes or when `failsafe` elapses,
/// whichever comes first, and only once. The task itself always runs to
/// completion and its output is returned.
pub async fn run_with_failsafe<C, F>(control: &C, failsafe: Duration, task: F) -> F::Output
where
    C: Control + ?Sized,
    F: Future,
{
    control.set_busy(true);

    let mut task = std::pin::pin!(task);
    if let Ok(output) = tokio::time::timeout(failsafe, task.as_mut()).await {
        control.set_busy(false);
        return output;
    }

    debug!(?failsafe, "Request still running, releasing control");
    control.set_busy(false);
    task.await
}
