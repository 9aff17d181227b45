//! Visibility waiter
//!
//! Polls an element until it reports visible, sleeping through the target's
//! own `delay` between checks. The number of polls is derived from
//! `timeout / interval`, so sub-interval precision is not honoured.

use crate::common::{TestFailure, TestOutcome};

use super::device::{Element, Target};

/// Timeout used when the caller gives none
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Delay between two visibility checks
pub const POLL_INTERVAL_SECS: f64 = 0.1;

/// Message carried by the timeout failure
pub const NEVER_VISIBLE: &str = "Element never became visible";

/// Wait for `element` to become visible using the default poll interval
pub fn wait_for<E: Element + ?Sized>(target: &dyn Target, element: &E, timeout_secs: Option<f64>) -> TestOutcome {
    wait_for_with(
        target,
        element,
        timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        POLL_INTERVAL_SECS,
    )
}

/// Wait for `element` to become visible, polling every `interval_secs`
///
/// Each attempt delays first and then checks, so a visible element still
/// costs one delay.
pub fn wait_for_with<E: Element + ?Sized>(
    target: &dyn Target,
    element: &E,
    timeout_secs: f64,
    interval_secs: f64,
) -> TestOutcome {
    let interval = if interval_secs.is_finite() && interval_secs > 0.0 {
        interval_secs
    } else {
        POLL_INTERVAL_SECS
    };
    let attempts = poll_attempts(timeout_secs, interval);

    for attempt in 1..=attempts {
        target.delay(interval);
        if element.is_visible() {
            tracing::trace!(attempt, "element became visible");
            return Ok(());
        }
    }

    tracing::debug!(attempts, timeout_secs, "element never became visible");
    Err(TestFailure::Timeout(NEVER_VISIBLE.to_string()))
}

/// Number of polls that fit in `timeout_secs`
///
/// Rounds up a partial interval, but ratios within float noise of a whole
/// number (0.3 / 0.1, 1.1 / 0.1) count as that whole number.
pub fn poll_attempts(timeout_secs: f64, interval_secs: f64) -> u32 {
    if timeout_secs.is_nan() || timeout_secs <= 0.0 || interval_secs.is_nan() || interval_secs <= 0.0 {
        return 0;
    }

    let ratio = timeout_secs / interval_secs;
    let nearest = ratio.round();
    let attempts = if (ratio - nearest).abs() < 1e-9 {
        nearest
    } else {
        ratio.ceil()
    };
    attempts.min(f64::from(u32::MAX)) as u32
}
