//! Timers and animation fallbacks.
//!
//! Completion events from the UI are unreliable (transition-end may never
//! fire), so every animation wait is raced against a timer. Whichever
//! finishes first moves the state machine on.

use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either, FutureExt, LocalBoxFuture};
use log::debug;

/// Source of delays.
pub trait Timer {
    /// A future that resolves after `ms` milliseconds.
    fn sleep(&self, ms: u64) -> LocalBoxFuture<'static, ()>;
}

/// Real delays via `futures-timer`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FuturesTimer;

impl Timer for FuturesTimer {
    fn sleep(&self, ms: u64) -> LocalBoxFuture<'static, ()> {
        futures_timer::Delay::new(Duration::from_millis(ms)).boxed_local()
    }
}

/// Timer that resolves immediately and remembers what it was asked for.
///
/// Runs whole battles and pack reveals without waiting, which is what
/// headless simulations and tests want.
#[derive(Debug, Default)]
pub struct InstantTimer {
    requested: RefCell<Vec<u64>>,
}

impl InstantTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<u64> {
        self.requested.borrow().clone()
    }
}

impl Timer for InstantTimer {
    fn sleep(&self, ms: u64) -> LocalBoxFuture<'static, ()> {
        self.requested.borrow_mut().push(ms);
        future::ready(()).boxed_local()
    }
}

/// Await `signal`, giving up after `timeout_ms`.
///
/// Returns `None` when the fallback fired first. The signal is polled
/// first, so an already-finished animation always wins.
pub async fn with_fallback<F>(signal: F, timer: &dyn Timer, timeout_ms: u64) -> Option<F::Output>
where
    F: Future,
{
    futures::pin_mut!(signal);
    match future::select(signal, timer.sleep(timeout_ms)).await {
        Either::Left((value, _)) => Some(value),
        Either::Right(((), _)) => {
            debug!("completion signal missing, fallback fired after {timeout_ms} ms");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_signal_wins_when_ready() {
        let timer = InstantTimer::new();
        let result = block_on(with_fallback(future::ready(7), &timer, 100));
        assert_eq!(result, Some(7));
        assert_eq!(timer.requested(), vec![100]);
    }

    #[test]
    fn test_fallback_fires_for_pending_signal() {
        let timer = InstantTimer::new();
        let result = block_on(with_fallback(future::pending::<()>(), &timer, 250));
        assert_eq!(result, None);
    }

    #[test]
    fn test_futures_timer_sleeps() {
        let start = std::time::Instant::now();
        block_on(FuturesTimer.sleep(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_real_fallback() {
        let result = block_on(with_fallback(future::pending::<u8>(), &FuturesTimer, 10));
        assert_eq!(result, None);
    }
}
