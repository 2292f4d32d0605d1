//! Wall-clock access.
//!
//! The pack cooldown is an absolute epoch deadline, so the dispenser needs
//! "now" in epoch milliseconds. `SystemTime` is not available in the
//! browser, where `BrowserClock` reads `Date.now()` instead; `platform_clock`
//! picks the right one. Tests drive a `ManualClock`.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Clock backed by `SystemTime`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock backed by the JavaScript `Date.now()`.
#[cfg(feature = "web")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

#[cfg(feature = "web")]
impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        epoch_ms_from_js(js_sys::Date::now())
    }
}

/// `Date.now()` is an `f64`; anything unusable reads as the epoch.
#[cfg_attr(not(feature = "web"), allow(dead_code))]
pub(crate) fn epoch_ms_from_js(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        ms as u64
    } else {
        0
    }
}

/// The real clock for the target: `BrowserClock` on wasm with the `web`
/// feature, `SystemClock` everywhere else.
#[must_use]
pub fn platform_clock() -> Box<dyn Clock> {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    {
        Box::new(BrowserClock)
    }
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    {
        Box::new(SystemClock)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `now_ms`.
    #[must_use]
    pub fn new(now_ms: u64) -> Self {
        Self { now: Cell::new(now_ms) }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    /// Move forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
