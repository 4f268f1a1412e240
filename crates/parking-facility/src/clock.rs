// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use parking_core::time::{TimeDelta, TimePoint};
use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

/// Source of the current instant. Every facility operation reads it once.
pub trait Clock {
    fn now(&self) -> TimePoint<i64>;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> TimePoint<i64> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now(&self) -> TimePoint<i64> {
        (**self).now()
    }
}

/// Wall clock in whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimePoint<i64> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        TimePoint::new(secs)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a handle kept outside a facility can
/// advance the time the facility observes.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    #[inline]
    pub fn new(start: TimePoint<i64>) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start.value())),
        }
    }

    #[inline]
    pub fn set(&self, t: TimePoint<i64>) {
        self.now.store(t.value(), Ordering::SeqCst);
    }

    /// Moves the clock by `delta` and returns the new instant. Saturates at the
    /// bounds of `i64`.
    #[inline]
    pub fn advance(&self, delta: TimeDelta<i64>) -> TimePoint<i64> {
        let mut current = self.now.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(delta.value());
            match self
                .now
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return TimePoint::new(next),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> TimePoint<i64> {
        TimePoint::new(self.now.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_where_told() {
        let c = ManualClock::new(TimePoint::new(1_000));
        assert_eq!(c.now(), TimePoint::new(1_000));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let c = ManualClock::new(TimePoint::new(0));
        let handle = c.clone();
        handle.advance(TimeDelta::minutes(45));
        assert_eq!(c.now(), TimePoint::new(2_700));
        handle.set(TimePoint::new(5));
        assert_eq!(c.now(), TimePoint::new(5));
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let c = ManualClock::new(TimePoint::new(i64::MAX - 1));
        assert_eq!(c.advance(TimeDelta::new(10)), TimePoint::new(i64::MAX));
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now().value() > 0);
    }

    #[test]
    fn test_clock_through_reference_and_arc() {
        let c = ManualClock::new(TimePoint::new(42));
        assert_eq!((&c).now(), TimePoint::new(42));
        assert_eq!(Arc::new(c).now(), TimePoint::new(42));
    }
}
