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

use num_traits::{PrimInt, Signed};
use std::{fmt::Display, ops::Add};

/// Number of seconds in one minute, the unit `TimeDelta::minutes` scales by.
pub const SECONDS_PER_MINUTE: i64 = 60;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimePoint<T: PrimInt>(T);

impl<T: PrimInt> Default for TimePoint<T> {
    #[inline]
    fn default() -> Self {
        TimePoint(T::zero())
    }
}

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.value())
    }
}

impl<T: PrimInt> From<T> for TimePoint<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimePoint(v)
    }
}

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimePoint::new(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }
}

impl<T: PrimInt + Signed> TimePoint<T> {
    /// Signed distance from `earlier` to `self`; saturates instead of overflowing.
    #[inline]
    pub fn saturating_since(self, earlier: TimePoint<T>) -> TimeDelta<T> {
        TimeDelta(self.0.saturating_sub(earlier.0))
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Negative durations become zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        if self.0.is_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// How many `block`s are needed to cover `self`, counting a partial block as
    /// a whole one. Returns `None` if `block` is not positive or `self` is
    /// negative.
    ///
    /// ```
    /// use parking_core::time::TimeDelta;
    ///
    /// let block = TimeDelta::new(1800_i64);
    /// assert_eq!(TimeDelta::new(0).div_ceil_blocks(block), Some(0));
    /// assert_eq!(TimeDelta::new(1800).div_ceil_blocks(block), Some(1));
    /// assert_eq!(TimeDelta::new(1801).div_ceil_blocks(block), Some(2));
    /// ```
    #[inline]
    pub fn div_ceil_blocks(self, block: TimeDelta<T>) -> Option<T> {
        if !block.0.is_positive() || self.0.is_negative() {
            return None;
        }
        let whole = self.0 / block.0;
        if (self.0 % block.0).is_zero() {
            Some(whole)
        } else {
            whole.checked_add(&T::one())
        }
    }
}

impl TimeDelta<i64> {
    #[inline]
    pub const fn seconds(seconds: i64) -> Self {
        TimeDelta(seconds)
    }

    #[inline]
    pub const fn minutes(minutes: i64) -> Self {
        TimeDelta(minutes * SECONDS_PER_MINUTE)
    }
}

impl<T: PrimInt + Display + Signed> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimePoint + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> From<T> for TimeDelta<T> {
    #[inline]
    fn from(v: T) -> Self {
        TimeDelta(v)
    }
}

impl<T: PrimInt + Signed> Default for TimeDelta<T> {
    #[inline]
    fn default() -> Self {
        TimeDelta::zero()
    }
}

/// The span a vehicle spent in a lot, from entry to exit.
///
/// Unlike a half-open scheduling window both ends are real instants; the exit
/// is never earlier than the entry because the constructor orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayInterval<T: PrimInt> {
    entry: TimePoint<T>,
    exit: TimePoint<T>,
}

impl<T: PrimInt> StayInterval<T> {
    #[inline]
    pub fn new(entry: TimePoint<T>, exit: TimePoint<T>) -> Self {
        if exit < entry {
            Self {
                entry: exit,
                exit: entry,
            }
        } else {
            Self { entry, exit }
        }
    }

    #[inline]
    pub fn entry(&self) -> TimePoint<T> {
        self.entry
    }

    #[inline]
    pub fn exit(&self) -> TimePoint<T> {
        self.exit
    }

    #[inline]
    pub fn contains(&self, t: TimePoint<T>) -> bool {
        self.entry <= t && t <= self.exit
    }
}

impl<T: PrimInt + Signed> StayInterval<T> {
    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.exit.saturating_since(self.entry)
    }
}

impl<T: PrimInt + Display> Display for StayInterval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.entry, self.exit)
    }
}
