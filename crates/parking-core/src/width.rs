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

use std::fmt::Display;

/// Width of a lot or a vehicle, in the facility's abstract width units.
///
/// The raw value is signed so that a caller's non-positive input can be
/// represented and rejected by validation instead of being lost in a cast.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Width(i64);

impl Width {
    #[inline]
    pub const fn new(v: i64) -> Self {
        Width(v)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Whether something of this width fits into a space of width `space`.
    /// Equal widths fit.
    #[inline]
    pub const fn fits_within(self, space: Width) -> bool {
        self.0 <= space.0
    }

    /// Remaining room when `self` is placed into `space`, if it fits at all.
    #[inline]
    pub fn slack_within(self, space: Width) -> Option<Width> {
        space.0.checked_sub(self.0).filter(|s| *s >= 0).map(Width)
    }
}

impl Display for Width {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Width({})", self.0)
    }
}

impl From<i64> for Width {
    #[inline]
    fn from(v: i64) -> Self {
        Width(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_display() {
        assert_eq!(format!("{}", Width::new(3)), "Width(3)");
    }

    #[test]
    fn test_width_positivity() {
        assert!(Width::new(1).is_positive());
        assert!(!Width::new(0).is_positive());
        assert!(!Width::new(-4).is_positive());
    }

    #[test]
    fn test_fits_within_accepts_equal_width() {
        assert!(Width::new(2).fits_within(Width::new(2)));
        assert!(Width::new(2).fits_within(Width::new(3)));
        assert!(!Width::new(4).fits_within(Width::new(2)));
    }

    #[test]
    fn test_slack_within() {
        assert_eq!(Width::new(2).slack_within(Width::new(5)), Some(Width::new(3)));
        assert_eq!(Width::new(5).slack_within(Width::new(5)), Some(Width::new(0)));
        assert_eq!(Width::new(6).slack_within(Width::new(5)), None);
    }
}
