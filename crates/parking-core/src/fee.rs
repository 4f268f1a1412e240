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

use num_traits::{SaturatingAdd, SaturatingMul, Zero};

/// An exact amount of currency units charged for a stay.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Fee<T>(T);

impl<T: Copy> Fee<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Fee(value)
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, other: Fee<T>) -> Self
    where
        T: SaturatingAdd<Output = T>,
    {
        Fee(self.0.saturating_add(&other.0))
    }

    #[inline]
    pub fn saturating_mul(self, factor: T) -> Self
    where
        T: SaturatingMul<Output = T>,
    {
        Fee(self.0.saturating_mul(&factor))
    }

    #[inline]
    pub fn is_negative(self) -> bool
    where
        T: Zero + PartialOrd,
    {
        self.0 < T::zero()
    }
}

impl<T: Copy + Display> Display for Fee<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fee({})", self.0)
    }
}
