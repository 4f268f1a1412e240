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

use parking_core::{fee::Fee, time::TimeDelta};
use parking_model::config::FacilityConfig;
use std::fmt::Display;

/// Flat tariff: every started block costs `rate_per_block`, and every stay
/// pays for at least one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    block_length: TimeDelta<i64>,
    rate_per_block: Fee<i64>,
}

impl FeeSchedule {
    /// `block_length` must be positive; a non-positive length falls back to a
    /// single second so that the block count stays defined.
    #[inline]
    pub fn new(block_length: TimeDelta<i64>, rate_per_block: Fee<i64>) -> Self {
        let block_length = if block_length.is_positive() {
            block_length
        } else {
            TimeDelta::seconds(1)
        };
        Self {
            block_length,
            rate_per_block,
        }
    }

    #[inline]
    pub fn block_length(&self) -> TimeDelta<i64> {
        self.block_length
    }

    #[inline]
    pub fn rate_per_block(&self) -> Fee<i64> {
        self.rate_per_block
    }

    /// Number of billed blocks for a stay of `elapsed`. Negative durations are
    /// billed like an instant departure.
    #[inline]
    pub fn blocks_for(&self, elapsed: TimeDelta<i64>) -> i64 {
        elapsed
            .clamp_non_negative()
            .div_ceil_blocks(self.block_length)
            .unwrap_or(i64::MAX)
            .max(1)
    }

    #[inline]
    pub fn fee_for(&self, elapsed: TimeDelta<i64>) -> Fee<i64> {
        self.rate_per_block.saturating_mul(self.blocks_for(elapsed))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::from(&FacilityConfig::default())
    }
}

impl From<&FacilityConfig> for FeeSchedule {
    fn from(config: &FacilityConfig) -> Self {
        FeeSchedule::new(config.block_length(), config.rate_per_block())
    }
}

impl Display for FeeSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FeeSchedule {{ {} per {} }}",
            self.rate_per_block, self.block_length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_elapsed_bills_one_block() {
        let s = FeeSchedule::default();
        assert_eq!(s.fee_for(TimeDelta::zero()), Fee::new(10));
    }

    #[test]
    fn test_block_boundaries() {
        let s = FeeSchedule::default();
        assert_eq!(s.fee_for(TimeDelta::minutes(30)), Fee::new(10));
        assert_eq!(s.fee_for(TimeDelta::minutes(31)), Fee::new(20));
        assert_eq!(s.fee_for(TimeDelta::seconds(1801)), Fee::new(20));
        assert_eq!(s.fee_for(TimeDelta::minutes(60)), Fee::new(20));
        assert_eq!(s.fee_for(TimeDelta::minutes(61)), Fee::new(30));
    }

    #[test]
    fn test_fee_is_monotone_in_elapsed_time() {
        let s = FeeSchedule::default();
        let mut previous = Fee::new(0);
        for minutes in 0..600 {
            let fee = s.fee_for(TimeDelta::minutes(minutes));
            assert!(fee >= previous, "fee dropped at {minutes} minutes");
            previous = fee;
        }
    }

    #[test]
    fn test_negative_elapsed_bills_one_block() {
        let s = FeeSchedule::default();
        assert_eq!(s.blocks_for(TimeDelta::new(-500)), 1);
    }

    #[test]
    fn test_custom_tariff_from_config() {
        let config = FacilityConfig::builder()
            .block_length(TimeDelta::minutes(15))
            .rate_per_block(Fee::new(4))
            .build()
            .unwrap();
        let s = FeeSchedule::from(&config);
        assert_eq!(s.fee_for(TimeDelta::minutes(40)), Fee::new(12));
    }

    #[test]
    fn test_huge_stays_saturate_instead_of_panicking() {
        let s = FeeSchedule::new(TimeDelta::minutes(30), Fee::new(i64::MAX / 2));
        assert_eq!(s.fee_for(TimeDelta::minutes(120)).value(), i64::MAX);
        assert_eq!(
            FeeSchedule::default().fee_for(TimeDelta::new(i64::MAX)),
            Fee::new((i64::MAX / 1800 + 1) * 10)
        );
    }
}
