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

use crate::err::ConfigBuildError;
use parking_core::{fee::Fee, time::TimeDelta, width::Width};
use std::fmt::Display;

/// Fewest lots a facility may be built with.
pub const DEFAULT_MIN_LOT_COUNT: usize = 5;
/// Narrowest lot accepted when lots are given as parallel number/width sequences.
pub const DEFAULT_MIN_PARALLEL_LOT_WIDTH: i64 = 5;
/// Length of one billing block.
pub const DEFAULT_BLOCK_MINUTES: i64 = 30;
/// Currency units charged per started billing block.
pub const DEFAULT_RATE_PER_BLOCK: i64 = 10;

/// Policy values of a facility: construction limits and the flat tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilityConfig {
    min_lot_count: usize,
    min_parallel_lot_width: Width,
    block_length: TimeDelta<i64>,
    rate_per_block: Fee<i64>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            min_lot_count: DEFAULT_MIN_LOT_COUNT,
            min_parallel_lot_width: Width::new(DEFAULT_MIN_PARALLEL_LOT_WIDTH),
            block_length: TimeDelta::minutes(DEFAULT_BLOCK_MINUTES),
            rate_per_block: Fee::new(DEFAULT_RATE_PER_BLOCK),
        }
    }
}

impl FacilityConfig {
    #[inline]
    pub fn builder() -> FacilityConfigBuilder {
        FacilityConfigBuilder::new()
    }

    #[inline]
    pub fn min_lot_count(&self) -> usize {
        self.min_lot_count
    }

    #[inline]
    pub fn min_parallel_lot_width(&self) -> Width {
        self.min_parallel_lot_width
    }

    #[inline]
    pub fn block_length(&self) -> TimeDelta<i64> {
        self.block_length
    }

    #[inline]
    pub fn rate_per_block(&self) -> Fee<i64> {
        self.rate_per_block
    }
}

impl Display for FacilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FacilityConfig {{ min_lot_count: {}, min_parallel_lot_width: {}, block_length: {}, rate_per_block: {} }}",
            self.min_lot_count, self.min_parallel_lot_width, self.block_length, self.rate_per_block
        )
    }
}

/// Builder for `FacilityConfig`. Unset values keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct FacilityConfigBuilder {
    min_lot_count: Option<usize>,
    min_parallel_lot_width: Option<Width>,
    block_length: Option<TimeDelta<i64>>,
    rate_per_block: Option<Fee<i64>>,
}

impl FacilityConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn min_lot_count(mut self, v: usize) -> Self {
        self.min_lot_count = Some(v);
        self
    }

    #[inline]
    pub fn min_parallel_lot_width(mut self, v: Width) -> Self {
        self.min_parallel_lot_width = Some(v);
        self
    }

    #[inline]
    pub fn block_length(mut self, v: TimeDelta<i64>) -> Self {
        self.block_length = Some(v);
        self
    }

    #[inline]
    pub fn rate_per_block(mut self, v: Fee<i64>) -> Self {
        self.rate_per_block = Some(v);
        self
    }

    pub fn build(self) -> Result<FacilityConfig, ConfigBuildError> {
        let defaults = FacilityConfig::default();
        let config = FacilityConfig {
            min_lot_count: self.min_lot_count.unwrap_or(defaults.min_lot_count),
            min_parallel_lot_width: self
                .min_parallel_lot_width
                .unwrap_or(defaults.min_parallel_lot_width),
            block_length: self.block_length.unwrap_or(defaults.block_length),
            rate_per_block: self.rate_per_block.unwrap_or(defaults.rate_per_block),
        };

        if config.min_lot_count == 0 {
            return Err(ConfigBuildError::ZeroMinLotCount);
        }
        if !config.min_parallel_lot_width.is_positive() {
            return Err(ConfigBuildError::NonPositiveMinLotWidth(
                config.min_parallel_lot_width,
            ));
        }
        if !config.block_length.is_positive() {
            return Err(ConfigBuildError::NonPositiveBlockLength(
                config.block_length,
            ));
        }
        if config.rate_per_block.is_negative() {
            return Err(ConfigBuildError::NegativeRate(config.rate_per_block));
        }
        Ok(config)
    }
}
