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

use crate::{
    config::FacilityConfig,
    err::{ConfigurationError, InvalidLotWidthError, LengthMismatchError, TooFewLotsError},
    id::LotNumber,
    lot::Lot,
};
use parking_core::width::Width;
use std::{collections::BTreeMap, fmt::Display};

/// The fixed set of lots of a facility, ordered by lot number.
///
/// A table can only be obtained through validation, so every table holds at
/// least the configured number of lots and every lot has a positive number and
/// a positive width. It is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotTable {
    lots: BTreeMap<LotNumber, Width>,
}

impl LotTable {
    /// Builds a table from `(number, width)` entries, e.g. the entries of a map.
    ///
    /// Fails if there are fewer entries than `config.min_lot_count()`, if any
    /// number or width is not positive, or if a number repeats.
    pub fn from_map<I>(entries: I, config: &FacilityConfig) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let entries: Vec<(i64, i64)> = entries.into_iter().collect();
        if entries.len() < config.min_lot_count() {
            return Err(TooFewLotsError::new(entries.len(), config.min_lot_count()).into());
        }

        let mut builder = LotTableBuilder::new();
        for (number, width) in entries {
            builder.add_lot(LotNumber::new(number), Width::new(width))?;
        }
        builder.build(config)
    }

    /// Builds a table from two parallel sequences, `numbers[i]` having width
    /// `widths[i]`.
    ///
    /// On top of the checks of [`LotTable::from_map`] the sequences must have
    /// equal length and every width must reach `config.min_parallel_lot_width()`.
    pub fn from_parallel(
        numbers: &[i64],
        widths: &[i64],
        config: &FacilityConfig,
    ) -> Result<Self, ConfigurationError> {
        if numbers.len() != widths.len() {
            return Err(LengthMismatchError::new(numbers.len(), widths.len()).into());
        }
        if numbers.len() < config.min_lot_count() {
            return Err(TooFewLotsError::new(numbers.len(), config.min_lot_count()).into());
        }

        let mut builder = LotTableBuilder::new();
        builder.min_width(config.min_parallel_lot_width());
        for (&number, &width) in numbers.iter().zip(widths) {
            builder.add_lot(LotNumber::new(number), Width::new(width))?;
        }
        builder.build(config)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    #[inline]
    pub fn get(&self, number: LotNumber) -> Option<Lot> {
        self.lots.get(&number).map(|&w| Lot::new(number, w))
    }

    #[inline]
    pub fn width_of(&self, number: LotNumber) -> Option<Width> {
        self.lots.get(&number).copied()
    }

    #[inline]
    pub fn contains_number(&self, number: LotNumber) -> bool {
        self.lots.contains_key(&number)
    }

    /// True iff a lot with exactly this number and exactly this width exists.
    #[inline]
    pub fn contains(&self, number: LotNumber, width: Width) -> bool {
        self.lots.get(&number) == Some(&width)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Lot> + '_ {
        self.lots.iter().map(|(&n, &w)| Lot::new(n, w))
    }

    #[inline]
    pub fn numbers(&self) -> impl Iterator<Item = LotNumber> + '_ {
        self.lots.keys().copied()
    }

    #[inline]
    pub fn widest(&self) -> Option<Width> {
        self.lots.values().copied().max()
    }
}

impl Display for LotTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "LotTable ({} lots):", self.lots.len())?;
        for lot in self.iter() {
            writeln!(f, "  {}", lot)?;
        }
        Ok(())
    }
}

/// Incremental, validating construction of a [`LotTable`].
#[derive(Debug, Clone, Default)]
pub struct LotTableBuilder {
    lots: BTreeMap<LotNumber, Width>,
    min_width: Option<Width>,
}

impl LotTableBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lot added from now on must be at least `width` wide.
    #[inline]
    pub fn min_width(&mut self, width: Width) -> &mut Self {
        self.min_width = Some(width);
        self
    }

    pub fn add_lot(
        &mut self,
        number: LotNumber,
        width: Width,
    ) -> Result<&mut Self, ConfigurationError> {
        if !number.is_positive() {
            return Err(ConfigurationError::NonPositiveLotNumber(number));
        }
        let minimum = self.min_width.unwrap_or(Width::new(1));
        if !width.is_positive() || width < minimum {
            return Err(InvalidLotWidthError::new(number, width, minimum).into());
        }
        if self.lots.contains_key(&number) {
            return Err(ConfigurationError::DuplicateLotNumber(number));
        }
        self.lots.insert(number, width);
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn build(&self, config: &FacilityConfig) -> Result<LotTable, ConfigurationError> {
        if self.lots.len() < config.min_lot_count() {
            return Err(TooFewLotsError::new(self.lots.len(), config.min_lot_count()).into());
        }
        Ok(LotTable {
            lots: self.lots.clone(),
        })
    }
}
