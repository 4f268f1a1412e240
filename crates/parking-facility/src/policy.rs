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

//! Lot selection for automatic check-in.
//!
//! The facility hands a policy the free lots that are wide enough for the
//! vehicle; the policy only decides which of them to take.

use parking_core::width::Width;
use parking_model::lot::Lot;
use rand::{Rng, SeedableRng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;

pub trait LotSelectionPolicy {
    /// Picks one of `candidates` for a vehicle of `width` and returns its index.
    ///
    /// Every candidate is free and at least `width` wide. An index outside
    /// `candidates` is treated like `None`.
    fn select(&mut self, width: Width, candidates: &[Lot]) -> Option<usize>;

    fn name(&self) -> &'static str;
}

impl<P: LotSelectionPolicy + ?Sized> LotSelectionPolicy for Box<P> {
    #[inline]
    fn select(&mut self, width: Width, candidates: &[Lot]) -> Option<usize> {
        (**self).select(width, candidates)
    }

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// The eligible lot with the lowest number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstFit;

impl LotSelectionPolicy for FirstFit {
    fn select(&mut self, _width: Width, candidates: &[Lot]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by_key(|(_, lot)| lot.number())
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "FirstFit"
    }
}

/// The narrowest eligible lot, lowest number on ties. Keeps wide lots free for
/// wide vehicles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestFit;

impl LotSelectionPolicy for BestFit {
    fn select(&mut self, width: Width, candidates: &[Lot]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .filter_map(|(i, lot)| {
                width
                    .slack_within(lot.width())
                    .map(|slack| (i, slack, lot.number()))
            })
            .min_by_key(|&(_, slack, number)| (slack, number))
            .map(|(i, _, _)| i)
    }

    fn name(&self) -> &'static str {
        "BestFit"
    }
}

/// A uniformly random eligible lot.
#[derive(Debug, Clone)]
pub struct RandomFit<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl RandomFit<ChaCha8Rng> {
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomFit<R> {
    #[inline]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LotSelectionPolicy for RandomFit<R> {
    fn select(&mut self, _width: Width, candidates: &[Lot]) -> Option<usize> {
        (0..candidates.len()).choose(&mut self.rng)
    }

    fn name(&self) -> &'static str {
        "RandomFit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_model::id::LotNumber;

    fn lots(entries: &[(i64, i64)]) -> Vec<Lot> {
        entries
            .iter()
            .map(|&(n, w)| Lot::new(LotNumber::new(n), Width::new(w)))
            .collect()
    }

    #[test]
    fn test_first_fit_picks_lowest_number_regardless_of_order() {
        let c = lots(&[(4, 3), (2, 9), (7, 2)]);
        assert_eq!(FirstFit.select(Width::new(2), &c), Some(1));
    }

    #[test]
    fn test_best_fit_picks_narrowest_then_lowest_number() {
        let c = lots(&[(1, 9), (5, 3), (3, 3), (4, 4)]);
        assert_eq!(BestFit.select(Width::new(3), &c), Some(2));
    }

    #[test]
    fn test_policies_return_none_without_candidates() {
        assert_eq!(FirstFit.select(Width::new(1), &[]), None);
        assert_eq!(BestFit.select(Width::new(1), &[]), None);
        assert_eq!(RandomFit::seeded(7).select(Width::new(1), &[]), None);
    }

    #[test]
    fn test_random_fit_is_reproducible_per_seed() {
        let c = lots(&[(1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]);
        let mut a = RandomFit::seeded(99);
        let mut b = RandomFit::seeded(99);
        for _ in 0..32 {
            let pick = a.select(Width::new(2), &c);
            assert_eq!(pick, b.select(Width::new(2), &c));
            assert!(pick.is_some_and(|i| i < c.len()));
        }
    }

    #[test]
    fn test_random_fit_reaches_every_candidate() {
        let c = lots(&[(1, 5), (2, 5), (3, 5)]);
        let mut p = RandomFit::with_rng(ChaCha8Rng::seed_from_u64(3));
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let Some(i) = p.select(Width::new(1), &c) {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_boxed_policy_delegates() {
        let mut p: Box<dyn LotSelectionPolicy> = Box::new(BestFit);
        assert_eq!(p.name(), "BestFit");
        let c = lots(&[(1, 9), (2, 4)]);
        assert_eq!(p.select(Width::new(4), &c), Some(1));
    }
}
