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
    clock::{Clock, SystemClock},
    facility::ParkingFacility,
    policy::{BestFit, LotSelectionPolicy},
    report::FacilityReport,
};
use parking_core::{fee::Fee, width::Width};
use parking_model::{err::ParkingError, id::LotNumber};
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Cloneable handle to one facility shared between threads.
///
/// Mutations hold the write lock for their whole check-then-act sequence;
/// queries take the read lock and never see a half-applied change.
#[derive(Debug)]
pub struct SharedFacility<K = SystemClock, P = BestFit> {
    inner: Arc<RwLock<ParkingFacility<K, P>>>,
}

impl<K, P> Clone for SharedFacility<K, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, P> From<ParkingFacility<K, P>> for SharedFacility<K, P> {
    fn from(facility: ParkingFacility<K, P>) -> Self {
        Self::new(facility)
    }
}

impl<K, P> SharedFacility<K, P> {
    #[inline]
    pub fn new(facility: ParkingFacility<K, P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(facility)),
        }
    }

    // Mutations validate before they write, so a poisoned facility is still consistent.
    #[inline]
    fn read_guard(&self) -> RwLockReadGuard<'_, ParkingFacility<K, P>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_guard(&self) -> RwLockWriteGuard<'_, ParkingFacility<K, P>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the facility under the read lock.
    #[inline]
    pub fn read<R>(&self, f: impl FnOnce(&ParkingFacility<K, P>) -> R) -> R {
        f(&self.read_guard())
    }

    #[inline]
    pub fn status(&self) -> BTreeMap<LotNumber, String> {
        self.read_guard().status()
    }

    #[inline]
    pub fn lot_count(&self) -> usize {
        self.read_guard().lot_count()
    }

    #[inline]
    pub fn has_lot(&self, number: i64, width: i64) -> bool {
        self.read_guard().has_lot(number, width)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    #[inline]
    pub fn lot_width(&self, number: i64) -> Result<Width, ParkingError> {
        self.read_guard().lot_width(number)
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.read_guard().occupied_count()
    }

    #[inline]
    pub fn total_revenue(&self) -> Fee<i64> {
        self.read_guard().total_revenue()
    }

    #[inline]
    pub fn report(&self) -> FacilityReport {
        self.read_guard().report()
    }
}

impl<K: Clock, P: LotSelectionPolicy> SharedFacility<K, P> {
    #[inline]
    pub fn park_at(&self, plate: &str, width: i64, lot: i64) -> Result<(), ParkingError> {
        self.write_guard().park_at(plate, width, lot)
    }

    #[inline]
    pub fn park(&self, plate: &str, width: i64) -> Result<LotNumber, ParkingError> {
        self.write_guard().park(plate, width)
    }

    #[inline]
    pub fn depart(&self, plate: &str) -> Result<Fee<i64>, ParkingError> {
        self.write_guard().depart(plate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use parking_core::time::TimePoint;
    use static_assertions::assert_impl_all;
    use std::thread;

    assert_impl_all!(SharedFacility: Send, Sync, Clone);
    assert_impl_all!(SharedFacility<ManualClock, BestFit>: Send, Sync, Clone);

    fn shared() -> SharedFacility<ManualClock, BestFit> {
        ParkingFacility::from_parallel(&[1, 2, 3, 4, 5, 6, 7, 8], &[5, 5, 5, 5, 6, 6, 7, 7])
            .unwrap()
            .with_clock(ManualClock::new(TimePoint::new(0)))
            .into()
    }

    #[test]
    fn test_clones_share_one_facility() {
        let a = shared();
        let b = a.clone();
        a.park_at("A", 5, 1).unwrap();
        assert_eq!(b.status()[&LotNumber::new(1)], "A");
        assert_eq!(b.depart("A").unwrap(), Fee::new(10));
        assert!(a.is_empty());
    }

    #[test]
    fn test_concurrent_auto_park_never_double_books() {
        let facility = shared();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let f = facility.clone();
                thread::spawn(move || f.park(&format!("CAR{i}"), 5))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let parked = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(parked, 8);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(ParkingError::is_conflict));
        assert_eq!(facility.occupied_count(), 8);
        facility.read(|f| assert_eq!(f.check_invariants(), Ok(())));
    }

    #[test]
    fn test_concurrent_same_plate_parks_once() {
        let facility = shared();
        let handles: Vec<_> = (1..=8)
            .map(|lot| {
                let f = facility.clone();
                thread::spawn(move || f.park_at("SAME", 5, lot))
            })
            .collect();
        let ok = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(ok, 1);
        assert_eq!(facility.occupied_count(), 1);
    }
}
