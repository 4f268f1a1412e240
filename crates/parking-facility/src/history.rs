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

use crate::billing::FeeSchedule;
use parking_core::{fee::Fee, time::TimePoint};
use parking_model::{
    id::{LotNumber, Plate},
    lot::Vehicle,
    session::{ClosedSession, OpenSession, ParkingSession},
};
use std::collections::HashMap;

/// Errors of history bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryError {
    /// The lot already has an open session.
    AlreadyOpen(LotNumber),
    /// The lot has no open session to close.
    NotOpen(LotNumber),
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::AlreadyOpen(lot) => write!(f, "Lot {} already has an open session", lot),
            HistoryError::NotOpen(lot) => write!(f, "Lot {} has no open session", lot),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-only log of every parking session.
///
/// Sessions are never removed; closing one replaces its `Open` entry with the
/// `Closed` one in place, so indices stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    sessions: Vec<ParkingSession>,
    open: HashMap<LotNumber, usize>,
}

impl HistoryLog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn open_session(&self, lot: LotNumber) -> Option<&OpenSession> {
        self.open
            .get(&lot)
            .and_then(|&i| self.sessions.get(i))
            .and_then(ParkingSession::as_open)
    }

    pub fn open(
        &mut self,
        lot: LotNumber,
        vehicle: Vehicle,
        entry: TimePoint<i64>,
    ) -> Result<&OpenSession, HistoryError> {
        if self.open.contains_key(&lot) {
            return Err(HistoryError::AlreadyOpen(lot));
        }
        let index = self.sessions.len();
        self.sessions
            .push(OpenSession::new(lot, vehicle, entry).into());
        self.open.insert(lot, index);
        self.sessions[index]
            .as_open()
            .ok_or(HistoryError::NotOpen(lot))
    }

    /// Closes the open session of `lot` at `exit` and settles its fee.
    pub fn close(
        &mut self,
        lot: LotNumber,
        exit: TimePoint<i64>,
        schedule: &FeeSchedule,
    ) -> Result<&ClosedSession, HistoryError> {
        let index = *self.open.get(&lot).ok_or(HistoryError::NotOpen(lot))?;
        let open = self
            .sessions
            .get(index)
            .and_then(ParkingSession::as_open)
            .cloned()
            .ok_or(HistoryError::NotOpen(lot))?;

        let fee = schedule.fee_for(open.elapsed_at(exit));
        self.sessions[index] = open.close(exit, fee).into();
        self.open.remove(&lot);
        self.sessions[index]
            .as_closed()
            .ok_or(HistoryError::NotOpen(lot))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ParkingSession> + '_ {
        self.sessions.iter()
    }

    #[inline]
    pub fn iter_open(&self) -> impl Iterator<Item = &OpenSession> + '_ {
        self.sessions.iter().filter_map(ParkingSession::as_open)
    }

    #[inline]
    pub fn iter_closed(&self) -> impl Iterator<Item = &ClosedSession> + '_ {
        self.sessions.iter().filter_map(ParkingSession::as_closed)
    }

    #[inline]
    pub fn sessions_of(&self, plate: Plate) -> impl Iterator<Item = &ParkingSession> + '_ {
        self.sessions.iter().filter(move |s| s.plate() == &plate)
    }

    /// Sum of all settled fees, saturating at `i64::MAX`.
    #[inline]
    pub fn total_revenue(&self) -> Fee<i64> {
        self.iter_closed()
            .map(ClosedSession::fee)
            .fold(Fee::new(0), Fee::saturating_add)
    }

    /// Points the open index of `lot` at the session stored at `index`.
    #[cfg(test)]
    pub(crate) fn force_open_index(&mut self, lot: LotNumber, index: usize) {
        self.open.insert(lot, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_core::{time::TimeDelta, width::Width};

    fn car(plate: &str) -> Vehicle {
        Vehicle::new(Plate::from(plate), Width::new(2))
    }

    fn n(v: i64) -> LotNumber {
        LotNumber::new(v)
    }

    #[test]
    fn test_open_then_close_settles_fee() {
        let mut h = HistoryLog::new();
        let schedule = FeeSchedule::default();
        h.open(n(1), car("A"), TimePoint::new(0)).unwrap();
        assert_eq!(h.open_count(), 1);

        let closed = h
            .close(n(1), TimePoint::new(0) + TimeDelta::minutes(31), &schedule)
            .unwrap();
        assert_eq!(closed.fee(), Fee::new(20));
        assert_eq!(h.open_count(), 0);
        assert_eq!(h.len(), 1);
        assert!(h.open_session(n(1)).is_none());
    }

    #[test]
    fn test_second_open_on_same_lot_is_rejected() {
        let mut h = HistoryLog::new();
        h.open(n(1), car("A"), TimePoint::new(0)).unwrap();
        assert_eq!(
            h.open(n(1), car("B"), TimePoint::new(5)).unwrap_err(),
            HistoryError::AlreadyOpen(n(1))
        );
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_close_without_open_session_fails() {
        let mut h = HistoryLog::new();
        assert_eq!(
            h.close(n(4), TimePoint::new(10), &FeeSchedule::default())
                .unwrap_err(),
            HistoryError::NotOpen(n(4))
        );
    }

    #[test]
    fn test_history_is_kept_across_stays() {
        let mut h = HistoryLog::new();
        let schedule = FeeSchedule::default();
        h.open(n(1), car("A"), TimePoint::new(0)).unwrap();
        h.close(n(1), TimePoint::new(60), &schedule).unwrap();
        h.open(n(2), car("A"), TimePoint::new(100)).unwrap();
        h.open(n(1), car("B"), TimePoint::new(100)).unwrap();
        h.close(n(2), TimePoint::new(100 + 3600), &schedule).unwrap();

        let stays: Vec<_> = h.sessions_of(Plate::from("A")).collect();
        assert_eq!(stays.len(), 2);
        assert!(stays.iter().all(|s| !s.is_open()));
        assert_eq!(h.iter_open().count(), 1);
        assert_eq!(h.total_revenue(), Fee::new(30));
    }
}
