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
    id::{LotNumber, Plate},
    lot::Vehicle,
};
use parking_core::{
    fee::Fee,
    time::{StayInterval, TimeDelta, TimePoint},
};
use std::fmt::Display;

/// A vehicle that is still in its lot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenSession {
    lot: LotNumber,
    vehicle: Vehicle,
    entry: TimePoint<i64>,
}

impl OpenSession {
    #[inline]
    pub fn new(lot: LotNumber, vehicle: Vehicle, entry: TimePoint<i64>) -> Self {
        Self {
            lot,
            vehicle,
            entry,
        }
    }

    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn entry(&self) -> TimePoint<i64> {
        self.entry
    }

    /// Time parked so far, never negative.
    #[inline]
    pub fn elapsed_at(&self, now: TimePoint<i64>) -> TimeDelta<i64> {
        now.saturating_since(self.entry).clamp_non_negative()
    }

    #[inline]
    pub fn close(self, exit: TimePoint<i64>, fee: Fee<i64>) -> ClosedSession {
        ClosedSession {
            lot: self.lot,
            vehicle: self.vehicle,
            stay: StayInterval::new(self.entry, exit.max(self.entry)),
            fee,
        }
    }
}

/// A finished stay with its settled fee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClosedSession {
    lot: LotNumber,
    vehicle: Vehicle,
    stay: StayInterval<i64>,
    fee: Fee<i64>,
}

impl ClosedSession {
    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn stay(&self) -> StayInterval<i64> {
        self.stay
    }

    #[inline]
    pub fn fee(&self) -> Fee<i64> {
        self.fee
    }
}

/// One continuous stay of a vehicle in a lot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParkingSession {
    Open(OpenSession),
    Closed(ClosedSession),
}

impl ParkingSession {
    #[inline]
    pub fn lot(&self) -> LotNumber {
        match self {
            ParkingSession::Open(s) => s.lot(),
            ParkingSession::Closed(s) => s.lot(),
        }
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        match self {
            ParkingSession::Open(s) => s.vehicle(),
            ParkingSession::Closed(s) => s.vehicle(),
        }
    }

    #[inline]
    pub fn plate(&self) -> &Plate {
        self.vehicle().plate()
    }

    #[inline]
    pub fn entry(&self) -> TimePoint<i64> {
        match self {
            ParkingSession::Open(s) => s.entry(),
            ParkingSession::Closed(s) => s.stay().entry(),
        }
    }

    #[inline]
    pub fn exit(&self) -> Option<TimePoint<i64>> {
        match self {
            ParkingSession::Open(_) => None,
            ParkingSession::Closed(s) => Some(s.stay().exit()),
        }
    }

    #[inline]
    pub fn fee(&self) -> Option<Fee<i64>> {
        match self {
            ParkingSession::Open(_) => None,
            ParkingSession::Closed(s) => Some(s.fee()),
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, ParkingSession::Open(_))
    }

    #[inline]
    pub fn as_open(&self) -> Option<&OpenSession> {
        match self {
            ParkingSession::Open(s) => Some(s),
            ParkingSession::Closed(_) => None,
        }
    }

    #[inline]
    pub fn as_closed(&self) -> Option<&ClosedSession> {
        match self {
            ParkingSession::Open(_) => None,
            ParkingSession::Closed(s) => Some(s),
        }
    }
}

impl From<OpenSession> for ParkingSession {
    fn from(value: OpenSession) -> Self {
        ParkingSession::Open(value)
    }
}

impl From<ClosedSession> for ParkingSession {
    fn from(value: ClosedSession) -> Self {
        ParkingSession::Closed(value)
    }
}

impl Display for ParkingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkingSession::Open(s) => write!(
                f,
                "Open {{ lot: {}, plate: {}, entry: {} }}",
                s.lot,
                s.vehicle.plate(),
                s.entry
            ),
            ParkingSession::Closed(s) => write!(
                f,
                "Closed {{ lot: {}, plate: {}, stay: {}, fee: {} }}",
                s.lot,
                s.vehicle.plate(),
                s.stay,
                s.fee
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_core::width::Width;

    fn open_at(entry: i64) -> OpenSession {
        OpenSession::new(
            LotNumber::new(3),
            Vehicle::new(Plate::from("CAR-9"), Width::new(2)),
            TimePoint::new(entry),
        )
    }

    #[test]
    fn test_open_session_has_no_exit_or_fee() {
        let s: ParkingSession = open_at(100).into();
        assert!(s.is_open());
        assert_eq!(s.exit(), None);
        assert_eq!(s.fee(), None);
        assert_eq!(s.entry(), TimePoint::new(100));
        assert_eq!(s.plate().as_str(), "CAR-9");
    }

    #[test]
    fn test_close_keeps_identity_and_sets_exit_and_fee() {
        let closed = open_at(100).close(TimePoint::new(2000), Fee::new(20));
        let s: ParkingSession = closed.into();
        assert!(!s.is_open());
        assert_eq!(s.lot(), LotNumber::new(3));
        assert_eq!(s.exit(), Some(TimePoint::new(2000)));
        assert_eq!(s.fee(), Some(Fee::new(20)));
        assert_eq!(
            s.as_closed().unwrap().stay().duration(),
            TimeDelta::new(1900)
        );
    }

    #[test]
    fn test_close_never_exits_before_entry() {
        let closed = open_at(500).close(TimePoint::new(400), Fee::new(10));
        assert_eq!(closed.stay().exit(), TimePoint::new(500));
        assert!(closed.stay().duration().is_zero());
    }

    #[test]
    fn test_elapsed_at_is_non_negative() {
        let s = open_at(500);
        assert_eq!(s.elapsed_at(TimePoint::new(400)), TimeDelta::zero());
        assert_eq!(s.elapsed_at(TimePoint::new(560)), TimeDelta::new(60));
    }
}
