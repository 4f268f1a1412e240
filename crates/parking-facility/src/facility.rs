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
    billing::FeeSchedule,
    clock::{Clock, SystemClock},
    history::{HistoryError, HistoryLog},
    occupancy::OccupancyMap,
    policy::{BestFit, LotSelectionPolicy},
    report::FacilityReport,
};
use parking_core::{fee::Fee, width::Width};
use parking_model::{
    config::FacilityConfig,
    err::{AlreadyParkedError, ArgumentError, ConflictError, LotOccupiedError, ParkingError},
    id::{LotNumber, Plate},
    lot::{Lot, Vehicle},
    session::{OpenSession, ParkingSession},
    table::LotTable,
};
use std::{collections::BTreeMap, fmt::Display};
use tracing::{debug, info, instrument, warn};

/// A broken internal consistency rule of a [`ParkingFacility`].
///
/// Never produced by a correct facility; reported by
/// [`ParkingFacility::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    TooFewLots { found: usize, required: usize },
    UnknownOccupiedLot(LotNumber),
    VehicleTooWide(LotNumber),
    InconsistentPlateIndex,
    MissingOpenSession(LotNumber),
    MismatchedOpenSession(LotNumber),
    StrayOpenSession(LotNumber),
    OpenSessionCountMismatch { open: usize, occupied: usize },
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InvariantViolation::*;
        match self {
            TooFewLots { found, required } => {
                write!(f, "Facility has {} lots, at least {} required", found, required)
            }
            UnknownOccupiedLot(lot) => write!(f, "Occupied lot {} is not part of the facility", lot),
            VehicleTooWide(lot) => write!(f, "Vehicle in lot {} is wider than the lot", lot),
            InconsistentPlateIndex => write!(f, "Plate index does not mirror the occupancy"),
            MissingOpenSession(lot) => write!(f, "Occupied lot {} has no open session", lot),
            MismatchedOpenSession(lot) => {
                write!(f, "Open session of lot {} names a different vehicle", lot)
            }
            StrayOpenSession(lot) => write!(f, "Free lot {} still has an open session", lot),
            OpenSessionCountMismatch { open, occupied } => write!(
                f,
                "History indexes {} open sessions but {} lots are occupied",
                open, occupied
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// A parking facility: a fixed set of lots, who is parked where, and the full
/// history of stays.
///
/// `K` is the time source and `P` picks lots for automatic check-in. Every
/// operation validates completely before it mutates, so a failed call leaves
/// the facility exactly as it was.
#[derive(Debug, Clone)]
pub struct ParkingFacility<K = SystemClock, P = BestFit> {
    lots: LotTable,
    occupancy: OccupancyMap,
    history: HistoryLog,
    schedule: FeeSchedule,
    config: FacilityConfig,
    clock: K,
    policy: P,
}

impl ParkingFacility<SystemClock, BestFit> {
    /// Builds a facility from `(lot number, width)` entries with the default
    /// configuration.
    pub fn from_map<I>(entries: I) -> Result<Self, ParkingError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        Self::from_map_with_config(entries, FacilityConfig::default())
    }

    pub fn from_map_with_config<I>(entries: I, config: FacilityConfig) -> Result<Self, ParkingError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let lots = LotTable::from_map(entries, &config)?;
        Ok(Self::new(lots, config, SystemClock, BestFit))
    }

    /// Builds a facility from parallel sequences, `numbers[i]` having width
    /// `widths[i]`, with the default configuration.
    pub fn from_parallel(numbers: &[i64], widths: &[i64]) -> Result<Self, ParkingError> {
        Self::from_parallel_with_config(numbers, widths, FacilityConfig::default())
    }

    pub fn from_parallel_with_config(
        numbers: &[i64],
        widths: &[i64],
        config: FacilityConfig,
    ) -> Result<Self, ParkingError> {
        let lots = LotTable::from_parallel(numbers, widths, &config)?;
        Ok(Self::new(lots, config, SystemClock, BestFit))
    }
}

impl<K, P> ParkingFacility<K, P> {
    pub fn new(lots: LotTable, config: FacilityConfig, clock: K, policy: P) -> Self {
        Self {
            lots,
            occupancy: OccupancyMap::new(),
            history: HistoryLog::new(),
            schedule: FeeSchedule::from(&config),
            config,
            clock,
            policy,
        }
    }

    #[inline]
    pub fn with_clock<K2>(self, clock: K2) -> ParkingFacility<K2, P> {
        ParkingFacility {
            lots: self.lots,
            occupancy: self.occupancy,
            history: self.history,
            schedule: self.schedule,
            config: self.config,
            clock,
            policy: self.policy,
        }
    }

    #[inline]
    pub fn with_policy<P2>(self, policy: P2) -> ParkingFacility<K, P2> {
        ParkingFacility {
            lots: self.lots,
            occupancy: self.occupancy,
            history: self.history,
            schedule: self.schedule,
            config: self.config,
            clock: self.clock,
            policy,
        }
    }

    #[inline]
    pub fn lots(&self) -> &LotTable {
        &self.lots
    }

    #[inline]
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    #[inline]
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    #[inline]
    pub fn clock(&self) -> &K {
        &self.clock
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    /// True iff a lot with exactly this number and exactly this width exists.
    #[inline]
    pub fn has_lot(&self, number: i64, width: i64) -> bool {
        self.lots.contains(LotNumber::new(number), Width::new(width))
    }

    /// True iff no lot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    pub fn lot_width(&self, number: i64) -> Result<Width, ParkingError> {
        let number = validate_lot_number(number)?;
        self.lots
            .width_of(number)
            .ok_or_else(|| ArgumentError::UnknownLot(number).into())
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }

    #[inline]
    pub fn occupant(&self, lot: LotNumber) -> Option<&Vehicle> {
        self.occupancy.occupant(lot)
    }

    /// Lot currently held by `plate`, if any.
    #[inline]
    pub fn lot_of(&self, plate: &str) -> Option<LotNumber> {
        self.occupancy.lot_of(&Plate::from(plate))
    }

    /// Unoccupied lots in ascending number order.
    pub fn free_lots(&self) -> impl Iterator<Item = Lot> + '_ {
        self.lots
            .iter()
            .filter(|lot| !self.occupancy.is_occupied(lot.number()))
    }

    /// Share of occupied lots in percent, rounded half up.
    pub fn occupancy_percent(&self) -> u32 {
        let total = self.lots.len();
        if total == 0 {
            return 0;
        }
        let pct = (self.occupancy.len() * 100 + total / 2) / total;
        u32::try_from(pct).unwrap_or(100)
    }

    /// Every lot mapped to the plate parked in it, or `""` when free.
    pub fn status(&self) -> BTreeMap<LotNumber, String> {
        self.lots
            .numbers()
            .map(|n| {
                let plate = self
                    .occupancy
                    .occupant(n)
                    .map(|v| v.plate().as_str().to_owned())
                    .unwrap_or_default();
                (n, plate)
            })
            .collect()
    }

    /// All sessions, open and closed, in check-in order.
    #[inline]
    pub fn history(&self) -> impl Iterator<Item = &ParkingSession> + '_ {
        self.history.iter()
    }

    #[inline]
    pub fn sessions_of(&self, plate: &str) -> impl Iterator<Item = &ParkingSession> + '_ {
        self.history.sessions_of(Plate::from(plate))
    }

    #[inline]
    pub fn open_session(&self, lot: i64) -> Option<&OpenSession> {
        self.history.open_session(LotNumber::new(lot))
    }

    #[inline]
    pub fn total_revenue(&self) -> Fee<i64> {
        self.history.total_revenue()
    }

    #[inline]
    pub fn report(&self) -> FacilityReport {
        FacilityReport::from_facility(self)
    }

    /// Verifies every consistency rule between lots, occupancy and history.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.lots.len() < self.config.min_lot_count() {
            return Err(InvariantViolation::TooFewLots {
                found: self.lots.len(),
                required: self.config.min_lot_count(),
            });
        }
        if !self.occupancy.is_consistent() {
            return Err(InvariantViolation::InconsistentPlateIndex);
        }
        for (number, vehicle) in self.occupancy.iter() {
            let lot = self
                .lots
                .get(number)
                .ok_or(InvariantViolation::UnknownOccupiedLot(number))?;
            if !lot.fits(vehicle.width()) {
                return Err(InvariantViolation::VehicleTooWide(number));
            }
            let session = self
                .history
                .open_session(number)
                .ok_or(InvariantViolation::MissingOpenSession(number))?;
            if session.vehicle() != vehicle {
                return Err(InvariantViolation::MismatchedOpenSession(number));
            }
        }
        if let Some(stray) = self
            .history
            .iter_open()
            .find(|s| !self.occupancy.is_occupied(s.lot()))
        {
            return Err(InvariantViolation::StrayOpenSession(stray.lot()));
        }
        if self.history.open_count() != self.occupancy.len() {
            return Err(InvariantViolation::OpenSessionCountMismatch {
                open: self.history.open_count(),
                occupied: self.occupancy.len(),
            });
        }
        Ok(())
    }
}

impl<K: Clock, P: LotSelectionPolicy> ParkingFacility<K, P> {
    /// Parks `plate` of `width` in lot `lot`.
    ///
    /// Checked in this order: argument validity, unknown lot, plate already
    /// parked, lot occupied, vehicle too wide. A vehicle exactly as wide as
    /// the lot fits.
    #[instrument(level = "debug", skip_all, fields(plate = %plate, width = width, lot = lot), err(Display))]
    pub fn park_at(&mut self, plate: &str, width: i64, lot: i64) -> Result<(), ParkingError> {
        let plate = validate_plate(plate)?;
        let width = validate_width(width)?;
        let number = validate_lot_number(lot)?;
        let target = self
            .lots
            .get(number)
            .ok_or(ArgumentError::UnknownLot(number))?;

        self.occupancy.check_available(number, &plate)?;
        target.ensure_fits(width)?;

        self.commit(target, Vehicle::new(plate, width))
    }

    /// Parks `plate` of `width` in a free lot chosen by the selection policy
    /// and returns that lot.
    #[instrument(level = "debug", skip_all, fields(plate = %plate, width = width, policy = self.policy.name()), err(Display))]
    pub fn park(&mut self, plate: &str, width: i64) -> Result<LotNumber, ParkingError> {
        let plate = validate_plate(plate)?;
        let width = validate_width(width)?;
        if let Some(held) = self.occupancy.lot_of(&plate) {
            return Err(AlreadyParkedError::new(plate, held).into());
        }

        let candidates: Vec<Lot> = self
            .lots
            .iter()
            .filter(|l| !self.occupancy.is_occupied(l.number()) && l.fits(width))
            .collect();
        debug!(candidates = candidates.len(), "Eligible lots");

        let target = self
            .policy
            .select(width, &candidates)
            .and_then(|i| candidates.get(i))
            .copied()
            .ok_or(ConflictError::NoEligibleLot(width))?;

        self.commit(target, Vehicle::new(plate, width))?;
        Ok(target.number())
    }

    /// Checks `plate` out and returns the fee for its stay.
    #[instrument(level = "debug", skip_all, fields(plate = %plate), err(Display))]
    pub fn depart(&mut self, plate: &str) -> Result<Fee<i64>, ParkingError> {
        let plate = validate_plate(plate)?;
        let lot = self
            .occupancy
            .lot_of(&plate)
            .ok_or_else(|| ConflictError::NotParked(plate.clone()))?;

        let exit = self.clock.now();
        let closed = self
            .history
            .close(lot, exit, &self.schedule)
            .map_err(|_| ConflictError::NotParked(plate.clone()))?;
        let fee = closed.fee();
        let stay = closed.stay();
        self.occupancy.release(lot);

        info!(plate = %plate, lot = lot.value(), fee = fee.value(), stay = %stay, "Vehicle departed");
        debug_assert_eq!(self.check_invariants(), Ok(()));
        Ok(fee)
    }

    /// Records `vehicle` in `lot` and opens its session. Preconditions are
    /// already checked; both stores change or neither does.
    fn commit(&mut self, lot: Lot, vehicle: Vehicle) -> Result<(), ParkingError> {
        let number = lot.number();
        let entry = self.clock.now();
        self.occupancy.occupy(number, vehicle.clone())?;

        let opened = self
            .history
            .open(number, vehicle.clone(), entry)
            .map(|_| ());
        if let Err(e) = opened {
            self.occupancy.release(number);
            warn!(error = %e, lot = number.value(), "Session bookkeeping out of step; check-in undone");
            return Err(self.history_conflict(e, vehicle.plate()).into());
        }

        info!(plate = %vehicle.plate(), lot = number.value(), width = vehicle.width().value(), entry = entry.value(), "Vehicle parked");
        debug_assert_eq!(self.check_invariants(), Ok(()));
        Ok(())
    }

    fn history_conflict(&self, err: HistoryError, plate: &Plate) -> ConflictError {
        match err {
            HistoryError::AlreadyOpen(lot) => {
                let occupant = self
                    .history
                    .open_session(lot)
                    .map(|s| s.vehicle().plate().clone())
                    .unwrap_or_else(|| plate.clone());
                LotOccupiedError::new(lot, occupant).into()
            }
            HistoryError::NotOpen(_) => ConflictError::NotParked(plate.clone()),
        }
    }
}

impl<K, P> Display for ParkingFacility<K, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.report())
    }
}

#[inline]
fn validate_plate(plate: &str) -> Result<Plate, ArgumentError> {
    if plate.is_empty() {
        return Err(ArgumentError::EmptyPlate);
    }
    Ok(Plate::from(plate))
}

#[inline]
fn validate_width(width: i64) -> Result<Width, ArgumentError> {
    let width = Width::new(width);
    if !width.is_positive() {
        return Err(ArgumentError::NonPositiveWidth(width));
    }
    Ok(width)
}

#[inline]
fn validate_lot_number(number: i64) -> Result<LotNumber, ArgumentError> {
    let number = LotNumber::new(number);
    if !number.is_positive() {
        return Err(ArgumentError::NonPositiveLotNumber(number));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        policy::{FirstFit, RandomFit},
    };
    use parking_core::time::{TimeDelta, TimePoint};
    use parking_model::err::{ConfigurationError, VehicleTooWideError};

    fn small() -> ParkingFacility<ManualClock, BestFit> {
        ParkingFacility::from_map([(1, 2), (2, 2), (3, 3), (4, 3), (5, 4)])
            .unwrap()
            .with_clock(ManualClock::new(TimePoint::new(0)))
    }

    fn n(v: i64) -> LotNumber {
        LotNumber::new(v)
    }

    #[test]
    fn test_reference_scenario() {
        let mut f = small();
        assert_eq!(f.lot_count(), 5);

        f.park_at("ABC123", 2, 1).unwrap();
        assert_eq!(f.status()[&n(1)], "ABC123");

        let err = f.park_at("ABC123", 2, 2).unwrap_err();
        assert!(matches!(
            err,
            ParkingError::Conflict(ConflictError::AlreadyParked(_))
        ));

        let err = f.park_at("X", 2, 1).unwrap_err();
        assert!(matches!(
            err,
            ParkingError::Conflict(ConflictError::LotOccupied(_))
        ));

        // Lot 1 is both occupied and too narrow; occupancy is reported first.
        let err = f.park_at("Y", 4, 1).unwrap_err();
        assert!(err.is_conflict());

        let fee = f.depart("ABC123").unwrap();
        assert!(fee >= Fee::new(10));
        assert_eq!(f.status()[&n(1)], "");
        assert!(f.is_empty());
    }

    #[test]
    fn test_construction_errors_are_invalid_configuration() {
        let err = ParkingFacility::from_map([(1, 2), (2, 2)]).unwrap_err();
        assert!(err.is_invalid_configuration());

        let err = ParkingFacility::from_parallel(&[1, 2, 3, 4, 5], &[5, 5, 5, 5]).unwrap_err();
        assert!(matches!(
            err,
            ParkingError::InvalidConfiguration(ConfigurationError::LengthMismatch(_))
        ));

        let err = ParkingFacility::from_parallel(&[1, 2, 3, 4, 5], &[5, 5, 5, 5, 3]).unwrap_err();
        assert!(matches!(
            err,
            ParkingError::InvalidConfiguration(ConfigurationError::InvalidLotWidth(_))
        ));
    }

    #[test]
    fn test_parallel_form_builds_facility() {
        let f = ParkingFacility::from_parallel(&[10, 20, 30, 40, 50], &[5, 6, 7, 8, 9]).unwrap();
        assert_eq!(f.lot_count(), 5);
        assert!(f.has_lot(30, 7));
        assert!(!f.has_lot(30, 8));
        assert!(!f.has_lot(31, 7));
        assert_eq!(f.lot_width(50).unwrap(), Width::new(9));
    }

    #[test]
    fn test_park_at_argument_errors() {
        let mut f = small();
        assert_eq!(
            f.park_at("", 2, 1).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::EmptyPlate)
        );
        assert_eq!(
            f.park_at("A", 0, 1).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::NonPositiveWidth(Width::new(0)))
        );
        assert_eq!(
            f.park_at("A", 2, -3).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::NonPositiveLotNumber(n(-3)))
        );
        assert_eq!(
            f.park_at("A", 2, 99).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::UnknownLot(n(99)))
        );
        assert!(f.is_empty());
        assert_eq!(f.history().count(), 0);
    }

    #[test]
    fn test_width_fit_is_inclusive() {
        let mut f = small();
        f.park_at("EQ", 4, 5).unwrap();
        let err = f.park_at("WIDE", 4, 3).unwrap_err();
        assert_eq!(
            err,
            ParkingError::Conflict(ConflictError::VehicleTooWide(VehicleTooWideError::new(
                n(3),
                Width::new(3),
                Width::new(4)
            )))
        );
    }

    #[test]
    fn test_failed_operations_leave_state_unchanged() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        let status = f.status();
        let sessions = f.history().count();

        let _ = f.park_at("A", 2, 2);
        let _ = f.park_at("B", 2, 1);
        let _ = f.park_at("C", 9, 3);
        let _ = f.park("A", 1);
        let _ = f.park("D", 100);
        let _ = f.depart("NOBODY");

        assert_eq!(f.status(), status);
        assert_eq!(f.history().count(), sessions);
        assert_eq!(f.check_invariants(), Ok(()));
    }

    #[test]
    fn test_auto_park_best_fit_takes_narrowest_lot() {
        let mut f = small();
        assert_eq!(f.park("W3", 3).unwrap(), n(3));
        assert_eq!(f.park("W3b", 3).unwrap(), n(4));
        assert_eq!(f.park("W3c", 3).unwrap(), n(5));
        let err = f.park("W3d", 3).unwrap_err();
        assert_eq!(
            err,
            ParkingError::Conflict(ConflictError::NoEligibleLot(Width::new(3)))
        );
        assert_eq!(f.park("W1", 1).unwrap(), n(1));
    }

    #[test]
    fn test_auto_park_first_fit_takes_lowest_number() {
        let mut f = small().with_policy(FirstFit);
        assert_eq!(f.park("A", 1).unwrap(), n(1));
        assert_eq!(f.park("B", 3).unwrap(), n(3));
        assert_eq!(f.park("C", 1).unwrap(), n(2));
    }

    #[test]
    fn test_auto_park_random_fit_only_uses_eligible_lots() {
        let mut f = small().with_policy(RandomFit::seeded(11));
        let lot = f.park("R", 3).unwrap();
        assert!(f.lot_width(lot.value()).unwrap() >= Width::new(3));
        assert_eq!(f.lot_of("R"), Some(lot));
    }

    #[test]
    fn test_auto_park_rejects_already_parked_plate() {
        let mut f = small();
        f.park("A", 1).unwrap();
        assert!(matches!(
            f.park("A", 1).unwrap_err(),
            ParkingError::Conflict(ConflictError::AlreadyParked(_))
        ));
    }

    #[test]
    fn test_fee_quantization_with_manual_clock() {
        let clock = ManualClock::new(TimePoint::new(1_000));
        let mut f = ParkingFacility::from_map([(1, 2), (2, 2), (3, 3), (4, 3), (5, 4)])
            .unwrap()
            .with_clock(clock.clone());

        f.park_at("ZERO", 2, 1).unwrap();
        assert_eq!(f.depart("ZERO").unwrap(), Fee::new(10));

        f.park_at("HALF", 2, 1).unwrap();
        clock.advance(TimeDelta::minutes(30));
        assert_eq!(f.depart("HALF").unwrap(), Fee::new(10));

        f.park_at("MORE", 2, 1).unwrap();
        clock.advance(TimeDelta::minutes(31));
        assert_eq!(f.depart("MORE").unwrap(), Fee::new(20));

        assert_eq!(f.total_revenue(), Fee::new(40));
    }

    #[test]
    fn test_clock_going_backwards_bills_one_block() {
        let clock = ManualClock::new(TimePoint::new(10_000));
        let mut f = small().with_clock(clock.clone());
        f.park_at("A", 2, 1).unwrap();
        clock.set(TimePoint::new(0));
        assert_eq!(f.depart("A").unwrap(), Fee::new(10));
    }

    #[test]
    fn test_depart_errors() {
        let mut f = small();
        assert_eq!(
            f.depart("").unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::EmptyPlate)
        );
        assert_eq!(
            f.depart("GHOST").unwrap_err(),
            ParkingError::Conflict(ConflictError::NotParked(Plate::from("GHOST")))
        );
    }

    #[test]
    fn test_lot_width_errors() {
        let f = small();
        assert_eq!(f.lot_width(2).unwrap(), Width::new(2));
        assert_eq!(
            f.lot_width(0).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::NonPositiveLotNumber(n(0)))
        );
        assert_eq!(
            f.lot_width(6).unwrap_err(),
            ParkingError::InvalidArgument(ArgumentError::UnknownLot(n(6)))
        );
    }

    #[test]
    fn test_status_covers_every_lot_and_is_idempotent() {
        let mut f = small();
        f.park_at("A", 2, 2).unwrap();
        let first = f.status();
        assert_eq!(first.len(), f.lot_count());
        assert_eq!(first, f.status());
        assert_eq!(first[&n(2)], "A");
        assert_eq!(first[&n(5)], "");
    }

    #[test]
    fn test_occupancy_queries() {
        let mut f = small();
        assert_eq!(f.occupancy_percent(), 0);
        f.park_at("A", 1, 1).unwrap();
        f.park_at("B", 1, 2).unwrap();
        f.park_at("C", 1, 3).unwrap();
        assert_eq!(f.occupied_count(), 3);
        assert_eq!(f.occupancy_percent(), 60);
        let free: Vec<i64> = f.free_lots().map(|l| l.number().value()).collect();
        assert_eq!(free, vec![4, 5]);
    }

    #[test]
    fn test_history_queries() {
        let clock = ManualClock::new(TimePoint::new(0));
        let mut f = small().with_clock(clock.clone());
        f.park_at("A", 2, 1).unwrap();
        clock.advance(TimeDelta::minutes(10));
        f.depart("A").unwrap();
        f.park_at("A", 2, 2).unwrap();
        f.park_at("B", 2, 1).unwrap();

        assert_eq!(f.history().count(), 3);
        assert_eq!(f.sessions_of("A").count(), 2);
        let open = f.open_session(2).unwrap();
        assert_eq!(open.vehicle().plate().as_str(), "A");
        assert_eq!(open.entry(), TimePoint::new(600));
        assert!(f.open_session(3).is_none());
        assert_eq!(f.total_revenue(), Fee::new(10));
    }

    #[test]
    fn test_reparking_after_departure_is_allowed() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        f.depart("A").unwrap();
        f.park_at("A", 2, 1).unwrap();
        assert_eq!(f.lot_of("A"), Some(n(1)));
        assert_eq!(f.check_invariants(), Ok(()));
    }

    #[test]
    fn test_custom_config_changes_tariff_and_minimum() {
        let config = FacilityConfig::builder()
            .min_lot_count(2)
            .rate_per_block(Fee::new(3))
            .build()
            .unwrap();
        let clock = ManualClock::new(TimePoint::new(0));
        let mut f = ParkingFacility::from_map_with_config([(1, 5), (2, 5)], config)
            .unwrap()
            .with_clock(clock.clone());
        f.park_at("A", 5, 2).unwrap();
        clock.advance(TimeDelta::minutes(90));
        assert_eq!(f.depart("A").unwrap(), Fee::new(9));
    }

    #[test]
    fn test_invariants_detect_occupied_lot_without_session() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        f.history = HistoryLog::new();
        assert_eq!(
            f.check_invariants(),
            Err(InvariantViolation::MissingOpenSession(n(1)))
        );
    }

    #[test]
    fn test_invariants_detect_session_on_free_lot() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        f.occupancy.release(n(1)).unwrap();
        assert_eq!(
            f.check_invariants(),
            Err(InvariantViolation::StrayOpenSession(n(1)))
        );
    }

    #[test]
    fn test_invariants_detect_vehicle_wider_than_lot() {
        let mut f = small();
        let wide = Vehicle::new(Plate::from("W"), Width::new(9));
        f.occupancy.occupy(n(1), wide.clone()).unwrap();
        f.history.open(n(1), wide, TimePoint::new(0)).unwrap();
        assert_eq!(
            f.check_invariants(),
            Err(InvariantViolation::VehicleTooWide(n(1)))
        );
    }

    #[test]
    fn test_invariants_detect_plate_index_gap() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        f.occupancy.forget_plate(&Plate::from("A"));
        assert_eq!(
            f.check_invariants(),
            Err(InvariantViolation::InconsistentPlateIndex)
        );
    }

    #[test]
    fn test_invariants_detect_open_count_mismatch() {
        let mut f = small();
        f.park_at("A", 2, 1).unwrap();
        f.depart("A").unwrap();
        f.park_at("B", 2, 2).unwrap();
        // Index a third lot at the closed first session.
        f.history.force_open_index(n(3), 0);

        let violation = f.check_invariants().unwrap_err();
        assert_eq!(
            violation,
            InvariantViolation::OpenSessionCountMismatch {
                open: 2,
                occupied: 1
            }
        );
        assert_eq!(
            violation.to_string(),
            "History indexes 2 open sessions but 1 lots are occupied"
        );
    }
}
