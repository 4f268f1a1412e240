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

use crate::id::{LotNumber, Plate};
use parking_core::{fee::Fee, time::TimeDelta, width::Width};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooFewLotsError {
    found: usize,
    required: usize,
}

impl TooFewLotsError {
    #[inline]
    pub fn new(found: usize, required: usize) -> Self {
        Self { found, required }
    }

    #[inline]
    pub fn found(&self) -> usize {
        self.found
    }

    #[inline]
    pub fn required(&self) -> usize {
        self.required
    }
}

impl Display for TooFewLotsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A facility needs at least {} lots, got {}",
            self.required, self.found
        )
    }
}

impl std::error::Error for TooFewLotsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthMismatchError {
    numbers: usize,
    widths: usize,
}

impl LengthMismatchError {
    #[inline]
    pub fn new(numbers: usize, widths: usize) -> Self {
        Self { numbers, widths }
    }

    #[inline]
    pub fn numbers(&self) -> usize {
        self.numbers
    }

    #[inline]
    pub fn widths(&self) -> usize {
        self.widths
    }
}

impl Display for LengthMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Got {} lot numbers but {} lot widths",
            self.numbers, self.widths
        )
    }
}

impl std::error::Error for LengthMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidLotWidthError {
    lot: LotNumber,
    width: Width,
    minimum: Width,
}

impl InvalidLotWidthError {
    #[inline]
    pub fn new(lot: LotNumber, width: Width, minimum: Width) -> Self {
        Self {
            lot,
            width,
            minimum,
        }
    }

    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn minimum(&self) -> Width {
        self.minimum
    }
}

impl Display for InvalidLotWidthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lot {} has width {} but at least {} is required",
            self.lot, self.width, self.minimum
        )
    }
}

impl std::error::Error for InvalidLotWidthError {}

/// Why a set of lots could not become a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationError {
    TooFewLots(TooFewLotsError),
    /// Parallel number/width sequences of different length.
    LengthMismatch(LengthMismatchError),
    NonPositiveLotNumber(LotNumber),
    /// Width not positive, or below the minimum of the parallel form.
    InvalidLotWidth(InvalidLotWidthError),
    DuplicateLotNumber(LotNumber),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::TooFewLots(e) => write!(f, "{e}"),
            ConfigurationError::LengthMismatch(e) => write!(f, "{e}"),
            ConfigurationError::NonPositiveLotNumber(n) => {
                write!(f, "Lot number {} is not positive", n)
            }
            ConfigurationError::InvalidLotWidth(e) => write!(f, "{e}"),
            ConfigurationError::DuplicateLotNumber(n) => write!(f, "Duplicate lot number: {}", n),
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<TooFewLotsError> for ConfigurationError {
    fn from(err: TooFewLotsError) -> Self {
        Self::TooFewLots(err)
    }
}

impl From<LengthMismatchError> for ConfigurationError {
    fn from(err: LengthMismatchError) -> Self {
        Self::LengthMismatch(err)
    }
}

impl From<InvalidLotWidthError> for ConfigurationError {
    fn from(err: InvalidLotWidthError) -> Self {
        Self::InvalidLotWidth(err)
    }
}

/// A malformed argument, or a reference to a lot the facility does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentError {
    EmptyPlate,
    NonPositiveWidth(Width),
    NonPositiveLotNumber(LotNumber),
    UnknownLot(LotNumber),
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ArgumentError::*;
        match self {
            EmptyPlate => write!(f, "Plate must not be empty"),
            NonPositiveWidth(w) => write!(f, "Vehicle width {} is not positive", w),
            NonPositiveLotNumber(n) => write!(f, "Lot number {} is not positive", n),
            UnknownLot(n) => write!(f, "Lot {} does not exist", n),
        }
    }
}

impl std::error::Error for ArgumentError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlreadyParkedError {
    plate: Plate,
    lot: LotNumber,
}

impl AlreadyParkedError {
    #[inline]
    pub fn new(plate: Plate, lot: LotNumber) -> Self {
        Self { plate, lot }
    }

    #[inline]
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }
}

impl Display for AlreadyParkedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} is already parked in lot {}",
            self.plate, self.lot
        )
    }
}

impl std::error::Error for AlreadyParkedError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LotOccupiedError {
    lot: LotNumber,
    occupant: Plate,
}

impl LotOccupiedError {
    #[inline]
    pub fn new(lot: LotNumber, occupant: Plate) -> Self {
        Self { lot, occupant }
    }

    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }

    #[inline]
    pub fn occupant(&self) -> &Plate {
        &self.occupant
    }
}

impl Display for LotOccupiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lot {} is occupied by {}", self.lot, self.occupant)
    }
}

impl std::error::Error for LotOccupiedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleTooWideError {
    lot: LotNumber,
    lot_width: Width,
    vehicle_width: Width,
}

impl VehicleTooWideError {
    #[inline]
    pub fn new(lot: LotNumber, lot_width: Width, vehicle_width: Width) -> Self {
        Self {
            lot,
            lot_width,
            vehicle_width,
        }
    }

    #[inline]
    pub fn lot(&self) -> LotNumber {
        self.lot
    }

    #[inline]
    pub fn lot_width(&self) -> Width {
        self.lot_width
    }

    #[inline]
    pub fn vehicle_width(&self) -> Width {
        self.vehicle_width
    }
}

impl Display for VehicleTooWideError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle of {} does not fit lot {} of {}",
            self.vehicle_width, self.lot, self.lot_width
        )
    }
}

impl std::error::Error for VehicleTooWideError {}

/// A request that is well-formed but clashes with the facility's current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConflictError {
    AlreadyParked(AlreadyParkedError),
    LotOccupied(LotOccupiedError),
    VehicleTooWide(VehicleTooWideError),
    /// No free lot is wide enough for the vehicle.
    NoEligibleLot(Width),
    /// No lot is held by this plate.
    NotParked(Plate),
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictError::AlreadyParked(e) => write!(f, "{e}"),
            ConflictError::LotOccupied(e) => write!(f, "{e}"),
            ConflictError::VehicleTooWide(e) => write!(f, "{e}"),
            ConflictError::NoEligibleLot(w) => {
                write!(f, "No free lot can take a vehicle of {}", w)
            }
            ConflictError::NotParked(p) => write!(f, "Vehicle {} is not parked here", p),
        }
    }
}

impl std::error::Error for ConflictError {}

impl From<AlreadyParkedError> for ConflictError {
    fn from(err: AlreadyParkedError) -> Self {
        Self::AlreadyParked(err)
    }
}

impl From<LotOccupiedError> for ConflictError {
    fn from(err: LotOccupiedError) -> Self {
        Self::LotOccupied(err)
    }
}

impl From<VehicleTooWideError> for ConflictError {
    fn from(err: VehicleTooWideError) -> Self {
        Self::VehicleTooWide(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParkingError {
    InvalidConfiguration(ConfigurationError),
    InvalidArgument(ArgumentError),
    Conflict(ConflictError),
}

impl ParkingError {
    #[inline]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ParkingError::InvalidConfiguration(_))
    }

    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ParkingError::InvalidArgument(_))
    }

    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ParkingError::Conflict(_))
    }
}

impl Display for ParkingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkingError::InvalidConfiguration(e) => write!(f, "Invalid configuration: {e}"),
            ParkingError::InvalidArgument(e) => write!(f, "Invalid argument: {e}"),
            ParkingError::Conflict(e) => write!(f, "Conflict: {e}"),
        }
    }
}

impl std::error::Error for ParkingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParkingError::InvalidConfiguration(e) => Some(e),
            ParkingError::InvalidArgument(e) => Some(e),
            ParkingError::Conflict(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for ParkingError {
    fn from(err: ConfigurationError) -> Self {
        Self::InvalidConfiguration(err)
    }
}

impl From<ArgumentError> for ParkingError {
    fn from(err: ArgumentError) -> Self {
        Self::InvalidArgument(err)
    }
}

impl From<ConflictError> for ParkingError {
    fn from(err: ConflictError) -> Self {
        Self::Conflict(err)
    }
}

impl From<AlreadyParkedError> for ParkingError {
    fn from(err: AlreadyParkedError) -> Self {
        Self::Conflict(err.into())
    }
}

impl From<LotOccupiedError> for ParkingError {
    fn from(err: LotOccupiedError) -> Self {
        Self::Conflict(err.into())
    }
}

impl From<VehicleTooWideError> for ParkingError {
    fn from(err: VehicleTooWideError) -> Self {
        Self::Conflict(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigBuildError {
    ZeroMinLotCount,
    NonPositiveMinLotWidth(Width),
    NonPositiveBlockLength(TimeDelta<i64>),
    NegativeRate(Fee<i64>),
}

impl Display for ConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ConfigBuildError::*;
        match self {
            ZeroMinLotCount => write!(f, "min_lot_count must be at least 1"),
            NonPositiveMinLotWidth(w) => write!(f, "min_parallel_lot_width {} is not positive", w),
            NonPositiveBlockLength(d) => write!(f, "block_length {} is not positive", d),
            NegativeRate(r) => write!(f, "rate_per_block {} is negative", r),
        }
    }
}

impl std::error::Error for ConfigBuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parking_error_kind_predicates() {
        let cfg: ParkingError = ConfigurationError::from(TooFewLotsError::new(3, 5)).into();
        let arg: ParkingError = ArgumentError::EmptyPlate.into();
        let conflict: ParkingError =
            LotOccupiedError::new(LotNumber::new(1), Plate::from("A")).into();

        assert!(cfg.is_invalid_configuration());
        assert!(arg.is_invalid_argument());
        assert!(conflict.is_conflict());
        assert!(!conflict.is_invalid_argument());
    }

    #[test]
    fn test_display_messages_carry_details() {
        let e: ParkingError =
            AlreadyParkedError::new(Plate::from("ABC123"), LotNumber::new(1)).into();
        assert_eq!(
            e.to_string(),
            "Conflict: Vehicle ABC123 is already parked in lot LotNumber(1)"
        );

        let e = ConfigurationError::from(TooFewLotsError::new(4, 5));
        assert_eq!(e.to_string(), "A facility needs at least 5 lots, got 4");
    }

    #[test]
    fn test_parking_error_exposes_source() {
        use std::error::Error;
        let e: ParkingError = ArgumentError::UnknownLot(LotNumber::new(99)).into();
        let source = e.source().expect("source is present");
        assert_eq!(source.to_string(), "Lot LotNumber(99) does not exist");
    }
}
