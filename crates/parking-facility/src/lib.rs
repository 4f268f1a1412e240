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

//! # Parking Facility (`parking-facility`)
//!
//! The stateful side of the parking model: which vehicle holds which lot, the
//! history of every stay, and what each stay costs.
//!
//! ## Overview
//!
//! - **`ParkingFacility`**: owns a `LotTable`, an `OccupancyMap` and a
//!   `HistoryLog`; offers explicit-lot check-in (`park_at`), automatic
//!   check-in (`park`), check-out with billing (`depart`) and read-only
//!   queries.
//! - **`LotSelectionPolicy`**: how `park` picks among eligible lots
//!   (`FirstFit`, `BestFit`, seeded `RandomFit`).
//! - **`FeeSchedule`**: started blocks times a rate, at least one block.
//! - **`Clock`**: the time source (`SystemClock`, `ManualClock`).
//! - **`SharedFacility`**: one facility behind a read/write lock.
//! - **`FacilityReport`**: a serializable snapshot with the classic text
//!   listing.
//!
//! ## Example
//!
//! ```
//! use parking_facility::prelude::*;
//!
//! let clock = ManualClock::new(TimePoint::new(0));
//! let mut facility = ParkingFacility::from_map([(1, 2), (2, 2), (3, 3), (4, 3), (5, 4)])
//!     .unwrap()
//!     .with_clock(clock.clone());
//!
//! facility.park_at("ABC123", 2, 1).unwrap();
//! clock.advance(TimeDelta::minutes(45));
//! assert_eq!(facility.depart("ABC123").unwrap(), Fee::new(20));
//! ```

pub mod billing;
pub mod clock;
pub mod facility;
pub mod history;
pub mod occupancy;
pub mod policy;
pub mod report;
pub mod shared;

pub mod prelude {
    pub use crate::billing::FeeSchedule;
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::facility::{InvariantViolation, ParkingFacility};
    pub use crate::history::{HistoryError, HistoryLog};
    pub use crate::occupancy::OccupancyMap;
    pub use crate::policy::{BestFit, FirstFit, LotSelectionPolicy, RandomFit};
    pub use crate::report::{FacilityReport, LotRow};
    pub use crate::shared::SharedFacility;

    pub use parking_core::prelude::*;
    pub use parking_model::prelude::*;
}
