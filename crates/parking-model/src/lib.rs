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

//! # Parking Model (`parking-model`)
//!
//! The domain vocabulary of a parking facility, built on the typed primitives
//! of `parking-core`:
//!
//! - **`LotNumber`** / **`Plate`**: identities of lots and vehicles.
//! - **`Lot`** / **`Vehicle`**: a numbered space of fixed width and a vehicle
//!   of fixed width.
//! - **`LotTable`**: the validated, immutable set of lots of one facility.
//! - **`ParkingSession`**: one stay, either `Open` (entry only) or `Closed`
//!   (entry, exit and fee).
//! - **`FacilityConfig`**: the policy values (minimum lot count, minimum lot
//!   width of the parallel form, billing block and rate).
//! - **`ParkingError`**: the three error kinds callers see.

pub mod config;
pub mod err;
pub mod id;
pub mod lot;
pub mod session;
pub mod table;

pub mod prelude {
    pub use crate::config::{FacilityConfig, FacilityConfigBuilder};
    pub use crate::err::{
        AlreadyParkedError, ArgumentError, ConfigBuildError, ConfigurationError,
        ConflictError, InvalidLotWidthError, LengthMismatchError, LotOccupiedError,
        ParkingError, TooFewLotsError, VehicleTooWideError,
    };
    pub use crate::id::{LotNumber, Plate};
    pub use crate::lot::{Lot, Vehicle};
    pub use crate::session::{ClosedSession, OpenSession, ParkingSession};
    pub use crate::table::{LotTable, LotTableBuilder};
}
