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
    err::VehicleTooWideError,
    id::{LotNumber, Plate},
};
use parking_core::width::Width;
use std::fmt::Display;

/// A numbered parking space of fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lot {
    number: LotNumber,
    width: Width,
}

impl Lot {
    #[inline]
    pub fn new(number: LotNumber, width: Width) -> Self {
        Self { number, width }
    }

    #[inline]
    pub fn number(&self) -> LotNumber {
        self.number
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn fits(&self, vehicle_width: Width) -> bool {
        vehicle_width.fits_within(self.width)
    }

    #[inline]
    pub fn ensure_fits(&self, vehicle_width: Width) -> Result<(), VehicleTooWideError> {
        if self.fits(vehicle_width) {
            Ok(())
        } else {
            Err(VehicleTooWideError::new(
                self.number,
                self.width,
                vehicle_width,
            ))
        }
    }
}

impl Display for Lot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lot {{ number: {}, width: {} }}", self.number, self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vehicle {
    plate: Plate,
    width: Width,
}

impl Vehicle {
    #[inline]
    pub fn new(plate: Plate, width: Width) -> Self {
        Self { plate, width }
    }

    #[inline]
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }
}

impl Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vehicle {{ plate: {}, width: {} }}", self.plate, self.width)
    }
}
