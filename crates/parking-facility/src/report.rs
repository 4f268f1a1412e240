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

use crate::facility::ParkingFacility;
use serde::Serialize;
use std::fmt::Display;

/// One lot of a [`FacilityReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotRow {
    pub number: i64,
    pub width: i64,
    /// Plate of the parked vehicle; `None` when the lot is free.
    pub occupant: Option<String>,
}

/// Point-in-time snapshot of a facility for humans and JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityReport {
    pub total_lots: usize,
    pub occupied_lots: usize,
    pub occupancy_percent: u32,
    pub rows: Vec<LotRow>,
}

impl FacilityReport {
    pub fn from_facility<K, P>(facility: &ParkingFacility<K, P>) -> Self {
        let rows = facility
            .lots()
            .iter()
            .map(|lot| LotRow {
                number: lot.number().value(),
                width: lot.width().value(),
                occupant: facility
                    .occupant(lot.number())
                    .map(|v| v.plate().as_str().to_owned()),
            })
            .collect();

        Self {
            total_lots: facility.lot_count(),
            occupied_lots: facility.occupied_count(),
            occupancy_percent: facility.occupancy_percent(),
            rows,
        }
    }

    #[inline]
    pub fn free_lots(&self) -> usize {
        self.total_lots - self.occupied_lots
    }
}

impl Display for FacilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "The parking field has total number of lots: {}",
            self.total_lots
        )?;
        writeln!(f, "Now {}% lots are occupied", self.occupancy_percent)?;
        for row in &self.rows {
            write!(f, "Lot {} ({}): \t", row.number, row.width)?;
            match &row.occupant {
                Some(plate) => writeln!(f, "Car {}", plate)?,
                None => writeln!(f, "Free")?,
            }
        }
        Ok(())
    }
}
