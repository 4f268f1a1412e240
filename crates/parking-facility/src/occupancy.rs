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

use parking_model::{
    err::{AlreadyParkedError, ConflictError, LotOccupiedError},
    id::{LotNumber, Plate},
    lot::Vehicle,
};
use std::collections::{BTreeMap, HashMap};

/// Current lot → vehicle assignment, indexed both ways.
///
/// Keeping a plate → lot index next to the lot map makes "one lot per plate"
/// structural: `occupy` refuses a plate that is already indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    by_lot: BTreeMap<LotNumber, Vehicle>,
    by_plate: HashMap<Plate, LotNumber>,
}

impl OccupancyMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_lot.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_lot.is_empty()
    }

    #[inline]
    pub fn occupant(&self, lot: LotNumber) -> Option<&Vehicle> {
        self.by_lot.get(&lot)
    }

    #[inline]
    pub fn is_occupied(&self, lot: LotNumber) -> bool {
        self.by_lot.contains_key(&lot)
    }

    #[inline]
    pub fn lot_of(&self, plate: &Plate) -> Option<LotNumber> {
        self.by_plate.get(plate).copied()
    }

    /// Fails if `plate` already holds a lot, or if `lot` is taken, in that order.
    pub fn check_available(&self, lot: LotNumber, plate: &Plate) -> Result<(), ConflictError> {
        if let Some(held) = self.lot_of(plate) {
            return Err(AlreadyParkedError::new(plate.clone(), held).into());
        }
        if let Some(occupant) = self.by_lot.get(&lot) {
            return Err(LotOccupiedError::new(lot, occupant.plate().clone()).into());
        }
        Ok(())
    }

    pub fn occupy(&mut self, lot: LotNumber, vehicle: Vehicle) -> Result<(), ConflictError> {
        self.check_available(lot, vehicle.plate())?;
        self.by_plate.insert(vehicle.plate().clone(), lot);
        self.by_lot.insert(lot, vehicle);
        Ok(())
    }

    /// Frees `lot` and returns the vehicle that was in it.
    pub fn release(&mut self, lot: LotNumber) -> Option<Vehicle> {
        let vehicle = self.by_lot.remove(&lot)?;
        self.by_plate.remove(vehicle.plate());
        Some(vehicle)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (LotNumber, &Vehicle)> + '_ {
        self.by_lot.iter().map(|(&n, v)| (n, v))
    }

    /// Whether the plate index mirrors the lot map exactly.
    pub fn is_consistent(&self) -> bool {
        self.by_plate.len() == self.by_lot.len()
            && self
                .by_lot
                .iter()
                .all(|(lot, v)| self.by_plate.get(v.plate()) == Some(lot))
    }

    /// Drops `plate` from the plate index only, leaving its lot occupied.
    #[cfg(test)]
    pub(crate) fn forget_plate(&mut self, plate: &Plate) {
        self.by_plate.remove(plate);
    }
}
