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

//! # Parking Core Primitives (`parking-core`)
//!
//! Typed numeric building blocks shared by the parking model and the facility
//! state machine.
//!
//! - **Time**: `TimePoint<T>` is an instant (Unix seconds in the facility),
//!   `TimeDelta<T>` a signed duration, `StayInterval<T>` the closed span between
//!   a vehicle's entry and exit.
//! - **Money**: `Fee<T>` is an exact amount of currency units.
//! - **Geometry**: `Width` is the width of a lot or of a vehicle.
//!
//! Distinct newtypes keep the units apart at compile time, e.g. a `Fee` can not
//! be added to a `TimeDelta`, and arithmetic is checked so an overflow surfaces
//! instead of wrapping silently.

pub mod fee;
pub mod time;
pub mod width;

pub mod prelude {
    pub use crate::fee::Fee;
    pub use crate::time::{StayInterval, TimeDelta, TimePoint};
    pub use crate::width::Width;
}
