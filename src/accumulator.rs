// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The accumulator module contains `Accumulator`, a running sum that holds
//! its rounding error, see
//! [Kahan summation](https://en.wikipedia.org/wiki/Kahan_summation_algorithm).
//!
//! The sum is held as a pair of `f64`s: the value and a correction, so
//! that adding thousands of small terms to a large total does not lose
//! precision.

use crate::math::two_sum;

/// A compensated sum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    /// The sum, rounded.
    s: f64,
    /// The rounding error of the sum.
    t: f64,
}

impl Accumulator {
    /// Construct an `Accumulator` with an initial value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { s: value, t: 0.0 }
    }

    /// The value of the sum.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.s
    }

    /// Add a value to the sum.
    /// * `y` - the value to add.
    pub fn add(&mut self, y: f64) {
        let (z, u) = two_sum(y, self.t);
        let (s, t) = two_sum(z, self.s);
        self.s = s;
        // If s == 0 then t is 0 too, so u is the whole correction.
        if self.s == 0.0 {
            self.s = u;
            self.t = t;
        } else {
            self.t = t + u;
        }
    }

    /// The value of the sum if `y` were added, without changing the sum.
    /// * `y` - the value to add.
    #[must_use]
    pub fn sum(&self, y: f64) -> f64 {
        let mut temp = *self;
        temp.add(y);
        temp.s
    }

    /// Negate the sum.
    pub fn negate(&mut self) {
        self.s = -self.s;
        self.t = -self.t;
    }

    /// Reduce the sum to the range [-y/2, y/2].
    /// * `y` - the modulus.
    pub fn remainder(&mut self, y: f64) {
        self.s = libm::remainder(self.s, y);
        self.add(0.0);
    }
}
