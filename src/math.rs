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

//! The math module contains the low level angle functions used by the
//! geodesic solvers.
//!
//! Angles are passed as `f64` degrees and as raw sine and cosine pairs,
//! rather than as `Angle`s, because the solvers depend upon the sign of zero
//! and upon values that are tiny but not zero, e.g. the cosine of the
//! latitude of a pole is `TINY`, not zero.
//!
//! The trigonometric functions reduce their arguments exactly, so that they
//! are exact at multiples of 90°, see CFF Karney
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf).

#![allow(clippy::suboptimal_flops)]

/// The number of radians in a degree.
pub const DEGREE: f64 = core::f64::consts::PI / 180.0;

/// The square root of the smallest normalized `f64`, i.e. 2^-511.
/// Used to avoid underflow and divisions by zero at the poles.
pub const TINY: f64 = 1.491_668_146_240_041_3e-154;

/// Sum two values exactly.
/// * `u`, `v` - the values to sum.
///
/// returns the sum `s` and the rounding error `t`, where `s + t == u + v`
/// exactly.
/// # Examples
/// ```
/// use ellipsoid_geodesic::math::two_sum;
///
/// let (s, t) = two_sum(1.0, 1e-17);
/// assert_eq!(1.0, s);
/// assert_eq!(1e-17, t);
/// ```
#[must_use]
pub fn two_sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;
    let up = up - u;
    let vpp = vpp - v;
    // s == 0 preserves the sign of zero
    let t = if s == 0.0 { s } else { 0.0 - (up + vpp) };
    (s, t)
}

/// Normalize a sine and cosine pair so that `x^2 + y^2 == 1`.
#[must_use]
pub fn norm(y: f64, x: f64) -> (f64, f64) {
    let r = libm::hypot(y, x);
    (y / r, x / r)
}

/// Round an angle so that small values are "coarsened", to avoid
/// near singular cases when an angle is tiny but not zero.
///
/// The smallest gap in the result is 1/2^57 degrees, about 0.7 pm on the
/// surface of the earth.
/// * `x` - the angle in degrees.
#[must_use]
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;
    let y = libm::fabs(x);
    // z - (z - y) must not be simplified to y
    let y = if y < Z { Z - (Z - y) } else { y };
    libm::copysign(y, x)
}

/// Normalize an angle to the range (-180°, 180°].
/// * `x` - the angle in degrees.
/// # Examples
/// ```
/// use ellipsoid_geodesic::math::ang_normalize;
///
/// assert_eq!(180.0, ang_normalize(-180.0));
/// assert_eq!(-170.0, ang_normalize(190.0));
/// assert_eq!(180.0, ang_normalize(540.0));
/// ```
#[must_use]
pub fn ang_normalize(x: f64) -> f64 {
    let y = libm::remainder(x, 360.0);
    if y == -180.0 {
        180.0
    } else {
        y
    }
}

/// Replace a latitude outside of the range [-90°, 90°] by NaN.
#[must_use]
pub fn lat_fix(x: f64) -> f64 {
    if libm::fabs(x) > 90.0 {
        f64::NAN
    } else {
        x
    }
}

/// The exact difference of two angles, reduced to (-180°, 180°].
/// * `x`, `y` - the angles in degrees.
///
/// returns `d` and its rounding error `e`, where `d + e == y - x` (mod 360°).
#[must_use]
pub fn ang_diff(x: f64, y: f64) -> (f64, f64) {
    let (d, t) = two_sum(ang_normalize(-x), ang_normalize(y));
    let d = ang_normalize(d);
    two_sum(if d == 180.0 && t > 0.0 { -180.0 } else { d }, t)
}

/// Calculate the sine and cosine of an angle in degrees.
///
/// The angle is reduced exactly to the range [-45°, 45°] before it is
/// converted to radians, so the result is exact for multiples of 90°.
/// * `x` - the angle in degrees.
///
/// returns the sine and cosine of the angle.
/// # Examples
/// ```
/// use ellipsoid_geodesic::math::sincosd;
///
/// assert_eq!((1.0, 0.0), sincosd(90.0));
/// assert_eq!((0.0, -1.0), sincosd(180.0));
/// assert_eq!((-1.0, 0.0), sincosd(-450.0));
/// ```
#[must_use]
pub fn sincosd(x: f64) -> (f64, f64) {
    let (r, q) = libm::remquo(x, 90.0);
    let r = r * DEGREE;
    let (s, c) = (libm::sin(r), libm::cos(r));
    let (sinx, cosx) = match q & 3 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    let sinx = if sinx == 0.0 {
        libm::copysign(sinx, x)
    } else {
        sinx
    };
    (sinx, 0.0 + cosx)
}

/// Calculate the angle in degrees from its sine and cosine (or y and x
/// components), in the range (-180°, 180°].
///
/// The arguments are rearranged so that the `atan2` result is in the range
/// [-45°, 45°] before it is converted to degrees.
/// * `y`, `x` - the sine and cosine of the angle, need not be normalized.
#[must_use]
pub fn atan2d(y: f64, x: f64) -> f64 {
    let (mut y, mut x) = (y, x);
    let mut q = 0;
    if libm::fabs(y) > libm::fabs(x) {
        core::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x < 0.0 {
        x = -x;
        q += 1;
    }

    let ang = libm::atan2(y, x) / DEGREE;
    match q {
        1 => (if y >= 0.0 { 180.0 } else { -180.0 }) - ang,
        2 => 90.0 - ang,
        3 => -90.0 + ang,
        _ => ang,
    }
}
