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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and flattening ratio.
//!
//! It also contains the mapping between `geodetic` latitudes on the ellipsoid
//! and `parametric` (reduced) latitudes on the auxiliary sphere.

#![allow(clippy::suboptimal_flops)]

pub mod coefficients;
pub mod wgs84;

use crate::math;
use crate::Metres;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesic::Metres;
/// use ellipsoid_geodesic::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
///
/// // The WGS 84 sq 2nd eccentricity.
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_3rd_flattening, wgs84};
///
/// // The WGS 84 3rd flattening.
/// assert_eq!(0.0016792203863837047, calculate_3rd_flattening(wgs84::F));
/// ```
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// Calculate the square of the authalic radius of an ellipsoid, i.e. the
/// radius of a sphere with the same surface area as the ellipsoid.
///
/// Valid for oblate (f > 0), spherical and prolate (f < 0) ellipsoids.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_authalic_radius_sq(a: Metres, f: f64) -> f64 {
    let e_2 = calculate_sq_eccentricity(f);
    let b = calculate_minor_axis(a, f).0;
    let e = libm::sqrt(libm::fabs(e_2));
    let ratio = if e_2 == 0.0 {
        1.0
    } else if e_2 > 0.0 {
        libm::atanh(e) / e
    } else {
        libm::atan(e) / e
    };
    (a.0 * a.0 + b * b * ratio) / 2.0
}

/// Function to calculate `epsilon`, the variable used in series expansions,
/// derived from Clairaut's constant.
///
/// Note: `epsilon` is positive and small.
/// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
/// Eqs 9 & 16.
/// * `k2` - the square of Karney's `k`: `ep_2 * cos(alpha0)^2`.
#[must_use]
pub fn calculate_epsilon(k2: f64) -> f64 {
    let sqrt_k2_1 = libm::sqrt(1.0 + k2) + 1.0;
    k2 / (sqrt_k2_1 * sqrt_k2_1) // Karney equation 16
}

/// Function to convert a `geodetic` Latitude to a `parametric` Latitude on the
/// auxiliary sphere.
///
/// The cosine of the result is never less than `TINY`, so that a pole is
/// approached along a meridian.
/// * `sin_lat`, `cos_lat` - the sine and cosine of the `geodetic` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
///
/// returns the sine and cosine of the `parametric` Latitude.
#[must_use]
pub fn calculate_parametric_latitude(sin_lat: f64, cos_lat: f64, one_minus_f: f64) -> (f64, f64) {
    let (sin_beta, cos_beta) = math::norm(one_minus_f * sin_lat, cos_lat);
    (sin_beta, libm::fmax(math::TINY, cos_beta))
}

/// Function to convert a `parametric` Latitude on the auxiliary sphere to a
/// `geodetic` Latitude.
/// * `sin_beta`, `cos_beta` - the sine and cosine of the `parametric` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
///
/// returns the `geodetic` Latitude in degrees.
#[must_use]
pub fn calculate_geodetic_latitude(sin_beta: f64, cos_beta: f64, one_minus_f: f64) -> f64 {
    math::atan2d(sin_beta, one_minus_f * cos_beta)
}
