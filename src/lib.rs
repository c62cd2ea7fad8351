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

//! ellipsoid-geodesic
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for solving geodesic problems on an ellipsoid of revolution,
//! e.g. the [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid.
//!
//! ## Geodesics
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic segment](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! It is the equivalent of a straight line segment in planar geometry or a
//! [great circle arc](https://en.wikipedia.org/wiki/Great_circle) on the
//! surface of a sphere.
//!
//! The library solves:
//!
//! - the direct problem: the end position and azimuth of a geodesic, given
//!   its start position, azimuth and length;
//! - the inverse problem: the length and azimuths of the geodesic between
//!   a pair of positions;
//! - and the perimeter and area of polygons whose edges are geodesics.
//!
//! ## Design
//!
//! The library is based on Charles Karney's [GeographicLib](https://geographiclib.sourceforge.io/)
//! library, see CFF Karney
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf).
//! It models geodesics as great circle arcs on the surface of an auxiliary
//! sphere and uses sixth order series expansions in the third flattening to
//! convert between them, so it is accurate to round-off for the flattening
//! of the Earth and remains accurate for |f| <= 1/50.
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid`.
//!
//! The direct problem is solved by a `GeodesicLine`, without iteration.
//! The inverse problem is solved by Newton's method with a bisection
//! fallback, see the `geodesic` module.
//! The `Polygon` class accumulates the perimeter and area of a polygon or
//! the length of a polyline using compensated summation.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [log](https://crates.io/crates/log) - to report the progress of the
//!   inverse solver;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `Error`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod accumulator;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod line;
pub mod mask;
pub mod math;
pub mod polygon;

/// `Angle` is re-exported so that the `Degrees` returned by the solvers can
/// be used with the `angle-sc` and `unit-sphere` APIs.
pub use angle_sc::{Angle, Degrees, Radians};
pub use error::{Error, Result};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use line::GeodesicLine;
pub use polygon::{Polygon, PolygonArea, PolygonMode};
pub use unit_sphere::LatLong;

use lazy_static::lazy_static;
use log::debug;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The reciprocal of one minus the flattening ratio.
    recip_one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,
    /// The square of the authalic radius of the ellipsoid.
    c2: f64,
    /// The tolerance of very short lines in the inverse solver.
    etol2: f64,

    /// The A3 series `coefficients` of the ellipsoid.
    a3: [f64; ellipsoid::coefficients::SERIES_ORDER],
    /// The C3x series `coefficients` of the ellipsoid.
    c3x: [f64; ellipsoid::coefficients::C3X_SIZE],
    /// The C4x series `coefficients` of the ellipsoid.
    c4x: [f64; ellipsoid::coefficients::C4X_SIZE],
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`, must be finite and positive.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio, must be finite
    ///   and less than one. Zero is a sphere and negative values are prolate.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if `a` or `f` is out of range.
    ///
    /// # Examples
    /// ```
    /// use ellipsoid_geodesic::{Ellipsoid, Error, Metres};
    ///
    /// let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0).unwrap();
    /// assert_eq!(6_371_000.0, sphere.b().0);
    ///
    /// let result = Ellipsoid::new(Metres(6_371_000.0), 1.0);
    /// assert_eq!(Err(Error::InvalidParameter { name: "flattening", value: 1.0 }), result);
    /// ```
    pub fn new(a: Metres, f: f64) -> Result<Self> {
        if !(a.0.is_finite() && 0.0 < a.0) {
            debug!("Ellipsoid rejected, semimajor axis: {}", a.0);
            return Err(Error::InvalidParameter {
                name: "semimajor axis",
                value: a.0,
            });
        }
        if !(f.is_finite() && f < 1.0) {
            debug!("Ellipsoid rejected, flattening: {f}");
            return Err(Error::InvalidParameter {
                name: "flattening",
                value: f,
            });
        }

        Ok(Self::from_valid_parameters(a, f))
    }

    /// Construct an `Ellipsoid` from parameters that are known to be valid.
    fn from_valid_parameters(a: Metres, f: f64) -> Self {
        let one_minus_f = 1.0 - f;
        let n = ellipsoid::calculate_3rd_flattening(f);
        let etol2 = 0.1 * geodesic::TOL2
            / libm::sqrt(
                libm::fmax(0.001, libm::fabs(f)) * libm::fmin(1.0, 1.0 - f / 2.0) / 2.0,
            );
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f,
            recip_one_minus_f: 1.0 / one_minus_f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
            n,
            c2: ellipsoid::calculate_authalic_radius_sq(a, f),
            etol2,
            a3: ellipsoid::coefficients::evaluate_coeffs_a3(n),
            c3x: ellipsoid::coefficients::evaluate_coeffs_c3x(n),
            c4x: ellipsoid::coefficients::evaluate_coeffs_c4x(n),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_valid_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The reciprocal of one minus the flattening ratio.
    #[must_use]
    pub const fn recip_one_minus_f(&self) -> f64 {
        self.recip_one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The square of the authalic radius of the ellipsoid.
    #[must_use]
    pub const fn c2(&self) -> f64 {
        self.c2
    }

    /// The tolerance of very short lines in the inverse solver.
    #[must_use]
    pub const fn etol2(&self) -> f64 {
        self.etol2
    }

    /// The total surface area of the ellipsoid in square metres.
    /// # Examples
    /// ```
    /// use ellipsoid_geodesic::WGS84_ELLIPSOID;
    ///
    /// // about 510 million square kilometres
    /// let area = WGS84_ELLIPSOID.area();
    /// assert!(510.0e12 < area && area < 510.1e12);
    /// ```
    #[must_use]
    pub fn area(&self) -> f64 {
        4.0 * core::f64::consts::PI * self.c2
    }

    /// Calculate epsilon, the variable used in series expansions.
    /// Note: epsilon is positive and small.
    /// * `calp0` - the cosine of the azimuth at the Equator.
    #[must_use]
    pub fn calculate_epsilon(&self, calp0: f64) -> f64 {
        ellipsoid::calculate_epsilon(calp0 * calp0 * self.ep_2)
    }

    /// Calculate a3f from the A3 series `coefficients` of the ellipsoid.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_a3f(&self, eps: f64) -> f64 {
        ellipsoid::coefficients::evaluate_polynomial(&self.a3, eps)
    }

    /// Calculate the coefficients `C3[l]` in the Fourier expansion of `C3`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_c3y(&self, eps: f64) -> [f64; ellipsoid::coefficients::SERIES_ORDER] {
        ellipsoid::coefficients::evaluate_coeffs_c3y(&self.c3x, eps)
    }

    /// Calculate the coefficients `C4[l]` in the Fourier expansion of `C4`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_c4y(&self, eps: f64) -> [f64; ellipsoid::coefficients::SERIES_ORDER] {
        ellipsoid::coefficients::evaluate_coeffs_c4y(&self.c4x, eps)
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `sin_lat`, `cos_lat` - the sine and cosine of the geodetic Latitude.
    ///
    /// returns the sine and cosine of the parametric Latitude.
    #[must_use]
    pub fn calculate_parametric_latitude(&self, sin_lat: f64, cos_lat: f64) -> (f64, f64) {
        ellipsoid::calculate_parametric_latitude(sin_lat, cos_lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `sin_beta`, `cos_beta` - the sine and cosine of the parametric Latitude.
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, sin_beta: f64, cos_beta: f64) -> Degrees {
        Degrees(ellipsoid::calculate_geodetic_latitude(
            sin_beta,
            cos_beta,
            self.one_minus_f,
        ))
    }

    /// Solve the direct geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `s12` - the distance from the start position, may be negative.
    ///
    /// returns the latitude, longitude and azimuth at the end position,
    /// the longitude and azimuth are in the range (-180°, 180°].
    ///
    /// # Examples
    /// ```
    /// use ellipsoid_geodesic::{Degrees, Metres, WGS84_ELLIPSOID};
    ///
    /// // From JFK airport, 5850 km on a bearing of 53.5°
    /// let (lat2, lon2, azi2) = WGS84_ELLIPSOID.direct(
    ///     Degrees(40.63972222),
    ///     Degrees(-73.77888889),
    ///     Degrees(53.5),
    ///     Metres(5850e3),
    /// );
    /// assert!((lat2.0 - 49.01467).abs() < 0.5e-5);
    /// assert!((lon2.0 - 2.56106).abs() < 0.5e-5);
    /// assert!((azi2.0 - 111.62947).abs() < 0.5e-5);
    /// ```
    #[must_use]
    pub fn direct(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        s12: Metres,
    ) -> (Degrees, Degrees, Degrees) {
        let data = self.gen_direct(
            lat1,
            lon1,
            azi1,
            false,
            s12.0,
            mask::LATITUDE | mask::LONGITUDE | mask::AZIMUTH,
        );
        (
            data.lat2.unwrap_or(Degrees(f64::NAN)),
            data.lon2.unwrap_or(Degrees(f64::NAN)),
            data.azi2.unwrap_or(Degrees(f64::NAN)),
        )
    }

    /// The general direct geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `arc_mode` - whether `s12_a12` is an arc length on the auxiliary
    ///   sphere in degrees, otherwise it is a distance in metres.
    /// * `s12_a12` - the distance or arc length from the start position.
    /// * `outmask` - the outputs to calculate, see `mask`.
    ///
    /// returns the requested outputs, `azi1` is always `None`.
    #[must_use]
    pub fn gen_direct(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        arc_mode: bool,
        s12_a12: f64,
        outmask: u32,
    ) -> GeodesicData {
        // Automatically supply DISTANCE_IN if necessary
        let caps = outmask
            | if arc_mode {
                mask::NONE
            } else {
                mask::DISTANCE_IN
            };
        GeodesicLine::new(self, lat1, lon1, azi1, caps).gen_position(arc_mode, s12_a12, outmask)
    }

    /// Solve the inverse geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `lat2`, `lon2` - the end position.
    ///
    /// returns the distance between the positions and the azimuths at
    /// the start and end positions.
    ///
    /// # Examples
    /// ```
    /// use ellipsoid_geodesic::{Degrees, WGS84_ELLIPSOID};
    ///
    /// // JFK airport to Paris CDG airport
    /// let (s12, azi1, azi2) = WGS84_ELLIPSOID.inverse(
    ///     Degrees(40.6),
    ///     Degrees(-73.8),
    ///     Degrees(49.01666667),
    ///     Degrees(2.55),
    /// );
    /// assert!((s12.0 - 5853226.0).abs() < 0.5);
    /// assert!((azi1.0 - 53.47022).abs() < 0.5e-5);
    /// assert!((azi2.0 - 111.59367).abs() < 0.5e-5);
    /// ```
    #[must_use]
    pub fn inverse(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
    ) -> (Metres, Degrees, Degrees) {
        let data = self.gen_inverse(
            lat1,
            lon1,
            lat2,
            lon2,
            mask::DISTANCE | mask::AZIMUTH,
        );
        (
            data.s12.unwrap_or(Metres(f64::NAN)),
            data.azi1.unwrap_or(Degrees(f64::NAN)),
            data.azi2.unwrap_or(Degrees(f64::NAN)),
        )
    }

    /// The general inverse geodesic problem.
    /// * `lat1`, `lon1` - the start position.
    /// * `lat2`, `lon2` - the end position.
    /// * `outmask` - the outputs to calculate, see `mask`.
    ///
    /// returns the requested outputs, `lat2` and `lon2` are always `None`.
    #[must_use]
    pub fn gen_inverse(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
        outmask: u32,
    ) -> GeodesicData {
        let solution = geodesic::solve_inverse(self, lat1.0, lon1.0, lat2.0, lon2.0, outmask);
        let output = |flag: u32| outmask & flag & mask::OUT_ALL != 0;
        GeodesicData {
            a12: Degrees(solution.a12),
            lat2: None,
            lon2: None,
            azi1: output(mask::AZIMUTH)
                .then(|| Degrees(math::atan2d(solution.salp1, solution.calp1))),
            azi2: output(mask::AZIMUTH)
                .then(|| Degrees(math::atan2d(solution.salp2, solution.calp2))),
            s12: output(mask::DISTANCE).then_some(Metres(solution.s12)),
            m12: output(mask::REDUCED_LENGTH).then_some(Metres(solution.m12)),
            big_m12: output(mask::GEODESIC_SCALE).then_some(solution.big_m12),
            big_m21: output(mask::GEODESIC_SCALE).then_some(solution.big_m21),
            area: output(mask::AREA).then_some(solution.area),
        }
    }

    /// Construct a `GeodesicLine` from a start position and azimuth.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `caps` - the capabilities of the line, see `mask`.
    #[must_use]
    pub fn line(&self, lat1: Degrees, lon1: Degrees, azi1: Degrees, caps: u32) -> GeodesicLine<'_> {
        GeodesicLine::new(self, lat1, lon1, azi1, caps)
    }

    /// Construct a `GeodesicLine` from a start position, azimuth and the
    /// distance to its end position.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `s12` - the distance to the end position.
    /// * `caps` - the capabilities of the line, see `mask`.
    #[must_use]
    pub fn direct_line(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        s12: Metres,
        caps: u32,
    ) -> GeodesicLine<'_> {
        let mut line = GeodesicLine::new(self, lat1, lon1, azi1, caps);
        line.set_distance(s12);
        line
    }

    /// Construct the `GeodesicLine` between a pair of positions.
    /// * `lat1`, `lon1` - the start position.
    /// * `lat2`, `lon2` - the end position.
    /// * `caps` - the capabilities of the line, see `mask`.
    ///
    /// # Examples
    /// ```
    /// use ellipsoid_geodesic::{mask, Degrees, WGS84_ELLIPSOID};
    ///
    /// // Waypoints every 1000 km from JFK airport to Singapore Changi airport
    /// let line = WGS84_ELLIPSOID.inverse_line(
    ///     Degrees(40.64),
    ///     Degrees(-73.78),
    ///     Degrees(1.36),
    ///     Degrees(103.99),
    ///     mask::NONE,
    /// );
    /// let count = (line.distance().0 / 1e6).ceil() as i32;
    /// for i in 0..=count {
    ///     let s = line.distance().0 * f64::from(i) / f64::from(count);
    ///     let position = line.lat_long(ellipsoid_geodesic::Metres(s));
    ///     println!("{:?}", position);
    /// }
    /// ```
    #[must_use]
    pub fn inverse_line(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
        caps: u32,
    ) -> GeodesicLine<'_> {
        let solution = geodesic::solve_inverse(self, lat1.0, lon1.0, lat2.0, lon2.0, mask::NONE);
        let azi1 = math::atan2d(solution.salp1, solution.calp1);
        let mut line = GeodesicLine::from_sin_cos_azimuth(
            self,
            lat1.0,
            lon1.0,
            azi1,
            solution.salp1,
            solution.calp1,
            caps,
        );
        line.set_arc_distance(Degrees(solution.a12));
        line
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// The general solution of a direct or inverse geodesic problem.
///
/// The outputs that were not requested are `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicData {
    /// The arc length on the auxiliary sphere.
    pub a12: Degrees,
    /// The end latitude, direct problem only.
    pub lat2: Option<Degrees>,
    /// The end longitude, direct problem only.
    pub lon2: Option<Degrees>,
    /// The start azimuth, inverse problem only.
    pub azi1: Option<Degrees>,
    /// The end azimuth.
    pub azi2: Option<Degrees>,
    /// The distance.
    pub s12: Option<Metres>,
    /// The reduced length.
    pub m12: Option<Metres>,
    /// The geodesic scale of point 2 relative to point 1.
    pub big_m12: Option<f64>,
    /// The geodesic scale of point 1 relative to point 2.
    pub big_m21: Option<f64>,
    /// The area between the geodesic and the Equator in square metres.
    pub area: Option<f64>,
}
