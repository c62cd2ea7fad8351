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

//! The line module contains the `GeodesicLine` type, a geodesic defined by
//! a start position and azimuth on the surface of an ellipsoid.
//!
//! A `GeodesicLine` evaluates the series coefficients of its geodesic once,
//! so that positions along it can be calculated efficiently, without
//! iteration. It solves the direct geodesic problem, see CFF Karney
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) section 5.

#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

use crate::ellipsoid::calculate_epsilon;
use crate::ellipsoid::coefficients::{
    cos_series, evaluate_a1, evaluate_a2, evaluate_coeffs_c1, evaluate_coeffs_c1p,
    evaluate_coeffs_c2, sin_series, SERIES_ORDER,
};
use crate::{mask, math, Degrees, Ellipsoid, GeodesicData, LatLong, Metres};

/// A geodesic on the surface of an ellipsoid, from a start position in a
/// given direction.
///
/// The geodesic is represented by a great circle on the auxiliary sphere.
/// It may also hold a distance to a reference point, e.g. the end of a
/// geodesic segment between two positions.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodesicLine<'a> {
    /// The start latitude in degrees.
    lat1: f64,
    /// The start longitude in degrees.
    lon1: f64,
    /// The start azimuth in degrees.
    azi1: f64,
    /// The sine and cosine of the start azimuth.
    salp1: f64,
    calp1: f64,
    /// The sine and cosine of the azimuth at the Equator.
    salp0: f64,
    calp0: f64,
    /// The sine and cosine of the arc length from the Equator crossing.
    ssig1: f64,
    csig1: f64,
    /// The sine and cosine of the longitude from the Equator crossing.
    somg1: f64,
    comg1: f64,
    /// sqrt(1 + ep_2 * sin(beta1)^2)
    dn1: f64,
    /// The square of Karney's `k`: `ep_2 * cos(alpha0)^2`.
    k2: f64,

    a1m1: f64,
    a2m1: f64,
    a3c: f64,
    a4: f64,
    b11: f64,
    b21: f64,
    b31: f64,
    b41: f64,
    /// The sine and cosine of `sigma1 + B11`.
    stau1: f64,
    ctau1: f64,

    c1: [f64; SERIES_ORDER + 1],
    c1p: [f64; SERIES_ORDER + 1],
    c2: [f64; SERIES_ORDER + 1],
    c3: [f64; SERIES_ORDER],
    c4: [f64; SERIES_ORDER],

    /// The arc length to the reference point in degrees.
    a13: f64,
    /// The distance to the reference point in metres.
    s13: f64,
    /// The capabilities of the line, see `mask`.
    caps: u32,
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
}

/// The outputs of `GeodesicLine::position_values`, NaN where not calculated.
#[derive(Clone, Copy, Debug)]
struct Position {
    a12: f64,
    lat2: f64,
    lon2: f64,
    azi2: f64,
    s12: f64,
    m12: f64,
    big_m12: f64,
    big_m21: f64,
    area: f64,
}

impl Position {
    const fn nan() -> Self {
        Self {
            a12: f64::NAN,
            lat2: f64::NAN,
            lon2: f64::NAN,
            azi2: f64::NAN,
            s12: f64::NAN,
            m12: f64::NAN,
            big_m12: f64::NAN,
            big_m21: f64::NAN,
            area: f64::NAN,
        }
    }
}

/// Return `value` if `flag` is set in `outmask`, None otherwise.
fn output<T>(outmask: u32, flag: u32, value: T) -> Option<T> {
    (outmask & flag & mask::OUT_ALL != 0).then_some(value)
}

impl<'a> GeodesicLine<'a> {
    /// Construct a `GeodesicLine`.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    /// * `lat1`, `lon1` - the start position.
    /// * `azi1` - the azimuth at the start position.
    /// * `caps` - the capabilities of the line, see `mask`. Zero selects
    ///   `DISTANCE_IN | LONGITUDE`. `LATITUDE` and `AZIMUTH` are always
    ///   included, `DISTANCE_IN` includes `DISTANCE`.
    #[must_use]
    pub fn new(
        ellipsoid: &'a Ellipsoid,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        caps: u32,
    ) -> Self {
        let azi1 = math::ang_normalize(azi1.0);
        // Guard against underflow in salp0
        let (salp1, calp1) = math::sincosd(math::ang_round(azi1));
        Self::from_sin_cos_azimuth(ellipsoid, lat1.0, lon1.0, azi1, salp1, calp1, caps)
    }

    /// Construct a `GeodesicLine` from the sine and cosine of its azimuth,
    /// as calculated by the inverse solver.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub(crate) fn from_sin_cos_azimuth(
        ellipsoid: &'a Ellipsoid,
        lat1: f64,
        lon1: f64,
        azi1: f64,
        salp1: f64,
        calp1: f64,
        caps: u32,
    ) -> Self {
        let mut caps = if caps == 0 {
            mask::DISTANCE_IN | mask::LONGITUDE
        } else {
            caps
        } | mask::LATITUDE
            | mask::AZIMUTH
            | mask::LONG_UNROLL;
        // a line that accepts distances can also calculate them
        if caps & mask::DISTANCE_IN & mask::OUT_ALL != 0 {
            caps |= mask::DISTANCE;
        }

        let lat1 = math::lat_fix(lat1);
        let (sbet1, cbet1) = {
            let (sin_lat, cos_lat) = math::sincosd(math::ang_round(lat1));
            ellipsoid.calculate_parametric_latitude(sin_lat, cos_lat)
        };
        let dn1 = libm::sqrt(1.0 + ellipsoid.ep_2() * sbet1 * sbet1);

        // Clairaut's constant
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);

        // The arc length and longitude from the Equator crossing, where
        // tan(sig1) = tan(bet1) / cos(alp1), tan(omg1) = sin(alp0) * tan(sig1).
        let somg1 = salp0 * sbet1;
        let comg1 = if sbet1 != 0.0 || calp1 != 0.0 {
            cbet1 * calp1
        } else {
            1.0
        };
        let (ssig1, csig1) = math::norm(sbet1, comg1);

        let k2 = calp0 * calp0 * ellipsoid.ep_2();
        let eps = calculate_epsilon(k2);

        let mut line = Self {
            lat1,
            lon1,
            azi1,
            salp1,
            calp1,
            salp0,
            calp0,
            ssig1,
            csig1,
            somg1,
            comg1,
            dn1,
            k2,
            a1m1: 0.0,
            a2m1: 0.0,
            a3c: 0.0,
            a4: 0.0,
            b11: 0.0,
            b21: 0.0,
            b31: 0.0,
            b41: 0.0,
            stau1: 0.0,
            ctau1: 1.0,
            c1: [0.0; SERIES_ORDER + 1],
            c1p: [0.0; SERIES_ORDER + 1],
            c2: [0.0; SERIES_ORDER + 1],
            c3: [0.0; SERIES_ORDER],
            c4: [0.0; SERIES_ORDER],
            a13: f64::NAN,
            s13: f64::NAN,
            caps,
            ellipsoid,
        };

        if caps & mask::CAP_C1 != 0 {
            line.a1m1 = evaluate_a1(eps);
            line.c1 = evaluate_coeffs_c1(eps);
            line.b11 = sin_series(&line.c1, ssig1, csig1);
            let (s, c) = (libm::sin(line.b11), libm::cos(line.b11));
            // tau1 = sig1 + B11
            line.stau1 = ssig1 * c + csig1 * s;
            line.ctau1 = csig1 * c - ssig1 * s;
        }
        if caps & mask::CAP_C1P != 0 {
            line.c1p = evaluate_coeffs_c1p(eps);
        }
        if caps & mask::CAP_C2 != 0 {
            line.a2m1 = evaluate_a2(eps);
            line.c2 = evaluate_coeffs_c2(eps);
            line.b21 = sin_series(&line.c2, ssig1, csig1);
        }
        if caps & mask::CAP_C3 != 0 {
            line.c3 = ellipsoid.calculate_c3y(eps);
            line.a3c = -ellipsoid.f() * salp0 * ellipsoid.calculate_a3f(eps);
            line.b31 = sin_series(&line.c3, ssig1, csig1);
        }
        if caps & mask::CAP_C4 != 0 {
            line.c4 = ellipsoid.calculate_c4y(eps);
            let a = ellipsoid.a().0;
            line.a4 = a * a * calp0 * salp0 * ellipsoid.e_2();
            line.b41 = cos_series(&line.c4, ssig1, csig1);
        }

        line
    }

    /// Accessor for the start latitude in degrees.
    #[must_use]
    pub const fn lat1(&self) -> Degrees {
        Degrees(self.lat1)
    }

    /// Accessor for the start longitude in degrees.
    #[must_use]
    pub const fn lon1(&self) -> Degrees {
        Degrees(self.lon1)
    }

    /// Accessor for the start azimuth in degrees.
    #[must_use]
    pub const fn azi1(&self) -> Degrees {
        Degrees(self.azi1)
    }

    /// The azimuth where the geodesic crosses the Equator, northwards.
    #[must_use]
    pub fn azi0(&self) -> Degrees {
        Degrees(math::atan2d(self.salp0, self.calp0))
    }

    /// Accessor for the capabilities of the line.
    #[must_use]
    pub const fn caps(&self) -> u32 {
        self.caps
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// The distance to the reference point, NaN if it has not been set.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        Metres(self.s13)
    }

    /// The arc length to the reference point, NaN if it has not been set.
    #[must_use]
    pub const fn arc_distance(&self) -> Degrees {
        Degrees(self.a13)
    }

    /// Set the distance to the reference point.
    /// * `s13` - the distance in metres.
    pub fn set_distance(&mut self, s13: Metres) -> &mut Self {
        self.s13 = s13.0;
        self.a13 = self.position_values(false, s13.0, mask::NONE).a12;
        self
    }

    /// Set the arc length to the reference point.
    /// * `a13` - the arc length on the auxiliary sphere in degrees.
    pub fn set_arc_distance(&mut self, a13: Degrees) -> &mut Self {
        self.a13 = a13.0;
        self.s13 = self.position_values(true, a13.0, mask::DISTANCE).s12;
        self
    }

    /// Calculate the position at a distance along the line.
    /// * `s12` - the distance from the start position, may be negative.
    ///
    /// returns the latitude, longitude and azimuth at the position, the
    /// longitude is in the range (-180°, 180°].
    #[must_use]
    pub fn position(&self, s12: Metres) -> (Degrees, Degrees, Degrees) {
        let p = self.position_values(false, s12.0, mask::LATITUDE | mask::LONGITUDE | mask::AZIMUTH);
        (Degrees(p.lat2), Degrees(p.lon2), Degrees(p.azi2))
    }

    /// Calculate the position at an arc length along the line.
    /// * `a12` - the arc length on the auxiliary sphere in degrees.
    #[must_use]
    pub fn arc_position(&self, a12: Degrees) -> (Degrees, Degrees, Degrees) {
        let p = self.position_values(true, a12.0, mask::LATITUDE | mask::LONGITUDE | mask::AZIMUTH);
        (Degrees(p.lat2), Degrees(p.lon2), Degrees(p.azi2))
    }

    /// Calculate the `LatLong` at a distance along the line.
    /// * `s12` - the distance from the start position.
    #[must_use]
    pub fn lat_long(&self, s12: Metres) -> LatLong {
        let (lat, lon, _) = self.position(s12);
        LatLong::new(lat, lon)
    }

    /// The general position function.
    /// * `arc_mode` - whether `s12_a12` is an arc length in degrees,
    ///   otherwise it is a distance in metres.
    /// * `s12_a12` - the distance or arc length from the start position.
    /// * `outmask` - the outputs to calculate, see `mask`. Outputs that the
    ///   line was not constructed with capabilities for are `None`.
    #[must_use]
    pub fn gen_position(&self, arc_mode: bool, s12_a12: f64, outmask: u32) -> GeodesicData {
        let outmask = (outmask & mask::LONG_UNROLL) | (outmask & self.caps & mask::OUT_ALL);
        let p = self.position_values(arc_mode, s12_a12, outmask);
        GeodesicData {
            a12: Degrees(p.a12),
            lat2: output(outmask, mask::LATITUDE, Degrees(p.lat2)),
            lon2: output(outmask, mask::LONGITUDE, Degrees(p.lon2)),
            azi1: None,
            azi2: output(outmask, mask::AZIMUTH, Degrees(p.azi2)),
            s12: output(outmask, mask::DISTANCE, Metres(p.s12)),
            m12: output(outmask, mask::REDUCED_LENGTH, Metres(p.m12)),
            big_m12: output(outmask, mask::GEODESIC_SCALE, p.big_m12),
            big_m21: output(outmask, mask::GEODESIC_SCALE, p.big_m21),
            area: output(outmask, mask::AREA, p.area),
        }
    }

    /// Calculate the values of a position along the line.
    fn position_values(&self, arc_mode: bool, s12_a12: f64, outmask: u32) -> Position {
        let unroll = outmask & mask::LONG_UNROLL != 0;
        let outmask = outmask & self.caps & mask::OUT_ALL;
        let mut p = Position::nan();
        if !(arc_mode || self.caps & mask::DISTANCE_IN & mask::OUT_ALL != 0) {
            // the line cannot convert distances to arc lengths
            return p;
        }

        let b = self.ellipsoid.b().0;
        let mut b12 = 0.0;
        let mut ab1 = 0.0;
        let (mut sig12, mut ssig12, mut csig12);
        if arc_mode {
            sig12 = s12_a12 * math::DEGREE;
            (ssig12, csig12) = math::sincosd(s12_a12);
        } else {
            // Interpreting s12_a12 as a distance
            let tau12 = s12_a12 / (b * (1.0 + self.a1m1));
            let (s, c) = (libm::sin(tau12), libm::cos(tau12));
            // tau2 = tau1 + tau12
            b12 = -sin_series(
                &self.c1p,
                self.stau1 * c + self.ctau1 * s,
                self.ctau1 * c - self.stau1 * s,
            );
            sig12 = tau12 - (b12 - self.b11);
            (ssig12, csig12) = (libm::sin(sig12), libm::cos(sig12));
            if libm::fabs(self.ellipsoid.f()) > 0.01 {
                // Reverted distance series is inaccurate for |f| > 1/100,
                // so take one Newton step
                let ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
                let csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
                b12 = sin_series(&self.c1, ssig2, csig2);
                let serr = (1.0 + self.a1m1) * (sig12 + (b12 - self.b11)) - s12_a12 / b;
                sig12 -= serr / libm::sqrt(1.0 + self.k2 * ssig2 * ssig2);
                (ssig12, csig12) = (libm::sin(sig12), libm::cos(sig12));
                // b12 is recalculated below
            }
        }

        // sig2 = sig1 + sig12
        let ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
        let mut csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
        let dn2 = libm::sqrt(1.0 + self.k2 * ssig2 * ssig2);
        if outmask & (mask::DISTANCE | mask::REDUCED_LENGTH | mask::GEODESIC_SCALE) & mask::OUT_ALL
            != 0
        {
            if arc_mode || libm::fabs(self.ellipsoid.f()) > 0.01 {
                b12 = sin_series(&self.c1, ssig2, csig2);
            }
            ab1 = (1.0 + self.a1m1) * (b12 - self.b11);
        }

        // sin(bet2) = cos(alp0) * sin(sig2)
        let sbet2 = self.calp0 * ssig2;
        let mut cbet2 = libm::hypot(self.salp0, self.calp0 * csig2);
        if cbet2 == 0.0 {
            // a pole: break the degeneracy
            cbet2 = math::TINY;
            csig2 = math::TINY;
        }
        // tan(alp0) = cos(sig2) * tan(alp2)
        let salp2 = self.salp0;
        let calp2 = self.calp0 * csig2;

        p.a12 = if arc_mode {
            s12_a12
        } else {
            sig12 / math::DEGREE
        };

        if outmask & mask::DISTANCE & mask::OUT_ALL != 0 {
            p.s12 = if arc_mode {
                b * ((1.0 + self.a1m1) * sig12 + ab1)
            } else {
                s12_a12
            };
        }

        if outmask & mask::LONGITUDE & mask::OUT_ALL != 0 {
            // tan(omg2) = sin(alp0) * tan(sig2)
            let e = libm::copysign(1.0, self.salp0);
            let somg2 = self.salp0 * ssig2;
            let comg2 = csig2;
            let omg12 = if unroll {
                e * (sig12 - (libm::atan2(ssig2, csig2) - libm::atan2(self.ssig1, self.csig1))
                    + (libm::atan2(e * somg2, comg2) - libm::atan2(e * self.somg1, self.comg1)))
            } else {
                libm::atan2(
                    somg2 * self.comg1 - comg2 * self.somg1,
                    comg2 * self.comg1 + somg2 * self.somg1,
                )
            };
            let lam12 = omg12
                + self.a3c * (sig12 + (sin_series(&self.c3, ssig2, csig2) - self.b31));
            let lon12 = lam12 / math::DEGREE;
            p.lon2 = if unroll {
                self.lon1 + lon12
            } else {
                math::ang_normalize(math::ang_normalize(self.lon1) + math::ang_normalize(lon12))
            };
        }

        if outmask & mask::LATITUDE != 0 {
            p.lat2 = math::atan2d(sbet2, self.ellipsoid.one_minus_f() * cbet2);
        }

        if outmask & mask::AZIMUTH != 0 {
            p.azi2 = math::atan2d(salp2, calp2);
        }

        if outmask & (mask::REDUCED_LENGTH | mask::GEODESIC_SCALE) & mask::OUT_ALL != 0 {
            let b22 = sin_series(&self.c2, ssig2, csig2);
            let ab2 = (1.0 + self.a2m1) * (b22 - self.b21);
            let j12 = (self.a1m1 - self.a2m1) * sig12 + (ab1 - ab2);
            if outmask & mask::REDUCED_LENGTH & mask::OUT_ALL != 0 {
                // Add parens around (csig1 * ssig2) and (ssig1 * csig2) to
                // ensure accurate cancellation in the case of coincident points.
                p.m12 = b
                    * ((dn2 * (self.csig1 * ssig2) - self.dn1 * (self.ssig1 * csig2))
                        - self.csig1 * csig2 * j12);
            }
            if outmask & mask::GEODESIC_SCALE & mask::OUT_ALL != 0 {
                let t = self.k2 * (ssig2 - self.ssig1) * (ssig2 + self.ssig1) / (self.dn1 + dn2);
                p.big_m12 = csig12 + (t * ssig2 - csig2 * j12) * self.ssig1 / self.dn1;
                p.big_m21 = csig12 - (t * self.ssig1 - self.csig1 * j12) * ssig2 / dn2;
            }
        }

        if outmask & mask::AREA & mask::OUT_ALL != 0 {
            let b42 = cos_series(&self.c4, ssig2, csig2);
            let (salp12, calp12) = if self.calp0 == 0.0 || self.salp0 == 0.0 {
                // alp12 = alp2 - alp1, used in atan2 so no need to normalize
                (
                    salp2 * self.calp1 - calp2 * self.salp1,
                    calp2 * self.calp1 + salp2 * self.salp1,
                )
            } else {
                // tan(alp) = tan(alp0) * sec(sig), so
                // tan(alp2-alp1) = tan(alp0) * (sec(sig2) - sec(sig1)) / (1 + tan(alp0)^2 * sec(sig1) * sec(sig2))
                // avoiding cancellation when sig12 is small.
                let salp12 = self.calp0
                    * self.salp0
                    * if csig12 <= 0.0 {
                        self.csig1 * (1.0 - csig12) + ssig12 * self.ssig1
                    } else {
                        ssig12 * (self.csig1 * ssig12 / (1.0 + csig12) + self.ssig1)
                    };
                let calp12 =
                    self.salp0 * self.salp0 + self.calp0 * self.calp0 * self.csig1 * csig2;
                (salp12, calp12)
            };
            p.area = self.ellipsoid.c2() * libm::atan2(salp12, calp12)
                + self.a4 * (b42 - self.b41);
        }

        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_geodesic_line_direct() {
        // GeodTest.dat line 2874
        let line = GeodesicLine::new(
            &crate::WGS84_ELLIPSOID,
            Degrees(5.421025561218),
            Degrees(0.0),
            Degrees(84.846843174846),
            mask::ALL,
        );
        assert_eq!(5.421025561218, line.lat1().0);
        assert_eq!(0.0, line.lon1().0);
        assert_eq!(84.846843174846, line.azi1().0);
        assert!(line.distance().0.is_nan());
        assert!(line.arc_distance().0.is_nan());

        let (lat2, lon2, azi2) = line.position(Metres(12161089.9991805));
        assert!(is_within_tolerance(3.027329237478900117, lat2.0, 1e-11));
        assert!(is_within_tolerance(109.666857465735641205, lon2.0, 1e-11));
        assert!(is_within_tolerance(96.826992198613537236, azi2.0, 1e-11));

        let data = line.gen_position(false, 12161089.9991805, mask::ALL);
        assert!(is_within_tolerance(109.607910081857488806, data.a12.0, 1e-11));
        assert_eq!(12161089.9991805, data.s12.map_or(0.0, |s| s.0));
        assert!(is_within_tolerance(
            5988906.6319258056178,
            data.m12.map_or(0.0, |m| m.0),
            1e-6
        ));
        assert!(is_within_tolerance(
            8449589948776.249238,
            data.area.unwrap_or_default(),
            1.0
        ));
        assert!(data.azi1.is_none());

        // the arc length gives the same position
        let (lat3, lon3, azi3) = line.arc_position(data.a12);
        assert!(is_within_tolerance(lat2.0, lat3.0, 1e-11));
        assert!(is_within_tolerance(lon2.0, lon3.0, 1e-11));
        assert!(is_within_tolerance(azi2.0, azi3.0, 1e-11));
    }

    #[test]
    fn test_geodesic_line_set_distance() {
        let mut line = GeodesicLine::new(
            &crate::WGS84_ELLIPSOID,
            Degrees(40.0),
            Degrees(-75.0),
            Degrees(45.0),
            mask::NONE,
        );
        line.set_distance(Metres(1_000_000.0));
        assert_eq!(1_000_000.0, line.distance().0);
        let a13 = line.arc_distance();
        assert!(0.0 < a13.0 && a13.0 < 10.0);

        line.set_arc_distance(a13);
        assert!(is_within_tolerance(1_000_000.0, line.distance().0, 1e-8));
    }

    #[test]
    fn test_geodesic_line_capabilities() {
        // A line without DISTANCE_IN can only be used in arc mode
        let line = GeodesicLine::new(
            &crate::WGS84_ELLIPSOID,
            Degrees(10.0),
            Degrees(20.0),
            Degrees(30.0),
            mask::LATITUDE,
        );
        let data = line.gen_position(false, 1000.0, mask::ALL);
        assert!(data.a12.0.is_nan());

        let data = line.gen_position(true, 1.0, mask::ALL);
        assert_eq!(1.0, data.a12.0);
        assert!(data.lat2.is_some());
        assert!(data.azi2.is_some());
        assert!(data.lon2.is_none());
        assert!(data.s12.is_none());
        assert!(data.area.is_none());
    }

    #[test]
    fn test_geodesic_line_long_unroll() {
        // Along the Equator, more than once around the ellipsoid
        let line = GeodesicLine::new(
            &crate::WGS84_ELLIPSOID,
            Degrees(0.0),
            Degrees(0.0),
            Degrees(90.0),
            mask::STANDARD,
        );
        // the longitude on the Equator is (1 - f) times the arc length
        let data = line.gen_position(true, 540.0, mask::LONGITUDE | mask::LONG_UNROLL);
        let unrolled = data.lon2.map_or(0.0, |lon| lon.0);
        assert!(is_within_tolerance(
            540.0 * crate::WGS84_ELLIPSOID.one_minus_f(),
            unrolled,
            1e-9
        ));

        let data = line.gen_position(true, 540.0, mask::LONGITUDE);
        let lon2 = data.lon2.map_or(0.0, |lon| lon.0);
        assert!(is_within_tolerance(unrolled - 360.0, lon2, 1e-9));
    }

    #[test]
    fn test_geodesic_line_from_pole() {
        // Travel south along meridian lon1 from the North pole
        let line = GeodesicLine::new(
            &crate::WGS84_ELLIPSOID,
            Degrees(90.0),
            Degrees(0.0),
            Degrees(180.0),
            mask::STANDARD | mask::DISTANCE_IN,
        );
        // a line that accepts distances also outputs them
        assert!(mask::contains(line.caps(), mask::DISTANCE));
        let (lat2, lon2, azi2) = line.position(Metres(1_000_000.0));
        assert!(lat2.0 < 90.0);
        assert_eq!(0.0, lon2.0);
        assert_eq!(180.0, azi2.0);

        let position = line.lat_long(Metres(1_000_000.0));
        assert_eq!(lat2.0, position.lat().0);
    }
}
