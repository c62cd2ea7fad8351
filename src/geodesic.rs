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

//! The geodesic module contains the solution of the inverse geodesic
//! problem: the shortest path between two points on the surface of an
//! ellipsoid.
//!
//! It uses Newton's method to solve for the azimuth at the start point on
//! the auxiliary sphere, falling back to bisection when Newton's method
//! fails to converge, see CFF Karney
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) section 4.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

use crate::ellipsoid::calculate_epsilon;
use crate::ellipsoid::coefficients::{
    cos_series, evaluate_a1, evaluate_a2, evaluate_coeffs_c1, evaluate_coeffs_c2, sin_series,
};
use crate::{mask, math, Ellipsoid};
use core::f64::consts::PI;
use log::{debug, trace, warn};

/// The maximum number of Newton iterations.
pub const MAX_NEWTON_ITERS: u32 = 20;
/// The maximum number of iterations, Newton's method followed by bisection.
pub const MAX_ITERS: u32 = MAX_NEWTON_ITERS + f64::MANTISSA_DIGITS + 10;

/// The tolerance of the `lambda12` residual.
const TOL0: f64 = f64::EPSILON;
/// Tolerance of the astroid start for nearly antipodal points.
const TOL1: f64 = 200.0 * TOL0;
/// The square root of `f64::EPSILON`.
pub const TOL2: f64 = 1.490_116_119_384_765_6e-8;
/// The tolerance of the bisection bracket.
const TOLB: f64 = TOL0 * TOL2;
const XTHRESH: f64 = 1000.0 * TOL2;

/// Estimate omega12 by solving the astroid problem.
/// Solve k^4+2*k^3-(x^2+y^2-1)*k^2-2*y^2*k-y^2 = 0 for positive root k.
/// * `x`, `y` - astroid parameters, see Karney section 7.
///
/// returns the solution to the astroid problem.
#[must_use]
fn calculate_astroid(x: f64, y: f64) -> f64 {
    let p = x * x;
    let q = y * y;
    let r = (p + q - 1.0) / 6.0;

    // y = 0 with |x| <= 1
    // for y small, positive root is k = abs(y)/sqrt(1-x^2)
    if (q <= 0.0) && (r <= 0.0) {
        0.0
    } else {
        let s = p * q / 4.0;
        let r2 = r * r;
        let r3 = r * r2;
        let mut u = r;

        // The discriminant of the quadratic equation for T3.
        // This is zero on the evolute curve p^(1/3)+q^(1/3) = 1
        let discriminant = s * (s + 2.0 * r3);
        if 0.0 <= discriminant {
            let mut t3 = s + r3;
            // Pick the sign on the sqrt to maximize abs(T3), to minimise loss
            // of precision due to cancellation.
            t3 += if t3 < 0.0 {
                -libm::sqrt(discriminant)
            } else {
                libm::sqrt(discriminant)
            };
            let t = libm::cbrt(t3);
            u += if t == 0.0 { 0.0 } else { t + r2 / t };
        } else {
            // T is complex, but the way u is defined the result is real.
            let angle = libm::atan2(libm::sqrt(-discriminant), -(s + r3));
            // There are three possible cube roots.  We choose the root which
            // avoids cancellation.  Note: discriminant < 0 implies that r < 0.
            u += 2.0 * r * libm::cos(angle / 3.0);
        }

        let v = libm::sqrt(u * u + q); // guaranteed positive
        let uv = if u < 0.0 { q / (v - u) } else { u + v }; // u+v, guaranteed positive
        let w = (uv - q) / (2.0 * v); // positive?

        // Rearrange expression for k to avoid loss of accuracy due to subtraction.
        // Division by 0 not possible because uv > 0, w >= 0.
        uv / (libm::sqrt(uv + w * w) + w) // guaranteed positive
    }
}

/// A point on the auxiliary sphere, given by its parametric latitude.
#[derive(Clone, Copy, Debug)]
struct Parametric {
    sbet: f64,
    cbet: f64,
    /// sqrt(1 + ep_2 * sin(beta)^2)
    dn: f64,
}

impl Parametric {
    fn new(lat: f64, ellipsoid: &Ellipsoid) -> Self {
        let (sin_lat, cos_lat) = math::sincosd(lat);
        let (sbet, cbet) = ellipsoid.calculate_parametric_latitude(sin_lat, cos_lat);
        Self::from_sin_cos(sbet, cbet, ellipsoid)
    }

    fn from_sin_cos(sbet: f64, cbet: f64, ellipsoid: &Ellipsoid) -> Self {
        Self {
            sbet,
            cbet,
            dn: libm::sqrt(1.0 + ellipsoid.ep_2() * sbet * sbet),
        }
    }
}

/// The lengths of a geodesic on the auxiliary sphere, scaled by `b`,
/// NaN where not calculated.
#[derive(Clone, Copy, Debug)]
struct Lengths {
    /// The distance.
    s12b: f64,
    /// The reduced length.
    m12b: f64,
    m0: f64,
    big_m12: f64,
    big_m21: f64,
}

/// Calculate the lengths of a geodesic from its arc length on the
/// auxiliary sphere.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// * `sig12` - the arc length on the auxiliary sphere, radians.
/// * `sigma1`, `sigma2` - the sine and cosine of the arc lengths from the
///   Equator crossing to the start and end points.
/// * `p1`, `p2` - the start and end points.
/// * `outmask` - the lengths to calculate.
#[allow(clippy::too_many_arguments)]
fn calculate_lengths(
    ellipsoid: &Ellipsoid,
    eps: f64,
    sig12: f64,
    sigma1: (f64, f64),
    sigma2: (f64, f64),
    p1: &Parametric,
    p2: &Parametric,
    outmask: u32,
) -> Lengths {
    let outmask = outmask & mask::OUT_MASK;
    let (ssig1, csig1) = sigma1;
    let (ssig2, csig2) = sigma2;
    let mut lengths = Lengths {
        s12b: f64::NAN,
        m12b: f64::NAN,
        m0: f64::NAN,
        big_m12: f64::NAN,
        big_m21: f64::NAN,
    };

    let distance = outmask & mask::DISTANCE != 0;
    let reduced = outmask & (mask::REDUCED_LENGTH | mask::GEODESIC_SCALE) != 0;

    let mut a1 = 0.0;
    let mut a2 = 0.0;
    let mut m0x = 0.0;
    let mut j12 = 0.0;
    let mut c1 = [0.0; 7];
    let mut c2 = [0.0; 7];
    if distance || reduced {
        a1 = evaluate_a1(eps);
        c1 = evaluate_coeffs_c1(eps);
        if reduced {
            a2 = evaluate_a2(eps);
            c2 = evaluate_coeffs_c2(eps);
            m0x = a1 - a2;
            a2 += 1.0;
        }
        a1 += 1.0;
    }

    if distance {
        let b1 = sin_series(&c1, ssig2, csig2) - sin_series(&c1, ssig1, csig1);
        lengths.s12b = a1 * (sig12 + b1);
        if reduced {
            let b2 = sin_series(&c2, ssig2, csig2) - sin_series(&c2, ssig1, csig1);
            j12 = m0x * sig12 + (a1 * b1 - a2 * b2);
        }
    } else if reduced {
        // Assume here that c1.len() >= c2.len()
        for (cb, ca) in c2.iter_mut().zip(c1.iter()) {
            *cb = a1 * ca - a2 * *cb;
        }
        j12 = m0x * sig12 + (sin_series(&c2, ssig2, csig2) - sin_series(&c2, ssig1, csig1));
    }

    if outmask & mask::REDUCED_LENGTH != 0 {
        lengths.m0 = m0x;
        // Add parens around (csig1 * ssig2) and (ssig1 * csig2) to ensure
        // accurate cancellation in the case of coincident points.
        lengths.m12b =
            p2.dn * (csig1 * ssig2) - p1.dn * (ssig1 * csig2) - csig1 * csig2 * j12;
    }

    if outmask & mask::GEODESIC_SCALE != 0 {
        let csig12 = csig1 * csig2 + ssig1 * ssig2;
        let t = ellipsoid.ep_2() * (p1.cbet - p2.cbet) * (p1.cbet + p2.cbet) / (p1.dn + p2.dn);
        lengths.big_m12 = csig12 + (t * ssig2 - csig2 * j12) * ssig1 / p1.dn;
        lengths.big_m21 = csig12 - (t * ssig1 - csig1 * j12) * ssig2 / p2.dn;
    }

    lengths
}

/// The starting values for Newton's method.
#[derive(Clone, Copy, Debug)]
struct Start {
    /// The arc length of a very short line, negative otherwise.
    sig12: f64,
    salp1: f64,
    calp1: f64,
    /// The end azimuth of a very short line.
    salp2: f64,
    calp2: f64,
    /// sqrt(1 + ep_2 * sin(beta_mid)^2) of a short line.
    dnm: f64,
}

/// Estimate the azimuth at the start of the geodesic.
///
/// Very short lines are solved directly and returned with a non-negative
/// `sig12`. Nearly antipodal points are estimated by solving the astroid
/// problem, other lines from the great circle on the auxiliary sphere.
/// * `p1`, `p2` - the start and end points, with `p1` south of the Equator.
/// * `lam12` - the longitude difference in radians.
/// * `slam12`, `clam12` - the sine and cosine of `lam12`.
fn estimate_start(
    ellipsoid: &Ellipsoid,
    p1: &Parametric,
    p2: &Parametric,
    lam12: f64,
    slam12: f64,
    clam12: f64,
) -> Start {
    let (sbet1, cbet1) = (p1.sbet, p1.cbet);
    let (sbet2, cbet2) = (p2.sbet, p2.cbet);
    let f = ellipsoid.f();
    let n = ellipsoid.n();
    let mut start = Start {
        sig12: -1.0,
        salp1: 0.0,
        calp1: 0.0,
        salp2: f64::NAN,
        calp2: f64::NAN,
        dnm: f64::NAN,
    };

    // bet12 = bet2 - bet1 in [0, pi); bet12a = bet2 + bet1 in (-pi, 0]
    let sbet12 = sbet2 * cbet1 - cbet2 * sbet1;
    let cbet12 = cbet2 * cbet1 + sbet2 * sbet1;
    let sbet12a = sbet2 * cbet1 + cbet2 * sbet1;

    let shortline = cbet12 >= 0.0 && sbet12 < 0.5 && cbet2 * lam12 < 0.5;
    let (mut somg12, mut comg12) = if shortline {
        let sbetm2 = (sbet1 + sbet2) * (sbet1 + sbet2);
        // sin((bet1+bet2)/2)^2 = (sbet1 + sbet2)^2 / ((sbet1 + sbet2)^2 + (cbet1 + cbet2)^2)
        let sbetm2 = sbetm2 / (sbetm2 + (cbet1 + cbet2) * (cbet1 + cbet2));
        start.dnm = libm::sqrt(1.0 + ellipsoid.ep_2() * sbetm2);
        let omg12 = lam12 / (ellipsoid.one_minus_f() * start.dnm);
        (libm::sin(omg12), libm::cos(omg12))
    } else {
        (slam12, clam12)
    };

    let mut salp1 = cbet2 * somg12;
    let mut calp1 = if comg12 >= 0.0 {
        sbet12 + cbet2 * sbet1 * somg12 * somg12 / (1.0 + comg12)
    } else {
        sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1.0 - comg12)
    };

    let ssig12 = libm::hypot(salp1, calp1);
    let csig12 = sbet1 * sbet2 + cbet1 * cbet2 * comg12;

    if shortline && ssig12 < ellipsoid.etol2() {
        // really short lines
        let salp2 = cbet1 * somg12;
        let calp2 = sbet12
            - cbet1
                * sbet2
                * if comg12 >= 0.0 {
                    somg12 * somg12 / (1.0 + comg12)
                } else {
                    1.0 - comg12
                };
        (start.salp2, start.calp2) = math::norm(salp2, calp2);
        // Set return value
        start.sig12 = libm::atan2(ssig12, csig12);
    } else if libm::fabs(n) > 0.1 // no astroid calc if too eccentric
        || csig12 >= 0.0
        || ssig12 >= 6.0 * libm::fabs(n) * PI * cbet1 * cbet1
    {
        // Nothing to do, zeroth order spherical approximation is OK
    } else {
        // Scale lam12 and bet2 to x, y coordinate system where antipodal
        // point is at origin and singular point is at y = 0, x = -1.
        let lam12x = libm::atan2(-slam12, -clam12); // lam12 - pi
        let (x, y, lamscale) = if f >= 0.0 {
            // In fact f == 0 does not get here
            // x = dlong, y = dlat
            let eps = calculate_epsilon(sbet1 * sbet1 * ellipsoid.ep_2());
            let lamscale = f * cbet1 * ellipsoid.calculate_a3f(eps) * PI;
            let betscale = lamscale * cbet1;
            (lam12x / lamscale, sbet12a / betscale, lamscale)
        } else {
            // x = dlat, y = dlong
            let cbet12a = cbet2 * cbet1 - sbet2 * sbet1;
            let bet12a = libm::atan2(sbet12a, cbet12a);
            // In the case of lon12 = 180, this repeats a calculation made
            // in the meridian case.
            let lengths = calculate_lengths(
                ellipsoid,
                n,
                PI + bet12a,
                (sbet1, -cbet1),
                (sbet2, cbet2),
                p1,
                p2,
                mask::REDUCED_LENGTH,
            );
            let x = -1.0 + lengths.m12b / (cbet1 * cbet2 * lengths.m0 * PI);
            let betscale = if x < -0.01 {
                sbet12a / x
            } else {
                -f * cbet1 * cbet1 * PI
            };
            let lamscale = betscale / cbet1;
            (x, lam12x / lamscale, lamscale)
        };

        if y > -TOL1 && x > -1.0 - XTHRESH {
            // strip near cut
            if f >= 0.0 {
                salp1 = libm::fmin(1.0, -x);
                calp1 = -libm::sqrt(1.0 - salp1 * salp1);
            } else {
                calp1 = libm::fmax(if x > -TOL1 { 0.0 } else { -1.0 }, x);
                salp1 = libm::sqrt(1.0 - calp1 * calp1);
            }
        } else {
            // Estimate alp1, by solving the astroid problem.
            let k = calculate_astroid(x, y);
            let omg12a = lamscale
                * if f >= 0.0 {
                    -x * k / (1.0 + k)
                } else {
                    -y * (1.0 + k) / k
                };
            somg12 = libm::sin(omg12a);
            comg12 = -libm::cos(omg12a);
            // Update spherical estimate of alp1 using omg12 instead of lam12
            salp1 = cbet2 * somg12;
            calp1 = sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1.0 - comg12);
        }
    }

    // Sanity check on starting guess. Backwards check allows NaN through.
    if salp1 > 0.0 || salp1.is_nan() {
        (start.salp1, start.calp1) = math::norm(salp1, calp1);
    } else {
        start.salp1 = 1.0;
        start.calp1 = 0.0;
    }
    start
}

/// The values of the longitude function `lambda12(alpha1)`.
#[derive(Clone, Copy, Debug)]
struct Lambda12 {
    /// The residual: lambda12 minus the longitude difference.
    v: f64,
    salp2: f64,
    calp2: f64,
    sig12: f64,
    ssig1: f64,
    csig1: f64,
    ssig2: f64,
    csig2: f64,
    eps: f64,
    /// The difference between the ellipsoid and auxiliary sphere longitudes.
    domg12: f64,
    /// The derivative of `v` with respect to alpha1, NaN if not calculated.
    dv: f64,
}

/// Calculate the longitude difference of the geodesic with start azimuth
/// alpha1, minus the longitude difference between the points.
/// * `p1`, `p2` - the start and end points.
/// * `salp1`, `calp1` - the sine and cosine of alpha1.
/// * `slam120`, `clam120` - the sine and cosine of the longitude difference.
/// * `diffp` - whether to calculate the derivative.
#[allow(clippy::too_many_arguments)]
fn calculate_lambda12(
    ellipsoid: &Ellipsoid,
    p1: &Parametric,
    p2: &Parametric,
    salp1: f64,
    calp1: f64,
    slam120: f64,
    clam120: f64,
    diffp: bool,
) -> Lambda12 {
    let (sbet1, cbet1) = (p1.sbet, p1.cbet);
    let (sbet2, cbet2) = (p2.sbet, p2.cbet);

    // Break degeneracy of equatorial line
    let calp1 = if sbet1 == 0.0 && calp1 == 0.0 {
        -math::TINY
    } else {
        calp1
    };

    // sin(alp1) * cos(bet1) = sin(alp0)
    let salp0 = salp1 * cbet1;
    let calp0 = libm::hypot(calp1, salp1 * sbet1); // calp0 > 0

    // tan(bet1) = tan(sig1) * cos(alp1)
    // tan(omg1) = sin(alp0) * tan(sig1) = tan(omg1)=tan(alp1)*sin(bet1)
    let somg1 = salp0 * sbet1;
    let comg1 = calp1 * cbet1;
    let (ssig1, csig1) = math::norm(sbet1, comg1);

    // Enforce symmetries in the case abs(bet2) = -bet1.
    let salp2 = if cbet2 == cbet1 { salp1 } else { salp0 / cbet2 };
    // calp2 = sqrt(1 - sq(salp2))
    //       = sqrt(sq(calp0) - sq(sbet2)) / cbet2
    // and subst for calp0 and rearrange to give (choose positive sqrt
    // to give alp2 in [0, pi/2]).
    let calp2 = if cbet2 != cbet1 || libm::fabs(sbet2) != -sbet1 {
        libm::sqrt(
            (calp1 * cbet1) * (calp1 * cbet1)
                + if cbet1 < -sbet1 {
                    (cbet2 - cbet1) * (cbet1 + cbet2)
                } else {
                    (sbet1 - sbet2) * (sbet1 + sbet2)
                },
        ) / cbet2
    } else {
        libm::fabs(calp1)
    };

    // tan(bet2) = tan(sig2) * cos(alp2)
    // tan(omg2) = sin(alp0) * tan(sig2).
    let somg2 = salp0 * sbet2;
    let comg2 = calp2 * cbet2;
    let (ssig2, csig2) = math::norm(sbet2, comg2);

    // sig12 = sig2 - sig1, limit to [0, pi]
    let sig12 = libm::atan2(
        libm::fmax(0.0, csig1 * ssig2 - ssig1 * csig2),
        csig1 * csig2 + ssig1 * ssig2,
    );
    // omg12 = omg2 - omg1, limit to [0, pi]
    let somg12 = libm::fmax(0.0, comg1 * somg2 - somg1 * comg2);
    let comg12 = comg1 * comg2 + somg1 * somg2;
    // eta = omg12 - lam120
    let eta = libm::atan2(
        somg12 * clam120 - comg12 * slam120,
        comg12 * clam120 + somg12 * slam120,
    );

    let eps = calculate_epsilon(calp0 * calp0 * ellipsoid.ep_2());
    let c3 = ellipsoid.calculate_c3y(eps);
    let b312 = sin_series(&c3, ssig2, csig2) - sin_series(&c3, ssig1, csig1);
    let domg12 = -ellipsoid.f() * ellipsoid.calculate_a3f(eps) * salp0 * (sig12 + b312);

    let dv = if !diffp {
        f64::NAN
    } else if calp2 == 0.0 {
        -2.0 * ellipsoid.one_minus_f() * p1.dn / sbet1
    } else {
        let lengths = calculate_lengths(
            ellipsoid,
            eps,
            sig12,
            (ssig1, csig1),
            (ssig2, csig2),
            p1,
            p2,
            mask::REDUCED_LENGTH,
        );
        lengths.m12b * ellipsoid.one_minus_f() / (calp2 * cbet2)
    };

    Lambda12 {
        v: eta + domg12,
        salp2,
        calp2,
        sig12,
        ssig1,
        csig1,
        ssig2,
        csig2,
        eps,
        domg12,
        dv,
    }
}

/// The solution of the inverse geodesic problem. The sines and cosines of
/// the azimuths are given, rather than the azimuths.
/// Outputs that were not requested are NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The arc length on the auxiliary sphere in degrees.
    pub a12: f64,
    /// The distance in metres.
    pub s12: f64,
    /// The sine and cosine of the start azimuth.
    pub salp1: f64,
    pub calp1: f64,
    /// The sine and cosine of the end azimuth.
    pub salp2: f64,
    pub calp2: f64,
    /// The reduced length in metres.
    pub m12: f64,
    /// The geodesic scales.
    pub big_m12: f64,
    pub big_m21: f64,
    /// The area between the geodesic and the Equator in square metres.
    pub area: f64,
    /// The number of iterations of Newton's method and bisection.
    pub iterations: u32,
}

/// Solve the inverse geodesic problem.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `lat1`, `lon1` - the start position in degrees.
/// * `lat2`, `lon2` - the end position in degrees.
/// * `outmask` - the outputs to calculate, see `mask`.
///
/// returns the `InverseSolution`.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn solve_inverse(
    ellipsoid: &Ellipsoid,
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    outmask: u32,
) -> InverseSolution {
    let outmask = outmask & mask::OUT_MASK;
    let f = ellipsoid.f();
    let one_minus_f = ellipsoid.one_minus_f();
    let b = ellipsoid.b().0;

    // Compute longitude difference exactly and make it positive.
    let (lon12, lon12s) = math::ang_diff(lon1, lon2);
    let mut lonsign: f64 = if lon12.is_sign_negative() { -1.0 } else { 1.0 };
    let lon12 = lonsign * math::ang_round(lon12);
    let lon12s = math::ang_round((180.0 - lon12) - lonsign * lon12s);
    let lam12 = lon12 * math::DEGREE;
    let (slam12, clam12) = if lon12 > 90.0 {
        let (s, c) = math::sincosd(lon12s);
        (s, -c)
    } else {
        math::sincosd(lon12)
    };

    // If really close to the Equator, treat as on the Equator.
    let mut lat1 = math::ang_round(math::lat_fix(lat1));
    let mut lat2 = math::ang_round(math::lat_fix(lat2));
    // Swap points so that the point with the larger latitude is first.
    let swapp: f64 = if libm::fabs(lat1) < libm::fabs(lat2) || lat2.is_nan() {
        -1.0
    } else {
        1.0
    };
    if swapp < 0.0 {
        lonsign = -lonsign;
        core::mem::swap(&mut lat1, &mut lat2);
    }
    // Make lat1 <= -0
    let latsign: f64 = if lat1.is_sign_negative() { 1.0 } else { -1.0 };
    lat1 *= latsign;
    lat2 *= latsign;
    // Now 0 <= lon12 <= 180, -90 <= lat1 <= -0, lat1 <= lat2 <= -lat1.

    let mut p1 = Parametric::new(lat1, ellipsoid);
    let mut p2 = Parametric::new(lat2, ellipsoid);
    // If cbet1 < -sbet1, then cbet2 - cbet1 is a sensitive measure of the
    // |bet1| - |bet2|. Alternatively (cbet1 >= -sbet1), abs(sbet2) + sbet1 is
    // a better measure.
    if p1.cbet < -p1.sbet {
        if p2.cbet == p1.cbet {
            p2 = Parametric::from_sin_cos(libm::copysign(p1.sbet, p2.sbet), p2.cbet, ellipsoid);
        }
    } else if libm::fabs(p2.sbet) == -p1.sbet {
        p2.cbet = p1.cbet;
    }
    let (sbet1, cbet1) = (p1.sbet, p1.cbet);
    let (sbet2, cbet2) = (p2.sbet, p2.cbet);

    let mut a12 = f64::NAN;
    let mut sig12;
    let mut s12x = f64::NAN;
    let mut m12x = f64::NAN;
    let mut big_m12 = f64::NAN;
    let mut big_m21 = f64::NAN;
    let mut salp1 = 0.0;
    let mut calp1 = 0.0;
    let mut salp2 = 0.0;
    let mut calp2 = 0.0;
    // somg12 > 1 marks that it must be calculated from omg12
    let mut omg12 = 0.0;
    let mut somg12 = 2.0;
    let mut comg12 = 0.0;
    let mut iterations = 0;

    let mut meridian = lat1 == -90.0 || slam12 == 0.0;
    if meridian {
        // Endpoints are on a single full meridian, so the geodesic might
        // lie on a meridian.
        trace!("inverse: meridional geodesic, lon12: {lon12}");

        // Head to the target longitude
        calp1 = clam12;
        salp1 = slam12;
        // At the target we're heading north
        calp2 = 1.0;
        salp2 = 0.0;

        // tan(bet) = tan(sig) * cos(alp)
        let (ssig1, csig1) = (sbet1, calp1 * cbet1);
        let (ssig2, csig2) = (sbet2, calp2 * cbet2);

        // sig12 = sig2 - sig1
        sig12 = libm::atan2(
            libm::fmax(0.0, csig1 * ssig2 - ssig1 * csig2),
            csig1 * csig2 + ssig1 * ssig2,
        );
        let lengths = calculate_lengths(
            ellipsoid,
            ellipsoid.n(),
            sig12,
            (ssig1, csig1),
            (ssig2, csig2),
            &p1,
            &p2,
            outmask | mask::DISTANCE | mask::REDUCED_LENGTH,
        );
        s12x = lengths.s12b;
        m12x = lengths.m12b;
        big_m12 = lengths.big_m12;
        big_m21 = lengths.big_m21;

        // Add the check for sig12 since zero length geodesics might yield
        // m12 < 0. Test case was
        //
        //    echo 20.001 0 20.001 0 | GeodSolve -i
        //
        // In fact, we will have sig12 > pi/2 for meridional geodesic
        // which is not a shortest path.
        if sig12 < 1.0 || m12x >= 0.0 {
            // Need at least 2, to handle 90 0 90 180
            if sig12 < 3.0 * math::TINY
                // Prevent negative s12 or m12 for short lines
                || (sig12 < TOL0 && (s12x < 0.0 || m12x < 0.0))
            {
                sig12 = 0.0;
                m12x = 0.0;
                s12x = 0.0;
            }
            m12x *= b;
            s12x *= b;
            a12 = sig12 / math::DEGREE;
        } else {
            // m12 < 0, i.e., prolate and too close to anti-podal
            meridian = false;
        }
    } else {
        sig12 = f64::NAN;
    }

    if !meridian && sbet1 == 0.0 && (f <= 0.0 || lon12s >= f * 180.0) {
        // Geodesic runs along the Equator
        trace!("inverse: equatorial geodesic, lon12: {lon12}");
        calp1 = 0.0;
        calp2 = 0.0;
        salp1 = 1.0;
        salp2 = 1.0;
        s12x = ellipsoid.a().0 * lam12;
        sig12 = lam12 / one_minus_f;
        omg12 = sig12;
        m12x = b * libm::sin(sig12);
        if outmask & mask::GEODESIC_SCALE != 0 {
            big_m12 = libm::cos(sig12);
            big_m21 = big_m12;
        }
        a12 = lon12 / one_minus_f;
    } else if !meridian {
        // Now point1 and point2 belong within a hemisphere bounded by a
        // meridian and geodesic is neither meridional or equatorial.

        // Figure a starting point for Newton's method
        let start = estimate_start(ellipsoid, &p1, &p2, lam12, slam12, clam12);
        sig12 = start.sig12;
        salp1 = start.salp1;
        calp1 = start.calp1;

        if sig12 >= 0.0 {
            // Short lines (estimate_start sets salp2, calp2, dnm)
            trace!("inverse: short geodesic, sig12: {sig12}");
            salp2 = start.salp2;
            calp2 = start.calp2;
            s12x = sig12 * b * start.dnm;
            m12x = start.dnm * start.dnm * b * libm::sin(sig12 / start.dnm);
            if outmask & mask::GEODESIC_SCALE != 0 {
                big_m12 = libm::cos(sig12 / start.dnm);
                big_m21 = big_m12;
            }
            a12 = sig12 / math::DEGREE;
            omg12 = lam12 / (one_minus_f * start.dnm);
        } else {
            // Newton's method. This is a straightforward solution of f(alp1) =
            // lambda12(alp1) - lam12 = 0 with one wrinkle. f(alp) has exactly
            // one root in the interval (0, pi) and its derivative is positive
            // at the root. Thus f(alp) is positive for alp > alp1 and
            // negative for alp < alp1. During the course of the iteration,
            // a range (alp1a, alp1b) is maintained which brackets the root
            // and with each evaluation of f(alp) the range is shrunk, if
            // possible. Newton's method is restarted whenever the
            // derivative of f is negative (because the new value of alp1 is
            // then further from the solution) or if the new estimate of
            // alp1 lies outside (0,pi); in this case, the new starting
            // guess is taken to be (alp1a + alp1b) / 2.
            let mut salp1a = math::TINY;
            let mut calp1a = 1.0;
            let mut salp1b = math::TINY;
            let mut calp1b = -1.0;
            let mut tripn = false;
            let mut tripb = false;
            let mut bisecting = false;
            let mut lambda = calculate_lambda12(
                ellipsoid, &p1, &p2, salp1, calp1, slam12, clam12, true,
            );
            loop {
                let v = lambda.v;
                // Reversed test to allow escape with NaNs
                if tripb || !(libm::fabs(v) >= if tripn { 8.0 } else { 1.0 } * TOL0) {
                    break;
                }
                if iterations >= MAX_ITERS {
                    warn!("inverse: not converged after {iterations} iterations, residual: {v}");
                    break;
                }
                // Update bracketing values
                if v > 0.0 && (iterations > MAX_NEWTON_ITERS || calp1 / salp1 > calp1b / salp1b)
                {
                    salp1b = salp1;
                    calp1b = calp1;
                } else if v < 0.0
                    && (iterations > MAX_NEWTON_ITERS || calp1 / salp1 < calp1a / salp1a)
                {
                    salp1a = salp1;
                    calp1a = calp1;
                }

                let mut newton = false;
                if iterations < MAX_NEWTON_ITERS && lambda.dv > 0.0 {
                    let dalp1 = -v / lambda.dv;
                    if libm::fabs(dalp1) < PI {
                        let (sdalp1, cdalp1) = (libm::sin(dalp1), libm::cos(dalp1));
                        let nsalp1 = salp1 * cdalp1 + calp1 * sdalp1;
                        if nsalp1 > 0.0 {
                            calp1 = calp1 * cdalp1 - salp1 * sdalp1;
                            salp1 = nsalp1;
                            (salp1, calp1) = math::norm(salp1, calp1);
                            // In some regimes we don't get quadratic
                            // convergence because slope -> 0. So use
                            // convergence conditions based on epsilon
                            // instead of sqrt(epsilon).
                            tripn = libm::fabs(v) <= 16.0 * TOL0;
                            newton = true;
                        }
                    }
                }

                if !newton {
                    // Either dv was not positive or updated value was outside
                    // legal range. Use the midpoint of the bracket as the next
                    // estimate. This mechanism is not needed for the WGS84
                    // ellipsoid, but it does catch problems with more
                    // eccentric ellipsoids. Its efficacy is such for the
                    // WGS84 test set with the starting guess set to alp1 =
                    // 90deg: the WGS84 test set: mean = 5.21, sd = 3.93, max = 24
                    // WGS84 and random input: mean = 4.74, sd = 0.99
                    if !bisecting {
                        debug!("inverse: bisection from iteration {iterations}, residual: {v}");
                        bisecting = true;
                    }
                    salp1 = (salp1a + salp1b) / 2.0;
                    calp1 = (calp1a + calp1b) / 2.0;
                    (salp1, calp1) = math::norm(salp1, calp1);
                    tripn = false;
                    tripb = libm::fabs(salp1a - salp1) + (calp1a - calp1) < TOLB
                        || libm::fabs(salp1 - salp1b) + (calp1 - calp1b) < TOLB;
                }

                iterations += 1;
                lambda = calculate_lambda12(
                    ellipsoid,
                    &p1,
                    &p2,
                    salp1,
                    calp1,
                    slam12,
                    clam12,
                    iterations < MAX_NEWTON_ITERS,
                );
            }

            salp2 = lambda.salp2;
            calp2 = lambda.calp2;
            sig12 = lambda.sig12;
            // Ensure that the reduced length and geodesic scale are computed
            // in a "canonical" way, with the I2 integral.
            let lengthmask = outmask
                | if outmask & (mask::REDUCED_LENGTH | mask::GEODESIC_SCALE) != 0 {
                    mask::DISTANCE
                } else {
                    mask::NONE
                };
            let lengths = calculate_lengths(
                ellipsoid,
                lambda.eps,
                sig12,
                (lambda.ssig1, lambda.csig1),
                (lambda.ssig2, lambda.csig2),
                &p1,
                &p2,
                lengthmask,
            );
            s12x = lengths.s12b * b;
            m12x = lengths.m12b * b;
            big_m12 = lengths.big_m12;
            big_m21 = lengths.big_m21;
            a12 = sig12 / math::DEGREE;

            if outmask & mask::AREA != 0 {
                // omg12 = lam12 - domg12
                let (sdomg12, cdomg12) = (libm::sin(lambda.domg12), libm::cos(lambda.domg12));
                somg12 = slam12 * cdomg12 - clam12 * sdomg12;
                comg12 = clam12 * cdomg12 + slam12 * sdomg12;
            }
        }
    }

    let s12 = if outmask & mask::DISTANCE != 0 {
        // Convert -0 to 0
        0.0 + s12x
    } else {
        f64::NAN
    };
    let m12 = if outmask & mask::REDUCED_LENGTH != 0 {
        0.0 + m12x
    } else {
        f64::NAN
    };

    let area = if outmask & mask::AREA != 0 {
        // From Lambda12: sin(alp1) * cos(bet1) = sin(alp0)
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1); // calp0 > 0
        let mut area = if calp0 != 0.0 && salp0 != 0.0 {
            // From Lambda12: tan(bet) = tan(sig) * cos(alp)
            let (ssig1, csig1) = math::norm(sbet1, calp1 * cbet1);
            let (ssig2, csig2) = math::norm(sbet2, calp2 * cbet2);
            let eps = calculate_epsilon(calp0 * calp0 * ellipsoid.ep_2());
            // Multiplier = a^2 * e^2 * cos(alpha0) * sin(alpha0).
            let a = ellipsoid.a().0;
            let a4 = a * a * calp0 * salp0 * ellipsoid.e_2();
            let c4 = ellipsoid.calculate_c4y(eps);
            let b41 = cos_series(&c4, ssig1, csig1);
            let b42 = cos_series(&c4, ssig2, csig2);
            a4 * (b42 - b41)
        } else {
            // Avoid problems with indeterminate sig1, sig2 on equator
            0.0
        };

        if !meridian && somg12 > 1.0 {
            somg12 = libm::sin(omg12);
            comg12 = libm::cos(omg12);
        }

        let alp12 = if !meridian
            // omg12 < 3/4 * pi
            && comg12 > -0.707_1 // Long difference not too big
            && sbet2 - sbet1 < 1.75
        {
            // Lat difference not too big
            // Use tan(Gamma/2) = tan(omg12/2)
            // * (tan(bet1/2)+tan(bet2/2))/(1+tan(bet1/2)*tan(bet2/2))
            // with tan(x/2) = sin(x)/(1+cos(x))
            let domg12 = 1.0 + comg12;
            let dbet1 = 1.0 + cbet1;
            let dbet2 = 1.0 + cbet2;
            2.0 * libm::atan2(
                somg12 * (sbet1 * dbet2 + sbet2 * dbet1),
                domg12 * (sbet1 * sbet2 + dbet1 * dbet2),
            )
        } else {
            // alp12 = alp2 - alp1, used in atan2 so no need to normalize
            let mut salp12 = salp2 * calp1 - calp2 * salp1;
            let mut calp12 = calp2 * calp1 + salp2 * salp1;
            // The right thing appears to happen if alp1 = +/-180 and alp2 = 0,
            // viz salp12 = -0 and alp12 = -180. However this depends on the
            // sign being attached to 0 correctly. The following ensures the
            // correct behavior.
            if salp12 == 0.0 && calp12 < 0.0 {
                salp12 = math::TINY * calp1;
                calp12 = -1.0;
            }
            libm::atan2(salp12, calp12)
        };
        area += ellipsoid.c2() * alp12;
        // Convert -0 to 0
        0.0 + area * (swapp * lonsign * latsign)
    } else {
        f64::NAN
    };

    // Convert calp, salp to azimuth accounting for lonsign, swapp, latsign.
    if swapp < 0.0 {
        core::mem::swap(&mut salp1, &mut salp2);
        core::mem::swap(&mut calp1, &mut calp2);
        if outmask & mask::GEODESIC_SCALE != 0 {
            core::mem::swap(&mut big_m12, &mut big_m21);
        }
    }

    InverseSolution {
        a12,
        s12,
        salp1: salp1 * swapp * lonsign,
        calp1: calp1 * swapp * latsign,
        salp2: salp2 * swapp * lonsign,
        calp2: calp2 * swapp * latsign,
        m12,
        big_m12: if outmask & mask::GEODESIC_SCALE != 0 {
            big_m12
        } else {
            f64::NAN
        },
        big_m21: if outmask & mask::GEODESIC_SCALE != 0 {
            big_m21
        } else {
            f64::NAN
        },
        area,
        iterations,
    }
}
