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

//! This module contains coefficients and functions for performing calculations
//! on the surface of an ellipsoid.
//!
//! The series are sixth order in the third flattening `n` and in `epsilon`,
//! which gives full double precision for |f| up to about 1/50.
//!
//! It uses the equations given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) and
//! the equation for A2 in
//! [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf).

#![allow(clippy::suboptimal_flops)]

/// The order of the series expansions.
pub const SERIES_ORDER: usize = 6;

/// The number of `C3x` coefficients: (order * (order - 1)) / 2.
pub const C3X_SIZE: usize = 15;

/// The number of `C4x` coefficients: (order * (order + 1)) / 2.
pub const C4X_SIZE: usize = 21;

/// The coefficients of the area series `C4`, as polynomials in `n`.
/// For each `C4[l]` and each power of `eps` from the highest down, the
/// polynomial coefficients from the highest power of `n` followed by the
/// divisor.
const COEFF_C4: [f64; 77] = [
    // C4[0]
    97., 15015., //
    1088., 156., 45045., //
    -224., -4784., 1573., 45045., //
    -10656., 14144., -4576., -858., 45045., //
    64., 624., -4576., 6864., -3003., 15015., //
    100., 208., 572., 3432., -12012., 30030., 45045., //
    // C4[1]
    1., 9009., //
    -2944., 468., 135135., //
    5792., 1040., -1287., 135135., //
    5952., -11648., 9152., -2574., 135135., //
    -64., -624., 4576., -6864., 3003., 135135., //
    // C4[2]
    8., 10725., //
    1856., -936., 225225., //
    -8448., 4992., -1144., 225225., //
    -1440., 4160., -4576., 1716., 225225., //
    // C4[3]
    -136., 63063., //
    1024., -208., 105105., //
    3584., -3328., 1144., 315315., //
    // C4[4]
    -128., 135135., //
    -2560., 832., 405405., //
    // C4[5]
    128., 99099.,
];

/// The scale factor `A1`, minus one.
/// CFF Karney, Eq. 17.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
/// use ellipsoid_geodesic::ellipsoid::coefficients::evaluate_a1;
///
/// // evaluate_a1 for WGS 84 latitude 45.0
/// let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
/// let a1 = evaluate_a1(eps45);
///
/// assert_eq!(0.0033839903702120875, a1);
/// ```
#[must_use]
pub fn evaluate_a1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * (eps2 * (eps2 + 4.0) + 64.0) / 256.0;
    (t + eps) / (1.0 - eps)
}

/// The scale factor `A2`, minus one.
///
/// CFF Karney [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf),
/// Eq. A1.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
/// use ellipsoid_geodesic::ellipsoid::coefficients::evaluate_a2;
///
/// // evaluate_a2 for WGS 84 latitude 45.0
/// let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
/// let a2 = evaluate_a2(eps45);
///
/// assert_eq!(-0.0033669191180908161, a2);
/// ```
#[must_use]
pub fn evaluate_a2(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * ((-11. * eps2 - 28.) * eps2 - 192.) / 256.;
    (t - eps) / (1. + eps)
}

/// The coefficients `A3`, in increasing powers of `eps`.
/// CFF Karney, Eq. 23.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_a3(n: f64) -> [f64; SERIES_ORDER] {
    [
        1.,
        (n - 1.) / 2.,
        (n * (3. * n - 1.) - 2.) / 8.,
        ((-n - 3.) * n - 1.) / 16.,
        (-2. * n - 3.) / 64.,
        -3. / 128.,
    ]
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`.
/// CFF Karney, Eq. 18.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1(eps: f64) -> [f64; SERIES_ORDER + 1] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * ((6. - eps2) * eps2 - 16.) / 32.,
        eps2 * ((64. - 9. * eps2) * eps2 - 128.) / 2048.,
        eps * eps2 * (9. * eps2 - 16.) / 768.,
        eps4 * (3. * eps2 - 5.) / 512.,
        eps * eps4 * (-7. / 1280.),
        eps6 * (-7. / 2048.),
    ]
}

/// The coefficients `C1p[l]` in the Fourier expansion of `B1p`, the
/// reversion of the `B1` series, used to convert distances to arc lengths.
/// CFF Karney, Eq. 21.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1p(eps: f64) -> [f64; SERIES_ORDER + 1] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * (eps2 * (205. * eps2 - 432.) + 768.) / 1536.,
        eps2 * (eps2 * (4005. * eps2 - 4736.) + 3840.) / 12288.,
        eps * eps2 * (116. - 225. * eps2) / 384.,
        eps4 * (2695. - 7173. * eps2) / 7680.,
        (eps * eps4) * 3467. / 7680.,
        eps6 * 38081. / 61440.,
    ]
}

/// The coefficients `C2[l]` in the Fourier expansion of `B2`.
/// CFF Karney, Eq. 42.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c2(eps: f64) -> [f64; SERIES_ORDER + 1] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * (eps2 * (eps2 + 2.) + 16.) / 32.,
        eps2 * (eps2 * (35. * eps2 + 64.) + 384.) / 2048.,
        eps * eps2 * (15. * eps2 + 80.) / 768.,
        eps4 * (7. * eps2 + 35.) / 512.,
        eps * eps4 * 63. / 1280.,
        eps6 * 77. / 2048.,
    ]
}

/// The coefficients `C3x[l]` in the Fourier expansion of `C3`.
/// CFF Karney, Eq. 25.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c3x(n: f64) -> [f64; C3X_SIZE] {
    [
        (1. - n) / 4.,
        (1. - n * n) / 8.,
        (n * ((-5. * n - 1.) * n + 3.) + 3.) / 64.,
        (n * ((2. - 2. * n) * n + 2.) + 5.) / 128.,
        (n * (3. * n + 11.) + 12.) / 512.,
        ((n - 3.) * n + 2.) / 32.,
        (n * (n * (2. * n - 3.) - 2.) + 3.) / 64.,
        (n * ((-6. * n - 9.) * n + 2.) + 6.) / 256.,
        ((1. - 2. * n) * n + 5.) / 256.,
        (n * ((5. - n) * n - 9.) + 5.) / 192.,
        (n * (n * (10. * n - 6.) - 10.) + 9.) / 384.,
        ((-77. * n - 8.) * n + 42.) / 3072.,
        (n * ((20. - 7. * n) * n - 28.) + 14.) / 1024.,
        ((-7. * n - 40.) * n + 28.) / 2048.,
        (n * (75. * n - 90.) + 42.) / 5120.,
    ]
}

/// The coefficients `C4x` of the area series `C4`, CFF Karney, Eq. 64.
/// Each `C4[l]` is a polynomial in `eps`, whose coefficients are
/// polynomials in `n`; they are stored for each `l` from the highest power of
/// `eps` down.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c4x(n: f64) -> [f64; C4X_SIZE] {
    let mut c4x = [0.0; C4X_SIZE];
    let mut k = 0;
    let mut o = 0;
    for l in 0..SERIES_ORDER {
        for j in (l..SERIES_ORDER).rev() {
            // the order of the polynomial in n
            let m = SERIES_ORDER - j - 1;
            c4x[k] = polyval(&COEFF_C4[o..=o + m], n) / COEFF_C4[o + m + 1];
            k += 1;
            o += m + 2;
        }
    }
    c4x
}

/// Evaluate the polynomial in x with the coefficients from the highest
/// power of x down.
fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |result, c| result * x + c)
}

/// Evaluate a first degree polynomial in x using
/// [Estrin's scheme](https://en.wikipedia.org/wiki/Estrin%27s_scheme).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
fn evaluate_2_coeffs(coeffs: &[f64], x: f64) -> f64 {
    libm::fma(x, coeffs[1], coeffs[0])
}

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, from the lowest power of x up.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    let mut result: f64 = 0.;

    match coeffs.len() {
        // Use Estrin's scheme for 2 coefficients, since same result as Horner's method
        2 => result = evaluate_2_coeffs(coeffs, x),
        _ => {
            if let Some((last, elements)) = coeffs.split_last() {
                result = *last;
                for element in elements.iter().rev() {
                    result = libm::fma(result, x, *element);
                }
            }
        }
    }

    result
}

/// The coefficients `C3[l]` in the Fourier expansion of `C3`.
/// CFF Karney, Eq. 26.
/// * `coeffs` - the polynomial coefficients from `evaluate_coeffs_C3x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c3y(coeffs: &[f64], eps: f64) -> [f64; SERIES_ORDER] {
    let c1 = eps * evaluate_polynomial(&coeffs[0..5], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[5..9], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[9..12], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[12..14], eps);
    let eps_5: f64 = eps * eps_4;
    let c5 = eps_5 * evaluate_polynomial(&coeffs[14..15], eps);
    [0.0, c1, c2, c3, c4, c5]
}

/// The coefficients `C4[l]` in the Fourier expansion of `I4`.
/// CFF Karney, Eq. 64.
/// * `coeffs` - the polynomial coefficients from `evaluate_coeffs_c4x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c4y(coeffs: &[f64], eps: f64) -> [f64; SERIES_ORDER] {
    let mut c4 = [0.0; SERIES_ORDER];
    let mut mult = 1.0;
    let mut o = 0;
    for (l, c) in c4.iter_mut().enumerate() {
        // the order of the polynomial in eps
        let m = SERIES_ORDER - l - 1;
        *c = mult * polyval(&coeffs[o..=o + m], eps);
        o += m + 1;
        mult *= eps;
    }
    c4
}

/// Evaluate the following:
///   `y = sum(c[i] * sin(2*i * x), i, 1, n)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
/// * `coeffs` - the series coefficients, `coeffs[0]` is not used.
/// * `sinx`, `cosx` - the sine and cosine of the angle x.
#[must_use]
pub fn sin_series(coeffs: &[f64], sinx: f64, cosx: f64) -> f64 {
    // 2 * cos(2 * x), the Clenshaw ak(theta) parameter, beta(k) = -1
    let ar = 2.0 * (cosx - sinx) * (cosx + sinx);
    let (k0, _) = coeffs
        .iter()
        .skip(1)
        .rev()
        .fold((0.0, 0.0), |(k0, k1), c| (ar * k0 - k1 + c, k0));
    // sin(2 * x) * k0
    2.0 * sinx * cosx * k0
}

/// Evaluate the following:
///   `y = sum(c[i] * cos((2*i + 1) * x), i, 0, n - 1)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
/// * `coeffs` - the series coefficients.
/// * `sinx`, `cosx` - the sine and cosine of the angle x.
#[must_use]
pub fn cos_series(coeffs: &[f64], sinx: f64, cosx: f64) -> f64 {
    let ar = 2.0 * (cosx - sinx) * (cosx + sinx);
    let (k0, k1) = coeffs
        .iter()
        .rev()
        .fold((0.0, 0.0), |(k0, k1), c| (ar * k0 - k1 + c, k0));
    cosx * (k0 - k1)
}
