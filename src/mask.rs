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

//! Bit masks selecting the outputs of the direct and inverse solvers.
//!
//! Each output flag also sets the capability bits of the series that it
//! requires, so that a `GeodesicLine` only evaluates the coefficients that
//! its outputs need.

/// Capability: the `C1` series, for distances.
pub const CAP_C1: u32 = 1 << 0;
/// Capability: the `C1p` series, for converting distances to arc lengths.
pub const CAP_C1P: u32 = 1 << 1;
/// Capability: the `C2` series, for reduced lengths and geodesic scales.
pub const CAP_C2: u32 = 1 << 2;
/// Capability: the `C3` series, for longitudes.
pub const CAP_C3: u32 = 1 << 3;
/// Capability: the `C4` series, for areas.
pub const CAP_C4: u32 = 1 << 4;
/// All of the capabilities.
pub const CAP_ALL: u32 = 0x1F;

/// All of the output bits.
pub const OUT_ALL: u32 = 0x7F80;
/// The output bits, including `LONG_UNROLL`.
pub const OUT_MASK: u32 = 0xFF80;

/// No outputs.
pub const NONE: u32 = 0;
/// Calculate the latitude `lat2`.
pub const LATITUDE: u32 = 1 << 7;
/// Calculate the longitude `lon2`.
pub const LONGITUDE: u32 = (1 << 8) | CAP_C3;
/// Calculate the azimuths `azi1` and `azi2`.
pub const AZIMUTH: u32 = 1 << 9;
/// Calculate the distance `s12`.
pub const DISTANCE: u32 = (1 << 10) | CAP_C1;
/// Allow the distance `s12` to be used as input to the direct problem.
pub const DISTANCE_IN: u32 = (1 << 11) | CAP_C1 | CAP_C1P;
/// Calculate the reduced length `m12`.
pub const REDUCED_LENGTH: u32 = (1 << 12) | CAP_C1 | CAP_C2;
/// Calculate the geodesic scales `M12` and `M21`.
pub const GEODESIC_SCALE: u32 = (1 << 13) | CAP_C1 | CAP_C2;
/// Calculate the area `S12`.
pub const AREA: u32 = (1 << 14) | CAP_C4;
/// Don't reduce `lon2` to (-180°, 180°], so that `lon2 - lon1` counts the
/// number of times that the geodesic encircles the ellipsoid.
pub const LONG_UNROLL: u32 = 1 << 15;

/// The outputs of the standard direct and inverse problems.
pub const STANDARD: u32 = LATITUDE | LONGITUDE | AZIMUTH | DISTANCE;
/// All of the outputs, with `lon2` reduced to (-180°, 180°].
pub const ALL: u32 = OUT_ALL | CAP_ALL;

/// Whether all of the bits of `flag` are set in `mask`.
#[must_use]
pub const fn contains(mask: u32, flag: u32) -> bool {
    mask & flag == flag
}
