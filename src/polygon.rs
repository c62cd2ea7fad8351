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

//! The polygon module contains `Polygon`, which accumulates the perimeter
//! and area of a polygon or polyline whose edges are geodesics.
//!
//! Vertices are added with `add_point` and edges with `add_edge`.
//! The perimeter and area may be calculated with `compute` at any time,
//! without changing the `Polygon`.
//!
//! The sums are held in `Accumulator`s, so the result does not lose
//! precision as the number of edges increases. The number of times that the
//! polygon crosses the prime meridian is also counted, to resolve which of
//! the regions bounded by the polygon it encloses.

#![allow(clippy::float_cmp)]

use crate::accumulator::Accumulator;
use crate::geodesic::solve_inverse;
use crate::{mask, math, Degrees, Ellipsoid, LatLong, Metres};

/// Whether a `Polygon` is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonMode {
    /// A closed polygon with a perimeter and an area.
    Polygon,
    /// An open polyline, only its length is measured.
    Polyline,
}

/// The result of `Polygon::compute`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonArea {
    /// The number of vertices.
    pub count: usize,
    /// The perimeter of a polygon or the length of a polyline.
    pub perimeter: Metres,
    /// The area of a polygon in square metres, None for a polyline.
    pub area: Option<f64>,
}

/// The number of times that a geodesic between two longitudes crosses the
/// prime meridian, eastwards positive.
/// * `lon1`, `lon2` - the longitudes at the ends of the geodesic.
///
/// returns 1, -1 or 0.
#[must_use]
pub fn transit(lon1: f64, lon2: f64) -> i32 {
    // Compute lon12 the same way as the inverse solver
    let (lon12, _) = math::ang_diff(lon1, lon2);
    let lon1 = math::ang_normalize(lon1);
    let lon2 = math::ang_normalize(lon2);
    if lon12 > 0.0 && ((lon1 < 0.0 && lon2 >= 0.0) || (lon1 > 0.0 && lon2 == 0.0)) {
        1
    } else if lon12 < 0.0 && lon1 >= 0.0 && lon2 < 0.0 {
        -1
    } else {
        0
    }
}

/// The parity of the number of times that a geodesic crosses the prime
/// meridian, where the longitudes have not been reduced, e.g. from
/// `mask::LONG_UNROLL`.
/// * `lon1`, `lon2` - the longitudes at the ends of the geodesic.
///
/// returns 1, -1 or 0, only whether it is odd is significant.
#[must_use]
pub fn transit_direct(lon1: f64, lon2: f64) -> i32 {
    // The parity of ceil(lon2 / 360) - ceil(lon1 / 360)
    let lon1 = libm::remainder(lon1, 720.0);
    let lon2 = libm::remainder(lon2, 720.0);
    i32::from(lon2 <= 0.0 && lon2 > -360.0) - i32::from(lon1 <= 0.0 && lon1 > -360.0)
}

/// Reduce an area sum to the range selected by `reverse` and `sign`.
/// * `area` - the clockwise sum of the edge areas.
/// * `total` - the total area of the ellipsoid.
/// * `crossings` - the number of prime meridian crossings.
/// * `reverse` - whether clockwise traversal counts as a positive area.
/// * `sign` - whether to return a signed result in (-total/2, total/2],
///   otherwise the area is in [0, total).
fn reduce_area(mut area: Accumulator, total: f64, crossings: i32, reverse: bool, sign: bool) -> f64 {
    area.remainder(total);
    // An odd number of crossings: the polygon encircles a pole.
    if crossings & 1 != 0 {
        area.add(if area.value() < 0.0 { 1.0 } else { -1.0 } * total / 2.0);
    }
    // The area is clockwise positive, convert to counter-clockwise.
    if !reverse {
        area.negate();
    }
    if sign {
        if area.value() > total / 2.0 {
            area.add(-total);
        } else if area.value() <= -total / 2.0 {
            area.add(total);
        }
    } else if area.value() >= total {
        area.add(-total);
    } else if area.value() < 0.0 {
        area.add(total);
    }
    0.0 + area.value()
}

/// A polygon or polyline on the surface of an ellipsoid.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<'a> {
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
    mode: PolygonMode,
    /// The number of vertices.
    count: usize,
    /// The first vertex.
    lat0: f64,
    lon0: f64,
    /// The last vertex.
    lat1: f64,
    lon1: f64,
    perimeter: Accumulator,
    area: Accumulator,
    crossings: i32,
}

impl<'a> Polygon<'a> {
    /// Construct an empty `Polygon`.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    /// * `is_polyline` - whether to measure an open polyline instead of a
    ///   closed polygon.
    #[must_use]
    pub const fn new(ellipsoid: &'a Ellipsoid, is_polyline: bool) -> Self {
        Self {
            ellipsoid,
            mode: if is_polyline {
                PolygonMode::Polyline
            } else {
                PolygonMode::Polygon
            },
            count: 0,
            lat0: f64::NAN,
            lon0: f64::NAN,
            lat1: f64::NAN,
            lon1: f64::NAN,
            perimeter: Accumulator::new(0.0),
            area: Accumulator::new(0.0),
            crossings: 0,
        }
    }

    /// Accessor for the `PolygonMode`.
    #[must_use]
    pub const fn mode(&self) -> PolygonMode {
        self.mode
    }

    /// The number of vertices that have been added.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// Remove all of the vertices. The mode and `Ellipsoid` are retained.
    pub fn clear(&mut self) {
        *self = Self::new(self.ellipsoid, self.mode == PolygonMode::Polyline);
    }

    /// The distance and area of the geodesic between a pair of positions.
    fn edge(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64) {
        let outmask = match self.mode {
            PolygonMode::Polygon => mask::DISTANCE | mask::AREA,
            PolygonMode::Polyline => mask::DISTANCE,
        };
        let solution = solve_inverse(self.ellipsoid, lat1, lon1, lat2, lon2, outmask);
        (solution.s12, solution.area)
    }

    /// The end position and area of the geodesic from the last vertex.
    fn direct_edge(&self, azi: f64, s: f64) -> (f64, f64, f64) {
        let outmask = match self.mode {
            PolygonMode::Polygon => mask::LATITUDE | mask::LONGITUDE | mask::AREA,
            PolygonMode::Polyline => mask::LATITUDE | mask::LONGITUDE,
        } | mask::LONG_UNROLL;
        let data = self.ellipsoid.gen_direct(
            Degrees(self.lat1),
            Degrees(self.lon1),
            Degrees(azi),
            false,
            s,
            outmask,
        );
        (
            data.lat2.map_or(f64::NAN, |lat| lat.0),
            data.lon2.map_or(f64::NAN, |lon| lon.0),
            data.area.unwrap_or(f64::NAN),
        )
    }

    /// Add a vertex to the polygon or polyline.
    /// * `lat` - the latitude of the vertex, in the range [-90°, 90°].
    /// * `lon` - the longitude of the vertex.
    pub fn add_point(&mut self, lat: Degrees, lon: Degrees) {
        let lon = math::ang_normalize(lon.0);
        if self.count == 0 {
            self.lat0 = lat.0;
            self.lon0 = lon;
        } else {
            let (s12, area) = self.edge(self.lat1, self.lon1, lat.0, lon);
            self.perimeter.add(s12);
            if self.mode == PolygonMode::Polygon {
                self.area.add(area);
                self.crossings += transit(self.lon1, lon);
            }
        }
        self.lat1 = lat.0;
        self.lon1 = lon;
        self.count += 1;
    }

    /// Add a vertex to the polygon or polyline.
    /// * `position` - the vertex.
    pub fn add_position(&mut self, position: &LatLong) {
        self.add_point(position.lat(), position.lon());
    }

    /// Add an edge to the polygon or polyline, from the last vertex.
    /// Ignored if no vertex has been added.
    /// * `azi` - the azimuth of the edge at the last vertex.
    /// * `s` - the length of the edge, may be negative.
    pub fn add_edge(&mut self, azi: Degrees, s: Metres) {
        if self.count == 0 {
            return;
        }

        let (lat, lon, area) = self.direct_edge(azi.0, s.0);
        self.perimeter.add(s.0);
        if self.mode == PolygonMode::Polygon {
            self.area.add(area);
            self.crossings += transit_direct(self.lon1, lon);
        }
        self.lat1 = lat;
        self.lon1 = lon;
        self.count += 1;
    }

    /// Calculate the perimeter and area of the polygon, closing it with a
    /// geodesic from the last vertex to the first. A polyline is not closed.
    /// * `reverse` - whether clockwise traversal counts as a positive area,
    ///   otherwise counter-clockwise traversal does.
    /// * `sign` - whether to return a signed area in the range (-A/2, A/2],
    ///   otherwise the area is in the range [0, A), where A is the area of
    ///   the ellipsoid.
    #[must_use]
    pub fn compute(&self, reverse: bool, sign: bool) -> PolygonArea {
        self.close(
            self.count,
            self.perimeter,
            self.area,
            self.crossings,
            (self.lat1, self.lon1),
            reverse,
            sign,
        )
    }

    /// The result of `compute` if a vertex were added, without changing
    /// the polygon.
    /// * `lat`, `lon` - the vertex.
    /// * `reverse`, `sign` - see `compute`.
    #[must_use]
    pub fn test_point(&self, lat: Degrees, lon: Degrees, reverse: bool, sign: bool) -> PolygonArea {
        let lon = math::ang_normalize(lon.0);
        if self.count == 0 {
            return self.close(1, self.perimeter, self.area, 0, (lat.0, lon), reverse, sign);
        }

        let mut perimeter = self.perimeter;
        let mut area = self.area;
        let mut crossings = self.crossings;
        let (s12, s12_area) = self.edge(self.lat1, self.lon1, lat.0, lon);
        perimeter.add(s12);
        if self.mode == PolygonMode::Polygon {
            area.add(s12_area);
            crossings += transit(self.lon1, lon);
        }
        self.close(
            self.count + 1,
            perimeter,
            area,
            crossings,
            (lat.0, lon),
            reverse,
            sign,
        )
    }

    /// The result of `compute` if an edge were added, without changing the
    /// polygon.
    /// * `azi`, `s` - the edge, see `add_edge`.
    /// * `reverse`, `sign` - see `compute`.
    ///
    /// returns a zero count and NaN perimeter and area if no vertex has been
    /// added.
    #[must_use]
    pub fn test_edge(&self, azi: Degrees, s: Metres, reverse: bool, sign: bool) -> PolygonArea {
        if self.count == 0 {
            return PolygonArea {
                count: 0,
                perimeter: Metres(f64::NAN),
                area: (self.mode == PolygonMode::Polygon).then_some(f64::NAN),
            };
        }

        let mut perimeter = self.perimeter;
        let mut area = self.area;
        let mut crossings = self.crossings;
        let (lat, lon, s12_area) = self.direct_edge(azi.0, s.0);
        perimeter.add(s.0);
        if self.mode == PolygonMode::Polygon {
            area.add(s12_area);
            crossings += transit_direct(self.lon1, lon);
        }
        self.close(
            self.count + 1,
            perimeter,
            area,
            crossings,
            (lat, lon),
            reverse,
            sign,
        )
    }

    /// Close the polygon from its last vertex and reduce its area.
    #[allow(clippy::too_many_arguments)]
    fn close(
        &self,
        count: usize,
        perimeter: Accumulator,
        mut area: Accumulator,
        crossings: i32,
        last: (f64, f64),
        reverse: bool,
        sign: bool,
    ) -> PolygonArea {
        if count < 2 {
            return PolygonArea {
                count,
                perimeter: Metres(0.0),
                area: (self.mode == PolygonMode::Polygon).then_some(0.0),
            };
        }

        match self.mode {
            PolygonMode::Polyline => PolygonArea {
                count,
                perimeter: Metres(perimeter.value()),
                area: None,
            },
            PolygonMode::Polygon => {
                let (lat, lon) = last;
                let (s12, s12_area) = self.edge(lat, lon, self.lat0, self.lon0);
                area.add(s12_area);
                let crossings = crossings + transit(lon, self.lon0);
                PolygonArea {
                    count,
                    perimeter: Metres(perimeter.sum(s12)),
                    area: Some(reduce_area(
                        area,
                        self.ellipsoid.area(),
                        crossings,
                        reverse,
                        sign,
                    )),
                }
            }
        }
    }
}
