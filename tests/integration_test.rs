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

// extern crate we're testing, same as any other code would do.
extern crate ellipsoid_geodesic;

use angle_sc::is_within_tolerance;
use csv::ReaderBuilder;
use ellipsoid_geodesic::{math, Degrees, Ellipsoid, GeodesicData, Metres, WGS84_ELLIPSOID};
use std::env;
use std::path::Path;

/// A line of a `GeodTest.dat` file.
#[derive(Debug)]
struct GeodTestLine {
    lat1: f64,
    lon1: f64,
    azi1: f64,
    lat2: f64,
    lon2: f64,
    azi2: f64,
    s12: f64,
    a12: f64,
    m12: f64,
    area: f64,
}

impl GeodTestLine {
    fn from_record(record: &csv::StringRecord) -> Self {
        let value = |i: usize| record[i].parse::<f64>().expect("Invalid GeodTest value");
        Self {
            lat1: value(0),
            lon1: value(1),
            azi1: value(2),
            lat2: value(3),
            lon2: value(4),
            azi2: value(5),
            s12: value(6),
            a12: value(7),
            m12: value(8),
            area: value(9),
        }
    }
}

fn read_geodtest_file(file_path: &Path) -> Vec<GeodTestLine> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(file_path)
        .expect("Could not read GeodTest file");
    csv_reader
        .records()
        .map(|result| GeodTestLine::from_record(&result.expect("Invalid GeodTest record")))
        .collect()
}

/// The difference between two angles in degrees.
fn angle_error(a: f64, b: f64) -> f64 {
    libm::fabs(math::ang_diff(a, b).0)
}

/// Check a GeodTest line with both the direct and inverse solvers.
fn check_geodtest_line(ellipsoid: &Ellipsoid, line: &GeodTestLine, line_number: usize) {
    let direct = ellipsoid.gen_direct(
        Degrees(line.lat1),
        Degrees(line.lon1),
        Degrees(line.azi1),
        false,
        line.s12,
        ellipsoid_geodesic::mask::ALL,
    );
    let lat2 = direct.lat2.map_or(f64::NAN, |lat| lat.0);
    let lon2 = direct.lon2.map_or(f64::NAN, |lon| lon.0);
    let azi2 = direct.azi2.map_or(f64::NAN, |azi| azi.0);
    assert!(
        libm::fabs(line.lat2 - lat2) < 1e-11,
        "direct latitude, line: {line_number} expected: {} result: {lat2}",
        line.lat2
    );
    assert!(
        angle_error(line.lon2, lon2) < 1e-11,
        "direct longitude, line: {line_number} expected: {} result: {lon2}",
        line.lon2
    );
    assert!(
        angle_error(line.azi2, azi2) < 1e-11,
        "direct azimuth, line: {line_number} expected: {} result: {azi2}",
        line.azi2
    );
    assert!(is_within_tolerance(line.a12, direct.a12.0, 1e-11));

    let inverse: GeodesicData = ellipsoid.gen_inverse(
        Degrees(line.lat1),
        Degrees(line.lon1),
        Degrees(line.lat2),
        Degrees(line.lon2),
        ellipsoid_geodesic::mask::ALL,
    );
    let s12 = inverse.s12.map_or(f64::NAN, |s| s.0);
    assert!(
        libm::fabs(line.s12 - s12) < 1e-6,
        "inverse length, line: {line_number} expected: {} result: {s12}",
        line.s12
    );
    let azi1 = inverse.azi1.map_or(f64::NAN, |azi| azi.0);
    assert!(
        angle_error(line.azi1, azi1) < 1e-8,
        "inverse azimuth, line: {line_number} expected: {} result: {azi1}",
        line.azi1
    );
    let m12 = inverse.m12.map_or(f64::NAN, |m| m.0);
    assert!(
        libm::fabs(line.m12 - m12) < 1e-5,
        "reduced length, line: {line_number} expected: {} result: {m12}",
        line.m12
    );
    let area = inverse.area.unwrap_or(f64::NAN);
    assert!(
        libm::fabs(line.area - area) < 1.0,
        "area, line: {line_number} expected: {} result: {area}",
        line.area
    );
}

#[test]
fn test_geodtest_sample() {
    let file_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/GeodTest-sample.dat");
    let lines = read_geodtest_file(&file_path);
    assert_eq!(39, lines.len());

    // the sample covers the short, meridional, equatorial and nearly
    // antipodal geodesics as well as random ones
    assert_eq!(8, lines.iter().filter(|l| l.s12 < 2000.0).count());
    assert_eq!(4, lines.iter().filter(|l| l.azi1 % 180.0 == 0.0).count());
    assert_eq!(2, lines.iter().filter(|l| l.lat1 == 0.0 && l.azi1 == 90.0).count());
    assert_eq!(12, lines.iter().filter(|l| 178.0 < l.a12).count());

    for (i, line) in lines.iter().enumerate() {
        check_geodtest_line(&WGS84_ELLIPSOID, line, i + 1);
    }
}

#[test]
#[ignore]
fn test_geodtest_file() {
    // Read GEODTEST_DIR/GeodTest.dat file and run tests
    let filename = "GeodTest.dat";
    let dir_key = "GEODTEST_DIR";

    let p = env::var(dir_key).expect("Environment variable not found: GEODTEST_DIR");
    let file_path = Path::new(&p).join(filename);
    let lines = read_geodtest_file(&file_path);

    for (i, line) in lines.iter().enumerate() {
        check_geodtest_line(&WGS84_ELLIPSOID, line, i + 1);
    }
}

#[test]
fn test_istanbul_washington() {
    let istanbul = (Degrees(42.0), Degrees(29.0));
    let washington = (Degrees(39.0), Degrees(-77.0));

    let (s12, azi1, azi2) =
        WGS84_ELLIPSOID.inverse(istanbul.0, istanbul.1, washington.0, washington.1);
    assert!(is_within_tolerance(-50.69375304113997, azi1.0, 1e-8));
    assert!(is_within_tolerance(8_339_863.136, s12.0, 1e-2));

    // The reverse geodesic has the reciprocal azimuths
    let (s21, azi2_1, azi1_2) =
        WGS84_ELLIPSOID.inverse(washington.0, washington.1, istanbul.0, istanbul.1);
    assert!(is_within_tolerance(s12.0, s21.0, 1e-8));
    assert!(angle_error(azi2.0 + 180.0, azi2_1.0) < 1e-12);
    assert!(angle_error(azi1.0 + 180.0, azi1_2.0) < 1e-12);
}

#[test]
fn test_reciprocity() {
    let ellipsoid = &WGS84_ELLIPSOID;
    for lat1 in [-60.0, -10.0, 0.0, 25.0, 80.0] {
        for lon2 in [0.5, 45.0, 120.0, 179.0] {
            let lat2 = 30.0 - lat1 / 2.0;
            let (s12, azi1, azi2) =
                ellipsoid.inverse(Degrees(lat1), Degrees(0.0), Degrees(lat2), Degrees(lon2));
            let (s21, azi3, azi4) =
                ellipsoid.inverse(Degrees(lat2), Degrees(lon2), Degrees(lat1), Degrees(0.0));
            assert!(is_within_tolerance(s12.0, s21.0, 1e-8));
            assert!(angle_error(azi2.0 + 180.0, azi3.0) < 1e-10);
            assert!(angle_error(azi1.0 + 180.0, azi4.0) < 1e-10);
        }
    }
}

#[test]
fn test_round_trip() {
    let ellipsoid = &WGS84_ELLIPSOID;
    for lat1 in [-89.5, -45.0, -0.5, 0.0, 30.0, 75.0] {
        for azi1 in [-135.0, -45.0, 0.0, 10.0, 90.0, 170.0] {
            for s12 in [1.0, 1e3, 1e6, 1e7] {
                let (lat2, lon2, azi2) =
                    ellipsoid.direct(Degrees(lat1), Degrees(0.0), Degrees(azi1), Metres(s12));
                let (s, a1, a2) = ellipsoid.inverse(Degrees(lat1), Degrees(0.0), lat2, lon2);
                assert!(
                    is_within_tolerance(s12, s.0, 1e-7),
                    "lat1: {lat1} azi1: {azi1} s12: {s12} result: {s:?}"
                );
                assert!(angle_error(azi1, a1.0) < 1e-7);
                assert!(angle_error(azi2.0, a2.0) < 1e-7);
            }
        }
    }
}

#[test]
fn test_negative_distance() {
    // A negative distance travels along the reciprocal azimuth
    let ellipsoid = &WGS84_ELLIPSOID;
    let (lat2, lon2, azi2) =
        ellipsoid.direct(Degrees(10.0), Degrees(20.0), Degrees(30.0), Metres(-1e6));
    let (lat3, lon3, azi3) =
        ellipsoid.direct(Degrees(10.0), Degrees(20.0), Degrees(-150.0), Metres(1e6));
    assert!(is_within_tolerance(lat3.0, lat2.0, 1e-12));
    assert!(is_within_tolerance(lon3.0, lon2.0, 1e-12));
    assert!(angle_error(azi3.0 + 180.0, azi2.0) < 1e-12);
}

#[test]
fn test_zero_distance() {
    let ellipsoid = &WGS84_ELLIPSOID;
    let (lat2, lon2, azi2) =
        ellipsoid.direct(Degrees(-33.0), Degrees(151.0), Degrees(42.0), Metres(0.0));
    assert!(is_within_tolerance(-33.0, lat2.0, 1e-13));
    assert!(is_within_tolerance(151.0, lon2.0, 1e-13));
    assert!(is_within_tolerance(42.0, azi2.0, 1e-13));

    let (s12, _, _) =
        ellipsoid.inverse(Degrees(-33.0), Degrees(151.0), Degrees(-33.0), Degrees(151.0));
    assert_eq!(0.0, s12.0);
}

#[test]
fn test_poles() {
    let ellipsoid = &WGS84_ELLIPSOID;

    // Pole to pole along a meridian
    let (s12, azi1, azi2) =
        ellipsoid.inverse(Degrees(90.0), Degrees(0.0), Degrees(-90.0), Degrees(0.0));
    assert!(is_within_tolerance(20_003_931.458_6, s12.0, 1e-3));
    assert_eq!(180.0, libm::fabs(azi1.0));
    assert_eq!(180.0, libm::fabs(azi2.0));

    // From the Equator to a metre short of the North pole along meridian lon1
    let quarter_meridian = s12.0 / 2.0;
    let (lat2, lon2, azi2) = ellipsoid.direct(
        Degrees(0.0),
        Degrees(45.0),
        Degrees(0.0),
        Metres(quarter_meridian - 1.0),
    );
    assert!(is_within_tolerance(90.0, lat2.0, 1e-4));
    assert!(lat2.0 < 90.0);
    assert_eq!(45.0, lon2.0);
    assert_eq!(0.0, azi2.0);

    // the longitude of a pole does not change the distance
    let (s1, _, _) = ellipsoid.inverse(Degrees(90.0), Degrees(0.0), Degrees(10.0), Degrees(30.0));
    let (s2, _, _) =
        ellipsoid.inverse(Degrees(90.0), Degrees(-100.0), Degrees(10.0), Degrees(30.0));
    assert!(is_within_tolerance(s1.0, s2.0, 1e-8));
}

#[test]
fn test_nearly_antipodal() {
    // Nearly antipodal points are solved by the astroid start and bisection
    let ellipsoid = &WGS84_ELLIPSOID;
    for (lat1, lat2, lon2, expected) in [
        (
            89.262080389218,
            -89.262080389218,
            179.992207982775375662,
            20003925.854,
        ),
        (
            89.333123580033,
            -89.333123580032997687,
            179.99295812360148422,
            20003926.881,
        ),
        (
            52.784459512564,
            -52.784459512563990912,
            179.634407464943777557,
            19991596.095,
        ),
        (
            48.522876735459,
            -48.52287673545898293,
            179.599720456223079643,
            19989144.774,
        ),
    ] {
        let (s12, _, _) =
            ellipsoid.inverse(Degrees(lat1), Degrees(0.0), Degrees(lat2), Degrees(lon2));
        assert!(is_within_tolerance(expected, s12.0, 0.5e-3));
    }

    let (s12, azi1, azi2) = ellipsoid.inverse(
        Degrees(5.0),
        Degrees(0.00000000000001),
        Degrees(10.0),
        Degrees(180.0),
    );
    assert!(is_within_tolerance(0.000000000000035, azi1.0, 1e-12));
    assert!(is_within_tolerance(179.99999999999996, azi2.0, 1e-12));
    assert!(is_within_tolerance(18345191.174332713, s12.0, 1e-6));
}
