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

//! The regression fixture format: a flat byte stream of tagged records.
//!
//! - `'I'`: an inverse geodesic, 7 little endian `f64`s:
//!   `lat1, lon1, lat2, lon2, s12, azi1, azi2`.
//! - `'P'`: a polygon, a vertex count byte `k`, `2k` little endian `f64`s:
//!   `lat, lon` of each vertex, then 8 `f64`s: the `area, perimeter` for each
//!   of the `(reverse, sign)` flags in `POLYGON_FLAGS` order.

use thiserror::Error;

/// The tag of an inverse geodesic record.
pub const INVERSE_TAG: u8 = b'I';
/// The tag of a polygon record.
pub const POLYGON_TAG: u8 = b'P';

/// The `(reverse, sign)` flags of the polygon results, in fixture order.
pub const POLYGON_FLAGS: [(bool, bool); 4] =
    [(false, false), (true, false), (true, true), (false, true)];

const F64_SIZE: usize = core::mem::size_of::<f64>();

/// A fixture decoding error.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    /// A record starts with an unknown tag byte.
    #[error("invalid record tag {tag:#04x} at offset {offset}")]
    InvalidTag { tag: u8, offset: usize },
    /// The stream ends part way through a record.
    #[error("truncated record at offset {offset}")]
    Truncated { offset: usize },
}

/// An inverse geodesic between two positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseRecord {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
    pub s12: f64,
    pub azi1: f64,
    pub azi2: f64,
}

/// A polygon and its `(area, perimeter)` for each of the `POLYGON_FLAGS`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonRecord {
    pub points: Vec<(f64, f64)>,
    pub results: [(f64, f64); 4],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Inverse(InverseRecord),
    Polygon(PolygonRecord),
}

fn put(bytes: &mut Vec<u8>, values: &[f64]) {
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
}

/// Encode records into a fixture byte stream.
///
/// # Panics
///
/// If a polygon has more than 255 vertices.
#[must_use]
pub fn encode(records: &[Record]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for record in records {
        match record {
            Record::Inverse(r) => {
                bytes.push(INVERSE_TAG);
                put(
                    &mut bytes,
                    &[r.lat1, r.lon1, r.lat2, r.lon2, r.s12, r.azi1, r.azi2],
                );
            }
            Record::Polygon(p) => {
                bytes.push(POLYGON_TAG);
                bytes.push(u8::try_from(p.points.len()).expect("Too many polygon vertices"));
                for (lat, lon) in &p.points {
                    put(&mut bytes, &[*lat, *lon]);
                }
                for (area, perimeter) in &p.results {
                    put(&mut bytes, &[*area, *perimeter]);
                }
            }
        }
    }
    bytes
}

/// A cursor over a fixture byte stream.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn byte(&mut self, record_offset: usize) -> Result<u8, FixtureError> {
        let value = *self.bytes.get(self.offset).ok_or(FixtureError::Truncated {
            offset: record_offset,
        })?;
        self.offset += 1;
        Ok(value)
    }

    fn f64(&mut self, record_offset: usize) -> Result<f64, FixtureError> {
        let end = self.offset + F64_SIZE;
        let chunk = self
            .bytes
            .get(self.offset..end)
            .and_then(|slice| <[u8; F64_SIZE]>::try_from(slice).ok())
            .ok_or(FixtureError::Truncated {
                offset: record_offset,
            })?;
        self.offset = end;
        Ok(f64::from_le_bytes(chunk))
    }
}

/// Decode a fixture byte stream.
///
/// # Errors
///
/// `FixtureError::InvalidTag` at an unknown record tag and
/// `FixtureError::Truncated` if the stream ends part way through a record.
pub fn decode(bytes: &[u8]) -> Result<Vec<Record>, FixtureError> {
    let mut reader = Reader { bytes, offset: 0 };
    let mut records = Vec::new();
    while reader.offset < bytes.len() {
        let start = reader.offset;
        match reader.byte(start)? {
            INVERSE_TAG => {
                let mut values = [0.0; 7];
                for value in &mut values {
                    *value = reader.f64(start)?;
                }
                let [lat1, lon1, lat2, lon2, s12, azi1, azi2] = values;
                records.push(Record::Inverse(InverseRecord {
                    lat1,
                    lon1,
                    lat2,
                    lon2,
                    s12,
                    azi1,
                    azi2,
                }));
            }
            POLYGON_TAG => {
                let count = reader.byte(start)?;
                let mut points = Vec::with_capacity(usize::from(count));
                for _ in 0..count {
                    points.push((reader.f64(start)?, reader.f64(start)?));
                }
                let mut results = [(0.0, 0.0); 4];
                for result in &mut results {
                    *result = (reader.f64(start)?, reader.f64(start)?);
                }
                records.push(Record::Polygon(PolygonRecord { points, results }));
            }
            tag => return Err(FixtureError::InvalidTag { tag, offset: start }),
        }
    }
    Ok(records)
}
