use geo::Coord;
use itertools::Itertools;

use crate::error::DecodeError;

pub use self::projection::{Projection, WebMercator};
pub use flatgeobuf::GeometryType;

pub mod projection;

/// The number of bits of precision requested from the [`Projection`]
pub const PROJECTION_PRECISION: u8 = 32;

/// Checks that `geometry_type` is one of the basic simple-feature types
/// (`Unknown` up to `GeometryCollection`). Curves, surfaces, TINs and
/// triangles are rejected.
pub fn supported_geometry_type(geometry_type: GeometryType) -> Result<GeometryType, DecodeError> {
    if geometry_type.0 > GeometryType::GeometryCollection.0 {
        return Err(DecodeError::UnsupportedGeometry(geometry_type.0));
    }
    Ok(geometry_type)
}

/// A drawing command in the projected integer coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    MoveTo(Coord<i64>),
    LineTo(Coord<i64>),
}

impl DrawCommand {
    /// The coordinate this command moves or draws to
    pub fn coord(&self) -> Coord<i64> {
        match self {
            DrawCommand::MoveTo(c) | DrawCommand::LineTo(c) => *c,
        }
    }
}

/// Converts a flat array of interleaved x/y coordinates into drawing commands
///
/// `ends` holds the vertex indices at which a new part (a ring, a line in a
/// multi-line, etc.) begins. Every vertex is projected with `projection` in
/// order. The first vertex and every vertex at a part boundary becomes a
/// [`DrawCommand::MoveTo`], all others become [`DrawCommand::LineTo`]. A
/// trailing unpaired value in `xy` is ignored.
///
/// Malformed `ends` are tolerated on purpose: a leading 0 and repeated
/// entries are skipped instead of blocking every later boundary. Flattened
/// multi-part geometries produce such repeats (see
/// [`RawFeature::read`](crate::record::RawFeature::read)).
pub fn reconstruct<P>(xy: &[f64], ends: Option<&[u64]>, projection: &P) -> Vec<DrawCommand>
where
    P: Projection + ?Sized,
{
    let ends = ends.unwrap_or_default();
    let mut current_end = 0;

    let mut result = Vec::with_capacity(xy.len() / 2);
    for (vertex, (x, y)) in xy.iter().copied().tuples().enumerate() {
        let p = projection.project(Coord { x, y }, PROJECTION_PRECISION);

        let vertex = vertex as u64;
        let at_boundary = ends.get(current_end) == Some(&vertex);
        while ends.get(current_end).is_some_and(|&e| e <= vertex) {
            current_end += 1;
        }

        if vertex == 0 || at_boundary {
            result.push(DrawCommand::MoveTo(p));
        } else {
            result.push(DrawCommand::LineTo(p));
        }
    }

    result
}
