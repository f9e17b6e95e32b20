use flatgeobuf::{size_prefixed_root_as_feature, size_prefixed_root_as_header, Geometry};
use geo::{coord, Rect};

use crate::{
    attributes::ColumnSpec,
    error::{array_at, slice_at, DecodeError},
    geometry::{supported_geometry_type, GeometryType},
};

#[cfg(test)]
pub(crate) mod test_writer;

/// The current FlatGeobuf format version
pub const VERSION: u8 = 3;

/// Magic bytes every FlatGeobuf file starts with
pub const MAGIC_BYTES: [u8; 8] = [b'f', b'g', b'b', VERSION, b'f', b'g', b'b', 0];

/// Returns `true` if `source` starts with the FlatGeobuf magic bytes
pub fn has_magic(source: &[u8]) -> bool {
    source.starts_with(&MAGIC_BYTES)
}

/// Returns the size-prefixed record starting at `offset` in `source`. The
/// returned slice includes the 4-byte length prefix.
pub fn size_prefixed_record(source: &[u8], offset: usize) -> Result<&[u8], DecodeError> {
    let len = u32::from_le_bytes(array_at(source, offset)?) as usize;
    slice_at(source, offset, len.saturating_add(4))
}

/// The parts of a FlatGeobuf header the decoder needs
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,

    /// The bounding box of all features, if the writer recorded one
    pub envelope: Option<Rect>,

    pub geometry_type: GeometryType,

    /// The attribute schema. A column's position is the index properties
    /// refer to.
    pub columns: Vec<ColumnSpec>,

    pub features_count: u64,
    pub index_node_size: u16,
}

impl Header {
    /// Reads a header from a size-prefixed record
    ///
    /// Fails with [`DecodeError::UnsupportedGeometry`] if the header declares
    /// a geometry type other than the basic simple-feature types.
    pub fn read(record: &[u8]) -> Result<Self, DecodeError> {
        let table = size_prefixed_root_as_header(record)?;

        let geometry_type = supported_geometry_type(table.geometry_type())?;

        let columns: Vec<ColumnSpec> = table
            .columns()
            .map(|columns| {
                columns
                    .iter()
                    .map(|c| ColumnSpec::new(c.name(), c.type_()))
                    .collect()
            })
            .unwrap_or_default();

        let envelope = table.envelope().filter(|e| e.len() >= 4).map(|e| {
            Rect::new(
                coord! { x: e.get(0), y: e.get(1) },
                coord! { x: e.get(2), y: e.get(3) },
            )
        });

        Ok(Self {
            name: table.name().map(String::from),
            title: table.title().map(String::from),
            description: table.description().map(String::from),
            envelope,
            geometry_type,
            columns,
            features_count: table.features_count(),
            index_node_size: table.index_node_size(),
        })
    }
}

/// A feature record as it is stored on disk. The properties are borrowed
/// from the source and are only valid until the next record is read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeature<'a> {
    /// Interleaved x/y coordinates of all vertices
    pub xy: Vec<f64>,

    /// Vertex indices at which a new part begins. Empty if the geometry has
    /// only one part.
    pub ends: Vec<u64>,

    /// The encoded attribute values
    pub properties: &'a [u8],
}

impl<'a> RawFeature<'a> {
    /// Reads a feature from a size-prefixed record
    ///
    /// Geometries stored as nested parts (e.g. multi-polygons or geometry
    /// collections) are flattened into a single coordinate array. Each part
    /// after the first one starts at a part boundary.
    pub fn read(record: &'a [u8]) -> Result<Self, DecodeError> {
        let table = size_prefixed_root_as_feature(record)?;

        let mut xy = Vec::new();
        let mut ends = Vec::new();
        if let Some(geometry) = table.geometry() {
            flatten_geometry(geometry, &mut xy, &mut ends)?;
        }

        Ok(Self {
            xy,
            ends,
            properties: table.properties().map(|p| p.bytes()).unwrap_or_default(),
        })
    }
}

fn flatten_geometry(
    geometry: Geometry<'_>,
    xy: &mut Vec<f64>,
    ends: &mut Vec<u64>,
) -> Result<(), DecodeError> {
    match geometry.xy() {
        Some(coords) if coords.len() > 0 => {
            if coords.len() % 2 != 0 {
                return Err(DecodeError::InvalidRecord(format!(
                    "odd number of coordinates ({})",
                    coords.len()
                )));
            }

            let first_vertex = (xy.len() / 2) as u64;
            if first_vertex > 0 {
                ends.push(first_vertex);
            }
            if let Some(part_ends) = geometry.ends() {
                ends.extend(part_ends.iter().map(|e| first_vertex + u64::from(e)));
            }

            xy.extend(coords.iter());
        }

        _ => {
            if let Some(parts) = geometry.parts() {
                for part in parts.iter() {
                    flatten_geometry(part, xy, ends)?;
                }
            }
        }
    }

    Ok(())
}
