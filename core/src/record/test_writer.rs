//! Assembles FlatGeobuf headers, features and whole files for tests

use flatbuffers::{FlatBufferBuilder, WIPOffset};
use flatgeobuf::{
    Column, ColumnArgs, ColumnType, Feature, FeatureArgs, Geometry, GeometryArgs, GeometryType,
    Header, HeaderArgs,
};

use super::MAGIC_BYTES;

/// Builds a size-prefixed header named "test" with the given columns
pub(crate) fn header(
    features_count: u64,
    index_node_size: u16,
    geometry_type: GeometryType,
    columns: &[(&str, ColumnType)],
) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::new();

    let column_offsets = columns
        .iter()
        .map(|(name, column_type)| {
            let name = fbb.create_string(name);
            Column::create(
                &mut fbb,
                &ColumnArgs {
                    name: Some(name),
                    type_: *column_type,
                    ..Default::default()
                },
            )
        })
        .collect::<Vec<_>>();
    let columns = fbb.create_vector(&column_offsets);

    let name = fbb.create_string("test");
    let envelope = fbb.create_vector(&[-10.0f64, -20.0, 10.0, 20.0][..]);

    let root = Header::create(
        &mut fbb,
        &HeaderArgs {
            name: Some(name),
            envelope: Some(envelope),
            geometry_type,
            columns: Some(columns),
            features_count,
            index_node_size,
            ..Default::default()
        },
    );

    fbb.finish_size_prefixed(root, None);
    fbb.finished_data().to_vec()
}

fn geometry<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    xy: &[f64],
    ends: &[u32],
    parts: &[WIPOffset<Geometry<'a>>],
) -> WIPOffset<Geometry<'a>> {
    let xy = (!xy.is_empty()).then(|| fbb.create_vector(xy));
    let ends = (!ends.is_empty()).then(|| fbb.create_vector(ends));
    let parts = (!parts.is_empty()).then(|| fbb.create_vector(parts));

    Geometry::create(
        fbb,
        &GeometryArgs {
            xy,
            ends,
            parts,
            ..Default::default()
        },
    )
}

fn finish_feature<'a>(
    mut fbb: FlatBufferBuilder<'a>,
    geometry: Option<WIPOffset<Geometry<'a>>>,
    properties: &[u8],
) -> Vec<u8> {
    let properties = fbb.create_vector(properties);

    let root = Feature::create(
        &mut fbb,
        &FeatureArgs {
            geometry,
            properties: Some(properties),
            ..Default::default()
        },
    );

    fbb.finish_size_prefixed(root, None);
    fbb.finished_data().to_vec()
}

/// Builds a size-prefixed feature with a flat geometry
pub(crate) fn feature(xy: &[f64], ends: &[u32], properties: &[u8]) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::new();
    let g = geometry(&mut fbb, xy, ends, &[]);
    finish_feature(fbb, Some(g), properties)
}

/// Builds a size-prefixed feature whose geometry consists of nested parts
pub(crate) fn feature_with_parts(parts: &[(&[f64], &[u32])], properties: &[u8]) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::new();
    let parts = parts
        .iter()
        .map(|(xy, ends)| geometry(&mut fbb, xy, ends, &[]))
        .collect::<Vec<_>>();
    let g = geometry(&mut fbb, &[], &[], &parts);
    finish_feature(fbb, Some(g), properties)
}

/// Builds a size-prefixed feature without geometry
pub(crate) fn feature_without_geometry(properties: &[u8]) -> Vec<u8> {
    finish_feature(FlatBufferBuilder::new(), None, properties)
}

/// Encodes a property buffer entry for a `Long` column
pub(crate) fn long_property(buf: &mut Vec<u8>, column: u16, value: u64) {
    buf.extend(column.to_le_bytes());
    buf.extend(value.to_le_bytes());
}

/// Encodes a property buffer entry for a `Double` column
pub(crate) fn double_property(buf: &mut Vec<u8>, column: u16, value: f64) {
    buf.extend(column.to_le_bytes());
    buf.extend(value.to_le_bytes());
}

/// Encodes a property buffer entry for a `String` column
pub(crate) fn string_property(buf: &mut Vec<u8>, column: u16, value: &str) {
    buf.extend(column.to_le_bytes());
    buf.extend((value.len() as u32).to_le_bytes());
    buf.extend(value.as_bytes());
}

/// Concatenates magic bytes, header, `index_len` filler bytes standing in
/// for the spatial index, and the features
pub(crate) fn file(header: &[u8], index_len: u64, features: &[Vec<u8>]) -> Vec<u8> {
    let mut result = MAGIC_BYTES.to_vec();
    result.extend_from_slice(header);
    result.resize(result.len() + index_len as usize, 0xab);
    for f in features {
        result.extend_from_slice(f);
    }
    result
}
