use std::sync::Arc;

use tracing::{debug, instrument, trace, warn};

use crate::{
    attributes::{decode_properties, AttributeValue},
    error::DecodeError,
    geometry::{reconstruct, DrawCommand, Projection},
    index::packed_rtree_size,
    record::{has_magic, size_prefixed_record, Header, RawFeature, MAGIC_BYTES},
};

/// Identifies the layer decoded features belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub id: usize,
    pub name: Arc<str>,
}

impl Layer {
    pub fn new(id: usize, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A feature ready to be handed to a downstream serializer
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFeature {
    pub layer_id: usize,
    pub layer_name: Arc<str>,

    /// The feature's position in the sequence of all features of the layer
    pub seq: u64,

    pub geometry: Vec<DrawCommand>,

    /// Attribute names and values in the order they were encoded
    pub attributes: Vec<(String, AttributeValue)>,
}

/// Receives decoded features one at a time
pub trait FeatureSink {
    /// Takes ownership of a decoded feature. An error aborts decoding.
    fn accept(&mut self, feature: DecodedFeature) -> anyhow::Result<()>;
}

impl FeatureSink for Vec<DecodedFeature> {
    fn accept(&mut self, feature: DecodedFeature) -> anyhow::Result<()> {
        self.push(feature);
        Ok(())
    }
}

/// Lazily decodes the features of a FlatGeobuf file held in memory
///
/// Creating the stream reads the header and skips the spatial index. Every
/// call to [`Iterator::next`] then reads exactly one feature record. The
/// iterator ends after the number of features the header declares or after
/// the first error.
pub struct FeatureStream<'a, P> {
    source: &'a [u8],
    header: Header,
    layer: Layer,
    projection: P,

    /// Offset of the next feature record
    pos: usize,

    remaining: u64,
    next_seq: u64,
}

impl<'a, P: Projection> FeatureStream<'a, P> {
    /// Reads the header from `source` and positions the stream at the first
    /// feature. Features will be numbered starting with `first_seq`.
    pub fn new(
        source: &'a [u8],
        layer: Layer,
        first_seq: u64,
        projection: P,
    ) -> Result<Self, DecodeError> {
        if !has_magic(source) {
            warn!("Source does not start with FlatGeobuf magic bytes");
        }

        let header_record = size_prefixed_record(source, MAGIC_BYTES.len())?;
        let header = Header::read(header_record)?;

        let index_size = packed_rtree_size(header.features_count, header.index_node_size)?;

        debug!(
            features_count = header.features_count,
            geometry_type = ?header.geometry_type,
            columns = header.columns.len(),
            index_size,
            "Read header"
        );

        let pos = usize::try_from(index_size)
            .ok()
            .and_then(|s| s.checked_add(MAGIC_BYTES.len() + header_record.len()))
            .ok_or(DecodeError::Truncated {
                offset: MAGIC_BYTES.len() + header_record.len(),
                needed: usize::MAX,
                len: source.len(),
            })?;

        Ok(Self {
            source,
            remaining: header.features_count,
            header,
            layer,
            projection,
            pos,
            next_seq: first_seq,
        })
    }

    /// The header of the file being decoded
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The sequence number the next feature will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    fn decode_next(&mut self) -> Result<DecodedFeature, DecodeError> {
        let record = size_prefixed_record(self.source, self.pos)?;
        let raw = RawFeature::read(record)?;

        let geometry = reconstruct(&raw.xy, Some(raw.ends.as_slice()), &self.projection);
        let attributes = decode_properties(raw.properties, &self.header.columns)?;

        trace!(
            seq = self.next_seq,
            offset = self.pos,
            len = record.len(),
            "Decoded feature"
        );

        let feature = DecodedFeature {
            layer_id: self.layer.id,
            layer_name: Arc::clone(&self.layer.name),
            seq: self.next_seq,
            geometry,
            attributes,
        };

        self.pos += record.len();
        self.next_seq += 1;

        Ok(feature)
    }
}

impl<P: Projection> Iterator for FeatureStream<'_, P> {
    type Item = Result<DecodedFeature, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let r = self.decode_next();
        if r.is_ok() {
            self.remaining -= 1;
        } else {
            // nothing after a corrupt record can be trusted
            self.remaining = 0;
        }

        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining).ok())
    }
}

/// Decodes all features of a FlatGeobuf file held in memory and passes them
/// to `sink` in file order
///
/// Every feature gets the current value of `seq` as its sequence number,
/// after which `seq` is incremented. Returns the number of features passed
/// to the sink. Any error aborts the whole decode.
#[instrument(level = "debug", skip_all, fields(layer = %layer.name))]
pub fn decode_stream<P, S>(
    source: &[u8],
    layer: Layer,
    seq: &mut u64,
    projection: P,
    sink: &mut S,
) -> Result<u64, DecodeError>
where
    P: Projection,
    S: FeatureSink + ?Sized,
{
    let stream = FeatureStream::new(source, layer, *seq, projection)?;

    let mut count = 0;
    for feature in stream {
        sink.accept(feature?).map_err(DecodeError::Sink)?;
        *seq += 1;
        count += 1;
    }

    debug!(count, "Decoded all features");

    Ok(count)
}
