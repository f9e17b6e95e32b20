//! Streaming decoder for FlatGeobuf containers.
//!
//! A FlatGeobuf file consists of magic bytes, a size-prefixed header, an
//! optional packed R-tree index and a sequence of size-prefixed features.
//! [`decoder::FeatureStream`] skips over the index without interpreting it
//! and turns every feature into drawing commands in a projected integer
//! coordinate space plus a list of attributes.

pub mod attributes;
pub mod decoder;
pub mod error;
pub mod geometry;
pub mod index;
pub mod record;

pub use self::error::DecodeError;
