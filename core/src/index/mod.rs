//! The spatial index of a FlatGeobuf file is never interpreted. The decoder
//! only needs to know how many bytes it occupies so it can skip it.

pub use self::packed_rtree::{packed_rtree_size, NodeItem};

pub mod packed_rtree;
