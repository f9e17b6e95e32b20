use std::mem::size_of;

use crate::error::DecodeError;

/// One entry of a packed R-tree as it is stored on disk: a bounding box and
/// the byte offset of the node's first child (or of the feature for leaves)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeItem {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub offset: u64,
}

/// The maximum number of items an index may hold. Above this the size in
/// bytes could not be represented by a `u64`.
const MAX_ITEMS: u64 = 1 << 56;

/// Calculates the number of bytes a packed R-tree with `num_items` leaves and
/// up to `node_size` children per node occupies on disk
///
/// Every level of the tree stores `ceil(previous level / node_size)` entries
/// until a level with a single root entry has been counted.
///
/// # Examples
///
/// ```rust
/// use fgbscan_core::index::packed_rtree_size;
///
/// assert_eq!(packed_rtree_size(1, 16).unwrap(), 40);
/// assert_eq!(packed_rtree_size(16, 16).unwrap(), 17 * 40);
/// assert_eq!(packed_rtree_size(17, 16).unwrap(), (17 + 2 + 1) * 40);
/// ```
pub fn packed_rtree_size(num_items: u64, node_size: u16) -> Result<u64, DecodeError> {
    if node_size < 2 {
        return Err(DecodeError::InvalidArgument("node size must be at least 2"));
    }
    if num_items == 0 {
        return Err(DecodeError::InvalidArgument(
            "number of items must be greater than 0",
        ));
    }
    if num_items > MAX_ITEMS {
        return Err(DecodeError::Overflow(num_items));
    }

    let node_size = u64::from(node_size);
    let mut n = num_items;
    let mut num_nodes = n;
    while n != 1 {
        n = n.div_ceil(node_size);
        num_nodes += n;
    }

    Ok(num_nodes * size_of::<NodeItem>() as u64)
}
