//! Strongly typed node identifier.
//!
//! `NodeId` is `Copy + Ord + Hash` so it can be used as a map key and as a
//! heap tie-breaker without ceremony.  The inner integer is `pub` to allow
//! direct indexing into per-node `Vec`s, but callers should prefer
//! [`NodeId::index`] for clarity.

use std::fmt;

/// Index of a road-graph node in the model's node storage.
///
/// Identity is the index, never the coordinates: two nodes may share a
/// position and still be distinct.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel meaning "no valid node" (`u32::MAX`).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}
