//! Vertex handles.

use serde::Serialize;

/// Generational handle to a vertex slot.
///
/// A handle stays valid until its vertex is removed. Slots are recycled,
/// but every reuse bumps the generation, so a stale handle never aliases a
/// newer vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the owning graph's arena.
    pub fn slot(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
