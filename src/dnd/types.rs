/// Opaque handle to a node owned by the visual host.
///
/// The engine never owns or inspects real scene/DOM nodes; it only passes these handles
/// back to the [`super::VisualHost`] that minted them. Hosts are free to use whatever
/// scheme they like to map handles to nodes (interned pointers, slotmap keys, element
/// ids, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
