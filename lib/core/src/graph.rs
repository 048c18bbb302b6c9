use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

/// Dense node identifier. Equals the node's position in the backing array.
pub type NodeId = usize;

/// A directed adjacency-list entry: the stored half of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub target: NodeId,
    pub weight: f32,
}

/// One element of the node backing array.
///
/// A slot is present when it carries a name. Removing a node blanks the
/// slot but never reclaims it; identifiers are not reused implicitly.
#[derive(Debug, Clone, Default)]
struct Slot {
    name: Option<String>,
    links: SmallVec<[Link; 4]>,
}

/// A row of the adjacency table, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyRow {
    pub id: NodeId,
    pub name: String,
    pub links: Vec<AdjacencyLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyLink {
    pub target: NodeId,
    pub target_name: Option<String>,
    pub weight: f32,
}

/// In-memory road network: a grow-on-demand array of node slots indexed by
/// dense identifier, each holding an ordered outgoing adjacency list, plus a
/// name→id index.
///
/// Edges are directed and weighted; weights must be non-negative. Parallel
/// edges between the same pair of nodes are permitted.
pub struct RoadNetwork {
    slots: Vec<Slot>,
    name_index: AHashMap<String, NodeId>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            name_index: AHashMap::new(),
        }
    }

    /// Pre-allocate for a known junction count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            slots: Vec::with_capacity(node_count),
            name_index: AHashMap::with_capacity(node_count),
        }
    }

    /// Register a junction. Grows the backing array if `id` is beyond the
    /// current capacity; new slots in between stay absent.
    ///
    /// Writing over a live slot replaces its identity: the old name's index
    /// entry is dropped so a name never maps to two live nodes at once.
    pub fn add_node(&mut self, id: NodeId, name: impl Into<String>) {
        if id >= self.slots.len() {
            self.slots.resize_with(id + 1, Slot::default);
        }
        if let Some(old) = self.slots[id].name.take() {
            if self.name_index.get(&old) == Some(&id) {
                self.name_index.remove(&old);
            }
        }
        let name = name.into();
        self.name_index.insert(name.clone(), id);
        self.slots[id].name = Some(name);
    }

    /// Tombstone a junction: clears its outgoing links, strips every link
    /// elsewhere that targets it, and unregisters its name. The slot itself
    /// persists so identifiers stay stable. No-op when `id` is out of range.
    pub fn remove_node(&mut self, id: NodeId) {
        if id >= self.slots.len() {
            return;
        }
        self.slots[id].links.clear();
        for slot in &mut self.slots {
            slot.links.retain(|l| l.target != id);
        }
        if let Some(name) = self.slots[id].name.take() {
            if self.name_index.get(&name) == Some(&id) {
                self.name_index.remove(&name);
            }
        }
    }

    /// Append a directed edge to `from`'s adjacency list. Returns whether the
    /// edge was stored: out-of-range endpoints are rejected silently, a
    /// negative weight is rejected with a warning. Duplicates are not checked.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f32) -> bool {
        if weight < 0.0 {
            warn!(from, to, weight, "rejecting edge with negative weight");
            return false;
        }
        if from >= self.slots.len() || to >= self.slots.len() {
            return false;
        }
        self.slots[from].links.push(Link { target: to, weight });
        true
    }

    /// Remove every link `from → to`, parallel edges included. No-op when
    /// `from` is out of range.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) {
        if let Some(slot) = self.slots.get_mut(from) {
            slot.links.retain(|l| l.target != to);
        }
    }

    /// Look up a junction by display name.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Display name of a junction, if the slot is live.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.slots.get(id).and_then(|s| s.name.as_deref())
    }

    pub fn is_present(&self, id: NodeId) -> bool {
        self.slots.get(id).map_or(false, |s| s.name.is_some())
    }

    /// Outgoing links of a junction, in insertion order. Empty for absent or
    /// out-of-range ids.
    pub fn links(&self, id: NodeId) -> &[Link] {
        self.slots.get(id).map(|s| s.links.as_slice()).unwrap_or(&[])
    }

    /// Number of slots in the backing array, absent ones included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live junctions.
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.name.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.slots.iter().map(|s| s.links.len()).sum()
    }

    /// Ids of live junctions in slot order.
    pub fn present_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.name.is_some())
            .map(|(id, _)| id)
    }

    /// Adjacency table rows for the live junctions, in slot order.
    pub fn adjacency(&self) -> Vec<AdjacencyRow> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| {
                let name = slot.name.clone()?;
                let links = slot
                    .links
                    .iter()
                    .map(|l| AdjacencyLink {
                        target: l.target,
                        target_name: self.node_name(l.target).map(str::to_owned),
                        weight: l.weight,
                    })
                    .collect();
                Some(AdjacencyRow { id, name, links })
            })
            .collect()
    }
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}
