//! Node registry: the fixed, index-aligned list of light nodes for one session.
//!
//! Each node carries a [`ColorHandle`], a shared slot the rendering layer attaches its
//! drawable to. The frame scheduler is the only writer; the renderer reads. A detached
//! handle (drawable torn down) silently ignores writes.

use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::{Point3, Rgb};
use crate::topology::tree::Topology;

/// Shared, externally observable color slot for one node.
///
/// Cloning yields another reference to the same slot.
#[derive(Clone, Debug, Default)]
pub struct ColorHandle {
    slot: Rc<Cell<Option<Rgb>>>,
}

impl ColorHandle {
    /// A handle whose drawable is mounted and shows `initial`.
    pub fn attached(initial: Rgb) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(initial))),
        }
    }

    /// A handle with no drawable behind it.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Mount a drawable showing `color`.
    pub fn attach(&self, color: Rgb) {
        self.slot.set(Some(color));
    }

    /// Unmount the drawable; later writes are dropped.
    pub fn detach(&self) {
        self.slot.set(None);
    }

    /// Whether a drawable is currently mounted.
    pub fn is_attached(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Current color, if attached.
    pub fn get(&self) -> Option<Rgb> {
        self.slot.get()
    }

    /// Write `color` if attached. Returns whether the write landed.
    pub fn set(&self, color: Rgb) -> bool {
        if self.slot.get().is_none() {
            return false;
        }
        self.slot.set(Some(color));
        true
    }
}

/// One addressable light.
#[derive(Clone, Debug)]
pub struct LightNode {
    position: Point3,
    color: ColorHandle,
}

impl LightNode {
    /// Fixed position from the topology.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// The node's color slot.
    pub fn color(&self) -> &ColorHandle {
        &self.color
    }
}

/// Fixed-length, ordered node list. Index `i` always names the same physical light.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<LightNode>,
}

impl NodeRegistry {
    /// One attached, black node per topology coordinate, index-aligned.
    pub fn from_topology(topology: &Topology) -> Self {
        let nodes = topology
            .coords()
            .iter()
            .map(|&position| LightNode {
                position,
                color: ColorHandle::attached(Rgb::BLACK),
            })
            .collect();
        Self { nodes }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`.
    pub fn get(&self, index: usize) -> Option<&LightNode> {
        self.nodes.get(index)
    }

    /// All nodes in LED order.
    pub fn nodes(&self) -> &[LightNode] {
        &self.nodes
    }

    /// Write one color. Returns `false` for an out-of-range index or a detached handle.
    pub fn set_color(&self, index: usize, color: Rgb) -> bool {
        self.nodes
            .get(index)
            .is_some_and(|node| node.color.set(color))
    }

    /// Write `colors[i]` to node `i` for every index both sides have; detached handles are
    /// skipped. Returns the number of writes that landed.
    pub fn apply(&self, colors: &[Rgb]) -> usize {
        self.nodes
            .iter()
            .zip(colors)
            .filter(|(node, color)| node.color.set(**color))
            .count()
    }

    /// Current colors in LED order; `None` for detached nodes.
    pub fn snapshot(&self) -> Vec<Option<Rgb>> {
        self.nodes.iter().map(|n| n.color.get()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/nodes.rs"]
mod tests;
