use std::collections::HashMap;

use crate::error::{LegoError, Result};
use crate::tensor::StabilizerCodeTensor;

/// Connected components of a network under contraction.
///
/// Every component owns one slot of an arena; a disjoint-set forest over
/// node indexes maps each node to the root of its component, and each root
/// to its slot. Merging keeps the first component's slot and tombstones the
/// second, so live slots stay in the order the components were created.
pub(crate) struct Components {
    tensors: Vec<StabilizerCodeTensor>,
    tombstones: Vec<bool>,
    parents: Vec<usize>,
    sizes: Vec<usize>,
    slots: Vec<usize>,
    node_indexes: HashMap<String, usize>,
}

impl Components {
    /// One component per node, in the given order. Node ids must be unique.
    pub fn new(nodes: Vec<(String, StabilizerCodeTensor)>) -> Self {
        let node_count = nodes.len();
        let mut node_indexes = HashMap::with_capacity(node_count);
        let mut tensors = Vec::with_capacity(node_count);
        for (node_index, (node_id, tensor)) in nodes.into_iter().enumerate() {
            node_indexes.insert(node_id, node_index);
            tensors.push(tensor);
        }
        Self {
            tensors,
            tombstones: vec![false; node_count],
            parents: (0..node_count).collect(),
            sizes: vec![1; node_count],
            slots: (0..node_count).collect(),
            node_indexes,
        }
    }

    /// Root of the component containing `node_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LegoError::UnknownNode`] if no node has that id.
    pub fn find(&mut self, node_id: &str) -> Result<usize> {
        let node_index = *self
            .node_indexes
            .get(node_id)
            .ok_or_else(|| LegoError::UnknownNode {
                node_id: node_id.to_owned(),
            })?;
        Ok(self.root_of(node_index))
    }

    pub fn tensor(&self, root: usize) -> &StabilizerCodeTensor {
        &self.tensors[self.slots[root]]
    }

    pub fn replace(&mut self, root: usize, tensor: StabilizerCodeTensor) {
        self.tensors[self.slots[root]] = tensor;
    }

    /// Absorbs the component rooted at `absorbed` into the one rooted at
    /// `kept`; `merged` becomes the tensor of the union, stored in the slot
    /// of `kept`.
    pub fn merge(&mut self, kept: usize, absorbed: usize, merged: StabilizerCodeTensor) {
        debug_assert_ne!(kept, absorbed);
        let kept_slot = self.slots[kept];
        let absorbed_slot = self.slots[absorbed];
        self.tensors[kept_slot] = merged;
        self.tensors[absorbed_slot] = StabilizerCodeTensor::default();
        self.tombstones[absorbed_slot] = true;

        let (parent, child) = if self.sizes[kept] >= self.sizes[absorbed] {
            (kept, absorbed)
        } else {
            (absorbed, kept)
        };
        self.parents[child] = parent;
        self.sizes[parent] += self.sizes[child];
        self.slots[parent] = kept_slot;
    }

    pub fn live_count(&self) -> usize {
        self.tombstones.iter().filter(|&&tombstone| !tombstone).count()
    }

    /// Tensors of the remaining components in slot order.
    pub fn into_live(self) -> impl Iterator<Item = StabilizerCodeTensor> {
        self.tensors
            .into_iter()
            .zip(self.tombstones)
            .filter_map(|(tensor, tombstone)| (!tombstone).then_some(tensor))
    }

    fn root_of(&mut self, node_index: usize) -> usize {
        let mut root = node_index;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        let mut current = node_index;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        root
    }
}
