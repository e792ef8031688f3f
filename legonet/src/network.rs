use std::collections::{BTreeMap, BTreeSet};

use gf2::BitMatrix;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::components::Components;
use crate::error::{LegoError, Result};
use crate::payload::{EnumeratorJobRequest, LegoPayload};
use crate::{Connection, Leg, StabilizerCodeTensor};

/// What a node is, independent of where it sits in a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Catalog type id, or any caller-chosen id for a custom matrix.
    pub type_id: String,
    pub name: String,
    pub parity_check_matrix: BitMatrix,
    /// Legs that carry logical information; forwarded to job payloads.
    #[serde(default)]
    pub logical_legs: Vec<usize>,
}

impl NodeDefinition {
    pub fn new(type_id: impl Into<String>, parity_check_matrix: BitMatrix) -> Self {
        let type_id = type_id.into();
        Self {
            name: type_id.clone(),
            type_id,
            parity_check_matrix,
            logical_legs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_logical_legs(mut self, logical_legs: Vec<usize>) -> Self {
        self.logical_legs = logical_legs;
        self
    }

    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.parity_check_matrix.column_count() / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub definition: NodeDefinition,
}

impl NetworkNode {
    pub fn new(id: impl Into<String>, definition: NodeDefinition) -> Self {
        Self { id: id.into(), definition }
    }

    pub fn legs(&self) -> impl Iterator<Item = Leg> + '_ {
        (0..self.definition.leg_count()).map(|leg_index| Leg::new(self.id.clone(), leg_index))
    }

    /// The node as a tensor with its full leg set.
    ///
    /// # Errors
    ///
    /// Fails if the parity-check matrix has an odd column count.
    pub fn tensor(&self) -> Result<StabilizerCodeTensor> {
        StabilizerCodeTensor::with_default_legs(self.definition.parity_check_matrix.clone(), self.id.clone())
    }
}

/// Legs of a network that are not joined to another node of the same network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegClassification {
    /// Legs connected to a node outside the network.
    pub external: Vec<Leg>,
    /// Legs without any connection.
    pub dangling: Vec<Leg>,
}

impl LegClassification {
    #[must_use]
    pub fn contains(&self, leg: &Leg) -> bool {
        self.external.contains(leg) || self.dangling.contains(leg)
    }
}

/// Nodes and the connections between their legs.
///
/// ```
/// use legonet::{Connection, Leg, LegoKind, NetworkNode, TensorNetwork};
///
/// let nodes = vec![
///     NetworkNode::new("a", LegoKind::Hadamard.node_definition()),
///     NetworkNode::new("b", LegoKind::Hadamard.node_definition()),
/// ];
/// let connections = vec![Connection::new(Leg::new("a", 1), Leg::new("b", 0)).unwrap()];
/// let network = TensorNetwork::new(nodes, connections).unwrap();
///
/// let tensor = network.conjoin_nodes().unwrap();
/// assert_eq!(tensor.legs(), &[Leg::new("a", 0), Leg::new("b", 1)]);
/// assert!(LegoKind::Identity.parity_check_matrix().is_gauss_equivalent(tensor.matrix()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TensorNetwork {
    nodes: Vec<NetworkNode>,
    connections: Vec<Connection>,
}

impl TensorNetwork {
    /// # Errors
    ///
    /// Fails if two nodes share an id or a connection joins a leg to itself.
    /// Connections may name nodes that are not in `nodes`; contracting such a
    /// network fails.
    pub fn new(nodes: Vec<NetworkNode>, connections: Vec<Connection>) -> Result<Self> {
        let mut ids = BTreeSet::new();
        for node in &nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(LegoError::DuplicateNode { node_id: node.id.clone() });
            }
        }
        for connection in &connections {
            connection.validate()?;
        }
        Ok(Self { nodes, connections })
    }

    #[must_use]
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn node(&self, node_id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    /// Contracts every connection and returns the resulting tensor.
    ///
    /// Connections are processed in order. A connection inside one component
    /// is a self-trace; a connection between two components conjoins them,
    /// keeping the component of the `from` end. Components left over at the
    /// end are combined with [`StabilizerCodeTensor::tensor_with`] in the
    /// order their first nodes appear in the network. The returned legs are
    /// the column map of the result; permuting the connections changes at
    /// most the leg order, never the code.
    ///
    /// # Errors
    ///
    /// Fails on an empty network, a connection naming an unknown node, a
    /// node matrix with an odd column count, or a connection naming a leg
    /// that does not exist or has already been contracted.
    pub fn conjoin_nodes(&self) -> Result<StabilizerCodeTensor> {
        debug!(nodes = self.nodes.len(), connections = self.connections.len(); "Start contracting tensor network");
        let (first, rest) = self.nodes.split_first().ok_or(LegoError::EmptyNetwork)?;
        if rest.is_empty() && self.connections.is_empty() {
            return first.tensor();
        }

        let tensors = self
            .nodes
            .iter()
            .map(|node| Ok((node.id.clone(), node.tensor()?)))
            .collect::<Result<Vec<_>>>()?;
        let mut components = Components::new(tensors);

        for connection in &self.connections {
            let (from, to) = (connection.from(), connection.to());
            let kept = components.find(&from.owner_id)?;
            let absorbed = components.find(&to.owner_id)?;
            if kept == absorbed {
                trace!(from:% = from, to:% = to; "Closing loop");
                let traced = components
                    .tensor(kept)
                    .self_trace(std::slice::from_ref(from), std::slice::from_ref(to))?;
                components.replace(kept, traced);
            } else {
                trace!(from:% = from, to:% = to; "Conjoining components");
                let merged = components.tensor(kept).conjoin(
                    components.tensor(absorbed),
                    std::slice::from_ref(from),
                    std::slice::from_ref(to),
                )?;
                components.merge(kept, absorbed, merged);
            }
        }

        debug!(components = components.live_count(); "Combining disjoint components");
        let mut live = components.into_live();
        let Some(head) = live.next() else {
            return Err(LegoError::EmptyNetwork);
        };
        let tensor = live.try_fold(head, |combined, next| combined.tensor_with(&next))?;
        debug!(rows = tensor.matrix().row_count(), legs = tensor.leg_count(); "Completed tensor network contraction");
        Ok(tensor)
    }

    /// Sorts every leg of every node, in node order then leg order, into
    /// dangling legs (no connection in `connections` touches them), external
    /// legs (some connection leads to a node outside this network), or
    /// neither.
    #[must_use]
    pub fn external_and_dangling_legs(&self, connections: &[Connection]) -> LegClassification {
        let members: BTreeSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        let mut classification = LegClassification::default();
        for leg in self.nodes.iter().flat_map(NetworkNode::legs) {
            let mut partners = connections
                .iter()
                .filter_map(|connection| connection.other_end(&leg))
                .peekable();
            if partners.peek().is_none() {
                classification.dangling.push(leg);
            } else if partners.any(|partner| !members.contains(partner.owner_id.as_str())) {
                classification.external.push(leg);
            }
        }
        classification
    }

    /// A canonical description of the network topology.
    ///
    /// The string encodes the sorted `(type_id, node_id, leg_count)` triples
    /// and the sorted connections with each connection's smaller leg first,
    /// so it does not depend on the order nodes or connections were given.
    #[must_use]
    pub fn signature(&self) -> String {
        let nodes = self
            .nodes
            .iter()
            .map(|node| (node.definition.type_id.as_str(), node.id.as_str(), node.definition.leg_count()))
            .sorted()
            .collect_vec();
        let connections = self.connections.iter().map(Connection::normalized).sorted().collect_vec();
        serde_json::json!({ "nodes": nodes, "connections": connections }).to_string()
    }

    /// Request for an external weight-enumerator job over this network.
    ///
    /// `all_connections` is the full connection list of the surrounding
    /// drawing; it determines which legs are external. Every open leg must be
    /// external or dangling.
    ///
    /// # Errors
    ///
    /// Returns [`LegoError::InvalidOpenLeg`] for any other open leg.
    pub fn enumerator_request(
        &self,
        all_connections: &[Connection],
        open_legs: &[Leg],
        truncate_length: Option<usize>,
    ) -> Result<EnumeratorJobRequest> {
        let classification = self.external_and_dangling_legs(all_connections);
        if let Some(leg) = open_legs.iter().find(|leg| !classification.contains(leg)) {
            return Err(LegoError::InvalidOpenLeg { leg: leg.clone() });
        }
        let legos: BTreeMap<String, LegoPayload> = self
            .nodes
            .iter()
            .map(|node| (node.id.clone(), LegoPayload::from(node)))
            .collect();
        debug!(legos = legos.len(), open_legs = open_legs.len(); "Built enumerator request");
        Ok(EnumeratorJobRequest {
            legos,
            connections: self.connections.clone(),
            truncate_length,
            open_legs: open_legs.to_vec(),
        })
    }
}
