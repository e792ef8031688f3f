//! JSON shapes exchanged with services outside the contraction engine.
//!
//! Matrices are plain nested 0/1 rows here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::network::NetworkNode;
use crate::{Connection, Leg, StabilizerCodeTensor};

/// One node of an enumerator job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct LegoPayload {
    pub instance_id: String,
    pub short_name: String,
    pub parity_check_matrix: Vec<Vec<u8>>,
    pub logical_legs: Vec<usize>,
}

impl From<&NetworkNode> for LegoPayload {
    fn from(node: &NetworkNode) -> Self {
        Self {
            instance_id: node.id.clone(),
            short_name: node.definition.name.clone(),
            parity_check_matrix: node.definition.parity_check_matrix.to_rows(),
            logical_legs: node.definition.logical_legs.clone(),
        }
    }
}

/// Input of the external weight-enumerator job.
///
/// Nodes are keyed by id, so the serialized form does not depend on the
/// order nodes were added to the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct EnumeratorJobRequest {
    pub legos: BTreeMap<String, LegoPayload>,
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncate_length: Option<usize>,
    pub open_legs: Vec<Leg>,
}

impl EnumeratorJobRequest {
    /// # Errors
    ///
    /// Propagates [`serde_json`] serialization errors.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// # Errors
    ///
    /// Fails if `json` is not a valid request.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A contracted tensor as handed to callers: the matrix and, per column
/// pair, the leg it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ContractedTensor {
    pub parity_check_matrix: Vec<Vec<u8>>,
    pub legs: Vec<Leg>,
}

impl From<&StabilizerCodeTensor> for ContractedTensor {
    fn from(tensor: &StabilizerCodeTensor) -> Self {
        Self {
            parity_check_matrix: tensor.matrix().to_rows(),
            legs: tensor.legs().to_vec(),
        }
    }
}
