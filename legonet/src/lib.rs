//! Stabilizer-code tensor networks.
//!
//! A network is a set of nodes, each a parity-check matrix in symplectic
//! form with one [`Leg`] per column pair, joined by [`Connection`]s.
//! [`TensorNetwork::conjoin_nodes`] contracts every connection and returns a
//! single [`StabilizerCodeTensor`] whose [`legs`](StabilizerCodeTensor::legs)
//! say which output column pair belongs to which original open leg.

mod components;

pub mod catalog;
pub mod leg;
pub mod network;
pub mod payload;
pub mod tensor;

mod error;
pub use error::{LegoError, Result};

pub use catalog::{LegoKind, recognize};
pub use leg::{Connection, Leg};
pub use network::{LegClassification, NetworkNode, NodeDefinition, TensorNetwork};
pub use payload::{ContractedTensor, EnumeratorJobRequest, LegoPayload};
pub use tensor::StabilizerCodeTensor;
