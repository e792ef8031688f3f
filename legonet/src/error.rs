use gf2::Gf2Error;
use thiserror::Error;

use crate::Leg;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegoError {
    #[error("tensor {owner_id} has {leg_count} legs but its matrix has {column_count} columns")]
    LegCountMismatch {
        owner_id: String,
        leg_count: usize,
        column_count: usize,
    },

    #[error("tensor {owner_id} has a matrix with an odd column count {column_count}")]
    OddColumnCount { owner_id: String, column_count: usize },

    #[error("leg {leg} appears more than once")]
    DuplicateLeg { leg: Leg },

    #[error("cannot pair {left} legs with {right} legs")]
    PairLengthMismatch { left: usize, right: usize },

    #[error("leg {leg} is not a leg of tensor {owner_id}")]
    LegNotFound { leg: Leg, owner_id: String },

    #[error("leg {leg} cannot be connected to itself")]
    SelfConnection { leg: Leg },

    #[error("leg {leg} belongs to both tensors")]
    SharedLeg { leg: Leg },

    #[error("no node with id {node_id} in the network")]
    UnknownNode { node_id: String },

    #[error("node id {node_id} is used more than once")]
    DuplicateNode { node_id: String },

    #[error("cannot contract a network without nodes")]
    EmptyNetwork,

    #[error("unknown lego type {type_id}")]
    UnknownLegoType { type_id: String },

    #[error("{type_id} needs a distance of at least 1, got {distance}")]
    InvalidDistance { type_id: String, distance: usize },

    #[error("leg {leg} is neither external nor dangling and cannot be left open")]
    InvalidOpenLeg { leg: Leg },

    #[error(transparent)]
    Gf2(#[from] Gf2Error),
}

pub type Result<T> = std::result::Result<T, LegoError>;
