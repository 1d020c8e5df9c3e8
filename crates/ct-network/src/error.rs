//! Network-specific error types.

use ct_core::{CoreError, NodeId};

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Network construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A buffer does not have the length implied by the node count.
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `G[i][j]` and `G[j][i]` differ beyond tolerance.
    NotSymmetric { row: usize, col: usize },

    /// A capacitance is zero, negative, or not finite.
    InvalidCapacitance { node: usize, value: f64 },

    /// A conductance is negative or not finite.
    InvalidConductance { node: usize, value: f64 },

    /// A link refers to a node that was never added.
    UnknownNode { node: NodeId },

    /// A link connects a node to itself.
    SelfLoop { node: NodeId },

    /// A core was added after a non-core node.
    CoreOrder { node: NodeId },

    /// The network has no cores (or more cores than nodes).
    NoCores { cores: usize, nodes: usize },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Shape {
                what,
                expected,
                actual,
            } => {
                write!(f, "{} has {} entries (expected {})", what, actual, expected)
            }
            NetworkError::NotSymmetric { row, col } => {
                write!(f, "Conductance matrix is not symmetric at ({}, {})", row, col)
            }
            NetworkError::InvalidCapacitance { node, value } => {
                write!(f, "Node {} has invalid capacitance {}", node, value)
            }
            NetworkError::InvalidConductance { node, value } => {
                write!(f, "Node {} has invalid conductance {}", node, value)
            }
            NetworkError::UnknownNode { node } => {
                write!(f, "Link refers to non-existent node {}", node)
            }
            NetworkError::SelfLoop { node } => {
                write!(f, "Node {} is linked to itself", node)
            }
            NetworkError::CoreOrder { node } => {
                write!(f, "Core {} was added after a non-core node", node)
            }
            NetworkError::NoCores { cores, nodes } => {
                write!(f, "Network has {} cores and {} nodes", cores, nodes)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for CoreError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Shape { .. } => CoreError::InvalidArg { what: "shape" },
            NetworkError::NotSymmetric { .. } => CoreError::Invariant {
                what: "symmetric conductance",
            },
            NetworkError::InvalidCapacitance { value, .. } => CoreError::NonPositive {
                what: "capacitance",
                value,
            },
            NetworkError::InvalidConductance { value, .. } => CoreError::NonFinite {
                what: "conductance",
                value,
            },
            NetworkError::UnknownNode { .. } => CoreError::InvalidArg { what: "node" },
            NetworkError::SelfLoop { .. } => CoreError::InvalidArg { what: "self loop" },
            NetworkError::CoreOrder { .. } => CoreError::Invariant {
                what: "cores come first",
            },
            NetworkError::NoCores { .. } => CoreError::InvalidArg { what: "cores" },
        }
    }
}
