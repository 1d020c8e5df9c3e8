//! Configuration schema definitions.

use ct_core::{Temperature, Time, constants::default_ambience};
use serde::{Deserialize, Serialize};

/// A thermal analysis configuration: the network, its environment and the
/// sampling interval of the power profiles it will be fed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: u32,
    pub name: String,
    /// Ambient temperature, stored in Kelvin.
    #[serde(default = "default_ambience")]
    pub ambience_k: Temperature,
    /// Fixed-step sampling interval, stored in seconds.
    pub time_step_s: Time,
    pub network: NetworkDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leakage: Option<LeakageDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum NetworkDef {
    /// Named nodes and the conductances between them.
    Graph {
        nodes: Vec<NodeDef>,
        #[serde(default)]
        links: Vec<LinkDef>,
        #[serde(default)]
        ambient: Vec<AmbientDef>,
    },
    /// Raw matrices, as exported by a floorplan-based model generator.
    Matrix {
        /// Rows of the symmetric conductance matrix (W/K).
        conductance: Vec<Vec<f64>>,
        /// Node capacitances (J/K).
        capacitance: Vec<f64>,
        cores: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    /// Heat capacity (J/K).
    pub capacitance: f64,
    #[serde(default)]
    pub core: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkDef {
    pub a: String,
    pub b: String,
    /// Thermal conductance (W/K).
    pub conductance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmbientDef {
    pub node: String,
    /// Thermal conductance to ambient (W/K).
    pub conductance: f64,
}

/// Parameters of the linear leakage model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeakageDef {
    /// Leakage of each core at the reference temperature (W).
    pub nominal_w: Vec<f64>,
    pub sensitivity_per_k: f64,
    pub reference_k: f64,
}

impl NetworkDef {
    /// Number of cores the network declares.
    pub fn core_count(&self) -> usize {
        match self {
            NetworkDef::Graph { nodes, .. } => nodes.iter().filter(|n| n.core).count(),
            NetworkDef::Matrix { cores, .. } => *cores,
        }
    }
}
