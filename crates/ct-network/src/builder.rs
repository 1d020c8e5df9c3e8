//! Incremental network builder.

use ct_core::NodeId;

use crate::error::{NetworkError, NetworkResult};
use crate::network::ThermalNetwork;
use crate::validate;

#[derive(Debug)]
struct NodeSpec {
    name: String,
    capacitance: f64,
    core: bool,
}

#[derive(Debug)]
enum Link {
    Pair { a: NodeId, b: NodeId, conductance: f64 },
    Ambient { node: NodeId, conductance: f64 },
}

/// Builder for constructing a thermal network incrementally.
///
/// Use `add_core`, `add_node`, `connect` and `connect_ambient` to describe the
/// RC network, then call `build()` to validate it and assemble the
/// conductance matrix.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<NodeSpec>,
    links: Vec<Link>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a processing element. Cores must precede every other node.
    pub fn add_core(&mut self, name: impl Into<String>, capacitance: f64) -> NodeId {
        self.push(name.into(), capacitance, true)
    }

    /// Add a passive thermal node (spreader, sink, package layer, ...).
    pub fn add_node(&mut self, name: impl Into<String>, capacitance: f64) -> NodeId {
        self.push(name.into(), capacitance, false)
    }

    /// Link two nodes by a thermal conductance (W/K). Parallel links add up.
    pub fn connect(&mut self, a: NodeId, b: NodeId, conductance: f64) -> &mut Self {
        self.links.push(Link::Pair { a, b, conductance });
        self
    }

    /// Link a node to the ambient by a thermal conductance (W/K).
    pub fn connect_ambient(&mut self, node: NodeId, conductance: f64) -> &mut Self {
        self.links.push(Link::Ambient { node, conductance });
        self
    }

    /// Number of nodes added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validate the description and assemble the immutable network.
    pub fn build(self) -> NetworkResult<ThermalNetwork> {
        let nodes = self.nodes.len();
        let cores = self.validate_nodes()?;

        let mut conductance = vec![0.0; nodes * nodes];
        for link in &self.links {
            match *link {
                Link::Pair { a, b, conductance: g } => {
                    let (i, j) = (self.resolve(a)?, self.resolve(b)?);
                    if i == j {
                        return Err(NetworkError::SelfLoop { node: a });
                    }
                    validate::validate_conductance(i, g)?;
                    conductance[i * nodes + i] += g;
                    conductance[j * nodes + j] += g;
                    conductance[i * nodes + j] -= g;
                    conductance[j * nodes + i] -= g;
                }
                Link::Ambient { node, conductance: g } => {
                    let i = self.resolve(node)?;
                    validate::validate_conductance(i, g)?;
                    conductance[i * nodes + i] += g;
                }
            }
        }

        let (names, capacitance): (Vec<String>, Vec<f64>) = self
            .nodes
            .into_iter()
            .map(|node| (node.name, node.capacitance))
            .unzip();

        Ok(ThermalNetwork::from_builder(
            conductance,
            capacitance,
            names,
            cores,
        ))
    }

    fn push(&mut self, name: String, capacitance: f64, core: bool) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(NodeSpec {
            name,
            capacitance,
            core,
        });
        id
    }

    fn resolve(&self, node: NodeId) -> NetworkResult<usize> {
        let index = node.offset();
        if index < self.nodes.len() {
            Ok(index)
        } else {
            Err(NetworkError::UnknownNode { node })
        }
    }

    /// Check capacitances and that cores occupy the leading indices; returns
    /// the core count.
    fn validate_nodes(&self) -> NetworkResult<usize> {
        let mut cores = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            validate::validate_capacitance(index, node.capacitance)?;
            if node.core {
                if cores != index {
                    return Err(NetworkError::CoreOrder {
                        node: NodeId::from_index(index as u32),
                    });
                }
                cores += 1;
            }
        }
        if cores == 0 {
            return Err(NetworkError::NoCores {
                cores,
                nodes: self.nodes.len(),
            });
        }
        Ok(cores)
    }
}
