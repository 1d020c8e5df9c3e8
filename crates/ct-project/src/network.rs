//! Conversion from the configuration schema to a `ThermalNetwork`.

use std::collections::HashMap;

use ct_network::{NetworkBuilder, ThermalNetwork};

use crate::ProjectResult;
use crate::schema::NetworkDef;

impl NetworkDef {
    /// Assemble the network. Structural problems the schema validation does
    /// not cover (asymmetry, negative conductances, self loops) surface here
    /// as network errors.
    pub fn build(&self) -> ProjectResult<ThermalNetwork> {
        let network = match self {
            NetworkDef::Graph {
                nodes,
                links,
                ambient,
            } => {
                let mut builder = NetworkBuilder::new();
                let mut ids = HashMap::with_capacity(nodes.len());
                for node in nodes {
                    let id = if node.core {
                        builder.add_core(node.id.as_str(), node.capacitance)
                    } else {
                        builder.add_node(node.id.as_str(), node.capacitance)
                    };
                    ids.insert(node.id.as_str(), id);
                }
                for link in links {
                    let (a, b) = (lookup(&ids, &link.a)?, lookup(&ids, &link.b)?);
                    builder.connect(a, b, link.conductance);
                }
                for link in ambient {
                    builder.connect_ambient(lookup(&ids, &link.node)?, link.conductance);
                }
                builder.build()?
            }
            NetworkDef::Matrix {
                conductance,
                capacitance,
                cores,
            } => ThermalNetwork::new(conductance.concat(), capacitance.clone(), *cores)?,
        };
        Ok(network)
    }
}

fn lookup(ids: &HashMap<&str, ct_core::NodeId>, name: &str) -> ProjectResult<ct_core::NodeId> {
    ids.get(name).copied().ok_or_else(|| {
        crate::ValidationError::MissingReference {
            id: name.to_string(),
            context: "network".to_string(),
        }
        .into()
    })
}
