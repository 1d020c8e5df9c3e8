//! ct-network: thermal RC network layer for chiptherm.
//!
//! Provides:
//! - The immutable `ThermalNetwork` value (conductance matrix, capacitance
//!   vector, core and node counts)
//! - An incremental `NetworkBuilder` assembling `G` from node-to-node and
//!   node-to-ambient conductances
//! - Structural validation shared by both construction paths
//!
//! # Example
//!
//! ```
//! use ct_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let core = builder.add_core("core0", 0.02);
//! let sink = builder.add_node("sink", 1.5);
//! builder.connect(core, sink, 1.0);
//! builder.connect_ambient(sink, 2.0);
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.cores(), 1);
//! assert_eq!(network.nodes(), 2);
//! assert_eq!(network.conductance_at(0, 1), -1.0);
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use network::ThermalNetwork;
