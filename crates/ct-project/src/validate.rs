//! Configuration validation logic.

use std::collections::HashSet;

use ct_core::{kelvin_of, seconds_of};

use crate::SUPPORTED_VERSION;
use crate::schema::{Config, LeakageDef, NetworkDef};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn ensure_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

/// Check everything that can be checked without assembling matrices.
pub fn validate_config(config: &Config) -> Result<(), ValidationError> {
    if config.version != SUPPORTED_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    ensure_positive("ambience_k", kelvin_of(config.ambience_k))?;
    ensure_positive("time_step_s", seconds_of(config.time_step_s))?;

    match &config.network {
        NetworkDef::Graph {
            nodes,
            links,
            ambient,
        } => {
            let mut ids = HashSet::new();
            let mut seen_passive = false;
            for node in nodes {
                if !ids.insert(node.id.as_str()) {
                    return Err(ValidationError::DuplicateId {
                        id: node.id.clone(),
                        context: "nodes".to_string(),
                    });
                }
                ensure_positive(&format!("nodes.{}.capacitance", node.id), node.capacitance)?;
                if node.core && seen_passive {
                    return Err(invalid(
                        format!("nodes.{}.core", node.id),
                        true,
                        "cores must be listed before other nodes",
                    ));
                }
                seen_passive |= !node.core;
            }
            for link in links {
                for end in [&link.a, &link.b] {
                    if !ids.contains(end.as_str()) {
                        return Err(ValidationError::MissingReference {
                            id: end.clone(),
                            context: "links".to_string(),
                        });
                    }
                }
            }
            for link in ambient {
                if !ids.contains(link.node.as_str()) {
                    return Err(ValidationError::MissingReference {
                        id: link.node.clone(),
                        context: "ambient".to_string(),
                    });
                }
            }
        }
        NetworkDef::Matrix {
            conductance,
            capacitance,
            cores,
        } => {
            let n = capacitance.len();
            if let Some((row, values)) = conductance
                .iter()
                .enumerate()
                .find(|(_, values)| values.len() != n)
            {
                return Err(invalid(
                    format!("conductance[{row}]"),
                    values.len(),
                    "row length must equal the number of capacitances",
                ));
            }
            if conductance.len() != n {
                return Err(invalid(
                    "conductance",
                    conductance.len(),
                    "row count must equal the number of capacitances",
                ));
            }
            for (i, &c) in capacitance.iter().enumerate() {
                ensure_positive(&format!("capacitance[{i}]"), c)?;
            }
            if *cores == 0 || *cores > n {
                return Err(invalid("cores", cores, "must be between 1 and the node count"));
            }
        }
    }

    if let Some(leakage) = &config.leakage {
        validate_leakage(leakage, config.network.core_count())?;
    }
    Ok(())
}

fn validate_leakage(leakage: &LeakageDef, cores: usize) -> Result<(), ValidationError> {
    if leakage.nominal_w.len() != cores {
        return Err(invalid(
            "leakage.nominal_w",
            leakage.nominal_w.len(),
            "needs one entry per core",
        ));
    }
    if let Some(p) = leakage.nominal_w.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
        return Err(invalid("leakage.nominal_w", p, "must be non-negative"));
    }
    if !leakage.sensitivity_per_k.is_finite() {
        return Err(invalid(
            "leakage.sensitivity_per_k",
            leakage.sensitivity_per_k,
            "must be finite",
        ));
    }
    ensure_positive("leakage.reference_k", leakage.reference_k)
}
