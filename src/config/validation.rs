//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0, body limit > 0)
//! - Detect components that would bind the same address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use crate::config::schema::{OriginConfig, ProxyConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: String, value: String },

    #[error("{field}: must not be empty")]
    Empty { field: String },

    #[error("{first} and {second} both bind {address}")]
    AddressConflict {
        first: String,
        second: String,
        address: SocketAddr,
    },

    #[error("{field}: must be greater than zero")]
    Zero { field: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut bound: HashMap<SocketAddr, String> = HashMap::new();

    let mut check_address = |field: &str, value: &str, errors: &mut Vec<ValidationError>| {
        match value.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Some(first) = bound.get(&addr) {
                    errors.push(ValidationError::AddressConflict {
                        first: first.clone(),
                        second: field.to_string(),
                        address: addr,
                    });
                } else {
                    bound.insert(addr, field.to_string());
                }
            }
            Err(_) => errors.push(ValidationError::InvalidAddress {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    };

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );

    for (name, origin) in [
        ("origins.server1", &config.origins.server1),
        ("origins.server2", &config.origins.server2),
    ] {
        check_address(
            &format!("{name}.bind_address"),
            &origin.bind_address,
            &mut errors,
        );
        check_origin_fields(name, origin, &mut errors);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.connect_secs".to_string(),
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.request_secs".to_string(),
        });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero {
            field: "limits.max_body_size".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_origin_fields(name: &str, origin: &OriginConfig, errors: &mut Vec<ValidationError>) {
    if origin.label.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: format!("{name}.label"),
        });
    }
    if origin.root.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: format!("{name}.root"),
        });
    }
}
