//! Topology error types

use thiserror::Error;

/// Errors raised while loading or querying a network topology.
///
/// All of these signal a topology/setup defect; none are retryable.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Failed to read topology file: {0}")]
    FileReadError(String),

    #[error("Failed to parse topology: {0}")]
    ParseError(String),

    #[error("Topology validation failed: {0}")]
    ValidationFailed(String),

    #[error("No CA with name {0} found")]
    CaNotFound(String),

    #[error("Organization {0} declares no peer administrator identity")]
    MissingPeerAdmin(String),
}
