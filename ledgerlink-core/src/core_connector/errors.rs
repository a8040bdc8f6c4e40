//! Connector error taxonomy

use thiserror::Error;

use crate::core_ca::CaError;
use crate::core_client::ClientError;
use crate::core_connector::report::ChannelInitReport;
use crate::core_topology::TopologyError;

/// Result type for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Failures surfaced by connector operations.
///
/// The connector performs zero error recovery: configuration defects are
/// named explicitly, everything surfaced by the CA service or the ledger
/// client passes through unmodified.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Topology/setup defect local to the connector; not retryable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Topology-level configuration defect (CA lookup, missing peer admin)
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// CA service or transport failure, propagated unmodified
    #[error(transparent)]
    Ca(#[from] CaError),

    /// Ledger client failure, propagated unmodified
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Channel initialization aborted under the fail-fast policy.
    ///
    /// The report records which channels were initialized before the abort,
    /// which one failed, and which were never attempted.
    #[error("Channel initialization aborted at {channel}")]
    ChannelInit {
        channel: String,
        report: ChannelInitReport,
        #[source]
        source: ClientError,
    },
}
