//! Ledger client seam
//!
//! Trait boundary over the SDK-level client handle that submits and queries
//! the ledger. The connector owns one client exclusively, binds its identity
//! context, and loads channels into it from a topology. Production
//! implementations wrap the real ledger SDK; tests use in-memory stubs.

use async_trait::async_trait;
use thiserror::Error;

use crate::core_connector::ConnectorOptions;
use crate::core_identity::UserIdentity;
use crate::core_topology::NetworkTopology;

/// Result type for client-handle operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures surfaced by the ledger client; propagated unmodified
#[derive(Debug, Error)]
pub enum ClientError {
    /// Channel definition could not be loaded or initialized
    #[error("Channel failure: {0}")]
    Channel(String),

    /// The supplied identity context was not usable
    #[error("Identity failure: {0}")]
    Identity(String),

    /// Network-level failure talking to peers or orderers
    #[error("Client transport failure: {0}")]
    Transport(String),
}

/// A channel handle loaded from a topology, not yet necessarily ready
#[async_trait]
pub trait LedgerChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Bring the channel to the initialized/ready state. One round trip.
    async fn initialize(&mut self) -> ClientResult<()>;
}

/// The SDK-level client handle
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The active user-identity context, if one has been bound
    fn user_context(&self) -> Option<&UserIdentity>;

    /// Bind the active user-identity context
    fn set_user_context(&mut self, identity: UserIdentity) -> ClientResult<()>;

    /// Load a channel definition from the topology into this handle.
    /// The options bag carries SDK-defined keys the implementation may honor.
    async fn load_channel(
        &mut self,
        name: &str,
        topology: &NetworkTopology,
        options: &ConnectorOptions,
    ) -> ClientResult<Box<dyn LedgerChannel>>;
}
