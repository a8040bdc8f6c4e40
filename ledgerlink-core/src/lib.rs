//! ledgerlink-core: connector library for permissioned-ledger networks
//!
//! Builds a ready-to-use client handle from a declarative network topology:
//! binds a user-identity context, initializes the declared channels, and
//! delegates identity enrollment/registration to a certificate authority
//! named within the topology.

pub mod core_ca;
pub mod core_client;
pub mod core_connector;
pub mod core_identity;
pub mod core_topology;
pub mod logging;
pub mod test_utils;

pub use core_ca::{CaConnect, CaError, CaService, RegistrationRequest};
pub use core_client::{ClientError, LedgerChannel, LedgerClient};
pub use core_connector::{
    ChannelInitOutcome, ChannelInitPolicy, ChannelInitReport, Connector, ConnectorError,
    ConnectorOptions, NetworkConfigConnector,
};
pub use core_identity::{Enrollment, UserIdentity};
pub use core_topology::{NetworkTopology, TopologyError};
pub use logging::{init_logging, LogLevel};
