//! Network connector
//!
//! The connector is the façade client applications use to reach a
//! permissioned-ledger network: it binds a user-identity context onto the
//! ledger client handle, initializes the channels a topology declares, and
//! delegates identity enrollment/registration to a named certificate
//! authority within that topology.
//!
//! ## Architecture
//!
//! The capability contract is the [`Connector`] trait; each configuration
//! source is an interchangeable strategy variant implementing it.
//! [`NetworkConfigConnector`] is the variant backed by a declarative
//! [`NetworkTopology`]. External capabilities sit behind trait seams
//! ([`LedgerClient`], [`CaConnect`]) so production code wraps the real SDK
//! while tests inject in-memory stubs.
//!
//! ## Lifecycle
//!
//! Two phases only: unconfigured, then constructed-and-ready. Construction
//! is fail-fast: any failure while binding the identity context or eagerly
//! initializing channels aborts the build and no connector is returned.
//! There is no reconfiguration, teardown, or reconnection.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core_ca::{CaConnect, RegistrationRequest};
use crate::core_client::{LedgerChannel, LedgerClient};
use crate::core_identity::UserIdentity;
use crate::core_topology::NetworkTopology;

mod errors;
mod options;
mod report;

#[cfg(test)]
mod tests;

pub use errors::{ConnectorError, ConnectorResult};
pub use options::{ChannelInitPolicy, ConnectorOptions};
pub use report::{ChannelInitEntry, ChannelInitOutcome, ChannelInitReport};

/// Capability contract of a network connector.
///
/// One trait instead of an inheritance hierarchy: strategy variants differ
/// only in which configuration source they are built from.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Bind the active user-identity context.
    ///
    /// Last-write-wins with one fallback tier: a supplied identity always
    /// wins; otherwise an existing context is kept; otherwise the
    /// configuration source's default administrative identity is bound.
    fn init_user_context(&mut self, identity: Option<UserIdentity>) -> ConnectorResult<()>;

    /// Initialize every channel the configuration source declares, in
    /// declared order, returning a per-channel report.
    async fn init_channels(&mut self) -> ConnectorResult<ChannelInitReport>;

    /// Enroll `user_name` with the CA named `ca_key`, returning a new
    /// identity carrying the issued credential material.
    async fn enroll_user(
        &self,
        ca_key: &str,
        user_name: &str,
        user_secret: &str,
    ) -> ConnectorResult<UserIdentity>;

    /// Register `user_name` with the CA named `ca_key`, acting as that CA's
    /// first declared registrar. Returns the one-time secret the CA
    /// allocates for the new identity.
    async fn register_user(
        &self,
        ca_key: &str,
        user_name: &str,
        user_affiliation: &str,
    ) -> ConnectorResult<String>;
}

/// Connector strategy backed by a declarative network topology
pub struct NetworkConfigConnector {
    topology: NetworkTopology,
    client: Box<dyn LedgerClient>,
    ca_connect: Arc<dyn CaConnect>,
    channels: HashMap<String, Box<dyn LedgerChannel>>,
    default_channel: Option<String>,
    options: ConnectorOptions,
}

// Manual impl: the client handle and CA factory are trait objects without
// a Debug bound.
impl fmt::Debug for NetworkConfigConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfigConnector")
            .field("topology", &self.topology)
            .field("default_channel", &self.default_channel)
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl NetworkConfigConnector {
    /// Start building a connector for the given topology
    pub fn builder(topology: NetworkTopology) -> NetworkConfigConnectorBuilder {
        NetworkConfigConnectorBuilder::new(topology)
    }

    /// The topology this connector was built from
    pub fn topology(&self) -> &NetworkTopology {
        &self.topology
    }

    /// The active user-identity context bound on the client handle
    pub fn user_context(&self) -> Option<&UserIdentity> {
        self.client.user_context()
    }

    /// An initialized channel by name
    pub fn channel(&self, name: &str) -> Option<&dyn LedgerChannel> {
        self.channels.get(name).map(|c| c.as_ref())
    }

    /// The channel named as default at construction, if initialized
    pub fn default_channel(&self) -> Option<&dyn LedgerChannel> {
        self.default_channel
            .as_deref()
            .and_then(|name| self.channel(name))
    }

    /// Like [`Connector::register_user`], but selects the registrar by
    /// explicit name instead of positional first.
    pub async fn register_user_as(
        &self,
        ca_key: &str,
        registrar_name: &str,
        user_name: &str,
        user_affiliation: &str,
    ) -> ConnectorResult<String> {
        let ca = self.topology.certificate_authority(ca_key)?;
        let registrar = ca
            .registrars
            .iter()
            .find(|r| r.name == registrar_name)
            .ok_or_else(|| {
                ConnectorError::Configuration(format!(
                    "CA {} has no registrar named {}",
                    ca_key, registrar_name
                ))
            })?
            .clone();

        self.register_with(
            ca_key,
            &registrar.name,
            &registrar.enroll_secret,
            user_name,
            user_affiliation,
        )
        .await
    }

    /// Load one channel definition into the client handle and bring it to
    /// the ready state.
    async fn init_channel(&mut self, name: &str) -> ConnectorResult<()> {
        let mut channel = self
            .client
            .load_channel(name, &self.topology, &self.options)
            .await?;
        channel.initialize().await?;
        self.channels.insert(name.to_string(), channel);
        Ok(())
    }

    /// Shared enroll-then-register path. The registration request is
    /// submitted as the freshly enrolled registrar.
    async fn register_with(
        &self,
        ca_key: &str,
        registrar_name: &str,
        registrar_secret: &str,
        user_name: &str,
        user_affiliation: &str,
    ) -> ConnectorResult<String> {
        debug!(ca = %ca_key, registrar = %registrar_name, "resolved registrar");

        let admin = self
            .enroll_user(ca_key, registrar_name, registrar_secret)
            .await?;

        let request = RegistrationRequest::new(user_name, user_affiliation);
        let ca = self.topology.certificate_authority(ca_key)?;
        let service = self.ca_connect.connect(ca)?;
        let secret = service.register(&request, &admin).await?;
        Ok(secret)
    }
}

#[async_trait]
impl Connector for NetworkConfigConnector {
    fn init_user_context(&mut self, identity: Option<UserIdentity>) -> ConnectorResult<()> {
        if let Some(identity) = identity {
            self.client.set_user_context(identity)?;
        } else if self.client.user_context().is_none() {
            let admin = self.topology.peer_admin()?;
            self.client.set_user_context(admin)?;
        }
        Ok(())
    }

    async fn init_channels(&mut self) -> ConnectorResult<ChannelInitReport> {
        let policy = self.options.channel_init_policy;
        let names: Vec<String> = self.topology.channel_names().to_vec();

        let mut report = ChannelInitReport::new();
        let mut abort: Option<(String, ConnectorError)> = None;

        for name in names {
            if abort.is_some() {
                report.record(name, ChannelInitOutcome::Skipped);
                continue;
            }

            match self.init_channel(&name).await {
                Ok(()) => {
                    info!(channel = %name, "channel initialized");
                    report.record(name, ChannelInitOutcome::Initialized);
                }
                Err(err) => {
                    report.record(name.clone(), ChannelInitOutcome::Failed(err.to_string()));
                    if policy == ChannelInitPolicy::FailFast {
                        abort = Some((name, err));
                    }
                }
            }
        }

        match abort {
            Some((channel, ConnectorError::Client(source))) => Err(ConnectorError::ChannelInit {
                channel,
                report,
                source,
            }),
            Some((_, err)) => Err(err),
            None => Ok(report),
        }
    }

    async fn enroll_user(
        &self,
        ca_key: &str,
        user_name: &str,
        user_secret: &str,
    ) -> ConnectorResult<UserIdentity> {
        let ca = self.topology.certificate_authority(ca_key)?;
        let msp_id = self.topology.client_organization()?.msp_id.clone();

        let service = self.ca_connect.connect(ca)?;
        let enrollment = service.enroll(user_name, user_secret).await?;

        Ok(UserIdentity::enrolled(user_name, msp_id, enrollment))
    }

    async fn register_user(
        &self,
        ca_key: &str,
        user_name: &str,
        user_affiliation: &str,
    ) -> ConnectorResult<String> {
        let ca = self.topology.certificate_authority(ca_key)?;
        let registrar = ca.registrars.first().cloned().ok_or_else(|| {
            ConnectorError::Configuration(format!("CA {} declares no registrars", ca_key))
        })?;

        self.register_with(
            ca_key,
            &registrar.name,
            &registrar.enroll_secret,
            user_name,
            user_affiliation,
        )
        .await
    }
}

/// Builder for [`NetworkConfigConnector`].
///
/// `build` is fail-fast: identity binding and (if requested) eager channel
/// initialization both run to completion before a connector is returned.
pub struct NetworkConfigConnectorBuilder {
    topology: NetworkTopology,
    identity: Option<UserIdentity>,
    default_channel: Option<String>,
    init_channels: bool,
    options: ConnectorOptions,
    client: Option<Box<dyn LedgerClient>>,
    ca_connect: Option<Arc<dyn CaConnect>>,
}

impl NetworkConfigConnectorBuilder {
    pub fn new(topology: NetworkTopology) -> Self {
        Self {
            topology,
            identity: None,
            default_channel: None,
            init_channels: false,
            options: ConnectorOptions::default(),
            client: None,
            ca_connect: None,
        }
    }

    /// Caller-supplied identity; becomes the active context unconditionally
    pub fn identity(mut self, identity: UserIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Channel returned by `default_channel()` after initialization
    pub fn default_channel(mut self, name: impl Into<String>) -> Self {
        self.default_channel = Some(name.into());
        self
    }

    /// Eagerly initialize every declared channel during `build`
    pub fn init_channels(mut self, enabled: bool) -> Self {
        self.init_channels = enabled;
        self
    }

    pub fn options(mut self, options: ConnectorOptions) -> Self {
        self.options = options;
        self
    }

    /// The ledger client handle this connector will own exclusively
    pub fn client(mut self, client: Box<dyn LedgerClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Factory for CA clients bound to topology descriptors
    pub fn ca_connect(mut self, ca_connect: Arc<dyn CaConnect>) -> Self {
        self.ca_connect = Some(ca_connect);
        self
    }

    pub async fn build(self) -> ConnectorResult<NetworkConfigConnector> {
        let client = self.client.ok_or_else(|| {
            ConnectorError::Configuration("no ledger client supplied".to_string())
        })?;
        let ca_connect = self.ca_connect.ok_or_else(|| {
            ConnectorError::Configuration("no CA connect factory supplied".to_string())
        })?;

        self.topology.validate()?;

        let mut connector = NetworkConfigConnector {
            topology: self.topology,
            client,
            ca_connect,
            channels: HashMap::new(),
            default_channel: self.default_channel,
            options: self.options,
        };

        connector.init_user_context(self.identity)?;

        if self.init_channels {
            connector.init_channels().await?;
        }

        Ok(connector)
    }
}
