//! Network topology model
//!
//! A declarative, read-only description of a permissioned-ledger network:
//! organizations with their certificate authorities, the channel names a
//! client must initialize, and which organization the client acts for.
//!
//! Topologies are supplied externally, either pre-built or parsed from a
//! JSON/TOML connection profile. Once validated they are immutable for the
//! lifetime of any connector holding them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core_identity::{Enrollment, UserIdentity};

mod error;

pub use error::TopologyError;

/// Registrar credential entry of a certificate authority.
///
/// A registrar is an administrative principal allowed to register new
/// identities with the CA. The list order in the topology is the declared
/// order and is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrar {
    pub name: String,
    pub enroll_secret: String,
}

/// One certificate-authority entry, keyed by a caller-chosen name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaDescriptor {
    /// Lookup key; matched exactly and case-sensitively
    pub name: String,
    /// CA service endpoint
    pub url: String,
    /// Administrative principals allowed to register new identities
    #[serde(default)]
    pub registrars: Vec<Registrar>,
}

/// Peer-administrator credential declared by an organization.
///
/// Serves as the default identity context when a connector is built without
/// a caller-supplied identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub name: String,
    pub certificate_pem: String,
    pub private_key_pem: String,
}

/// An organization participating in the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    /// Membership-service-provider id of this organization's trust domain
    pub msp_id: String,
    #[serde(default)]
    pub certificate_authorities: Vec<CaDescriptor>,
    /// Peer-administrator credential, if the profile declares one
    #[serde(default)]
    pub admin: Option<AdminIdentity>,
}

/// The client section: which declared organization this client acts for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSection {
    pub organization: String,
}

/// Parsed, static description of the network.
///
/// Read-only for the connector's lifetime; there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    pub client: ClientSection,
    pub organizations: Vec<Organization>,
    /// Channel names in declared order; initialization follows this order
    #[serde(default)]
    pub channels: Vec<String>,
}

impl NetworkTopology {
    /// Parse a topology from a JSON connection profile
    pub fn from_json_str(s: &str) -> Result<Self, TopologyError> {
        let topology: Self =
            serde_json::from_str(s).map_err(|e| TopologyError::ParseError(e.to_string()))?;
        topology.validate()?;
        Ok(topology)
    }

    /// Parse a topology from a TOML connection profile
    pub fn from_toml_str(s: &str) -> Result<Self, TopologyError> {
        let topology: Self =
            toml::from_str(s).map_err(|e| TopologyError::ParseError(e.to_string()))?;
        topology.validate()?;
        Ok(topology)
    }

    /// Load a topology from a file, dispatching on the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TopologyError::FileReadError(e.to_string()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            other => Err(TopologyError::ParseError(format!(
                "Unsupported topology file extension: {:?}",
                other
            ))),
        }
    }

    /// Validate structural invariants
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.organizations.is_empty() {
            return Err(TopologyError::ValidationFailed(
                "topology declares no organizations".to_string(),
            ));
        }

        if !self
            .organizations
            .iter()
            .any(|org| org.name == self.client.organization)
        {
            return Err(TopologyError::ValidationFailed(format!(
                "client organization {} is not declared",
                self.client.organization
            )));
        }

        Ok(())
    }

    /// The organization this client acts for.
    ///
    /// Always succeeds on a validated topology.
    pub fn client_organization(&self) -> Result<&Organization, TopologyError> {
        self.organizations
            .iter()
            .find(|org| org.name == self.client.organization)
            .ok_or_else(|| {
                TopologyError::ValidationFailed(format!(
                    "client organization {} is not declared",
                    self.client.organization
                ))
            })
    }

    /// Channel names in declared order
    pub fn channel_names(&self) -> &[String] {
        &self.channels
    }

    /// Resolve a CA descriptor by name within the client organization's CA
    /// list. Exact, case-sensitive match; absence is a configuration error,
    /// never a silent `None`.
    pub fn certificate_authority(&self, ca_key: &str) -> Result<&CaDescriptor, TopologyError> {
        self.client_organization()?
            .certificate_authorities
            .iter()
            .find(|ca| ca.name == ca_key)
            .ok_or_else(|| TopologyError::CaNotFound(ca_key.to_string()))
    }

    /// Build the default administrative identity for the client organization
    pub fn peer_admin(&self) -> Result<UserIdentity, TopologyError> {
        let org = self.client_organization()?;
        let admin = org
            .admin
            .as_ref()
            .ok_or_else(|| TopologyError::MissingPeerAdmin(org.name.clone()))?;

        Ok(UserIdentity::enrolled(
            admin.name.clone(),
            org.msp_id.clone(),
            Enrollment::new(admin.certificate_pem.clone(), admin.private_key_pem.clone()),
        ))
    }
}
