//! Certificate-authority service seam
//!
//! The CA service is an external capability; this module defines the trait
//! boundary the connector calls through. In production an implementation
//! wraps the real CA client bound to a descriptor's endpoint. In tests the
//! seam is backed by in-memory stubs.

use async_trait::async_trait;
use thiserror::Error;

use crate::core_identity::{Enrollment, UserIdentity};
use crate::core_topology::CaDescriptor;

/// Result type for CA operations
pub type CaResult<T> = Result<T, CaError>;

/// Failures surfaced by the CA service or its transport.
///
/// The connector propagates these unmodified; it never retries, wraps, or
/// translates them.
#[derive(Debug, Error)]
pub enum CaError {
    /// The descriptor's endpoint could not be used (e.g. malformed URL)
    #[error("Invalid CA endpoint: {0}")]
    Endpoint(String),

    /// The CA endpoint could not be reached
    #[error("CA transport failure: {0}")]
    Transport(String),

    /// The CA answered but the exchange failed at the protocol level
    #[error("CA protocol failure: {0}")]
    Protocol(String),

    /// The CA rejected the request (bad credentials, duplicate name, ...)
    #[error("CA rejected request: {0}")]
    Rejected(String),
}

/// Pre-authorization request for a new identity name.
///
/// Submitting one yields a one-time secret that is later consumed during
/// enrollment of that identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub affiliation: String,
}

impl RegistrationRequest {
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
        }
    }
}

/// A CA client bound to one endpoint
#[async_trait]
pub trait CaService: Send + Sync {
    /// Perform the enroll handshake for `name`/`secret`, returning the
    /// signed credential material the CA issues. One network round trip.
    async fn enroll(&self, name: &str, secret: &str) -> CaResult<Enrollment>;

    /// Submit a registration request as an enrolled administrator.
    /// Returns the one-time secret the CA allocates for the new identity.
    async fn register(
        &self,
        request: &RegistrationRequest,
        registrar: &UserIdentity,
    ) -> CaResult<String>;
}

/// Factory that builds a [`CaService`] bound to a descriptor's endpoint
pub trait CaConnect: Send + Sync {
    fn connect(&self, ca: &CaDescriptor) -> CaResult<Box<dyn CaService>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_fields() {
        let req = RegistrationRequest::new("bob", "org1.department1");
        assert_eq!(req.name, "bob");
        assert_eq!(req.affiliation, "org1.department1");
    }

    #[test]
    fn test_ca_error_display() {
        let err = CaError::Endpoint("not a url".to_string());
        assert_eq!(err.to_string(), "Invalid CA endpoint: not a url");
    }
}
