//! User identity types for the connector
//!
//! An identity is an enrolled (or to-be-enrolled) network participant: a name,
//! the MSP id of the organizational trust domain it belongs to, and, once
//! enrolled, the credential material a certificate authority issued for it.

use serde::{Deserialize, Serialize};

/// Signed credential material returned by a certificate authority.
///
/// The contents are opaque to the connector; they are produced by the CA
/// service and consumed by the ledger client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment certificate in PEM form
    pub certificate_pem: String,
    /// Private key in PEM form
    pub private_key_pem: String,
}

impl Enrollment {
    pub fn new(certificate_pem: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        Self {
            certificate_pem: certificate_pem.into(),
            private_key_pem: private_key_pem.into(),
        }
    }
}

/// A network participant identity.
///
/// Either supplied by the caller at connector construction, derived from the
/// topology's peer-administrator credential, or produced by an enroll
/// operation. Ownership transfers to the caller on return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    name: String,
    msp_id: String,
    enrollment: Option<Enrollment>,
}

impl UserIdentity {
    /// Create an identity without enrollment material (not yet enrolled)
    pub fn new(name: impl Into<String>, msp_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            msp_id: msp_id.into(),
            enrollment: None,
        }
    }

    /// Create an identity carrying enrollment material
    pub fn enrolled(
        name: impl Into<String>,
        msp_id: impl Into<String>,
        enrollment: Enrollment,
    ) -> Self {
        Self {
            name: name.into(),
            msp_id: msp_id.into(),
            enrollment: Some(enrollment),
        }
    }

    /// The participant name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the organizational trust domain this identity belongs to
    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Credential material, if this identity has been enrolled
    pub fn enrollment(&self) -> Option<&Enrollment> {
        self.enrollment.as_ref()
    }

    /// Whether this identity carries enrollment material
    pub fn is_enrolled(&self) -> bool {
        self.enrollment.is_some()
    }
}
