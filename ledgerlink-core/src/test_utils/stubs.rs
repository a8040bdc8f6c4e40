//! In-memory stub implementations of the external trait seams
//!
//! The stubs record every call they receive so tests can assert not only on
//! results but on call order and on the absence of network activity.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::core_ca::{CaConnect, CaError, CaResult, CaService, RegistrationRequest};
use crate::core_client::{ClientError, ClientResult, LedgerChannel, LedgerClient};
use crate::core_connector::ConnectorOptions;
use crate::core_identity::{Enrollment, UserIdentity};
use crate::core_topology::{CaDescriptor, NetworkTopology};

/// One recorded CA interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaCall {
    Enroll {
        name: String,
        secret: String,
    },
    Register {
        name: String,
        affiliation: String,
        registrar: String,
    },
}

/// Shared, thread-safe log of CA interactions
#[derive(Debug, Default)]
pub struct CaCallLog(Mutex<Vec<CaCall>>);

impl CaCallLog {
    pub fn calls(&self) -> Vec<CaCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }

    fn push(&self, call: CaCall) {
        self.0.lock().unwrap().push(call);
    }
}

/// Stub CA factory allocating services that answer with a fixed secret
pub struct StubCaConnect {
    secret: String,
    log: Arc<CaCallLog>,
    fail_connect: bool,
}

impl StubCaConnect {
    /// A stub whose register calls always allocate `secret`
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            log: Arc::new(CaCallLog::default()),
            fail_connect: false,
        }
    }

    /// A stub whose connect attempts fail with an endpoint error
    pub fn failing() -> Self {
        Self {
            secret: String::new(),
            log: Arc::new(CaCallLog::default()),
            fail_connect: true,
        }
    }

    /// Handle to the shared call log, valid across connects
    pub fn log(&self) -> Arc<CaCallLog> {
        Arc::clone(&self.log)
    }
}

impl CaConnect for StubCaConnect {
    fn connect(&self, ca: &CaDescriptor) -> CaResult<Box<dyn CaService>> {
        if self.fail_connect {
            return Err(CaError::Endpoint(format!("cannot reach {}", ca.url)));
        }
        Ok(Box::new(StubCaService {
            secret: self.secret.clone(),
            log: Arc::clone(&self.log),
        }))
    }
}

struct StubCaService {
    secret: String,
    log: Arc<CaCallLog>,
}

#[async_trait]
impl CaService for StubCaService {
    async fn enroll(&self, name: &str, secret: &str) -> CaResult<Enrollment> {
        self.log.push(CaCall::Enroll {
            name: name.to_string(),
            secret: secret.to_string(),
        });
        Ok(Enrollment::new(
            format!("cert-for-{}", name),
            format!("key-for-{}", name),
        ))
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
        registrar: &UserIdentity,
    ) -> CaResult<String> {
        self.log.push(CaCall::Register {
            name: request.name.clone(),
            affiliation: request.affiliation.clone(),
            registrar: registrar.name().to_string(),
        });
        Ok(self.secret.clone())
    }
}

/// Stub ledger client recording channel-load attempts in order
pub struct StubLedgerClient {
    context: Option<UserIdentity>,
    attempts: Arc<Mutex<Vec<String>>>,
    fail_init_on: Option<String>,
    fail_load_on: Option<String>,
}

impl StubLedgerClient {
    pub fn new() -> Self {
        Self {
            context: None,
            attempts: Arc::new(Mutex::new(Vec::new())),
            fail_init_on: None,
            fail_load_on: None,
        }
    }

    /// A client that already carries an identity context
    pub fn with_context(identity: UserIdentity) -> Self {
        Self {
            context: Some(identity),
            ..Self::new()
        }
    }

    /// Force `initialize` to fail for the named channel
    pub fn fail_init_on(mut self, channel: impl Into<String>) -> Self {
        self.fail_init_on = Some(channel.into());
        self
    }

    /// Force `load_channel` to fail for the named channel
    pub fn fail_load_on(mut self, channel: impl Into<String>) -> Self {
        self.fail_load_on = Some(channel.into());
        self
    }

    /// Handle to the ordered list of channel-load attempts
    pub fn attempts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.attempts)
    }
}

impl Default for StubLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for StubLedgerClient {
    fn user_context(&self) -> Option<&UserIdentity> {
        self.context.as_ref()
    }

    fn set_user_context(&mut self, identity: UserIdentity) -> ClientResult<()> {
        self.context = Some(identity);
        Ok(())
    }

    async fn load_channel(
        &mut self,
        name: &str,
        _topology: &NetworkTopology,
        _options: &ConnectorOptions,
    ) -> ClientResult<Box<dyn LedgerChannel>> {
        self.attempts.lock().unwrap().push(name.to_string());

        if self.fail_load_on.as_deref() == Some(name) {
            return Err(ClientError::Channel(format!(
                "no definition for channel {}",
                name
            )));
        }

        Ok(Box::new(StubChannel {
            name: name.to_string(),
            fail_init: self.fail_init_on.as_deref() == Some(name),
            ready: false,
        }))
    }
}

struct StubChannel {
    name: String,
    fail_init: bool,
    ready: bool,
}

#[async_trait]
impl LedgerChannel for StubChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&mut self) -> ClientResult<()> {
        if self.ready {
            return Ok(());
        }
        if self.fail_init {
            return Err(ClientError::Channel(format!(
                "channel {} failed to initialize",
                self.name
            )));
        }
        self.ready = true;
        Ok(())
    }
}
