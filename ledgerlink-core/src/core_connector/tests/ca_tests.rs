//! Enrollment and registration against a stub CA service

use std::sync::Arc;

use crate::core_ca::CaError;
use crate::core_connector::{Connector, ConnectorError, NetworkConfigConnector};
use crate::core_topology::{NetworkTopology, TopologyError};
use crate::test_utils::{
    sample_topology, topology_without_registrars, CaCall, StubCaConnect, StubLedgerClient,
};

async fn connector_with(
    topology: NetworkTopology,
    ca_connect: StubCaConnect,
) -> NetworkConfigConnector {
    NetworkConfigConnector::builder(topology)
        .client(Box::new(StubLedgerClient::new()))
        .ca_connect(Arc::new(ca_connect))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_enroll_user_carries_client_org_msp_id() {
    let ca = StubCaConnect::with_secret("unused");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let identity = connector.enroll_user("ca1", "alice", "pw").await.unwrap();

    assert_eq!(identity.name(), "alice");
    assert_eq!(identity.msp_id(), "Org1MSP");
    assert_eq!(
        identity.enrollment().unwrap().certificate_pem,
        "cert-for-alice"
    );
    assert_eq!(
        log.calls(),
        [CaCall::Enroll {
            name: "alice".to_string(),
            secret: "pw".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_enroll_with_unknown_ca_fails_before_any_network_call() {
    let ca = StubCaConnect::with_secret("unused");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let err = connector.enroll_user("nope", "alice", "pw").await.unwrap_err();

    assert!(matches!(
        err,
        ConnectorError::Topology(TopologyError::CaNotFound(_))
    ));
    assert_eq!(err.to_string(), "No CA with name nope found");
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_register_user_enrolls_first_registrar_then_registers() {
    let ca = StubCaConnect::with_secret("s3cret");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let secret = connector
        .register_user("ca1", "bob", "org1.department1")
        .await
        .unwrap();

    assert_eq!(secret, "s3cret");
    assert_eq!(
        log.calls(),
        [
            // First registrar of ca1, not "backup"
            CaCall::Enroll {
                name: "admin".to_string(),
                secret: "adminpw".to_string(),
            },
            CaCall::Register {
                name: "bob".to_string(),
                affiliation: "org1.department1".to_string(),
                registrar: "admin".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_register_with_unknown_ca_fails_before_any_network_call() {
    let ca = StubCaConnect::with_secret("s3cret");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let err = connector
        .register_user("nope", "bob", "org1.department1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConnectorError::Topology(TopologyError::CaNotFound(_))
    ));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_register_with_empty_registrar_list_is_configuration_error() {
    let ca = StubCaConnect::with_secret("s3cret");
    let log = ca.log();
    let connector = connector_with(topology_without_registrars(), ca).await;

    let err = connector
        .register_user("ca1", "bob", "org1.department1")
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::Configuration(_)));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_register_user_as_selects_registrar_by_name() {
    let ca = StubCaConnect::with_secret("s3cret");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let secret = connector
        .register_user_as("ca1", "backup", "bob", "org1.department1")
        .await
        .unwrap();

    assert_eq!(secret, "s3cret");
    assert_eq!(
        log.calls()[0],
        CaCall::Enroll {
            name: "backup".to_string(),
            secret: "backuppw".to_string(),
        }
    );
}

#[tokio::test]
async fn test_register_user_as_with_unknown_registrar() {
    let ca = StubCaConnect::with_secret("s3cret");
    let log = ca.log();
    let connector = connector_with(sample_topology(), ca).await;

    let err = connector
        .register_user_as("ca1", "nobody", "bob", "org1.department1")
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::Configuration(_)));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_ca_transport_failure_propagates_unmodified() {
    let connector = connector_with(sample_topology(), StubCaConnect::failing()).await;

    let err = connector.enroll_user("ca1", "alice", "pw").await.unwrap_err();

    assert!(matches!(err, ConnectorError::Ca(CaError::Endpoint(_))));
}
