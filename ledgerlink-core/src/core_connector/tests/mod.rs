//! Connector scenario tests
//!
//! Exercise the connector against in-memory stubs of the ledger client and
//! the CA service: construction and identity binding, channel
//! initialization under both policies, and the enroll/register paths.

mod ca_tests;
