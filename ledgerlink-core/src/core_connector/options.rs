//! Connector options bag
//!
//! Carries the one policy knob the connector itself understands plus an
//! opaque key/value map whose recognized keys are defined by the underlying
//! SDK, not by this component.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How channel initialization treats a failing channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelInitPolicy {
    /// Abort the sequence at the first failure; remaining channels are
    /// never attempted. This is the default.
    #[default]
    FailFast,
    /// Attempt every channel and report per-channel outcomes, leaving the
    /// caller to decide whether partial availability is acceptable.
    BestEffort,
}

/// Options supplied at connector construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorOptions {
    #[serde(default)]
    pub channel_init_policy: ChannelInitPolicy,

    /// SDK-defined keys, passed through unmodified
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ConnectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_init_policy(mut self, policy: ChannelInitPolicy) -> Self {
        self.channel_init_policy = policy;
        self
    }

    /// Set an opaque SDK-defined option
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up an opaque SDK-defined option
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fail_fast() {
        assert_eq!(
            ConnectorOptions::default().channel_init_policy,
            ChannelInitPolicy::FailFast
        );
    }

    #[test]
    fn test_extra_keys_are_opaque() {
        let options = ConnectorOptions::new()
            .with_extra("grpc.keepalive_ms", serde_json::json!(30_000))
            .channel_init_policy(ChannelInitPolicy::BestEffort);

        assert_eq!(
            options.extra("grpc.keepalive_ms"),
            Some(&serde_json::json!(30_000))
        );
        assert_eq!(options.extra("unknown"), None);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ConnectorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ConnectorOptions::default());

        let options: ConnectorOptions =
            serde_json::from_str(r#"{"channel_init_policy": "best_effort"}"#).unwrap();
        assert_eq!(options.channel_init_policy, ChannelInitPolicy::BestEffort);
    }
}
