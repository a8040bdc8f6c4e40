//! Per-channel initialization report
//!
//! Channel initialization used to be all-or-nothing with no record of which
//! channels had already been brought up. The report makes the outcome of
//! every declared channel explicit, whichever policy was in force.

/// Outcome of one channel's initialization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelInitOutcome {
    /// Loaded and brought to the ready state
    Initialized,
    /// Attempted and failed; carries the failure description
    Failed(String),
    /// Never attempted because an earlier channel aborted the sequence
    Skipped,
}

/// One entry per channel declared in the topology, in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInitEntry {
    pub channel: String,
    pub outcome: ChannelInitOutcome,
}

/// Report covering every channel named in the topology
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelInitReport {
    entries: Vec<ChannelInitEntry>,
}

impl ChannelInitReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, channel: impl Into<String>, outcome: ChannelInitOutcome) {
        self.entries.push(ChannelInitEntry {
            channel: channel.into(),
            outcome,
        });
    }

    /// All entries, in the topology's declared channel order
    pub fn entries(&self) -> &[ChannelInitEntry] {
        &self.entries
    }

    /// Outcome for a specific channel, if it appears in the report
    pub fn outcome(&self, channel: &str) -> Option<&ChannelInitOutcome> {
        self.entries
            .iter()
            .find(|e| e.channel == channel)
            .map(|e| &e.outcome)
    }

    /// Names of the channels that reached the ready state
    pub fn initialized(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.outcome == ChannelInitOutcome::Initialized)
            .map(|e| e.channel.as_str())
    }

    /// Whether every declared channel reached the ready state
    pub fn all_initialized(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.outcome == ChannelInitOutcome::Initialized)
    }
}
