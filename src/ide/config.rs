//! Completion options

use std::time::Duration;

use super::merge::InterfacePreferences;

/// Options recognised by the resolution engine.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Filter candidates by access modifiers (false = everything is visible)
    pub honour_access_modifiers: bool,
    /// Match the typed prefix case-sensitively
    pub case_sensitive_prefix_match: bool,
    /// Only offer static members, whatever the request says
    pub static_members_only: bool,
    /// Longest wait for the host compiler model per type
    pub host_timeout: Duration,
    /// Longest total wait for the host compiler model across one resolution
    pub host_budget: Duration,
    /// Slice length between cancellation checks while waiting on the host model
    pub host_poll_interval: Duration,
    /// Narrower-interface ranking used at equal override distance
    pub interface_preferences: InterfacePreferences,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            honour_access_modifiers: true,
            case_sensitive_prefix_match: false,
            static_members_only: false,
            host_timeout: Duration::from_secs(2),
            host_budget: Duration::from_secs(5),
            host_poll_interval: Duration::from_millis(20),
            interface_preferences: InterfacePreferences::default(),
        }
    }
}

impl CompletionConfig {
    pub fn with_honour_access_modifiers(mut self, honour: bool) -> Self {
        self.honour_access_modifiers = honour;
        self
    }

    pub fn with_case_sensitive_prefix_match(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_prefix_match = case_sensitive;
        self
    }

    pub fn with_static_members_only(mut self, static_only: bool) -> Self {
        self.static_members_only = static_only;
        self
    }

    /// Set the host model wait budget and poll slice.
    pub fn with_host_timeout(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.host_timeout = timeout;
        self.host_poll_interval = poll_interval;
        self
    }

    /// Set the host model wait shared by every type of one resolution.
    pub fn with_host_budget(mut self, budget: Duration) -> Self {
        self.host_budget = budget;
        self
    }

    pub fn with_interface_preferences(mut self, preferences: InterfacePreferences) -> Self {
        self.interface_preferences = preferences;
        self
    }
}
