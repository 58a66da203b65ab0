//! Session gate configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{CompanionError, CompanionResult};
use crate::models::PageId;

/// Configuration for the session gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Free trial length. The trial expires once strictly more whole days have elapsed.
    pub trial_length_days: i64,
    /// Local flag written by the Disclaimer page on acceptance.
    pub local_flag_key: String,
    /// Where anonymous visitors on protected pages are sent.
    pub anonymous_landing: PageId,
    /// Where authenticated visitors requesting onboarding pages are sent.
    pub authenticated_home: PageId,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            trial_length_days: 10,
            local_flag_key: "disclaimer_agreed".to_string(),
            anonymous_landing: PageId::Disclaimer,
            authenticated_home: PageId::Dashboard,
        }
    }
}

impl GateConfig {
    /// Reject settings that would make the gate redirect in a loop.
    pub fn validate(&self) -> CompanionResult<()> {
        if self.trial_length_days < 0 {
            return Err(CompanionError::Config(format!(
                "trial_length_days must be non-negative, got {}",
                self.trial_length_days
            )));
        }
        if self.local_flag_key.trim().is_empty() {
            return Err(CompanionError::Config(
                "local_flag_key must not be empty".to_string(),
            ));
        }
        if !self.anonymous_landing.is_public() {
            return Err(CompanionError::Config(format!(
                "anonymous_landing {} is not a public page",
                self.anonymous_landing
            )));
        }
        if self.authenticated_home.is_onboarding() {
            return Err(CompanionError::Config(format!(
                "authenticated_home {} is an onboarding page",
                self.authenticated_home
            )));
        }
        Ok(())
    }
}
