pub mod gate_config;
pub mod observability_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use gate_config::GateConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;

use crate::errors::{CompanionError, CompanionResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanionConfig {
    pub gate: GateConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl CompanionConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Parse and validate in one step.
    pub fn load(toml_str: &str) -> CompanionResult<Self> {
        let config =
            Self::from_toml(toml_str).map_err(|e| CompanionError::Config(e.to_string()))?;
        config.gate.validate()?;
        debug!(
            trial_length_days = config.gate.trial_length_days,
            in_memory = config.storage.db_path.is_none(),
            "Config loaded"
        );
        Ok(config)
    }
}
