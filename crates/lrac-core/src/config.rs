//! Ledger configuration.
//!
//! `LedgerConfig` is deserialized from TOML.  Every field has a default, so
//! an empty document yields the stock configuration:
//!
//! ```toml
//! difficulty = 2
//! max_iterations = 1000000
//! registration_prefix = "LRAC"
//!
//! [genesis_actor]
//! user_id = "system"
//! user_email = "system@lrac.local"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use lrac_contracts::{Actor, LedgerError, LedgerResult};

/// Leading zero hex characters required of every mined hash.
pub const DEFAULT_DIFFICULTY: usize = 2;

/// Prefix of certificate registration ids.
pub const DEFAULT_REGISTRATION_PREFIX: &str = "LRAC";

/// A SHA-256 hex digest has 64 characters; no difficulty above that can be met.
pub const MAX_DIFFICULTY: usize = 64;

/// Tunables for mining, genesis and certificate issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub difficulty: usize,

    /// Upper bound on nonce attempts per block.  `None` mines until found.
    pub max_iterations: Option<u64>,

    pub registration_prefix: String,

    /// The identity the genesis block is attributed to.
    pub genesis_actor: GenesisActor,
}

/// TOML form of the genesis block's actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisActor {
    pub user_id: String,
    pub user_email: String,
}

impl Default for GenesisActor {
    fn default() -> Self {
        Self {
            user_id: "system".to_string(),
            user_email: "system@lrac.local".to_string(),
        }
    }
}

impl From<&GenesisActor> for Actor {
    fn from(g: &GenesisActor) -> Self {
        Actor::new(g.user_id.clone(), g.user_email.clone())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            max_iterations: None,
            registration_prefix: DEFAULT_REGISTRATION_PREFIX.to_string(),
            genesis_actor: GenesisActor::default(),
        }
    }
}

impl LedgerConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `LedgerError::ConfigError` if the TOML is malformed or a
    /// value is out of range.
    pub fn from_toml_str(s: &str) -> LedgerResult<Self> {
        let config: LedgerConfig = toml::from_str(s).map_err(|e| LedgerError::ConfigError {
            reason: format!("failed to parse ledger TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as ledger configuration.
    pub fn from_file(path: &Path) -> LedgerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LedgerError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check value ranges.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::ConfigError {
                reason: format!(
                    "difficulty must be between 1 and {}, got {}",
                    MAX_DIFFICULTY, self.difficulty
                ),
            });
        }
        if self.max_iterations == Some(0) {
            return Err(LedgerError::ConfigError {
                reason: "max_iterations must be at least 1 when set".to_string(),
            });
        }
        if self.registration_prefix.trim().is_empty() {
            return Err(LedgerError::ConfigError {
                reason: "registration_prefix must not be empty".to_string(),
            });
        }
        if self.genesis_actor.user_id.trim().is_empty()
            || self.genesis_actor.user_email.trim().is_empty()
        {
            return Err(LedgerError::ConfigError {
                reason: "genesis_actor needs a user_id and user_email".to_string(),
            });
        }
        Ok(())
    }
}
