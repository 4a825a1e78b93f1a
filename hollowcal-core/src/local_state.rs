//! Durable local state.
//!
//! One small TOML file under the platform config directory holds the
//! deployed contract address (overwritten on redeploy, never deleted) and
//! the connection a previous invocation left active, so separate CLI
//! invocations behave like page reloads of one browser session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::{HollowCalError, HollowCalResult};

const STATE_FILE: &str = "state.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateData {
    contract_address: Option<String>,
    session: Option<SavedSession>,
}

/// The connection a previous invocation left active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub backend: Backend,
    pub address: String,
}

/// Handle on the state file; mutations are explicit and written back with
/// [`LocalState::save`].
#[derive(Debug)]
pub struct LocalState {
    path: PathBuf,
    data: StateData,
}

impl LocalState {
    /// Load from the default location. An absent file means empty state.
    pub fn load() -> HollowCalResult<Self> {
        Self::load_from(Self::default_path()?)
    }

    pub fn load_from(path: PathBuf) -> HollowCalResult<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| HollowCalError::State(e.to_string()))?
        } else {
            StateData::default()
        };
        Ok(LocalState { path, data })
    }

    fn default_path() -> HollowCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HollowCalError::State("Could not determine config directory".into()))?;
        Ok(config_dir.join("hollowcal").join(STATE_FILE))
    }

    pub fn contract_address(&self) -> Option<&str> {
        self.data
            .contract_address
            .as_deref()
            .filter(|address| !address.is_empty())
    }

    /// Overwrites any prior address; the entry is never deleted.
    pub fn set_contract_address(&mut self, address: &str) {
        self.data.contract_address = Some(address.to_string());
    }

    pub fn session(&self) -> Option<&SavedSession> {
        self.data.session.as_ref()
    }

    pub fn set_session(&mut self, backend: Backend, address: &str) {
        self.data.session = Some(SavedSession {
            backend,
            address: address.to_string(),
        });
    }

    pub fn clear_session(&mut self) {
        self.data.session = None;
    }

    /// Write the state file via a temp file and rename.
    pub fn save(&self) -> HollowCalResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(&self.data)
            .map_err(|e| HollowCalError::State(e.to_string()))?;
        let temp = self.path.with_extension("toml.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
