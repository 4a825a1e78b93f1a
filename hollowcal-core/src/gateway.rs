//! Gateway subprocess client.
//!
//! Wallet connectors and the contract SDK live in per-backend gateway
//! binaries (`hollowcal-gateway-arweave`, `hollowcal-gateway-ethereum`)
//! discovered on PATH and spoken to with JSON over stdin/stdout. The
//! gateway owns approval prompts, transaction signing and deployment;
//! nothing ledger-level is reimplemented on this side.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::backend::Backend;
use crate::error::{HollowCalError, HollowCalResult};
use crate::protocol::{
    Binding, Command, Connect, Deploy, Disconnect, GatewayCommand, GetAllKeys, GetStorageValues,
    InitState, LoadSigner, Put, Request, Response, SignerHandle, SigningMode, StorageBatch, Update,
};
use crate::store::{Ledger, Store};

const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);
/// Connect and deploy block on wallet approval, so they get far longer.
const WALLET_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the per-backend gateway binaries.
#[derive(Clone, Debug, Default)]
pub struct Gateway;

impl Gateway {
    pub fn new() -> Self {
        Gateway
    }

    fn binary_path(backend: Backend) -> HollowCalResult<std::path::PathBuf> {
        let binary_name = backend.gateway_binary();
        which::which(binary_name)
            .map_err(|_| HollowCalError::GatewayNotInstalled(binary_name.to_string()))
    }

    /// Call a typed gateway command and return the result.
    async fn call<C: GatewayCommand>(
        &self,
        backend: Backend,
        cmd: C,
    ) -> HollowCalResult<C::Response> {
        timeout(STORAGE_TIMEOUT, Self::call_raw(backend, C::command(), cmd))
            .await
            .map_err(|_| HollowCalError::GatewayTimeout(STORAGE_TIMEOUT.as_secs()))?
    }

    /// Call a command that waits on user approval in the wallet.
    async fn call_interactive<C: GatewayCommand>(
        &self,
        backend: Backend,
        cmd: C,
    ) -> HollowCalResult<C::Response> {
        timeout(WALLET_TIMEOUT, Self::call_raw(backend, C::command(), cmd))
            .await
            .map_err(|_| HollowCalError::GatewayTimeout(WALLET_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes
    /// the response.
    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        backend: Backend,
        command: Command,
        params: P,
    ) -> HollowCalResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| HollowCalError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| HollowCalError::Serialization(e.to_string()))?;

        let binary_path = Self::binary_path(backend)?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                HollowCalError::Gateway(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        // Write request to stdin (unwrap safe: we piped stdin above)
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(HollowCalError::Gateway(format!(
                "Gateway exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.is_empty() {
            return Err(HollowCalError::Gateway("Gateway returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| HollowCalError::Gateway(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(HollowCalError::Gateway(error)),
        }
    }
}

impl Ledger for Gateway {
    type Store = ContractStore;

    async fn connect(&self, backend: Backend) -> HollowCalResult<String> {
        let data = self.call_interactive(backend, Connect {}).await?;
        Ok(data.address)
    }

    async fn disconnect(&self, backend: Backend) -> HollowCalResult<()> {
        self.call(backend, Disconnect {}).await
    }

    async fn load_signer(&self, backend: Backend) -> HollowCalResult<SignerHandle> {
        self.call(backend, LoadSigner {}).await
    }

    async fn deploy(
        &self,
        backend: Backend,
        signing: &SigningMode,
        init_state: &InitState,
    ) -> HollowCalResult<String> {
        let data = self
            .call_interactive(
                backend,
                Deploy {
                    signing: signing.clone(),
                    init_state: init_state.clone(),
                },
            )
            .await?;
        Ok(data.contract_address)
    }

    fn bind(
        &self,
        backend: Backend,
        signing: SigningMode,
        contract_address: String,
    ) -> ContractStore {
        ContractStore {
            gateway: self.clone(),
            backend,
            signing,
            contract_address,
        }
    }
}

/// A store handle bound to one contract through one backend's gateway.
#[derive(Clone, Debug)]
pub struct ContractStore {
    gateway: Gateway,
    backend: Backend,
    signing: SigningMode,
    contract_address: String,
}

impl ContractStore {
    fn binding(&self) -> Binding {
        Binding {
            signing: self.signing.clone(),
            contract_address: self.contract_address.clone(),
        }
    }
}

impl Store for ContractStore {
    fn contract_address(&self) -> &str {
        &self.contract_address
    }

    async fn get_all_keys(&self) -> HollowCalResult<Vec<String>> {
        let data = self
            .gateway
            .call(
                self.backend,
                GetAllKeys {
                    binding: self.binding(),
                },
            )
            .await?;
        Ok(data.keys)
    }

    async fn get_storage_values(&self, keys: &[String]) -> HollowCalResult<StorageBatch> {
        self.gateway
            .call(
                self.backend,
                GetStorageValues {
                    binding: self.binding(),
                    keys: keys.to_vec(),
                },
            )
            .await
    }

    async fn put(&self, key: &str, value: &str) -> HollowCalResult<()> {
        self.gateway
            .call(
                self.backend,
                Put {
                    binding: self.binding(),
                    key: key.to_string(),
                    value: value.to_string(),
                },
            )
            .await
    }

    async fn update(&self, key: &str, value: &str) -> HollowCalResult<()> {
        self.gateway
            .call(
                self.backend,
                Update {
                    binding: self.binding(),
                    key: key.to_string(),
                    value: value.to_string(),
                },
            )
            .await
    }
}
