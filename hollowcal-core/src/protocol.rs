//! Gateway protocol types.
//!
//! Defines the JSON protocol spoken between hollowcal and the per-backend
//! gateway binaries over stdin/stdout. The gateway wraps the wallet
//! connector and the contract SDK; everything that prompts for approval,
//! signs or talks to the ledger lives behind this protocol. Any executable
//! that speaks it can be a gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A typed gateway command: params struct plus its response type.
pub trait GatewayCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

/// Commands that gateways must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Connect,
    Disconnect,
    LoadSigner,
    Deploy,
    GetAllKeys,
    GetStorageValues,
    Put,
    Update,
}

/// Request sent to a gateway.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by a gateway.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

// ============================================================================
// Signing
// ============================================================================

/// Opaque signer reference issued by a gateway's `load_signer` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerHandle(pub String);

/// How storage writes and deployments are signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SigningMode {
    /// The backend's own wallet signs directly.
    UseWallet,
    /// An externally loaded signing adapter. The handle is fetched from
    /// the gateway on every bind, never cached.
    External { signer: SignerHandle },
}

/// Store binding carried by every storage command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub signing: SigningMode,
    pub contract_address: String,
}

// ============================================================================
// Contract init state
// ============================================================================

/// Initial contract state submitted on deployment.
///
/// Field names follow the contract's expected JSON, hence camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitState {
    pub owner: String,
    pub verification_key: Option<String>,
    pub is_proof_required: bool,
    pub can_evolve: bool,
    pub whitelist: Whitelist,
    pub is_whitelist_required: WhitelistRequired,
}

/// Addresses permitted to write, per operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whitelist {
    pub put: BTreeMap<String, bool>,
    pub update: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistRequired {
    pub put: bool,
    pub update: bool,
}

impl InitState {
    /// Owner-only access: just the deploying address may put or update.
    /// Proofs are disabled and the contract may evolve.
    pub fn for_owner(owner: &str) -> Self {
        let entry = BTreeMap::from([(owner.to_string(), true)]);
        InitState {
            owner: owner.to_string(),
            verification_key: None,
            is_proof_required: false,
            can_evolve: true,
            whitelist: Whitelist {
                put: entry.clone(),
                update: entry,
            },
            is_whitelist_required: WhitelistRequired {
                put: true,
                update: true,
            },
        }
    }
}

// ============================================================================
// Command params and responses
// ============================================================================

/// Open the backend's wallet connector and wait for approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connect {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectData {
    pub address: String,
}

impl GatewayCommand for Connect {
    type Response = ConnectData;
    fn command() -> Command {
        Command::Connect
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disconnect {}

impl GatewayCommand for Disconnect {
    type Response = ();
    fn command() -> Command {
        Command::Disconnect
    }
}

/// Load the externally provided signing adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSigner {}

impl GatewayCommand for LoadSigner {
    type Response = SignerHandle;
    fn command() -> Command {
        Command::LoadSigner
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deploy {
    pub signing: SigningMode,
    pub init_state: InitState,
}

/// An empty `contract_address` means the upload did not produce a
/// contract; callers treat it as failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployData {
    #[serde(default)]
    pub contract_address: String,
}

impl GatewayCommand for Deploy {
    type Response = DeployData;
    fn command() -> Command {
        Command::Deploy
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAllKeys {
    #[serde(flatten)]
    pub binding: Binding,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysData {
    #[serde(default)]
    pub keys: Vec<String>,
}

impl GatewayCommand for GetAllKeys {
    type Response = KeysData;
    fn command() -> Command {
        Command::GetAllKeys
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStorageValues {
    #[serde(flatten)]
    pub binding: Binding,
    pub keys: Vec<String>,
}

/// Batched storage read result.
///
/// The mapping may be absent on a fresh contract; missing maps decode as
/// empty. A `null` value is the ledger's own tombstone marker for a key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageBatch {
    #[serde(default, rename = "cachedValue")]
    pub cached_value: BTreeMap<String, Option<String>>,
}

impl GatewayCommand for GetStorageValues {
    type Response = StorageBatch;
    fn command() -> Command {
        Command::GetStorageValues
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Put {
    #[serde(flatten)]
    pub binding: Binding,
    pub key: String,
    pub value: String,
}

impl GatewayCommand for Put {
    type Response = ();
    fn command() -> Command {
        Command::Put
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    #[serde(flatten)]
    pub binding: Binding,
    pub key: String,
    pub value: String,
}

impl GatewayCommand for Update {
    type Response = ();
    fn command() -> Command {
        Command::Update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_state_wire_shape() {
        let json = serde_json::to_value(InitState::for_owner("addr1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "owner": "addr1",
                "verificationKey": null,
                "isProofRequired": false,
                "canEvolve": true,
                "whitelist": {
                    "put": { "addr1": true },
                    "update": { "addr1": true },
                },
                "isWhitelistRequired": { "put": true, "update": true },
            })
        );
    }

    #[test]
    fn signing_mode_is_tagged() {
        let json = serde_json::to_value(SigningMode::UseWallet).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "use_wallet" }));

        let json = serde_json::to_value(SigningMode::External {
            signer: SignerHandle("evm".to_string()),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "external", "signer": "evm" })
        );
    }

    #[test]
    fn storage_batch_tolerates_missing_mapping() {
        let batch: StorageBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.cached_value.is_empty());

        let batch: StorageBatch =
            serde_json::from_str(r#"{"cachedValue":{"0":"x","1":null}}"#).unwrap();
        assert_eq!(batch.cached_value.get("0"), Some(&Some("x".to_string())));
        assert_eq!(batch.cached_value.get("1"), Some(&None));
    }

    #[test]
    fn response_parses_both_arms() {
        let ok: Response<ConnectData> =
            serde_json::from_str(r#"{"status":"success","data":{"address":"a"}}"#).unwrap();
        assert!(matches!(ok, Response::Success { data } if data.address == "a"));

        let err: Response<ConnectData> =
            serde_json::from_str(r#"{"status":"error","error":"rejected"}"#).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "rejected"));
    }
}
