//! Seams over the external contract SDK.
//!
//! `Ledger` covers the wallet and deployment surface of a backend, `Store`
//! the key-value surface of one bound contract. The production
//! implementations live in [`crate::gateway`]; tests substitute in-memory
//! fakes. Both traits are used through generics, never trait objects.

use crate::backend::Backend;
use crate::error::HollowCalResult;
use crate::protocol::{InitState, SignerHandle, SigningMode, StorageBatch};

/// Key-value surface of a bound contract.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// Address of the contract this store is bound to; empty when the
    /// session has connected but not yet loaded or deployed a contract.
    fn contract_address(&self) -> &str;

    async fn get_all_keys(&self) -> HollowCalResult<Vec<String>>;

    /// Batched read. The result's mapping is empty rather than an error
    /// when the contract holds no cached state.
    async fn get_storage_values(&self, keys: &[String]) -> HollowCalResult<StorageBatch>;

    async fn put(&self, key: &str, value: &str) -> HollowCalResult<()>;

    /// Overwrite an existing key. Logical deletion goes through here with
    /// the tombstone record; keys are never physically removed.
    async fn update(&self, key: &str, value: &str) -> HollowCalResult<()>;
}

/// Wallet and deployment surface of a backend.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    type Store: Store;

    /// Open the wallet connector and wait for approval; returns the
    /// wallet address.
    async fn connect(&self, backend: Backend) -> HollowCalResult<String>;

    async fn disconnect(&self, backend: Backend) -> HollowCalResult<()>;

    /// Load the external signing adapter. Called on every bind for
    /// backends that need it; the handle is not cached.
    async fn load_signer(&self, backend: Backend) -> HollowCalResult<SignerHandle>;

    /// Deploy a contract with the given init state; returns the new
    /// contract address (empty when the upload produced none).
    async fn deploy(
        &self,
        backend: Backend,
        signing: &SigningMode,
        init_state: &InitState,
    ) -> HollowCalResult<String>;

    /// Bind a store handle to a contract address (possibly empty).
    fn bind(&self, backend: Backend, signing: SigningMode, contract_address: String)
    -> Self::Store;
}
