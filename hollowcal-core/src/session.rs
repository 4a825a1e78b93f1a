//! Connection and identity management.
//!
//! A session tracks which wallet backend is active, the wallet address,
//! the bound store handle and the reconciliation engine. Collaborators are
//! passed in explicitly; nothing reaches into ambient state.

use crate::backend::Backend;
use crate::calendar::CalendarView;
use crate::error::{HollowCalError, HollowCalResult};
use crate::event::Event;
use crate::local_state::LocalState;
use crate::protocol::{InitState, SigningMode};
use crate::store::{Ledger, Store};
use crate::sync::{self, EventDraft, EventSync, ReconcileStats};

pub struct Session<L: Ledger> {
    ledger: L,
    backend: Option<Backend>,
    address: String,
    store: Option<L::Store>,
    sync: EventSync,
}

impl<L: Ledger> Session<L> {
    pub fn new(ledger: L) -> Self {
        Session {
            ledger,
            backend: None,
            address: String::new(),
            store: None,
            sync: EventSync::new(),
        }
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    /// Address of the bound contract, if one is loaded or deployed.
    pub fn contract_address(&self) -> Option<&str> {
        self.store
            .as_ref()
            .map(|store| store.contract_address())
            .filter(|address| !address.is_empty())
    }

    /// Restore the connection a previous invocation left active (the
    /// page-reload path) and rebind the store to the stored contract
    /// address, if any.
    pub async fn restore(&mut self, state: &LocalState) -> HollowCalResult<()> {
        let Some(saved) = state.session() else {
            return Ok(());
        };
        self.backend = Some(saved.backend);
        self.address = saved.address.clone();
        self.rebind(state).await
    }

    /// Connect a wallet backend.
    ///
    /// Fails without touching any state when the other backend is already
    /// active. On success the address is known, the session is persisted,
    /// and the store is bound — to the durable contract address when one
    /// exists, otherwise with no contract yet.
    pub async fn connect(
        &mut self,
        backend: Backend,
        state: &mut LocalState,
    ) -> HollowCalResult<String> {
        if let Some(active) = self.backend {
            if active != backend {
                return Err(HollowCalError::WalletConflict(active));
            }
        }

        let address = self.ledger.connect(backend).await?;
        self.backend = Some(backend);
        self.address = address.clone();

        state.set_session(backend, &address);
        state.save()?;

        // A freshly known address may have a contract from an earlier
        // session.
        self.rebind(state).await?;

        Ok(address)
    }

    /// Tear down whichever backend is active. No-op when disconnected.
    pub async fn disconnect(&mut self, state: &mut LocalState) -> HollowCalResult<()> {
        let Some(backend) = self.backend else {
            return Ok(());
        };
        self.ledger.disconnect(backend).await?;

        self.backend = None;
        self.address.clear();
        self.store = None;

        state.clear_session();
        state.save()?;
        Ok(())
    }

    /// Deploy a fresh data contract owned by the connected address and
    /// persist its address, overwriting any prior one.
    ///
    /// Event numbering restarts from zero before dispatch, so a fresh
    /// contract's ids start clean. An empty resulting address is a
    /// failure and leaves the store unbound.
    pub async fn deploy(&mut self, state: &mut LocalState) -> HollowCalResult<String> {
        let backend = self.backend.ok_or(HollowCalError::NotConnected)?;
        let signing = self.signing_mode(backend).await?;
        let init_state = InitState::for_owner(&self.address);

        self.sync.reset();
        let contract_address = self.ledger.deploy(backend, &signing, &init_state).await?;
        if contract_address.is_empty() {
            return Err(HollowCalError::DeployFailed);
        }

        self.store = Some(self.ledger.bind(backend, signing, contract_address.clone()));

        state.set_contract_address(&contract_address);
        state.save()?;

        Ok(contract_address)
    }

    /// Bind the store to the durable contract address, when both an
    /// active backend and a stored address exist.
    async fn rebind(&mut self, state: &LocalState) -> HollowCalResult<()> {
        let Some(backend) = self.backend else {
            return Ok(());
        };
        let Some(address) = state.contract_address() else {
            return Ok(());
        };
        let signing = self.signing_mode(backend).await?;
        self.store = Some(self.ledger.bind(backend, signing, address.to_string()));
        Ok(())
    }

    /// The signing mode for a backend. Ethereum's signing adapter is
    /// unavailable until the connector is active, so it is loaded from
    /// the gateway on every call rather than cached.
    async fn signing_mode(&self, backend: Backend) -> HollowCalResult<SigningMode> {
        match backend {
            Backend::Arweave => Ok(SigningMode::UseWallet),
            Backend::Ethereum => {
                let signer = self.ledger.load_signer(backend).await?;
                Ok(SigningMode::External { signer })
            }
        }
    }

    /// Run a full-refresh reconciliation pass into the given view.
    pub async fn reconcile<V: CalendarView>(
        &mut self,
        view: &mut V,
    ) -> HollowCalResult<ReconcileStats> {
        let connected = self.backend.is_some();
        self.sync
            .reconcile(self.store.as_ref(), connected, view)
            .await
    }

    /// Create an event from a date-range selection.
    pub async fn create_event<V: CalendarView>(
        &mut self,
        view: &mut V,
        draft: EventDraft,
    ) -> HollowCalResult<Event> {
        let connected = self.backend.is_some();
        self.sync
            .create_event(self.store.as_ref(), connected, view, draft)
            .await
    }

    /// Soft-delete an event by id.
    pub async fn delete_event<V: CalendarView>(
        &mut self,
        view: &mut V,
        id: &str,
    ) -> HollowCalResult<()> {
        let connected = self.backend.is_some();
        sync::delete_event(self.store.as_ref(), connected, view, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SignerHandle;
    use crate::testing::MemoryStore;
    use std::cell::RefCell;

    struct MockLedger {
        address: &'static str,
        deploy_address: &'static str,
        connects: RefCell<Vec<Backend>>,
        disconnects: RefCell<Vec<Backend>>,
        signer_loads: RefCell<usize>,
        deploys: RefCell<usize>,
        binds: RefCell<Vec<SigningMode>>,
    }

    impl MockLedger {
        fn new() -> Self {
            MockLedger {
                address: "addr-1",
                deploy_address: "contract-1",
                connects: RefCell::new(Vec::new()),
                disconnects: RefCell::new(Vec::new()),
                signer_loads: RefCell::new(0),
                deploys: RefCell::new(0),
                binds: RefCell::new(Vec::new()),
            }
        }
    }

    impl Ledger for MockLedger {
        type Store = MemoryStore;

        async fn connect(&self, backend: Backend) -> HollowCalResult<String> {
            self.connects.borrow_mut().push(backend);
            Ok(self.address.to_string())
        }

        async fn disconnect(&self, backend: Backend) -> HollowCalResult<()> {
            self.disconnects.borrow_mut().push(backend);
            Ok(())
        }

        async fn load_signer(&self, _backend: Backend) -> HollowCalResult<SignerHandle> {
            *self.signer_loads.borrow_mut() += 1;
            Ok(SignerHandle("evm-signer".to_string()))
        }

        async fn deploy(
            &self,
            _backend: Backend,
            _signing: &SigningMode,
            _init_state: &InitState,
        ) -> HollowCalResult<String> {
            *self.deploys.borrow_mut() += 1;
            Ok(self.deploy_address.to_string())
        }

        fn bind(
            &self,
            _backend: Backend,
            signing: SigningMode,
            contract_address: String,
        ) -> MemoryStore {
            self.binds.borrow_mut().push(signing);
            MemoryStore::bound(&contract_address)
        }
    }

    // The TempDir guard must stay alive for `LocalState::save` to work.
    fn empty_state() -> (tempfile::TempDir, LocalState) {
        let dir = tempfile::tempdir().unwrap();
        let state = LocalState::load_from(dir.path().join("state.toml")).unwrap();
        (dir, state)
    }

    #[tokio::test]
    async fn connect_binds_without_contract() {
        let (_dir, mut state) = empty_state();
        let mut session = Session::new(MockLedger::new());

        let address = session.connect(Backend::Arweave, &mut state).await.unwrap();
        assert_eq!(address, "addr-1");
        assert!(session.is_connected());
        assert_eq!(session.backend(), Some(Backend::Arweave));
        // No stored contract, so no bound contract address yet.
        assert!(session.contract_address().is_none());
        assert_eq!(state.session().unwrap().address, "addr-1");
    }

    #[tokio::test]
    async fn backends_are_mutually_exclusive() {
        let (_dir, mut state) = empty_state();
        let mut session = Session::new(MockLedger::new());
        session.connect(Backend::Arweave, &mut state).await.unwrap();

        let err = session
            .connect(Backend::Ethereum, &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, HollowCalError::WalletConflict(Backend::Arweave)));
        // The conflict must not touch the existing connection.
        assert_eq!(session.backend(), Some(Backend::Arweave));
        assert_eq!(session.address(), "addr-1");
        assert_eq!(session.ledger.connects.borrow().len(), 1);
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let (_dir, mut state) = empty_state();
        let mut session = Session::new(MockLedger::new());

        session.disconnect(&mut state).await.unwrap();
        assert!(session.ledger.disconnects.borrow().is_empty());

        session.connect(Backend::Ethereum, &mut state).await.unwrap();
        session.disconnect(&mut state).await.unwrap();
        assert_eq!(session.ledger.disconnects.borrow().len(), 1);
        assert!(!session.is_connected());
        assert_eq!(session.address(), "");
        assert!(session.contract_address().is_none());
        assert!(state.session().is_none());
    }

    #[tokio::test]
    async fn deploy_requires_a_connection() {
        let (_dir, mut state) = empty_state();
        let mut session = Session::new(MockLedger::new());

        let err = session.deploy(&mut state).await.unwrap_err();
        assert!(matches!(err, HollowCalError::NotConnected));
        assert_eq!(*session.ledger.deploys.borrow(), 0);
    }

    #[tokio::test]
    async fn deploy_persists_and_restart_rebinds() {
        let (_dir, mut state) = empty_state();
        let mut session = Session::new(MockLedger::new());
        session.connect(Backend::Arweave, &mut state).await.unwrap();

        let contract = session.deploy(&mut state).await.unwrap();
        assert_eq!(contract, "contract-1");
        assert_eq!(session.contract_address(), Some("contract-1"));
        assert_eq!(state.contract_address(), Some("contract-1"));

        // Simulated restart: a fresh session restores the connection and
        // rebinds to the stored address without redeploying.
        let mut restarted = Session::new(MockLedger::new());
        restarted.restore(&state).await.unwrap();
        assert_eq!(restarted.backend(), Some(Backend::Arweave));
        assert_eq!(restarted.address(), "addr-1");
        assert_eq!(restarted.contract_address(), Some("contract-1"));
        assert_eq!(*restarted.ledger.deploys.borrow(), 0);
    }

    #[tokio::test]
    async fn deploy_with_empty_address_fails_unbound() {
        let (_dir, mut state) = empty_state();
        let mut ledger = MockLedger::new();
        ledger.deploy_address = "";
        let mut session = Session::new(ledger);
        session.connect(Backend::Arweave, &mut state).await.unwrap();

        let err = session.deploy(&mut state).await.unwrap_err();
        assert!(matches!(err, HollowCalError::DeployFailed));
        assert!(session.contract_address().is_none());
        assert!(state.contract_address().is_none());
    }

    #[tokio::test]
    async fn arweave_signs_with_wallet_ethereum_loads_signer() {
        let (_dir, mut state) = empty_state();
        state.set_contract_address("contract-1");

        let mut session = Session::new(MockLedger::new());
        session.connect(Backend::Arweave, &mut state).await.unwrap();
        assert_eq!(
            session.ledger.binds.borrow().last(),
            Some(&SigningMode::UseWallet)
        );
        assert_eq!(*session.ledger.signer_loads.borrow(), 0);

        let mut session = Session::new(MockLedger::new());
        session.connect(Backend::Ethereum, &mut state).await.unwrap();
        assert!(matches!(
            session.ledger.binds.borrow().last(),
            Some(SigningMode::External { .. })
        ));
        assert_eq!(*session.ledger.signer_loads.borrow(), 1);

        // Every rebind loads the signer again; it is never cached.
        session.restore(&state).await.unwrap();
        assert_eq!(*session.ledger.signer_loads.borrow(), 2);
    }

    #[tokio::test]
    async fn connect_rebinds_stored_contract() {
        let (_dir, mut state) = empty_state();
        state.set_contract_address("contract-7");

        let mut session = Session::new(MockLedger::new());
        session.connect(Backend::Arweave, &mut state).await.unwrap();
        assert_eq!(session.contract_address(), Some("contract-7"));
    }
}
