//! In-memory fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::{HollowCalError, HollowCalResult};
use crate::protocol::StorageBatch;
use crate::store::Store;

/// In-memory store double that records writes.
///
/// Interior mutability keeps the `Store` signatures (`&self`) intact; the
/// tests are single-threaded, matching the system's execution model.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub contract_address: String,
    pub values: RefCell<BTreeMap<String, Option<String>>>,
    pub puts: RefCell<Vec<(String, String)>>,
    pub updates: RefCell<Vec<(String, String)>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn bound(contract_address: &str) -> Self {
        MemoryStore {
            contract_address: contract_address.to_string(),
            ..MemoryStore::default()
        }
    }

    pub fn with_values(contract_address: &str, entries: &[(&str, Option<&str>)]) -> Self {
        let store = Self::bound(contract_address);
        {
            let mut values = store.values.borrow_mut();
            for (key, value) in entries {
                values.insert(key.to_string(), value.map(str::to_string));
            }
        }
        store
    }
}

impl Store for MemoryStore {
    fn contract_address(&self) -> &str {
        &self.contract_address
    }

    async fn get_all_keys(&self) -> HollowCalResult<Vec<String>> {
        Ok(self.values.borrow().keys().cloned().collect())
    }

    async fn get_storage_values(&self, keys: &[String]) -> HollowCalResult<StorageBatch> {
        let values = self.values.borrow();
        let cached_value = keys
            .iter()
            .filter_map(|key| values.get(key).map(|value| (key.clone(), value.clone())))
            .collect();
        Ok(StorageBatch { cached_value })
    }

    async fn put(&self, key: &str, value: &str) -> HollowCalResult<()> {
        if self.fail_writes {
            return Err(HollowCalError::Gateway("write rejected".to_string()));
        }
        self.puts
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        self.values
            .borrow_mut()
            .insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    async fn update(&self, key: &str, value: &str) -> HollowCalResult<()> {
        if self.fail_writes {
            return Err(HollowCalError::Gateway("write rejected".to_string()));
        }
        self.updates
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        self.values
            .borrow_mut()
            .insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }
}
