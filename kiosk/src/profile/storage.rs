//! redb-based storage for the customer profile
//!
//! A single key/value table mirrors the browser's local storage: the profile
//! key holds the whole JSON record (addresses and order history included).
//!
//! Public operations are fail-open. Storage or parse errors are logged and
//! surface as "no data".

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::util::time_id;
use shared::{CustomerProfile, NewAddress, OrderRecord, SavedAddress};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Local store table: key = storage key, value = JSON
const LOCAL_STORE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("local_store");

/// Key of the customer profile record
pub const PROFILE_KEY: &str = "polleria_customer_profile";

/// Reserved for a standalone history record; history lives inside the profile
pub const ORDER_HISTORY_KEY: &str = "polleria_order_history";

/// Maximum number of orders kept in the profile history
pub const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Customer profile storage
#[derive(Clone)]
pub struct ProfileStore {
    db: Arc<Database>,
}

impl ProfileStore {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Raw key/value ==========

    fn get_raw(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put_raw(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Profile ==========

    /// Load the stored profile; `None` when absent, unreadable or unparsable
    pub fn load_profile(&self) -> Option<CustomerProfile> {
        match self.try_load_profile() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(error = %e, "Error loading customer profile");
                None
            }
        }
    }

    fn try_load_profile(&self) -> StorageResult<Option<CustomerProfile>> {
        match self.get_raw(PROFILE_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the whole profile record
    pub fn save_profile(&self, profile: &CustomerProfile) {
        if let Err(e) = self.try_save_profile(profile) {
            tracing::error!(error = %e, "Error saving customer profile");
        }
    }

    fn try_save_profile(&self, profile: &CustomerProfile) -> StorageResult<()> {
        let value = serde_json::to_vec(profile)?;
        self.put_raw(PROFILE_KEY, &value)
    }

    /// Create, persist and return an empty profile
    pub fn initialize_profile(&self, name: &str, phone: &str) -> CustomerProfile {
        let profile = CustomerProfile::new(name, phone);
        self.save_profile(&profile);
        tracing::info!("Customer profile initialized");
        profile
    }

    /// Read-modify-write of the stored profile; no-op when none exists
    fn update_profile<T>(
        &self,
        f: impl FnOnce(&mut CustomerProfile) -> T,
    ) -> StorageResult<Option<T>> {
        let Some(mut profile) = self.try_load_profile()? else {
            return Ok(None);
        };
        let out = f(&mut profile);
        self.try_save_profile(&profile)?;
        Ok(Some(out))
    }

    // ========== History ==========

    /// Prepend an order to the history, keeping the newest `HISTORY_LIMIT`
    pub fn add_order_to_history(&self, order: &OrderRecord) {
        let result = self.update_profile(|profile| {
            profile.order_history.insert(0, order.clone());
            profile.order_history.truncate(HISTORY_LIMIT);
        });
        match result {
            Ok(Some(())) => {
                tracing::debug!(order_number = %order.order_number, "Order added to history")
            }
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "Error adding order to history"),
        }
    }

    // ========== Addresses ==========

    /// Append a saved address; the first address of a profile becomes the default
    ///
    /// An address saved with `is_default` set replaces the previous default.
    /// Returns the stored address, or `None` when there is no profile.
    pub fn save_address(&self, address: NewAddress) -> Option<SavedAddress> {
        let result = self.update_profile(|profile| {
            let mut id = time_id();
            while profile.find_address(&id).is_some() {
                id = bump_id(&id);
            }

            let mut saved = address.into_saved(id);
            if profile.saved_addresses.is_empty() {
                saved.is_default = true;
            }
            if saved.is_default {
                for existing in &mut profile.saved_addresses {
                    existing.is_default = false;
                }
            }
            profile.saved_addresses.push(saved.clone());
            saved
        });
        match result {
            Ok(saved) => {
                if let Some(saved) = &saved {
                    tracing::info!(address_id = %saved.id, "Address saved");
                }
                saved
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving address");
                None
            }
        }
    }

    /// Make `address_id` the only default (unknown ids leave no default)
    pub fn set_default_address(&self, address_id: &str) {
        let result = self.update_profile(|profile| {
            for address in &mut profile.saved_addresses {
                address.is_default = address.id == address_id;
            }
        });
        if let Err(e) = result {
            tracing::error!(error = %e, "Error updating default address");
        }
    }

    /// Remove an address; no other address is promoted to default
    pub fn delete_address(&self, address_id: &str) {
        let result = self.update_profile(|profile| {
            profile.saved_addresses.retain(|a| a.id != address_id);
        });
        if let Err(e) = result {
            tracing::error!(error = %e, "Error deleting address");
        }
    }
}

/// Next numeric id after `id` (ids are epoch millis)
fn bump_id(id: &str) -> String {
    match id.parse::<i64>() {
        Ok(n) => (n + 1).to_string(),
        Err(_) => format!("{}-1", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{OrderType, PaymentMethod};

    fn order(number: usize) -> OrderRecord {
        OrderRecord {
            items: Vec::new(),
            order_type: OrderType::Delivery,
            table_number: None,
            customer_data: None,
            total: number as f64,
            special_instructions: None,
            payment_method: PaymentMethod::Efectivo,
            order_number: format!("PB{:06}", number),
            timestamp: Utc::now(),
            status: Default::default(),
        }
    }

    fn address(street: &str) -> NewAddress {
        NewAddress {
            name: format!("Surco - {}...", street),
            address: street.to_string(),
            district: "Surco".to_string(),
            reference: String::new(),
            is_default: false,
        }
    }

    #[test]
    fn test_load_missing_profile_is_none() {
        let store = ProfileStore::open_in_memory().unwrap();
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn test_initialize_and_reload() {
        let store = ProfileStore::open_in_memory().unwrap();
        let created = store.initialize_profile("Ana", "999888777");

        let loaded = store.load_profile().unwrap();
        assert_eq!(loaded, created);
        assert!(loaded.saved_addresses.is_empty());
        assert!(loaded.order_history.is_empty());
    }

    #[test]
    fn test_unparsable_record_loads_as_none() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.put_raw(PROFILE_KEY, b"{not json").unwrap();
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn test_browser_shaped_record_loads() {
        let store = ProfileStore::open_in_memory().unwrap();
        let json = r#"{
            "name": "Luis",
            "phone": "987654321",
            "savedAddresses": [
                {"id": "1700000000000", "name": "Barranco - Jr. Unión 45...",
                 "address": "Jr. Unión 45", "district": "Barranco",
                 "reference": "", "isDefault": true}
            ],
            "orderHistory": []
        }"#;
        store.put_raw(PROFILE_KEY, json.as_bytes()).unwrap();

        let profile = store.load_profile().unwrap();
        assert_eq!(profile.name, "Luis");
        assert_eq!(profile.default_address().unwrap().district, "Barranco");
    }

    #[test]
    fn test_operations_without_profile_are_noops() {
        let store = ProfileStore::open_in_memory().unwrap();

        store.add_order_to_history(&order(1));
        assert!(store.save_address(address("Av. Sol 1")).is_none());
        store.set_default_address("x");
        store.delete_address("x");

        assert!(store.load_profile().is_none());
        assert!(store.get_raw(ORDER_HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.initialize_profile("Ana", "999888777");

        for n in 1..=21 {
            store.add_order_to_history(&order(n));
        }

        let history = store.load_profile().unwrap().order_history;
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].order_number, "PB000021");
        assert_eq!(history[19].order_number, "PB000002");
        assert!(!history.iter().any(|o| o.order_number == "PB000001"));
    }

    #[test]
    fn test_first_address_becomes_default() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.initialize_profile("Ana", "999888777");

        let first = store.save_address(address("Av. Sol 1")).unwrap();
        let second = store.save_address(address("Av. Luna 2")).unwrap();

        assert!(first.is_default);
        assert!(!second.is_default);
        assert_ne!(first.id, second.id);

        let profile = store.load_profile().unwrap();
        assert_eq!(profile.saved_addresses.len(), 2);
        assert_eq!(profile.default_address().map(|a| a.id.as_str()), Some(first.id.as_str()));
    }

    #[test]
    fn test_saving_default_address_replaces_previous_default() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.initialize_profile("Ana", "999888777");
        let first = store.save_address(address("Av. Sol 1")).unwrap();

        let mut new_default = address("Av. Luna 2");
        new_default.is_default = true;
        let second = store.save_address(new_default).unwrap();
        assert!(second.is_default);

        let profile = store.load_profile().unwrap();
        let defaults: Vec<&str> = profile
            .saved_addresses
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(defaults, vec![second.id.as_str()]);
        assert!(!profile.find_address(&first.id).unwrap().is_default);
    }

    #[test]
    fn test_set_default_leaves_exactly_one() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.initialize_profile("Ana", "999888777");
        let _first = store.save_address(address("Av. Sol 1")).unwrap();
        let second = store.save_address(address("Av. Luna 2")).unwrap();
        let _third = store.save_address(address("Av. Mar 3")).unwrap();

        store.set_default_address(&second.id);

        let profile = store.load_profile().unwrap();
        let defaults: Vec<&SavedAddress> =
            profile.saved_addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, second.id);
    }

    #[test]
    fn test_deleting_default_leaves_no_default() {
        let store = ProfileStore::open_in_memory().unwrap();
        store.initialize_profile("Ana", "999888777");
        let first = store.save_address(address("Av. Sol 1")).unwrap();
        store.save_address(address("Av. Luna 2")).unwrap();

        store.delete_address(&first.id);

        let profile = store.load_profile().unwrap();
        assert_eq!(profile.saved_addresses.len(), 1);
        assert!(profile.default_address().is_none());
    }

    #[test]
    fn test_save_profile_overwrites() {
        let store = ProfileStore::open_in_memory().unwrap();
        let mut profile = store.initialize_profile("Ana", "999888777");
        profile.name = "Ana María".to_string();
        store.save_profile(&profile);

        assert_eq!(store.load_profile().unwrap().name, "Ana María");
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customer.redb");

        {
            let store = ProfileStore::open(&path).unwrap();
            store.initialize_profile("Ana", "999888777");
            store.add_order_to_history(&order(7));
        }

        let reopened = ProfileStore::open(&path).unwrap();
        let profile = reopened.load_profile().unwrap();
        assert_eq!(profile.order_history.len(), 1);
        assert_eq!(profile.order_history[0].order_number, "PB000007");
    }

    #[test]
    fn test_bump_id() {
        assert_eq!(bump_id("1700000000000"), "1700000000001");
        assert_eq!(bump_id("abc"), "abc-1");
    }
}
