//! Customer Profile Model

use super::OrderRecord;
use serde::{Deserialize, Serialize};

/// Reusable delivery address attached to a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: String,
    /// Display label
    pub name: String,
    pub address: String,
    pub district: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Address payload before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewAddress {
    pub name: String,
    pub address: String,
    pub district: String,
    pub reference: String,
    pub is_default: bool,
}

impl NewAddress {
    pub fn into_saved(self, id: String) -> SavedAddress {
        SavedAddress {
            id,
            name: self.name,
            address: self.address,
            district: self.district,
            reference: self.reference,
            is_default: self.is_default,
        }
    }
}

/// The single customer record kept in local storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub saved_addresses: Vec<SavedAddress>,
    /// Newest first
    #[serde(default)]
    pub order_history: Vec<OrderRecord>,
}

impl CustomerProfile {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            saved_addresses: Vec::new(),
            order_history: Vec::new(),
        }
    }

    pub fn default_address(&self) -> Option<&SavedAddress> {
        self.saved_addresses.iter().find(|a| a.is_default)
    }

    pub fn find_address(&self, id: &str) -> Option<&SavedAddress> {
        self.saved_addresses.iter().find(|a| a.id == id)
    }

    /// Whether an address with the same street and district is already saved
    pub fn has_address(&self, address: &str, district: &str) -> bool {
        self.saved_addresses
            .iter()
            .any(|a| a.address == address && a.district == district)
    }
}
