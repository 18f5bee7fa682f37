//! Menu Model

use serde::{Deserialize, Serialize};

/// Menu entry (immutable, loaded from the static catalog)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in currency unit (soles)
    pub price: f64,
    /// Category reference (String ID)
    pub category: String,
    /// Relative path or absolute URL, never resolved
    pub image: String,
    /// Price before the offer, shown struck through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_offer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_drink: Option<bool>,
}

impl MenuItem {
    pub fn is_offer(&self) -> bool {
        self.is_offer.unwrap_or(false)
    }

    pub fn includes_drink(&self) -> bool {
        self.includes_drink.unwrap_or(false)
    }
}

/// Menu category shown as a tab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}
