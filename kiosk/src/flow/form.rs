//! Order form state
//!
//! Holds what the customer typed on the form screen and turns it into an
//! `OrderRecord` once every required field is filled.

use crate::orders::Cart;
use chrono::{DateTime, Utc};
use shared::{
    CustomerData, CustomerProfile, NewAddress, OrderRecord, OrderStatus, OrderType, PaymentMethod,
    SavedAddress,
};

/// Districts offered for delivery
pub const DISTRICTS: [&str; 3] = ["Chorrillos", "Barranco", "Surco"];

/// Characters of the street address kept in a saved address label
const LABEL_ADDRESS_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    order_type: OrderType,
    /// Local orders
    pub table_input: String,
    /// Delivery orders
    pub customer: CustomerData,
    pub instructions: String,
    pub payment_method: PaymentMethod,
    /// Remember the delivery address on submit
    pub save_address: bool,
}

impl OrderForm {
    /// Form for the current session
    ///
    /// The table input starts with the session table. Delivery forms take
    /// name and phone from the profile, and the default address when one is
    /// marked.
    pub fn new(
        order_type: OrderType,
        table_number: Option<&str>,
        profile: Option<&CustomerProfile>,
    ) -> Self {
        let mut form = Self {
            order_type,
            table_input: table_number.unwrap_or_default().to_string(),
            customer: CustomerData::default(),
            instructions: String::new(),
            payment_method: PaymentMethod::default(),
            save_address: false,
        };

        if order_type == OrderType::Delivery
            && let Some(profile) = profile
        {
            form.customer.name = profile.name.clone();
            form.customer.phone = profile.phone.clone();
            if let Some(address) = profile.default_address() {
                form.apply_saved_address(address);
            }
        }

        form
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Fill address, district and reference from a saved address
    pub fn apply_saved_address(&mut self, address: &SavedAddress) {
        self.customer.address = address.address.clone();
        self.customer.district = address.district.clone();
        self.customer.reference = address.reference.clone();
    }

    /// Step the district through `DISTRICTS`; a blank district starts at the first
    pub fn cycle_district(&mut self, forward: bool) {
        let current = DISTRICTS.iter().position(|d| *d == self.customer.district);
        let len = DISTRICTS.len();
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.customer.district = DISTRICTS[next].to_string();
    }

    /// Labels of the required fields that are still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |s: &str| s.trim().is_empty();
        let mut missing = Vec::new();
        match self.order_type {
            OrderType::Local => {
                if blank(&self.table_input) {
                    missing.push("Número de Mesa");
                }
            }
            OrderType::Delivery => {
                if blank(&self.customer.name) {
                    missing.push("Nombre completo");
                }
                if blank(&self.customer.phone) {
                    missing.push("Teléfono");
                }
                if blank(&self.customer.address) {
                    missing.push("Dirección completa");
                }
                if blank(&self.customer.district) {
                    missing.push("Distrito");
                }
            }
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Snapshot the cart and form into a pending order record
    pub fn build_record(
        &self,
        cart: &Cart,
        order_number: String,
        timestamp: DateTime<Utc>,
    ) -> OrderRecord {
        let (table_number, customer_data) = match self.order_type {
            OrderType::Local => (Some(self.table_input.clone()), None),
            OrderType::Delivery => (None, Some(self.customer.clone())),
        };

        OrderRecord {
            items: cart.items().to_vec(),
            order_type: self.order_type,
            table_number,
            customer_data,
            total: cart.total(),
            special_instructions: Some(self.instructions.clone())
                .filter(|s| !s.trim().is_empty()),
            payment_method: self.payment_method,
            order_number,
            timestamp,
            status: OrderStatus::Pending,
        }
    }

    /// Address to remember for this delivery, labelled `<district> - <street>...`
    pub fn new_address(&self) -> NewAddress {
        let street: String = self
            .customer
            .address
            .chars()
            .take(LABEL_ADDRESS_CHARS)
            .collect();
        NewAddress {
            name: format!("{} - {}...", self.customer.district, street),
            address: self.customer.address.clone(),
            district: self.customer.district.clone(),
            reference: self.customer.reference.clone(),
            is_default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MenuItem;

    fn profile_with_default() -> CustomerProfile {
        let mut profile = CustomerProfile::new("Ana", "999888777");
        profile.saved_addresses = vec![
            SavedAddress {
                id: "1".to_string(),
                name: "Surco - Av. Luna 2...".to_string(),
                address: "Av. Luna 2".to_string(),
                district: "Surco".to_string(),
                reference: String::new(),
                is_default: false,
            },
            SavedAddress {
                id: "2".to_string(),
                name: "Barranco - Jr. Unión 45...".to_string(),
                address: "Jr. Unión 45".to_string(),
                district: "Barranco".to_string(),
                reference: "puerta roja".to_string(),
                is_default: true,
            },
        ];
        profile
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&MenuItem {
            id: "6".to_string(),
            name: "Pechuga a la Parrilla".to_string(),
            description: String::new(),
            price: 25.0,
            category: "parrillas".to_string(),
            image: String::new(),
            original_price: None,
            is_offer: None,
            includes_drink: None,
        });
        cart
    }

    #[test]
    fn test_local_form_prefills_table() {
        let form = OrderForm::new(OrderType::Local, Some("4"), Some(&profile_with_default()));
        assert_eq!(form.table_input, "4");
        assert!(form.customer.name.is_empty());
        assert!(form.is_valid());
    }

    #[test]
    fn test_local_form_requires_table() {
        let mut form = OrderForm::new(OrderType::Local, None, None);
        assert_eq!(form.missing_fields(), vec!["Número de Mesa"]);
        form.table_input = "   ".to_string();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_delivery_form_prefills_from_profile() {
        let form = OrderForm::new(OrderType::Delivery, None, Some(&profile_with_default()));
        assert_eq!(form.customer.name, "Ana");
        assert_eq!(form.customer.phone, "999888777");
        assert_eq!(form.customer.address, "Jr. Unión 45");
        assert_eq!(form.customer.district, "Barranco");
        assert_eq!(form.customer.reference, "puerta roja");
        assert!(form.is_valid());
    }

    #[test]
    fn test_delivery_validation_ignores_reference() {
        let mut form = OrderForm::new(OrderType::Delivery, None, None);
        assert_eq!(
            form.missing_fields(),
            vec!["Nombre completo", "Teléfono", "Dirección completa", "Distrito"]
        );

        form.customer.name = "Luis".to_string();
        form.customer.phone = "987654321".to_string();
        form.customer.address = "Av. Sol 1".to_string();
        form.cycle_district(true);
        assert_eq!(form.customer.district, "Chorrillos");
        assert!(form.is_valid());
    }

    #[test]
    fn test_cycle_district_wraps() {
        let mut form = OrderForm::new(OrderType::Delivery, None, None);
        form.cycle_district(false);
        assert_eq!(form.customer.district, "Surco");
        form.cycle_district(true);
        assert_eq!(form.customer.district, "Chorrillos");
    }

    #[test]
    fn test_build_local_record() {
        let mut form = OrderForm::new(OrderType::Local, Some("4"), None);
        form.instructions = "  ".to_string();
        form.customer.name = "ignored".to_string();
        let ts = Utc::now();

        let record = form.build_record(&cart(), "PB000001".to_string(), ts);

        assert_eq!(record.table_number.as_deref(), Some("4"));
        assert!(record.customer_data.is_none());
        assert!(record.special_instructions.is_none());
        assert_eq!(record.total, 25.0);
        assert_eq!(record.status, OrderStatus::Pending);
        assert_eq!(record.timestamp, ts);
    }

    #[test]
    fn test_build_delivery_record() {
        let mut form = OrderForm::new(OrderType::Delivery, Some("4"), Some(&profile_with_default()));
        form.instructions = "sin cebolla".to_string();
        form.payment_method = PaymentMethod::Yape;

        let record = form.build_record(&cart(), "PB000002".to_string(), Utc::now());

        assert!(record.table_number.is_none());
        assert_eq!(record.customer_data.unwrap().district, "Barranco");
        assert_eq!(record.special_instructions.as_deref(), Some("sin cebolla"));
        assert_eq!(record.payment_method, PaymentMethod::Yape);
    }

    #[test]
    fn test_new_address_label_truncates_street() {
        let mut form = OrderForm::new(OrderType::Delivery, None, None);
        form.customer.address = "Avenida Defensores del Morro 1234, Dpto 501".to_string();
        form.customer.district = "Chorrillos".to_string();

        let address = form.new_address();
        assert_eq!(address.name, "Chorrillos - Avenida Defensores del Morro 1...");
        assert!(!address.is_default);

        form.customer.address = "Jr. Ñandú".to_string();
        assert_eq!(form.new_address().name, "Chorrillos - Jr. Ñandú...");
    }
}
