//! Order submission
//!
//! Builds the record from the form, updates the delivery profile, composes
//! the chat message and hands the deep link to the opener. The opener is
//! fire-and-forget: a failure to launch is logged, the order still counts
//! as sent.

use super::form::OrderForm;
use crate::core::{KioskConfig, KioskError, KioskResult};
use crate::orders::{Cart, ComposeOptions, compose_order_message};
use crate::profile::ProfileStore;
use brasa_link::{DeepLink, LinkOpener};
use chrono::{DateTime, Utc};
use shared::util::{now_millis, order_number_at};
use shared::{OrderRecord, OrderType};
use std::time::Duration;

/// Result of a sent order
#[derive(Debug, Clone)]
pub struct SubmittedOrder {
    pub record: OrderRecord,
    pub message: String,
    /// Deep link handed to the opener
    pub url: String,
}

pub struct OrderSubmitter<O: LinkOpener> {
    store: ProfileStore,
    link: DeepLink,
    opener: O,
    compose: ComposeOptions,
    delay: Duration,
}

impl<O: LinkOpener> OrderSubmitter<O> {
    pub fn new(
        store: ProfileStore,
        link: DeepLink,
        opener: O,
        compose: ComposeOptions,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            link,
            opener,
            compose,
            delay,
        }
    }

    /// Submitter wired from the kiosk configuration
    pub fn from_config(
        config: &KioskConfig,
        store: ProfileStore,
        opener: O,
    ) -> KioskResult<Self> {
        let link = DeepLink::new(&config.messaging_base_url, &config.whatsapp_number)?;
        let compose = ComposeOptions {
            restaurant_name: config.restaurant_name.clone(),
        };
        Ok(Self::new(store, link, opener, compose, config.submit_delay))
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Send the order
    ///
    /// Refuses incomplete forms and empty carts before anything is written.
    pub async fn submit(&self, form: &OrderForm, cart: &Cart) -> KioskResult<SubmittedOrder> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(KioskError::IncompleteForm(missing.join(", ")));
        }
        if cart.is_empty() {
            return Err(KioskError::EmptyCart);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let millis = now_millis();
        let timestamp = DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now);
        let record = form.build_record(cart, order_number_at(millis), timestamp);

        if record.order_type == OrderType::Delivery {
            self.remember_delivery(form, &record);
        }

        let message = compose_order_message(&record, &self.compose);
        let url = self.link.url_for(&message);

        tracing::info!(
            order_number = %record.order_number,
            to = %self.link.phone(),
            order_type = ?record.order_type,
            items = record.item_count(),
            total = record.total,
            "Sending order"
        );

        if let Err(e) = self.opener.open(&url).await {
            tracing::error!(
                order_number = %record.order_number,
                error = %e,
                "Failed to open chat link"
            );
        }

        Ok(SubmittedOrder {
            record,
            message,
            url,
        })
    }

    /// Create or refresh the profile, remember the address, append history
    fn remember_delivery(&self, form: &OrderForm, record: &OrderRecord) {
        let customer = &form.customer;
        let profile = match self.store.load_profile() {
            None => self.store.initialize_profile(&customer.name, &customer.phone),
            Some(mut profile) => {
                profile.name = customer.name.clone();
                profile.phone = customer.phone.clone();
                self.store.save_profile(&profile);
                profile
            }
        };

        if form.save_address
            && !customer.address.trim().is_empty()
            && !profile.has_address(&customer.address, &customer.district)
        {
            self.store.save_address(form.new_address());
        }

        self.store.add_order_to_history(record);
    }
}
