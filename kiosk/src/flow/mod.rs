//! Order flow controller
//!
//! Owns the session state: current screen, order type, table number, cart
//! and the pending QR auto-advance. Screens only call these operations; the
//! controller rejects transitions requested from the wrong screen.
//!
//! ```text
//! Landing ─► Menu ─► Cart ─► Form ─► Confirmation
//! Landing | Menu ─► History ─► Landing
//! History ─(reorder)─► Cart
//! any ─(start_over)─► Landing
//! ```

pub mod form;
pub mod submit;

use crate::orders::Cart;
use brasa_link::query_param;
use shared::{OrderRecord, OrderType};
use std::time::{Duration, Instant};
use thiserror::Error;

pub use form::{DISTRICTS, OrderForm};
pub use submit::{OrderSubmitter, SubmittedOrder};

/// Query parameter carrying the table number in QR entry URLs
pub const TABLE_PARAM: &str = "mesa";

/// Entry URL equivalent to scanning the QR code of `table`
pub fn table_entry_url(table: &str) -> String {
    format!("?{}={}", TABLE_PARAM, urlencoding::encode(table))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Menu,
    Cart,
    Form,
    Confirmation,
    History,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot {action} from the {from:?} screen")]
    InvalidTransition { action: &'static str, from: Screen },

    #[error("Cart is empty")]
    EmptyCart,
}

pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, Clone)]
pub struct OrderFlow {
    screen: Screen,
    order_type: OrderType,
    table_number: Option<String>,
    cart: Cart,
    /// Entry URL of the session; re-read every time the landing shows
    entry_url: Option<String>,
    detected_table: Option<String>,
    auto_advance_at: Option<Instant>,
    qr_delay: Duration,
}

impl OrderFlow {
    /// New session on the landing screen
    ///
    /// `qr_delay` is how long the "table detected" screen stays up before
    /// the menu opens.
    pub fn new(qr_delay: Duration) -> Self {
        Self {
            screen: Screen::Landing,
            order_type: OrderType::Local,
            table_number: None,
            cart: Cart::new(),
            entry_url: None,
            detected_table: None,
            auto_advance_at: None,
            qr_delay,
        }
    }

    // ========== Accessors ==========

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn table_number(&self) -> Option<&str> {
        self.table_number.as_deref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Table read from the entry URL, while the QR landing is showing
    pub fn detected_table(&self) -> Option<&str> {
        self.detected_table.as_deref()
    }

    /// Whether a QR auto-advance is scheduled
    pub fn auto_advance_pending(&self) -> bool {
        self.auto_advance_at.is_some()
    }

    // ========== Landing ==========

    /// Remember the entry URL, then detect the table from it
    pub fn enter(&mut self, entry_url: Option<&str>, now: Instant) {
        self.entry_url = entry_url.map(str::to_string);
        self.detect_table(now);
    }

    /// Read the table from the entry URL and schedule the auto-advance
    fn detect_table(&mut self, now: Instant) {
        let table = self
            .entry_url
            .as_deref()
            .and_then(|url| query_param(url, TABLE_PARAM));
        match table {
            Some(table) => {
                tracing::info!(table = %table, "Table detected from entry URL");
                self.detected_table = Some(table);
                self.auto_advance_at = Some(now + self.qr_delay);
            }
            None => {
                self.detected_table = None;
                self.auto_advance_at = None;
            }
        }
    }

    /// Fire the pending auto-advance once due; returns whether state changed
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.auto_advance_at else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.auto_advance_at = None;
        if self.screen != Screen::Landing {
            return false;
        }
        let table = self.detected_table.clone();
        self.order_type = OrderType::Local;
        self.table_number = table;
        self.screen = Screen::Menu;
        tracing::debug!(table = ?self.table_number, "QR auto-advance to menu");
        true
    }

    /// Choose local/delivery; the table is only replaced when one is given
    pub fn select_order_type(
        &mut self,
        order_type: OrderType,
        table: Option<String>,
    ) -> FlowResult<()> {
        self.expect_screen(&[Screen::Landing], "select order type")?;
        self.auto_advance_at = None;
        self.order_type = order_type;
        if let Some(table) = table.filter(|t| !t.is_empty()) {
            self.table_number = Some(table);
        }
        self.screen = Screen::Menu;
        Ok(())
    }

    // ========== Menu / Cart / Form ==========

    pub fn view_cart(&mut self) -> FlowResult<()> {
        self.go(&[Screen::Menu], "view cart", Screen::Cart)
    }

    pub fn back_to_menu(&mut self) -> FlowResult<()> {
        self.go(&[Screen::Cart], "go back to menu", Screen::Menu)
    }

    pub fn proceed_to_form(&mut self) -> FlowResult<()> {
        self.expect_screen(&[Screen::Cart], "proceed to form")?;
        if self.cart.is_empty() {
            return Err(FlowError::EmptyCart);
        }
        self.screen = Screen::Form;
        Ok(())
    }

    pub fn back_to_cart(&mut self) -> FlowResult<()> {
        self.go(&[Screen::Form], "go back to cart", Screen::Cart)
    }

    /// Called once the order has been sent
    pub fn complete_order(&mut self) -> FlowResult<()> {
        self.go(&[Screen::Form], "complete order", Screen::Confirmation)
    }

    // ========== History ==========

    pub fn view_history(&mut self) -> FlowResult<()> {
        self.expect_screen(&[Screen::Landing, Screen::Menu], "view history")?;
        self.auto_advance_at = None;
        self.screen = Screen::History;
        Ok(())
    }

    /// Back to the landing screen; a QR table session advances again
    pub fn leave_history(&mut self, now: Instant) -> FlowResult<()> {
        self.go(&[Screen::History], "leave history", Screen::Landing)?;
        self.detect_table(now);
        Ok(())
    }

    /// Load a past order into the cart and jump to the cart screen
    pub fn reorder(&mut self, record: &OrderRecord) -> FlowResult<()> {
        self.expect_screen(&[Screen::History], "reorder")?;
        self.cart = Cart::from_items(record.items.clone());
        self.order_type = record.order_type;
        if let Some(table) = record.table_number.as_ref().filter(|t| !t.is_empty()) {
            self.table_number = Some(table.clone());
        }
        self.screen = Screen::Cart;
        tracing::info!(
            order_number = %record.order_number,
            items = self.cart.item_count(),
            "Reordering past order"
        );
        Ok(())
    }

    /// Back to a fresh landing screen; allowed from anywhere
    ///
    /// The entry URL survives, so a table QR session schedules the
    /// auto-advance again from `now`.
    pub fn start_over(&mut self, now: Instant) {
        self.screen = Screen::Landing;
        self.cart.clear();
        self.order_type = OrderType::Local;
        self.table_number = None;
        self.detect_table(now);
    }

    fn go(&mut self, from: &[Screen], action: &'static str, to: Screen) -> FlowResult<()> {
        self.expect_screen(from, action)?;
        self.screen = to;
        Ok(())
    }

    fn expect_screen(&self, allowed: &[Screen], action: &'static str) -> FlowResult<()> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                action,
                from: self.screen,
            })
        }
    }
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}
