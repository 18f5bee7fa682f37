//! Kiosk application state and key handling
//!
//! Rendering lives in `screens`; this module only turns key presses into
//! flow operations. Sending an order is async, so the key handler returns
//! `Command::Submit` and the event loop drives the submitter.

use crate::catalog::Catalog;
use crate::core::{KioskConfig, KioskResult};
use crate::flow::{OrderFlow, OrderForm, Screen, SubmittedOrder};
use crate::profile::ProfileStore;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shared::{CustomerProfile, MenuItem, OrderType, SavedAddress};
use std::time::Instant;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Submit,
}

/// Rows of the order form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Table,
    Name,
    Phone,
    Address,
    District,
    Reference,
    SavedAddresses,
    SaveAddress,
    Payment,
    Instructions,
    Submit,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Table => "Número de Mesa *",
            Self::Name => "Nombre completo *",
            Self::Phone => "Teléfono *",
            Self::Address => "Dirección completa *",
            Self::District => "Distrito *",
            Self::Reference => "Referencia adicional",
            Self::SavedAddresses => "Direcciones Guardadas",
            Self::SaveAddress => "Guardar esta dirección",
            Self::Payment => "Forma de Pago",
            Self::Instructions => "Instrucciones Especiales",
            Self::Submit => "Enviar Pedido",
        }
    }

    /// Edited through the text input
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Table
                | Self::Name
                | Self::Phone
                | Self::Address
                | Self::Reference
                | Self::Instructions
        )
    }
}

/// What the text input is currently editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Field(FormField),
    /// Special instructions of a cart entry
    ItemNote(String),
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Field(field) => field.label(),
            Self::ItemNote(_) => "Instrucciones especiales del plato",
        }
    }
}

pub struct App {
    pub flow: OrderFlow,
    pub catalog: Catalog,
    pub store: ProfileStore,
    /// Cached copy of the stored profile
    pub profile: Option<CustomerProfile>,

    pub category_index: usize,
    pub menu_index: usize,
    pub cart_index: usize,
    pub history_index: usize,

    pub form: Option<OrderForm>,
    pub form_focus: usize,
    pub address_index: usize,

    pub input: Input,
    pub editing: Option<EditTarget>,

    pub sending: bool,
    pub last_sent: Option<SubmittedOrder>,
    /// One-shot message shown in the footer
    pub notice: Option<String>,

    pub show_logs: bool,
    pub logger_state: TuiWidgetState,

    pub restaurant_name: String,
    /// Number shown on the confirmation screen
    pub contact_number: String,
}

impl App {
    pub fn new(config: &KioskConfig, store: ProfileStore) -> Self {
        let profile = store.load_profile();
        Self {
            flow: OrderFlow::new(config.qr_auto_advance),
            catalog: Catalog::builtin(),
            store,
            profile,
            category_index: 0,
            menu_index: 0,
            cart_index: 0,
            history_index: 0,
            form: None,
            form_focus: 0,
            address_index: 0,
            input: Input::default(),
            editing: None,
            sending: false,
            last_sent: None,
            notice: None,
            show_logs: false,
            logger_state: TuiWidgetState::new(),
            restaurant_name: config.restaurant_name.clone(),
            contact_number: config.whatsapp_number.clone(),
        }
    }

    /// Start the session from the entry URL
    pub fn enter(&mut self, entry_url: Option<&str>, now: Instant) {
        self.flow.enter(entry_url, now);
    }

    /// Periodic tick; fires the QR auto-advance
    pub fn tick(&mut self, now: Instant) -> bool {
        let advanced = self.flow.poll(now);
        if advanced {
            self.reset_menu();
        }
        advanced
    }

    pub fn refresh_profile(&mut self) {
        self.profile = self.store.load_profile();
    }

    // ========== View helpers ==========

    /// Items of the selected category
    pub fn menu_items(&self) -> Vec<&MenuItem> {
        match self.catalog.categories().get(self.category_index) {
            Some(category) => self.catalog.items_in(&category.id),
            None => Vec::new(),
        }
    }

    pub fn selected_menu_item(&self) -> Option<&MenuItem> {
        self.menu_items().get(self.menu_index).copied()
    }

    pub fn saved_addresses(&self) -> &[SavedAddress] {
        self.profile
            .as_ref()
            .map(|p| p.saved_addresses.as_slice())
            .unwrap_or_default()
    }

    /// Form rows for the current order type
    pub fn form_fields(&self) -> Vec<FormField> {
        let Some(form) = &self.form else {
            return Vec::new();
        };
        match form.order_type() {
            OrderType::Local => vec![
                FormField::Table,
                FormField::Payment,
                FormField::Instructions,
                FormField::Submit,
            ],
            OrderType::Delivery => {
                let mut fields = vec![
                    FormField::Name,
                    FormField::Phone,
                    FormField::Address,
                    FormField::District,
                    FormField::Reference,
                ];
                if !self.saved_addresses().is_empty() {
                    fields.push(FormField::SavedAddresses);
                }
                fields.extend([
                    FormField::SaveAddress,
                    FormField::Payment,
                    FormField::Instructions,
                    FormField::Submit,
                ]);
                fields
            }
        }
    }

    fn selected_address_id(&self) -> Option<String> {
        self.saved_addresses()
            .get(self.address_index)
            .map(|a| a.id.clone())
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.form_fields().get(self.form_focus).copied()
    }

    // ========== Keys ==========

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Command::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }
        if self.sending {
            return Command::None;
        }
        if self.editing.is_some() {
            self.handle_editing_key(key);
            return Command::None;
        }

        match key.code {
            KeyCode::F(12) => {
                self.show_logs = !self.show_logs;
                return Command::None;
            }
            KeyCode::PageUp if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::PrevPageKey);
                return Command::None;
            }
            KeyCode::PageDown if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::NextPageKey);
                return Command::None;
            }
            _ => {}
        }

        self.notice = None;
        match self.flow.screen() {
            Screen::Landing => self.landing_key(key),
            Screen::Menu => self.menu_key(key),
            Screen::Cart => self.cart_key(key),
            Screen::Form => self.form_key(key),
            Screen::Confirmation => self.confirmation_key(key),
            Screen::History => self.history_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let value = self.input.value().to_string();
                if let Some(target) = self.editing.take() {
                    self.commit_edit(target, value);
                }
                self.input.reset();
            }
            KeyCode::Esc => {
                self.editing = None;
                self.input.reset();
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
            }
        }
    }

    fn start_edit(&mut self, target: EditTarget, current: &str) {
        self.input = Input::new(current.to_string());
        self.editing = Some(target);
    }

    fn commit_edit(&mut self, target: EditTarget, value: String) {
        match target {
            EditTarget::ItemNote(item_id) => {
                self.flow.cart_mut().set_instructions(&item_id, &value);
            }
            EditTarget::Field(field) => {
                let Some(form) = self.form.as_mut() else {
                    return;
                };
                match field {
                    FormField::Table => form.table_input = value,
                    FormField::Name => form.customer.name = value,
                    FormField::Phone => form.customer.phone = value,
                    FormField::Address => form.customer.address = value,
                    FormField::Reference => form.customer.reference = value,
                    FormField::Instructions => form.instructions = value,
                    _ => {}
                }
            }
        }
    }

    fn landing_key(&mut self, key: KeyEvent) -> Command {
        if self.flow.auto_advance_pending() {
            return match key.code {
                KeyCode::Char('q') => Command::Quit,
                _ => Command::None,
            };
        }

        match key.code {
            KeyCode::Char('l') => self.select_order_type(OrderType::Local),
            KeyCode::Char('d') => self.select_order_type(OrderType::Delivery),
            KeyCode::Char('h') if self.profile.is_some() => self.open_history(),
            KeyCode::Char('q') | KeyCode::Esc => return Command::Quit,
            _ => {}
        }
        Command::None
    }

    fn select_order_type(&mut self, order_type: OrderType) {
        match self.flow.select_order_type(order_type, None) {
            Ok(()) => {
                tracing::info!(order_type = ?order_type, "Order type selected");
                self.reset_menu();
            }
            Err(e) => tracing::warn!(error = %e, "Order type not selected"),
        }
    }

    fn open_history(&mut self) {
        self.refresh_profile();
        if self.flow.view_history().is_ok() {
            self.history_index = 0;
        }
    }

    fn reset_menu(&mut self) {
        self.category_index = 0;
        self.menu_index = 0;
    }

    fn menu_key(&mut self, key: KeyEvent) -> Command {
        let categories = self.catalog.categories().len();
        match key.code {
            KeyCode::Left if categories > 0 => {
                self.category_index = (self.category_index + categories - 1) % categories;
                self.menu_index = 0;
            }
            KeyCode::Right if categories > 0 => {
                self.category_index = (self.category_index + 1) % categories;
                self.menu_index = 0;
            }
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => {
                let len = self.menu_items().len();
                if self.menu_index + 1 < len {
                    self.menu_index += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('+') => {
                if let Some(item) = self.selected_menu_item().cloned() {
                    self.flow.cart_mut().add(&item);
                    tracing::debug!(item_id = %item.id, "Added to cart");
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = self.selected_menu_item().map(|i| i.id.clone()) {
                    self.flow.cart_mut().decrement(&id);
                }
            }
            KeyCode::Char('c') => {
                if self.flow.view_cart().is_ok() {
                    self.cart_index = 0;
                }
            }
            KeyCode::Char('h') if self.profile.is_some() => self.open_history(),
            _ => {}
        }
        Command::None
    }

    fn selected_cart_id(&self) -> Option<String> {
        self.flow
            .cart()
            .items()
            .get(self.cart_index)
            .map(|i| i.id().to_string())
    }

    fn clamp_cart_index(&mut self) {
        let len = self.flow.cart().items().len();
        self.cart_index = self.cart_index.min(len.saturating_sub(1));
    }

    fn cart_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Up => self.cart_index = self.cart_index.saturating_sub(1),
            KeyCode::Down => {
                if self.cart_index + 1 < self.flow.cart().items().len() {
                    self.cart_index += 1;
                }
            }
            KeyCode::Char('+') => {
                if let Some(id) = self.selected_cart_id() {
                    let quantity = self.flow.cart().quantity_of(&id);
                    self.flow.cart_mut().set_quantity(&id, quantity + 1);
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = self.selected_cart_id() {
                    self.flow.cart_mut().decrement(&id);
                    self.clamp_cart_index();
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_cart_id() {
                    self.flow.cart_mut().remove(&id);
                    self.clamp_cart_index();
                }
            }
            KeyCode::Char('n') => {
                if let Some(entry) = self.flow.cart().items().get(self.cart_index) {
                    let target = EditTarget::ItemNote(entry.id().to_string());
                    let current = entry.special_instructions.clone().unwrap_or_default();
                    self.start_edit(target, &current);
                }
            }
            KeyCode::Char('m') | KeyCode::Esc => {
                let _ = self.flow.back_to_menu();
            }
            KeyCode::Enter => match self.flow.proceed_to_form() {
                Ok(()) => self.open_form(),
                Err(e) => self.notice = Some(e.to_string()),
            },
            _ => {}
        }
        Command::None
    }

    fn open_form(&mut self) {
        self.refresh_profile();
        self.form = Some(OrderForm::new(
            self.flow.order_type(),
            self.flow.table_number(),
            self.profile.as_ref(),
        ));
        self.form_focus = 0;
        self.address_index = 0;
    }

    fn form_key(&mut self, key: KeyEvent) -> Command {
        let fields = self.form_fields();
        let Some(field) = fields.get(self.form_focus).copied() else {
            return Command::None;
        };

        match key.code {
            KeyCode::Esc => {
                if self.flow.back_to_cart().is_ok() {
                    self.form = None;
                }
            }
            KeyCode::Up => self.form_focus = self.form_focus.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => {
                if self.form_focus + 1 < fields.len() {
                    self.form_focus += 1;
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                self.form_cycle(field, forward);
            }
            KeyCode::Char(' ') if field == FormField::SaveAddress => {
                if let Some(form) = self.form.as_mut() {
                    form.save_address = !form.save_address;
                }
            }
            KeyCode::Char('*') if field == FormField::SavedAddresses => {
                if let Some(id) = self.selected_address_id() {
                    self.store.set_default_address(&id);
                    self.refresh_profile();
                }
            }
            KeyCode::Char('x') | KeyCode::Delete if field == FormField::SavedAddresses => {
                if let Some(id) = self.selected_address_id() {
                    self.store.delete_address(&id);
                    self.refresh_profile();
                    let len = self.saved_addresses().len();
                    self.address_index = self.address_index.min(len.saturating_sub(1));
                    let rows = self.form_fields().len();
                    self.form_focus = self.form_focus.min(rows.saturating_sub(1));
                }
            }
            KeyCode::Enter => return self.form_enter(field),
            _ => {}
        }
        Command::None
    }

    fn form_cycle(&mut self, field: FormField, forward: bool) {
        match field {
            FormField::Payment => {
                if let Some(form) = self.form.as_mut() {
                    form.payment_method = if forward {
                        form.payment_method.next()
                    } else {
                        form.payment_method.prev()
                    };
                }
            }
            FormField::District => {
                if let Some(form) = self.form.as_mut() {
                    form.cycle_district(forward);
                }
            }
            FormField::SavedAddresses => {
                let len = self.saved_addresses().len();
                if len > 0 {
                    self.address_index = if forward {
                        (self.address_index + 1) % len
                    } else {
                        (self.address_index + len - 1) % len
                    };
                }
            }
            _ => {}
        }
    }

    fn form_enter(&mut self, field: FormField) -> Command {
        if field.is_text() {
            let current = self
                .form
                .as_ref()
                .map(|form| match field {
                    FormField::Table => form.table_input.clone(),
                    FormField::Name => form.customer.name.clone(),
                    FormField::Phone => form.customer.phone.clone(),
                    FormField::Address => form.customer.address.clone(),
                    FormField::Reference => form.customer.reference.clone(),
                    FormField::Instructions => form.instructions.clone(),
                    _ => String::new(),
                })
                .unwrap_or_default();
            self.start_edit(EditTarget::Field(field), &current);
            return Command::None;
        }

        match field {
            FormField::District => self.form_cycle(field, true),
            FormField::SavedAddresses => {
                if let Some(address) = self.saved_addresses().get(self.address_index).cloned()
                    && let Some(form) = self.form.as_mut()
                {
                    form.apply_saved_address(&address);
                }
            }
            FormField::SaveAddress => {
                if let Some(form) = self.form.as_mut() {
                    form.save_address = !form.save_address;
                }
            }
            FormField::Payment => self.form_cycle(field, true),
            FormField::Submit => {
                if let Some(form) = &self.form {
                    let missing = form.missing_fields();
                    if missing.is_empty() {
                        return Command::Submit;
                    }
                    self.notice = Some(format!("Completa: {}", missing.join(", ")));
                }
            }
            _ => {}
        }
        Command::None
    }

    fn confirmation_key(&mut self, key: KeyEvent) -> Command {
        if key.code == KeyCode::Enter {
            self.start_over();
        }
        Command::None
    }

    fn history_key(&mut self, key: KeyEvent) -> Command {
        let orders = self
            .profile
            .as_ref()
            .map(|p| p.order_history.len())
            .unwrap_or(0);
        match key.code {
            KeyCode::Up => self.history_index = self.history_index.saturating_sub(1),
            KeyCode::Down => {
                if self.history_index + 1 < orders {
                    self.history_index += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                let record = self
                    .profile
                    .as_ref()
                    .and_then(|p| p.order_history.get(self.history_index))
                    .cloned();
                if let Some(record) = record
                    && self.flow.reorder(&record).is_ok()
                {
                    self.cart_index = 0;
                }
            }
            KeyCode::Esc => {
                let _ = self.flow.leave_history(Instant::now());
            }
            _ => {}
        }
        Command::None
    }

    /// Back to a fresh landing screen
    pub fn start_over(&mut self) {
        self.flow.start_over(Instant::now());
        self.form = None;
        self.last_sent = None;
        self.reset_menu();
        self.refresh_profile();
    }

    /// Apply the outcome of a submission started by `Command::Submit`
    pub fn on_submitted(&mut self, result: KioskResult<SubmittedOrder>) {
        self.sending = false;
        match result {
            Ok(sent) => {
                if let Err(e) = self.flow.complete_order() {
                    tracing::warn!(error = %e, "Order sent outside the form screen");
                }
                self.form = None;
                self.last_sent = Some(sent);
                self.refresh_profile();
            }
            Err(e) => {
                tracing::error!(error = %e, "Order not sent");
                self.notice = Some(e.to_string());
            }
        }
    }
}
