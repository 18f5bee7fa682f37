//! Order message composer
//!
//! Turns an order record into the chat text sent to the restaurant. Layout
//! primitives come from `brasa_link::MessageBuilder`; this module decides
//! the sections and wording.

use super::money::{self, format_soles};
use brasa_link::MessageBuilder;
use chrono::{Local, TimeZone};
use shared::{OrderRecord, OrderType};
use std::fmt::Display;

/// Format used for the `Hora del pedido` line
const ORDER_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Presentation options for the composed message
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Shown upper-cased in the header
    pub restaurant_name: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            restaurant_name: "POLLERÍA LA BRASA".to_string(),
        }
    }
}

/// Compose the message, rendering the order time in the kiosk's local zone
pub fn compose_order_message(order: &OrderRecord, options: &ComposeOptions) -> String {
    compose_order_message_in(order, options, &Local)
}

/// Compose the message with the order time rendered in `tz`
pub fn compose_order_message_in<Tz>(
    order: &OrderRecord,
    options: &ComposeOptions,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut b = MessageBuilder::new();

    b.line(&format!(
        "🔥 {} 🔥",
        MessageBuilder::bold(&format!(
            "NUEVO PEDIDO - {}",
            options.restaurant_name.to_uppercase()
        ))
    ))
    .blank();

    if !order.order_number.is_empty() {
        b.line(&format!(
            "📋 {}",
            MessageBuilder::bold(&format!("Pedido #{}", order.order_number))
        ))
        .blank();
    }

    let kind = match order.order_type {
        OrderType::Local => format!(
            "Local - Mesa {}",
            order.table_number.as_deref().unwrap_or("")
        ),
        OrderType::Delivery => "Delivery".to_string(),
    };
    b.write("📍 ").pair("Tipo", &kind).blank();

    if order.order_type == OrderType::Delivery
        && let Some(customer) = &order.customer_data
    {
        b.line(&format!("👤 {}", MessageBuilder::bold("DATOS DEL CLIENTE:")))
            .bullet("Nombre", &customer.name)
            .bullet("Teléfono", &customer.phone)
            .bullet("Dirección", &customer.address)
            .bullet("Distrito", &customer.district)
            .bullet("Referencia", &customer.reference)
            .blank();
    }

    b.line(&format!("🍗 {}", MessageBuilder::bold("PEDIDO:")));
    for (index, item) in order.items.iter().enumerate() {
        b.line(&format!("{}. {}", index + 1, MessageBuilder::bold(item.name())))
            .indented(1, &format!("Cantidad: {}", item.quantity))
            .indented(1, &format!("Precio unitario: {}", format_soles(item.price())))
            .indented(
                1,
                &format!(
                    "Subtotal: {}",
                    money::format_soles_decimal(money::line_subtotal(item))
                ),
            );
        if let Some(note) = item.special_instructions.as_deref().filter(|n| !n.is_empty()) {
            b.indented(1, &format!("Observaciones: {}", note));
        }
        b.blank();
    }

    if let Some(note) = order.special_instructions.as_deref().filter(|n| !n.is_empty()) {
        b.line(&format!("📝 {}", MessageBuilder::bold("Observaciones generales:")))
            .line(note)
            .blank();
    }

    b.write("💰 ")
        .pair("Forma de pago", order.payment_method.label())
        .blank();

    b.line(&format!(
        "💰 {}",
        MessageBuilder::bold(&format!("TOTAL: {}", format_soles(order.total)))
    ))
    .blank();

    let placed_at = order.timestamp.with_timezone(tz);
    b.line(&format!(
        "⏰ Hora del pedido: {}",
        placed_at.format(ORDER_TIME_FORMAT)
    ))
    .blank()
    .write("¡Gracias por preferirnos! 🙏");

    b.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{CartItem, CustomerData, MenuItem, OrderStatus, PaymentMethod};

    fn cart_item(id: &str, name: &str, price: f64, quantity: u32, note: Option<&str>) -> CartItem {
        let mut entry = CartItem::new(MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            category: "pollos".to_string(),
            image: String::new(),
            original_price: None,
            is_offer: None,
            includes_drink: None,
        });
        entry.quantity = quantity;
        entry.special_instructions = note.map(str::to_string);
        entry
    }

    fn local_order() -> OrderRecord {
        OrderRecord {
            items: vec![cart_item("1", "1 Pollo a la Brasa", 76.0, 1, None)],
            order_type: OrderType::Local,
            table_number: Some("4".to_string()),
            customer_data: None,
            total: 76.0,
            special_instructions: None,
            payment_method: PaymentMethod::Efectivo,
            order_number: "PB123456".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 19, 5, 9).unwrap(),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_local_order_full_text() {
        let text = compose_order_message_in(&local_order(), &ComposeOptions::default(), &Utc);

        let expected = "🔥 *NUEVO PEDIDO - POLLERÍA LA BRASA* 🔥\n\n\
                        📋 *Pedido #PB123456*\n\n\
                        📍 *Tipo:* Local - Mesa 4\n\n\
                        🍗 *PEDIDO:*\n\
                        1. *1 Pollo a la Brasa*\n   \
                        Cantidad: 1\n   \
                        Precio unitario: S/ 76.00\n   \
                        Subtotal: S/ 76.00\n\n\
                        💰 *Forma de pago:* 💵 Efectivo\n\n\
                        💰 *TOTAL: S/ 76.00*\n\n\
                        ⏰ Hora del pedido: 14/03/2025 19:05:09\n\n\
                        ¡Gracias por preferirnos! 🙏";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_delivery_order_sections() {
        let order = OrderRecord {
            items: vec![
                cart_item("6", "Pechuga a la Parrilla", 25.0, 2, Some("sin sal")),
                cart_item("13", "Papas Fritas", 10.0, 1, None),
            ],
            order_type: OrderType::Delivery,
            table_number: None,
            customer_data: Some(CustomerData {
                name: "Ana".to_string(),
                phone: "999888777".to_string(),
                address: "Av. Sol 123".to_string(),
                district: "Miraflores".to_string(),
                reference: "frente al parque".to_string(),
            }),
            total: 60.0,
            special_instructions: Some("tocar timbre".to_string()),
            payment_method: PaymentMethod::Yape,
            ..local_order()
        };

        let text = compose_order_message_in(&order, &ComposeOptions::default(), &Utc);

        assert!(text.contains("📍 *Tipo:* Delivery\n\n"));
        assert!(text.contains(
            "👤 *DATOS DEL CLIENTE:*\n• Nombre: Ana\n• Teléfono: 999888777\n\
             • Dirección: Av. Sol 123\n• Distrito: Miraflores\n\
             • Referencia: frente al parque\n\n"
        ));
        assert!(text.contains(
            "1. *Pechuga a la Parrilla*\n   Cantidad: 2\n   Precio unitario: S/ 25.00\n   \
             Subtotal: S/ 50.00\n   Observaciones: sin sal\n\n2. *Papas Fritas*"
        ));
        assert!(text.contains("📝 *Observaciones generales:*\ntocar timbre\n\n"));
        assert!(text.contains("💰 *Forma de pago:* 📱 Yape\n\n"));
        assert!(text.contains("💰 *TOTAL: S/ 60.00*\n\n"));

        let customer = text.find("DATOS DEL CLIENTE").unwrap();
        let items = text.find("PEDIDO:").unwrap();
        let total = text.find("TOTAL:").unwrap();
        assert!(customer < items && items < total);
    }

    #[test]
    fn test_omits_empty_order_number_and_notes() {
        let order = OrderRecord {
            order_number: String::new(),
            special_instructions: Some(String::new()),
            ..local_order()
        };
        let text = compose_order_message_in(&order, &ComposeOptions::default(), &Utc);

        assert!(!text.contains("Pedido #"));
        assert!(!text.contains("Observaciones"));
        assert!(text.starts_with("🔥 *NUEVO PEDIDO - POLLERÍA LA BRASA* 🔥\n\n📍"));
    }

    #[test]
    fn test_restaurant_name_is_uppercased() {
        let options = ComposeOptions {
            restaurant_name: "La Brasa Norte".to_string(),
        };
        let text = compose_order_message_in(&local_order(), &options, &Utc);
        assert!(text.starts_with("🔥 *NUEVO PEDIDO - LA BRASA NORTE* 🔥"));
    }

    #[test]
    fn test_local_time_rendering() {
        let order = local_order();
        let text = compose_order_message(&order, &ComposeOptions::default());
        let expected = order
            .timestamp
            .with_timezone(&Local)
            .format(ORDER_TIME_FORMAT)
            .to_string();
        assert!(text.contains(&format!("⏰ Hora del pedido: {}", expected)));
    }
}
