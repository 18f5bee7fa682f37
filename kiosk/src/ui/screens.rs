//! Screen rendering
//!
//! One render function per flow screen plus the shared header, footer and
//! log panel.

use super::app::{App, FormField};
use crate::flow::Screen;
use crate::orders::format_soles;
use crate::orders::money::{format_soles_decimal, line_subtotal};
use ratatui::{prelude::*, widgets::*};
use shared::{CartItem, OrderRecord, OrderType};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

const ACCENT: Color = Color::Rgb(234, 88, 12);

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn accent() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(3), // Footer / input
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let body = if app.show_logs {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        render_logs(f, app, split[1]);
        split[0]
    } else {
        chunks[1]
    };

    match app.flow.screen() {
        Screen::Landing => render_landing(f, app, body),
        Screen::Menu => render_menu(f, app, body),
        Screen::Cart => render_cart(f, app, body),
        Screen::Form => render_form(f, app, body),
        Screen::Confirmation => render_confirmation(f, app, body),
        Screen::History => render_history(f, app, body),
    }

    render_footer(f, app, chunks[2]);
}

fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Landing => "Bienvenido",
        Screen::Menu => "Nuestra Carta",
        Screen::Cart => "Mi Carrito",
        Screen::Form => "Finalizar Pedido",
        Screen::Confirmation => "¡Pedido Enviado!",
        Screen::History => "Historial de Pedidos",
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(format!(" 🔥 {} ", app.restaurant_name), accent()),
        Span::raw("| "),
        Span::styled(
            screen_title(app.flow.screen()),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if !matches!(app.flow.screen(), Screen::Landing | Screen::History) {
        let session = match (app.flow.order_type(), app.flow.table_number()) {
            (OrderType::Local, Some(table)) => format!("Mesa {}", table),
            (OrderType::Local, None) => "Local".to_string(),
            (OrderType::Delivery, _) => "Delivery".to_string(),
        };
        let cart = app.flow.cart();
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(session, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(" | "));
        spans.push(Span::raw(format!(
            "🛒 {} · {}",
            cart.item_count(),
            format_soles(cart.total())
        )));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(header, area);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs (F12) ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn help_text(app: &App) -> &'static str {
    match app.flow.screen() {
        Screen::Landing if app.flow.auto_advance_pending() => "q salir",
        Screen::Landing if app.profile.is_some() => {
            "l local · d delivery · h mis pedidos · q salir · F12 logs"
        }
        Screen::Landing => "l local · d delivery · q salir · F12 logs",
        Screen::Menu => "←/→ categoría · ↑/↓ plato · Enter/+ agregar · - quitar · c carrito · h historial",
        Screen::Cart => "↑/↓ · +/- cantidad · x eliminar · n instrucciones · m menú · Enter continuar",
        Screen::Form => "↑/↓ campo · Enter editar/elegir · ←/→ cambiar · Esc volver al carrito",
        Screen::Confirmation => "Enter hacer nuevo pedido",
        Screen::History => "↑/↓ pedido · r/Enter pedir de nuevo · Esc volver",
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    if let Some(target) = &app.editing {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} (Enter guardar, Esc cancelar) ", target.label()));

        let width = area.width.max(3) - 3;
        let scroll = app.input.visual_scroll(width as usize);
        let input = Paragraph::new(app.input.value())
            .style(Style::default().fg(Color::Yellow))
            .scroll((0, scroll as u16))
            .block(block);
        f.render_widget(input, area);

        f.set_cursor_position((
            area.x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
        return;
    }

    let (text, style) = match &app.notice {
        Some(notice) => (notice.as_str(), Style::default().fg(Color::Red)),
        None => (help_text(app), dim()),
    };
    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

// ========== Landing ==========

fn render_landing(f: &mut Frame, app: &App, area: Rect) {
    let lines = match app.flow.detected_table() {
        Some(table) if app.flow.auto_advance_pending() => vec![
            Line::from(""),
            Line::styled("¡Bienvenido!", accent()),
            Line::from(""),
            Line::from(format!("Mesa #{} detectada", table)),
            Line::styled("Redirigiendo al menú...", dim()),
        ],
        _ => {
            let mut lines = vec![
                Line::from(""),
                Line::styled(app.restaurant_name.clone(), accent()),
                Line::styled("Pollos & Parrillas", Style::default().fg(Color::Yellow)),
                Line::from(""),
                Line::from("¿Cómo quieres tu pedido?"),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[L] ", accent()),
                    Span::raw("Comer en el local"),
                    Span::styled("  15-20 min", dim()),
                ]),
                Line::from(vec![
                    Span::styled("[D] ", accent()),
                    Span::raw("Delivery"),
                    Span::styled("  30-45 min", dim()),
                ]),
            ];
            if app.profile.is_some() {
                lines.push(Line::from(vec![
                    Span::styled("[H] ", accent()),
                    Span::raw("Mis pedidos"),
                ]));
            }
            lines
        }
    };

    let landing = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(landing, area);
}

// ========== Menu ==========

fn menu_item_lines<'a>(item: &'a shared::MenuItem, in_cart: u32) -> Vec<Line<'a>> {
    let mut title = vec![Span::styled(
        item.name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if item.is_offer() {
        title.push(Span::styled(
            " OFERTA",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if item.includes_drink() {
        title.push(Span::styled(" 🥤 incluye bebida", Style::default().fg(Color::Cyan)));
    }
    if in_cart > 0 {
        title.push(Span::styled(format!("  x{}", in_cart), accent()));
    }

    let mut price = vec![Span::styled(format_soles(item.price), accent())];
    if let Some(original) = item.original_price {
        price.push(Span::raw(" "));
        price.push(Span::styled(
            format_soles(original),
            dim().add_modifier(Modifier::CROSSED_OUT),
        ));
    }

    vec![
        Line::from(title),
        Line::styled(item.description.as_str(), dim()),
        Line::from(price),
        Line::from(""),
    ]
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let titles: Vec<String> = app
        .catalog
        .categories()
        .iter()
        .map(|c| format!("{} {}", c.icon, c.name))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.category_index)
        .highlight_style(accent())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, chunks[0]);

    let cart = app.flow.cart();
    let items: Vec<ListItem> = app
        .menu_items()
        .into_iter()
        .map(|item| ListItem::new(menu_item_lines(item, cart.quantity_of(&item.id))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    " Ver Carrito ({}) {} ",
                    cart.item_count(),
                    format_soles(cart.total())
                )),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.menu_index));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

// ========== Cart ==========

fn cart_entry_lines(entry: &CartItem, subtotal: f64) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            entry.name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("{} x {} = ", entry.quantity, format_soles(entry.price()))),
            Span::styled(format_soles(subtotal), accent()),
        ]),
    ];
    if let Some(note) = &entry.special_instructions {
        lines.push(Line::styled(format!("📝 {}", note), dim()));
    }
    lines.push(Line::from(""));
    lines
}

fn render_cart(f: &mut Frame, app: &App, area: Rect) {
    let cart = app.flow.cart();
    let title = format!(
        " Mi Carrito · {} ",
        plural(cart.item_count() as usize, "producto")
    );

    if cart.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("Tu carrito está vacío", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled("Agrega algunos deliciosos platos para comenzar", dim()),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = cart
        .items()
        .iter()
        .map(|entry| ListItem::new(cart_entry_lines(entry, cart.line_subtotal(entry.id()))))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.cart_index));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let total = Paragraph::new(Line::from(vec![
        Span::raw("Total: "),
        Span::styled(format_soles(cart.total()), accent()),
        Span::styled("   Enter: Continuar", dim()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(total, chunks[1]);
}

// ========== Form ==========

fn field_value(app: &App, field: FormField) -> String {
    let Some(form) = &app.form else {
        return String::new();
    };
    match field {
        FormField::Table => form.table_input.clone(),
        FormField::Name => form.customer.name.clone(),
        FormField::Phone => form.customer.phone.clone(),
        FormField::Address => form.customer.address.clone(),
        FormField::District => {
            if form.customer.district.is_empty() {
                "Selecciona tu distrito".to_string()
            } else {
                format!("‹ {} ›", form.customer.district)
            }
        }
        FormField::Reference => form.customer.reference.clone(),
        FormField::SavedAddresses => match app.saved_addresses().get(app.address_index) {
            Some(address) => format!(
                "‹ {}{} › Enter usar · * predeterminada · x eliminar",
                address.name,
                if address.is_default {
                    " ★ Predeterminada"
                } else {
                    ""
                }
            ),
            None => String::new(),
        },
        FormField::SaveAddress => {
            let mark = if form.save_address { "[x]" } else { "[ ]" };
            format!("{} Para futuros pedidos más rápidos", mark)
        }
        FormField::Payment => format!(
            "‹ {} › {}",
            form.payment_method.label(),
            form.payment_method.description()
        ),
        FormField::Instructions => form.instructions.clone(),
        FormField::Submit => String::new(),
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let total = app.flow.cart().total();
    let valid = form.is_valid();
    let fields = app.form_fields();
    let rows: Vec<ListItem> = fields
        .iter()
        .map(|field| {
            if *field == FormField::Submit {
                let (text, style) = if app.sending {
                    ("Enviando Pedido...".to_string(), accent())
                } else if valid {
                    (
                        format!("Enviar Pedido por WhatsApp - {}", format_soles(total)),
                        Style::default()
                            .fg(Color::White)
                            .bg(ACCENT)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (
                        format!("Enviar Pedido por WhatsApp - {}", format_soles(total)),
                        dim(),
                    )
                };
                return ListItem::new(vec![Line::from(""), Line::styled(text, style)]);
            }

            ListItem::new(vec![
                Line::styled(field.label(), dim()),
                Line::from(field_value(app, *field)),
            ])
        })
        .collect();

    let title = match form.order_type() {
        OrderType::Local => " Información de Mesa ",
        OrderType::Delivery => " Datos de Entrega ",
    };
    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.form_focus));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let mut summary: Vec<Line> = app
        .flow
        .cart()
        .items()
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::raw(format!("{} ", entry.name())),
                Span::styled(format!("x{} ", entry.quantity), dim()),
                Span::styled(
                    format_soles(app.flow.cart().line_subtotal(entry.id())),
                    accent(),
                ),
            ])
        })
        .collect();
    summary.push(Line::from(""));
    summary.push(Line::from(vec![
        Span::styled("Total: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format_soles(total), accent()),
    ]));
    let summary = Paragraph::new(summary)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Resumen del Pedido "));
    f.render_widget(summary, chunks[1]);
}

// ========== Confirmation ==========

fn render_confirmation(f: &mut Frame, app: &App, area: Rect) {
    let order_type = app.flow.order_type();
    let service = match order_type {
        OrderType::Local => "Te atenderemos en tu mesa lo más pronto posible",
        OrderType::Delivery => "Nos comunicaremos contigo para confirmar la entrega",
    };

    let mut lines = vec![
        Line::from(""),
        Line::styled("✔ ¡Pedido Enviado!", accent()),
        Line::from("Tu pedido ha sido enviado exitosamente por WhatsApp a nuestra cocina."),
        Line::from(""),
    ];
    if let Some(sent) = &app.last_sent {
        lines.push(Line::styled(
            format!("Pedido #{}", sent.record.order_number),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    lines.extend([
        Line::styled(order_type.label(), Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(service, dim()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tiempo estimado: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(order_type.estimated_time()),
        ]),
        Line::from(""),
        Line::styled("¿Alguna duda? Contáctanos directamente:", Style::default().fg(ACCENT)),
        Line::from(format!("WhatsApp: +{}", app.contact_number)),
        Line::from(""),
    ]);
    if let Some(sent) = &app.last_sent {
        lines.push(Line::styled("Enlace abierto:", dim()));
        lines.push(Line::styled(sent.url.clone(), dim()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("¡Gracias por preferirnos! 🔥"));

    let confirmation = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(confirmation, area);
}

// ========== History ==========

fn history_entry_lines(order: &OrderRecord) -> Vec<Line<'_>> {
    let place = match order.order_type {
        OrderType::Local => format!("Mesa {}", order.table_number.as_deref().unwrap_or("-")),
        OrderType::Delivery => "Delivery".to_string(),
    };
    let date = order
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%d/%m/%Y")
        .to_string();

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Pedido #{} ", order.order_number),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", order.status.label()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(
            "  {}  {}  {}  ",
            date,
            place,
            order.payment_method.name()
        )),
        Span::styled(format_soles(order.total), accent()),
    ])];

    for item in order.items.iter().take(3) {
        lines.push(Line::from(vec![
            Span::raw(format!("   {}x {} ", item.quantity, item.name())),
            Span::styled(format_soles_decimal(line_subtotal(item)), dim()),
        ]));
    }
    if order.items.len() > 3 {
        lines.push(Line::styled(
            format!("   +{} más", plural(order.items.len() - 3, "producto")),
            dim(),
        ));
    }
    lines.push(Line::from(""));
    lines
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let orders = app
        .profile
        .as_ref()
        .map(|p| p.order_history.as_slice())
        .unwrap_or_default();

    if orders.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("Aún no tienes pedidos", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled("Cuando realices tu primer pedido, aparecerá aquí", dim()),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = orders
        .iter()
        .map(|order| ListItem::new(history_entry_lines(order)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", plural(orders.len(), "pedido"))),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.history_index));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KioskConfig;
    use crate::profile::ProfileStore;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let config = KioskConfig::with_work_dir("unused");
        App::new(&config, ProfileStore::open_in_memory().unwrap())
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "producto"), "1 producto");
        assert_eq!(plural(3, "pedido"), "3 pedidos");
    }

    #[test]
    fn test_landing_lists_options() {
        let text = screen_text(&app());
        assert!(text.contains("Comer en el local"));
        assert!(text.contains("Delivery"));
        assert!(!text.contains("Mis pedidos"));
    }

    #[test]
    fn test_empty_cart_text() {
        let mut app = app();
        app.flow
            .select_order_type(OrderType::Local, Some("4".into()))
            .unwrap();
        app.flow.view_cart().unwrap();

        let text = screen_text(&app);
        assert!(text.contains("Tu carrito está vacío"));
    }

    #[test]
    fn test_history_line_subtotal_is_exact() {
        let mut pollo = crate::catalog::Catalog::builtin().find("1").unwrap().clone();
        pollo.price = 10.05;
        let mut entry = CartItem::new(pollo);
        entry.quantity = 3;
        let order = OrderRecord {
            items: vec![entry],
            order_type: OrderType::Local,
            table_number: Some("4".to_string()),
            customer_data: None,
            total: 30.15,
            special_instructions: None,
            payment_method: shared::PaymentMethod::Efectivo,
            order_number: "PB123456".to_string(),
            timestamp: chrono::Utc::now(),
            status: shared::OrderStatus::Pending,
        };

        let lines = history_entry_lines(&order);
        let item_line: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(item_line.starts_with("   3x "));
        assert!(item_line.ends_with("S/ 30.15"));
    }

    #[test]
    fn test_history_empty_text() {
        let mut app = app();
        app.flow.view_history().unwrap();
        let text = screen_text(&app);
        assert!(text.contains("Aún no tienes pedidos"));
    }
}
