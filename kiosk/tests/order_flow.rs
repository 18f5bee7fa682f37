use brasa_kiosk::flow::{FlowError, TABLE_PARAM};
use brasa_kiosk::{
    Catalog, ComposeOptions, KioskError, OrderFlow, OrderForm, OrderSubmitter, ProfileStore,
    Screen,
};
use brasa_link::{DeepLink, RecordingOpener, query_param};
use shared::{OrderStatus, OrderType, PaymentMethod};
use std::time::{Duration, Instant};

fn submitter(store: ProfileStore, opener: RecordingOpener) -> OrderSubmitter<RecordingOpener> {
    let link = DeepLink::new("https://wa.me", "51936684281").unwrap();
    OrderSubmitter::new(store, link, opener, ComposeOptions::default(), Duration::ZERO)
}

#[tokio::test]
async fn test_qr_table_order_end_to_end() {
    let catalog = Catalog::builtin();
    let store = ProfileStore::open_in_memory().unwrap();
    let opener = RecordingOpener::new();
    let submitter = submitter(store.clone(), opener.clone());

    // 1. Scan the table QR and wait for the auto-advance
    let mut flow = OrderFlow::new(Duration::from_millis(2000));
    let t0 = Instant::now();
    flow.enter(Some(&format!("https://brasa.pe/?{}=7", TABLE_PARAM)), t0);
    assert_eq!(flow.detected_table(), Some("7"));
    assert!(!flow.poll(t0 + Duration::from_millis(500)));
    assert!(flow.poll(t0 + Duration::from_millis(2000)));
    assert_eq!(flow.screen(), Screen::Menu);
    assert_eq!(flow.table_number(), Some("7"));

    // 2. Fill the cart
    let pollo = catalog.find("1").unwrap();
    let drink = catalog.items_in("bebidas")[0];
    flow.cart_mut().add(pollo);
    flow.cart_mut().add(pollo);
    flow.cart_mut().add(drink);
    flow.cart_mut().set_instructions("1", "bien dorado");
    let expected_total = pollo.price * 2.0 + drink.price;

    flow.view_cart().unwrap();
    flow.proceed_to_form().unwrap();

    // 3. Submit the form
    let profile = store.load_profile();
    let mut form = OrderForm::new(flow.order_type(), flow.table_number(), profile.as_ref());
    assert_eq!(form.table_input, "7");
    form.payment_method = PaymentMethod::Yape;

    let sent = submitter.submit(&form, flow.cart()).await.unwrap();
    flow.complete_order().unwrap();
    assert_eq!(flow.screen(), Screen::Confirmation);

    assert_eq!(opener.opened(), vec![sent.url.clone()]);
    let text = query_param(&sent.url, "text").unwrap();
    assert_eq!(text, sent.message);
    assert!(text.contains("📍 *Tipo:* Local - Mesa 7"));
    assert!(text.contains("   Observaciones: bien dorado\n"));
    assert!(text.contains("📱 Yape"));
    assert!(text.ends_with("¡Gracias por preferirnos! 🙏"));
    assert_eq!(sent.record.total, expected_total);
    assert_eq!(sent.record.status, OrderStatus::Pending);

    // Local orders leave no profile behind
    assert!(store.load_profile().is_none());

    // 4. Start over; the customer is still at table 7
    let t1 = Instant::now();
    flow.start_over(t1);
    assert_eq!(flow.screen(), Screen::Landing);
    assert!(flow.cart().is_empty());
    assert!(flow.table_number().is_none());
    assert!(flow.auto_advance_pending());
    assert!(flow.poll(t1 + Duration::from_millis(2000)));
    assert_eq!(flow.screen(), Screen::Menu);
    assert_eq!(flow.table_number(), Some("7"));
}

#[tokio::test]
async fn test_delivery_then_reorder_from_history() {
    let catalog = Catalog::builtin();
    let store = ProfileStore::open_in_memory().unwrap();
    let submitter = submitter(store.clone(), RecordingOpener::new());
    let mut flow = OrderFlow::default();

    // First delivery order, address remembered
    flow.select_order_type(OrderType::Delivery, None).unwrap();
    let item = catalog.find("3").unwrap();
    flow.cart_mut().add(item);
    flow.cart_mut().set_quantity("3", 3);
    flow.view_cart().unwrap();
    flow.proceed_to_form().unwrap();

    let mut form = OrderForm::new(OrderType::Delivery, None, None);
    form.customer.name = "Rosa Quispe".to_string();
    form.customer.phone = "987654321".to_string();
    form.customer.address = "Av. Huaylas 250".to_string();
    form.cycle_district(true);
    form.save_address = true;

    let first = submitter.submit(&form, flow.cart()).await.unwrap();
    flow.complete_order().unwrap();
    assert!(first.message.contains("• Distrito: Chorrillos"));
    flow.start_over(Instant::now());

    // The next delivery form comes prefilled
    let profile = store.load_profile().unwrap();
    let prefilled = OrderForm::new(OrderType::Delivery, None, Some(&profile));
    assert_eq!(prefilled.customer.name, "Rosa Quispe");
    assert_eq!(prefilled.customer.address, "Av. Huaylas 250");
    assert!(prefilled.is_valid());

    // Reorder from history
    flow.view_history().unwrap();
    let past = &profile.order_history[0];
    assert_eq!(past.order_number, first.record.order_number);
    flow.reorder(past).unwrap();
    assert_eq!(flow.screen(), Screen::Cart);
    assert_eq!(flow.order_type(), OrderType::Delivery);
    assert_eq!(flow.cart().quantity_of("3"), 3);
    assert_eq!(flow.cart().total(), item.price * 3.0);

    flow.proceed_to_form().unwrap();
    let second = submitter.submit(&prefilled, flow.cart()).await.unwrap();

    let profile = store.load_profile().unwrap();
    assert_eq!(profile.saved_addresses.len(), 1);
    assert_eq!(profile.order_history.len(), 2);
    assert_eq!(profile.order_history[0].order_number, second.record.order_number);
}

#[tokio::test]
async fn test_guards_before_sending() {
    let store = ProfileStore::open_in_memory().unwrap();
    let opener = RecordingOpener::new();
    let submitter = submitter(store, opener.clone());
    let mut flow = OrderFlow::default();

    assert!(matches!(
        flow.view_cart(),
        Err(FlowError::InvalidTransition { from: Screen::Landing, .. })
    ));

    flow.select_order_type(OrderType::Local, None).unwrap();
    flow.view_cart().unwrap();
    assert_eq!(flow.proceed_to_form(), Err(FlowError::EmptyCart));
    assert_eq!(flow.screen(), Screen::Cart);

    let form = OrderForm::new(OrderType::Local, None, None);
    let err = submitter.submit(&form, flow.cart()).await.unwrap_err();
    match err {
        KioskError::IncompleteForm(missing) => assert_eq!(missing, "Número de Mesa"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(opener.opened().is_empty());
}
