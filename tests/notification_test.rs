use {
    serde_json::json,
    shop_sync::domain::notification::{Notification, NotificationKind, is_test_id},
};

#[test]
fn nested_shape_with_string_id() {
    let n = Notification::parse(&json!({"data": {"id": "PAY-1"}, "type": "payment"})).unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
    assert_eq!(n.resource_id, "PAY-1");
}

#[test]
fn nested_shape_with_numeric_id_and_action() {
    let n = Notification::parse(&json!({
        "action": "payment.updated",
        "data": {"id": 987654},
        "type": "payment",
    }))
    .unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
    assert_eq!(n.resource_id, "987654");
}

#[test]
fn nested_shape_without_type_defaults_to_payment() {
    let n = Notification::parse(&json!({"data": {"id": "42"}})).unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
}

#[test]
fn direct_shape() {
    let n = Notification::parse(&json!({"id": "PAY-2", "type": "payment"})).unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
    assert_eq!(n.resource_id, "PAY-2");
}

#[test]
fn direct_shape_without_type_defaults_to_payment() {
    let n = Notification::parse(&json!({"id": 555})).unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
    assert_eq!(n.resource_id, "555");
}

#[test]
fn ipn_shape_with_resource_url() {
    let n = Notification::parse(&json!({
        "resource": "https://api.mercadopago.com/v1/payments/314159",
        "topic": "payment",
    }))
    .unwrap();
    assert_eq!(n.kind, NotificationKind::Payment);
    assert_eq!(n.resource_id, "314159");
}

#[test]
fn ipn_shape_with_bare_id() {
    let n = Notification::parse(&json!({"resource": "314159", "topic": "payment"})).unwrap();
    assert_eq!(n.resource_id, "314159");
}

#[test]
fn merchant_order_topic() {
    let n = Notification::parse(&json!({
        "resource": "https://api.example.com/merchant_orders/7",
        "topic": "merchant_order",
    }))
    .unwrap();
    assert_eq!(n.kind, NotificationKind::MerchantOrder);
}

#[test]
fn merchant_order_webhook_type_alias() {
    let n = Notification::parse(&json!({"id": "7", "type": "topic_merchant_order_wh"})).unwrap();
    assert_eq!(n.kind, NotificationKind::MerchantOrder);
}

#[test]
fn unknown_topic_is_preserved() {
    let n = Notification::parse(&json!({"resource": "1", "topic": "chargebacks"})).unwrap();
    assert_eq!(n.kind, NotificationKind::Other("chargebacks".into()));
}

#[test]
fn unrecognized_shapes_are_rejected() {
    assert!(Notification::parse(&json!({"hello": "world"})).is_none());
    assert!(Notification::parse(&json!({"data": {"uuid": "x"}})).is_none());
    assert!(Notification::parse(&json!([1, 2, 3])).is_none());
    assert!(Notification::parse(&json!("payment")).is_none());
    // Shapes that resolve to an empty id are as useless as no id.
    assert!(Notification::parse(&json!({"id": "", "type": "payment"})).is_none());
    assert!(Notification::parse(&json!({"resource": "", "topic": "payment"})).is_none());
}

#[test]
fn sentinel_ids() {
    assert!(is_test_id("123456"));
    assert!(!is_test_id("1234567"));
    assert!(!is_test_id("PAY-123"));
}
