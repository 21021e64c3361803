use super::*;
use serde_json::json;

fn activity(price: i64, discount: Option<i64>) -> Activity {
    Activity {
        id: "a-1".into(),
        category_id: "c-1".into(),
        title: "Snorkeling".into(),
        description: String::new(),
        image_urls: vec![],
        price,
        price_discount: discount,
        rating: 4.5,
        total_reviews: 10,
        facilities: None,
        address: None,
        province: None,
        city: None,
        location_maps: None,
        category: None,
    }
}

fn transaction(status: TransactionStatus, total: i64) -> Transaction {
    Transaction {
        id: format!("t-{total}"),
        user_id: None,
        payment_method_id: None,
        invoice_id: "INV/1".into(),
        status,
        total_amount: total,
        proof_payment_url: None,
        order_date: None,
        expired_date: None,
        transaction_items: vec![],
        payment_method: None,
    }
}

// =============================================================================
// Activity
// =============================================================================

#[test]
fn activity_parses_upstream_shape() {
    let value = json!({
        "id": "a-9",
        "categoryId": "c-2",
        "title": "Rafting",
        "description": "Wet",
        "imageUrls": ["a.png", "b.png"],
        "price": 250000,
        "priceDiscount": 200000,
        "rating": 4,
        "totalReviews": 3,
        "city": "Bali",
        "category": {"id": "c-2", "name": "Water", "imageUrl": "w.png"}
    });
    let parsed: Activity = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.image_urls.len(), 2);
    assert_eq!(parsed.price_discount, Some(200_000));
    assert_eq!(parsed.category.unwrap().name, "Water");
}

#[test]
fn effective_price_prefers_discount() {
    assert_eq!(activity(100, Some(80)).effective_price(), 80);
}

#[test]
fn effective_price_ignores_zero_discount() {
    assert_eq!(activity(100, Some(0)).effective_price(), 100);
    assert_eq!(activity(100, None).effective_price(), 100);
}

// =============================================================================
// cart_total
// =============================================================================

#[test]
fn cart_total_multiplies_quantity() {
    let items = vec![
        CartItem { id: "1".into(), user_id: None, activity_id: "a".into(), quantity: 2, activity: Some(activity(100, None)) },
        CartItem { id: "2".into(), user_id: None, activity_id: "b".into(), quantity: 3, activity: Some(activity(50, Some(40))) },
    ];
    assert_eq!(cart_total(&items), 2 * 100 + 3 * 40);
}

#[test]
fn cart_total_skips_items_without_activity() {
    let items = vec![CartItem { id: "1".into(), user_id: None, activity_id: "a".into(), quantity: 5, activity: None }];
    assert_eq!(cart_total(&items), 0);
}

// =============================================================================
// Transaction
// =============================================================================

#[test]
fn transaction_reads_snake_case_relations() {
    let value = json!({
        "id": "t-1",
        "invoiceId": "INV/20240101/1",
        "status": "pending",
        "totalAmount": 300000,
        "transaction_items": [{"id": "i-1", "title": "Rafting", "price": 150000, "quantity": 2}],
        "payment_method": {"id": "p-1", "name": "BCA"}
    });
    let parsed: Transaction = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.status, TransactionStatus::Pending);
    assert_eq!(parsed.transaction_items[0].quantity, 2);
    assert_eq!(parsed.payment_method.unwrap().name, "BCA");
}

#[test]
fn transaction_unknown_status_is_rejected() {
    let value = json!({"id": "t-1", "invoiceId": "I", "status": "refunded", "totalAmount": 1});
    assert!(serde_json::from_value::<Transaction>(value).is_err());
}

// =============================================================================
// DashboardStats
// =============================================================================

#[test]
fn tally_counts_statuses_and_revenue() {
    let txs = vec![
        transaction(TransactionStatus::Success, 100),
        transaction(TransactionStatus::Success, 250),
        transaction(TransactionStatus::Pending, 999),
        transaction(TransactionStatus::Cancelled, 50),
    ];
    let mut stats = DashboardStats::default();
    stats.tally_transactions(&txs);
    assert_eq!(stats.transactions, 4);
    assert_eq!(stats.pending_transactions, 1);
    assert_eq!(stats.success_transactions, 2);
    assert_eq!(stats.revenue, 350);
}

#[test]
fn dashboard_stats_serialize_camel_case() {
    let value = serde_json::to_value(DashboardStats::default()).unwrap();
    assert!(value.get("pendingTransactions").is_some());
    assert!(value.get("successTransactions").is_some());
}
