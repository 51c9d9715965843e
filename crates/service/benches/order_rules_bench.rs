use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use uuid::Uuid;

use models::order::{Customization, ItemStatus, OrderItem};
use service::order::customization::validate_item;
use service::order::workflow::aggregate;

fn item(status: ItemStatus) -> OrderItem {
    OrderItem {
        item_id: Uuid::new_v4(),
        service_type: "Tailoring".into(),
        sub_service: Some("Blouse".into()),
        customization: Customization::default(),
        status,
        cutting_master_id: None,
        tailor_id: None,
        cutting_completed_at: None,
        stitching_completed_at: None,
        additional_work_completed_at: None,
        ironing_completed_at: None,
        quality_check_completed_at: None,
        price: None,
        cloth_image_id: None,
        notes: None,
    }
}

fn bench_customization(c: &mut Criterion) {
    let chudithar: Customization = serde_json::from_value(json!({
        "type": "Pattern",
        "details": {
            "neckShape": "Round",
            "handType": "Elbow",
            "elbowStyle": "Long V Puff",
            "bottomType": "Palazzo",
            "pocket": "WithoutPocket"
        }
    }))
    .unwrap();
    c.bench_function("validate_chudithar_pattern", |b| {
        b.iter(|| validate_item(black_box("Tailoring"), black_box(Some("Chudithar")), black_box(&chudithar)).unwrap())
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let items: Vec<OrderItem> = ItemStatus::ALL.iter().take(4).map(|s| item(*s)).collect();
    c.bench_function("aggregate_order_status", |b| b.iter(|| aggregate(black_box(&items))));
}

criterion_group!(benches, bench_customization, bench_aggregate);
criterion_main!(benches);
