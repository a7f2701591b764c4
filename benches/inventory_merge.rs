use criterion::{criterion_group, criterion_main, Criterion};
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use steam_tradeoffers::{
    inventory::parse_inventory_page,
    transport::HttpResponse,
};

/// A page of 2000 items sharing 50 descriptions.
fn inventory_page() -> Vec<u8> {
    let mut items = Map::new();
    let mut descriptions = Map::new();

    for classid in 0..50u64 {
        descriptions.insert(format!("{classid}_0"), json!({
            "appid": "440",
            "classid": classid.to_string(),
            "instanceid": "0",
            "name": format!("Item {classid}"),
            "market_hash_name": format!("Item {classid}"),
            "tradable": 1,
            "marketable": 1,
            "tags": [{ "internal_name": "Unique", "name": "Unique", "category": "Quality" }],
        }));
    }

    for assetid in 0..2000u64 {
        items.insert(assetid.to_string(), json!({
            "id": assetid.to_string(),
            "classid": (assetid % 50).to_string(),
            "instanceid": "0",
            "amount": "1",
            "pos": assetid + 1,
        }));
    }

    serde_json::to_vec(&json!({
        "success": true,
        "rgInventory": Value::Object(items),
        "rgCurrency": [],
        "rgDescriptions": Value::Object(descriptions),
        "more": false,
        "more_start": false,
    })).unwrap_or_default()
}

fn criterion_benchmark(c: &mut Criterion) {
    let response = HttpResponse::new(StatusCode::OK, inventory_page());

    c.bench_function("merges inventory page", |b| b.iter(|| {
        parse_inventory_page(&response, 440, 2).ok();
    }));
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = criterion_benchmark
}

criterion_main!(benches);
