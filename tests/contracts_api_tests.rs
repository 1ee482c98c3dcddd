mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::collections::HashSet;

use crate::common::{build_test_router, contract_payload, create_contract, request};

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = build_test_router().await;

    let id = create_contract(&app, contract_payload(json!({}))).await;

    let (status, contract) =
        request(&app, "GET", &format!("/api/contracts/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contract["id"].as_i64().unwrap() as i32, id);
    assert_eq!(contract["energy_type"], "Solar");
    assert_eq!(contract["quantity_mwh"], 500);
    assert_eq!(contract["price_per_mwh"].as_f64().unwrap(), 45.50);
    assert_eq!(contract["delivery_start"], "2026-03-01");
    assert_eq!(contract["delivery_end"], "2026-05-31");
    assert_eq!(contract["location"], "California");
    assert_eq!(contract["status"], "Available");
}

#[tokio::test]
async fn sparse_update_leaves_other_fields_unchanged() {
    let app = build_test_router().await;
    let id = create_contract(&app, contract_payload(json!({}))).await;

    let (status, updated) = request(
        &app,
        "PATCH",
        &format!("/api/contracts/{}", id),
        None,
        Some(json!({ "price_per_mwh": 49.25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price_per_mwh"].as_f64().unwrap(), 49.25);

    let (_, fetched) = request(&app, "GET", &format!("/api/contracts/{}", id), None, None).await;
    assert_eq!(fetched["price_per_mwh"].as_f64().unwrap(), 49.25);
    assert_eq!(fetched["quantity_mwh"], 500);
    assert_eq!(fetched["energy_type"], "Solar");
    assert_eq!(fetched["delivery_start"], "2026-03-01");
    assert_eq!(fetched["delivery_end"], "2026-05-31");
    assert_eq!(fetched["location"], "California");
    assert_eq!(fetched["status"], "Available");
}

#[tokio::test]
async fn update_missing_contract_is_not_found() {
    let app = build_test_router().await;
    let (status, _) = request(
        &app,
        "PATCH",
        "/api/contracts/9999",
        None,
        Some(json!({ "price_per_mwh": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent_and_get_after_delete_is_404() {
    let app = build_test_router().await;
    let id = create_contract(&app, contract_payload(json!({}))).await;

    let (status, _) = request(&app, "DELETE", &format!("/api/contracts/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "GET", &format!("/api/contracts/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // deleting again (or a never-existing id) still succeeds silently
    let (status, _) = request(&app, "DELETE", &format!("/api/contracts/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request(&app, "DELETE", "/api/contracts/424242", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn listing_defaults_to_available_contracts() {
    let app = build_test_router().await;
    let available = create_contract(&app, contract_payload(json!({}))).await;
    let reserved = create_contract(
        &app,
        contract_payload(json!({ "status": "Reserved", "location": "Texas" })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({ "status": "Sold", "location": "Nevada" })),
    )
    .await;

    let (status, listing) = request(&app, "GET", "/api/contracts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"].as_i64().unwrap() as i32, available);

    let (_, listing) = request(&app, "GET", "/api/contracts?status=Reserved", None, None).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"].as_i64().unwrap() as i32, reserved);
}

#[tokio::test]
async fn set_filters_match_any_member() {
    let app = build_test_router().await;
    let solar = create_contract(&app, contract_payload(json!({}))).await;
    let wind = create_contract(
        &app,
        contract_payload(json!({ "energy_type": "Wind", "location": "Texas" })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({ "energy_type": "Coal", "location": "Wyoming" })),
    )
    .await;

    let (status, listing) = request(
        &app,
        "GET",
        "/api/contracts?energy_type=Solar&energy_type=Wind",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 2);
    let ids: HashSet<i64> = listing["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, HashSet::from([solar as i64, wind as i64]));

    let (_, listing) = request(
        &app,
        "GET",
        "/api/contracts?location=Texas&location=Wyoming",
        None,
        None,
    )
    .await;
    assert_eq!(listing["total"], 2);
}

#[tokio::test]
async fn range_filters_are_inclusive() {
    let app = build_test_router().await;
    create_contract(
        &app,
        contract_payload(json!({ "price_per_mwh": 40.00, "quantity_mwh": 500 })),
    )
    .await;
    let mid = create_contract(
        &app,
        contract_payload(json!({ "price_per_mwh": 50.00, "quantity_mwh": 1000 })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({ "price_per_mwh": 60.00, "quantity_mwh": 1500 })),
    )
    .await;

    let (_, listing) = request(
        &app,
        "GET",
        "/api/contracts?price_min=50&price_max=50",
        None,
        None,
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"].as_i64().unwrap() as i32, mid);

    let (_, listing) = request(
        &app,
        "GET",
        "/api/contracts?qty_min=1000&qty_max=1500",
        None,
        None,
    )
    .await;
    assert_eq!(listing["total"], 2);
}

#[tokio::test]
async fn delivery_window_bounds_filter_contracts() {
    let app = build_test_router().await;
    let inside = create_contract(
        &app,
        contract_payload(json!({
            "delivery_start": "2026-06-01",
            "delivery_end": "2026-08-31",
        })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({
            "delivery_start": "2026-01-01",
            "delivery_end": "2026-08-31",
            "location": "Texas",
        })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({
            "delivery_start": "2026-06-01",
            "delivery_end": "2027-02-28",
            "location": "Nevada",
        })),
    )
    .await;

    let (_, listing) = request(
        &app,
        "GET",
        "/api/contracts?start_from=2026-05-01&end_to=2026-12-31",
        None,
        None,
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"].as_i64().unwrap() as i32, inside);
}

#[tokio::test]
async fn pagination_reconstructs_the_filtered_set() {
    let app = build_test_router().await;

    let mut expected: HashSet<i64> = HashSet::new();
    for i in 0..25 {
        let id = create_contract(
            &app,
            contract_payload(json!({
                "quantity_mwh": 100 + i,
                "price_per_mwh": 30.00 + (i as f64) * 0.25,
            })),
        )
        .await;
        expected.insert(id as i64);
    }

    let mut seen: HashSet<i64> = HashSet::new();
    let mut total_reported = 0;
    for page in 1..=3 {
        let (status, listing) = request(
            &app,
            "GET",
            &format!("/api/contracts?page={}&page_size=10", page),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        total_reported = listing["total"].as_i64().unwrap();
        for item in listing["items"].as_array().unwrap() {
            let id = item["id"].as_i64().unwrap();
            assert!(seen.insert(id), "id {} appeared on two pages", id);
        }
    }

    assert_eq!(total_reported, 25);
    assert_eq!(seen, expected);

    // the window past the last page is empty but keeps the same total
    let (_, listing) = request(&app, "GET", "/api/contracts?page=4&page_size=10", None, None).await;
    assert_eq!(listing["total"], 25);
    assert!(listing["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn price_sort_directions_are_exact_reversals() {
    let app = build_test_router().await;
    for price in [52.00, 38.75, 45.50, 60.25, 41.00] {
        create_contract(&app, contract_payload(json!({ "price_per_mwh": price }))).await;
    }

    let (_, asc) = request(
        &app,
        "GET",
        "/api/contracts?sort_by=price&sort_dir=asc",
        None,
        None,
    )
    .await;
    let (_, desc) = request(
        &app,
        "GET",
        "/api/contracts?sort_by=price&sort_dir=desc",
        None,
        None,
    )
    .await;

    let prices = |listing: &serde_json::Value| -> Vec<f64> {
        listing["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["price_per_mwh"].as_f64().unwrap())
            .collect()
    };

    let ascending = prices(&asc);
    let mut reversed = prices(&desc);
    reversed.reverse();
    assert_eq!(ascending, vec![38.75, 41.00, 45.50, 52.00, 60.25]);
    assert_eq!(ascending, reversed);
}

#[tokio::test]
async fn unsorted_listing_returns_most_recent_first() {
    let app = build_test_router().await;
    let first = create_contract(&app, contract_payload(json!({}))).await;
    let second = create_contract(&app, contract_payload(json!({ "location": "Texas" }))).await;

    let (_, listing) = request(&app, "GET", "/api/contracts", None, None).await;
    let ids: Vec<i64> = listing["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second as i64, first as i64]);
}

#[tokio::test]
async fn contradictory_parameters_fail_before_any_query() {
    let app = build_test_router().await;

    for uri in [
        "/api/contracts?price_min=50&price_max=40",
        "/api/contracts?qty_min=1000&qty_max=100",
        "/api/contracts?start_from=2026-12-01&end_to=2026-01-01",
        "/api/contracts?sort_by=volume",
        "/api/contracts?sort_by=price&sort_dir=sideways",
        "/api/contracts?page=0",
        "/api/contracts?page_size=0",
        "/api/contracts?page_size=101",
    ] {
        let (status, body) = request(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {}", uri);
        assert!(body["error"].is_string(), "missing error message for {}", uri);
    }
}

#[tokio::test]
async fn create_rejects_nonpositive_quantity_and_price() {
    let app = build_test_router().await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/contracts",
        None,
        Some(contract_payload(json!({ "quantity_mwh": 0 }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/contracts",
        None,
        Some(contract_payload(json!({ "price_per_mwh": -1.0 }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn price_bounds_follow_the_filter_and_null_out_when_empty() {
    let app = build_test_router().await;
    create_contract(
        &app,
        contract_payload(json!({ "energy_type": "Wind", "price_per_mwh": 38.75 })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({ "energy_type": "Wind", "price_per_mwh": 52.50 })),
    )
    .await;
    create_contract(
        &app,
        contract_payload(json!({ "energy_type": "Coal", "price_per_mwh": 20.00 })),
    )
    .await;

    let (status, bounds) = request(
        &app,
        "GET",
        "/api/contracts/price-bounds?energy_type=Wind",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bounds["min_price"].as_f64().unwrap(), 38.75);
    assert_eq!(bounds["max_price"].as_f64().unwrap(), 52.50);

    let (_, bounds) = request(
        &app,
        "GET",
        "/api/contracts/price-bounds?energy_type=Nuclear",
        None,
        None,
    )
    .await;
    assert!(bounds["min_price"].is_null());
    assert!(bounds["max_price"].is_null());

    // contradictory quantity bounds are rejected here too
    let (status, _) = request(
        &app,
        "GET",
        "/api/contracts/price-bounds?qty_min=10&qty_max=1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn locations_are_distinct_sorted_and_unfiltered() {
    let app = build_test_router().await;
    for (location, status) in [
        ("Texas", "Available"),
        ("California", "Sold"),
        ("Texas", "Reserved"),
        ("Appalachia", "Available"),
    ] {
        create_contract(
            &app,
            contract_payload(json!({ "location": location, "status": status })),
        )
        .await;
    }

    let (status, locations) = request(&app, "GET", "/api/contracts/locations", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        locations,
        json!(["Appalachia", "California", "Texas"]),
    );
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = build_test_router().await;
    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
