use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use retail::schema::{order_items, orders, payments};
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn customer_crud_round_trip(){
    let app = TestApp::spawn_app().await;

    let customer_id = app.create_customer("Asha Rao").await;

    let response = app.get(&format!("/customers/{}/", customer_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!({
        "customer_id": customer_id,
        "name": "Asha Rao",
        "address": "12 Market Street",
        "phone": "555-0100"
    }));

    let response = app.patch_json(&format!("/customers/{}/", customer_id), &json!({ "phone": "555-0199" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["phone"], "555-0199");
    assert_eq!(body["name"], "Asha Rao");

    let response = app.put_json(&format!("/customers/{}/", customer_id), &json!({
        "name": "Asha R.",
        "address": "1 New Road",
        "phone": "555-0123"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap()["address"], "1 New Road");

    let response = app.delete(&format!("/customers/{}/", customer_id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&format!("/customers/{}/", customer_id)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn customers_are_listed_in_id_order_and_paginated(){
    let app = TestApp::spawn_app().await;

    let first = app.create_customer("First").await;
    let second = app.create_customer("Second").await;
    let third = app.create_customer("Third").await;

    let body = app.get("/customers/").await.json::<Vec<Value>>().await.unwrap();
    let ids: Vec<i64> = body.iter().map(|c| c["customer_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![first as i64, second as i64, third as i64]);

    let body = app.get("/customers/?page=2&limit=2").await.json::<Vec<Value>>().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["customer_id"], third);
}

#[actix_web::test]
async fn oversized_page_is_a_bad_request(){
    let app = TestApp::spawn_app().await;
    app.create_customer("Asha Rao").await;

    let response = app.get(&format!("/customers/?page={}&limit=2", i64::MAX)).await;
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.json::<Value>().await.unwrap().get("page").is_some());

    // Server is still serving
    assert_eq!(app.get("/customers/").await.status().as_u16(), 200);
}

#[actix_web::test]
async fn names_are_trimmed_and_blank_names_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/customers/", &json!({
        "name": "   ",
        "address": "12 Market Street",
        "phone": "555-0100"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.json::<Value>().await.unwrap().get("name").is_some());

    let response = app.post_json("/customers/", &json!({
        "name": "  Asha Rao  ",
        "address": "12 Market Street",
        "phone": "555-0100"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.json::<Value>().await.unwrap()["name"], "Asha Rao");
}

#[actix_web::test]
async fn put_requires_every_field(){
    let app = TestApp::spawn_app().await;
    let customer_id = app.create_customer("Asha Rao").await;

    let response = app.put_json(&format!("/customers/{}/", customer_id), &json!({ "name": "Only name" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["address"][0], "This field is required.");
    assert_eq!(body["phone"][0], "This field is required.");
}

#[actix_web::test]
async fn invalid_customer_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/customers/", &json!({
        "name": "",
        "address": "12 Market Street",
        "phone": "1234567890123456"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = response.json::<Value>().await.unwrap();
    assert!(body.get("name").is_some());
    assert!(body.get("phone").is_some());

    let customers = app.get("/customers/").await.json::<Vec<Value>>().await.unwrap();
    assert!(customers.is_empty());
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(app.api_url("/customers/"))
        .bearer_auth(&app.tokens.access)
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn missing_and_non_numeric_ids_are_not_found(){
    let app = TestApp::spawn_app().await;

    assert_eq!(app.get("/customers/9999/").await.status().as_u16(), 404);
    assert_eq!(app.get("/customers/abc/").await.status().as_u16(), 404);
    assert_eq!(app.delete("/customers/9999/").await.status().as_u16(), 404);
    assert_eq!(
        app.patch_json("/customers/9999/", &json!({ "name": "Ghost" })).await.status().as_u16(),
        404
    );
}

#[actix_web::test]
async fn deleting_customer_cascades_to_orders_items_and_payments(){
    let app = TestApp::spawn_app().await;

    let customer_id = app.create_customer("Asha Rao").await;
    let product_id = app.create_product("Kettle", "20.00", 10).await;

    let order = app.create_order(customer_id, json!([{ "product": product_id, "quantity": 1 }]))
        .await
        .json::<Value>()
        .await
        .unwrap();
    let order_id = order["order_id"].as_i64().unwrap() as i32;

    let response = app.post_json("/payments/", &json!({
        "order": order_id,
        "amount": "20.00",
        "payment_mode": "cash"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 201);

    assert_eq!(app.delete(&format!("/customers/{}/", customer_id)).await.status().as_u16(), 204);

    let mut conn = app.pool.get().unwrap();
    let remaining_orders: i64 = orders::table
        .filter(orders::customer_id.eq(customer_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    let remaining_items: i64 = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    let remaining_payments: i64 = payments::table
        .filter(payments::order_id.eq(order_id))
        .count()
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(remaining_orders, 0);
    assert_eq!(remaining_items, 0);
    assert_eq!(remaining_payments, 0);

    // Products survive
    assert_eq!(app.product_stock(product_id).await, 9);
}
