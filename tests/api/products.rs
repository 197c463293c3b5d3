use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use retail::schema::{order_items, product_suppliers};
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn created_product_serializes_price_as_two_place_string(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/products/", &json!({
        "name": "Basmati rice 5kg",
        "price": 29.9,
        "stock": 50
    }))
    .await;

    assert_eq!(response.status().as_u16(), 201);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["name"], "Basmati rice 5kg");
    assert_eq!(body["price"], "29.90");
    assert_eq!(body["stock"], 50);
    assert_eq!(body["suppliers"], json!([]));
}

#[actix_web::test]
async fn zero_price_keeps_two_decimal_places(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/products/", &json!({ "name": "Sample", "price": "0.00", "stock": 1 })).await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.json::<Value>().await.unwrap()["price"], "0.00");
}

#[actix_web::test]
async fn stock_defaults_to_zero(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/products/", &json!({ "name": "Tea", "price": "4.50" })).await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.json::<Value>().await.unwrap()["stock"], 0);
}

#[actix_web::test]
async fn bad_price_and_stock_are_rejected(){
    let app = TestApp::spawn_app().await;

    let cases = [
        json!({ "name": "Tea", "price": "4.555", "stock": 1 }),
        json!({ "name": "Tea", "price": "-1.00", "stock": 1 }),
        json!({ "name": "Tea", "price": "123456789.00", "stock": 1 }),
        json!({ "name": "Tea", "price": "4.50", "stock": -1 }),
        json!({ "name": "Tea", "stock": 1 })
    ];

    for case in cases.iter() {
        let response = app.post_json("/products/", case).await;
        assert_eq!(response.status().as_u16(), 400, "body {}", case);
    }

    let products = app.get("/products/").await.json::<Vec<Value>>().await.unwrap();
    assert!(products.is_empty());
}

#[actix_web::test]
async fn product_lists_its_suppliers(){
    let app = TestApp::spawn_app().await;

    let product_id = app.create_product("Kettle", "20.00", 10).await;
    let acme = app.create_supplier("Acme").await;
    let globex = app.create_supplier("Globex").await;

    for supplier in [acme, globex] {
        let response = app.post_json("/product-suppliers/", &json!({
            "product": product_id,
            "supplier": supplier
        }))
        .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let body = app.get(&format!("/products/{}/", product_id)).await.json::<Value>().await.unwrap();
    let names: Vec<&str> = body["suppliers"].as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme", "Globex"]);

    let listed = app.get("/products/").await.json::<Vec<Value>>().await.unwrap();
    assert_eq!(listed[0]["suppliers"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn patch_updates_only_given_fields(){
    let app = TestApp::spawn_app().await;
    let product_id = app.create_product("Kettle", "20.00", 10).await;

    let response = app.patch_json(&format!("/products/{}/", product_id), &json!({ "stock": 3 })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["stock"], 3);
    assert_eq!(body["price"], "20.00");
    assert_eq!(body["name"], "Kettle");
}

#[actix_web::test]
async fn deleting_product_cascades_to_items_and_links(){
    let app = TestApp::spawn_app().await;

    let customer_id = app.create_customer("Asha Rao").await;
    let product_id = app.create_product("Kettle", "20.00", 10).await;
    let supplier_id = app.create_supplier("Acme").await;

    app.post_json("/product-suppliers/", &json!({ "product": product_id, "supplier": supplier_id })).await;
    let response = app.create_order(customer_id, json!([{ "product": product_id, "quantity": 2 }])).await;
    assert_eq!(response.status().as_u16(), 201);

    assert_eq!(app.delete(&format!("/products/{}/", product_id)).await.status().as_u16(), 204);
    assert_eq!(app.get(&format!("/products/{}/", product_id)).await.status().as_u16(), 404);

    let mut conn = app.pool.get().unwrap();
    let items: i64 = order_items::table
        .filter(order_items::product_id.eq(product_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    let links: i64 = product_suppliers::table
        .filter(product_suppliers::product_id.eq(product_id))
        .count()
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(items, 0);
    assert_eq!(links, 0);

    // Supplier survives
    assert_eq!(app.get(&format!("/suppliers/{}/", supplier_id)).await.status().as_u16(), 200);
}
