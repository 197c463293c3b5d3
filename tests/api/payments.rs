use serde_json::{json, Value};

use crate::helpers::TestApp;

async fn place_order(app: &TestApp) -> i64{
    let customer_id = app.create_customer("Asha Rao").await;
    let rice = app.create_product("Rice", "29.99", 50).await;

    app.create_order(customer_id, json!([{ "product": rice, "quantity": 3 }]))
        .await
        .json::<Value>()
        .await
        .unwrap()["order_id"]
        .as_i64()
        .unwrap()
}

#[actix_web::test]
async fn payment_records_order_customer_and_mode(){
    let app = TestApp::spawn_app().await;
    let order_id = place_order(&app).await;

    let response = app.post_json("/payments/", &json!({
        "order": order_id,
        "amount": "89.97",
        "payment_mode": "upi"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["order"], order_id);
    assert_eq!(body["order_customer"], "Asha Rao");
    assert_eq!(body["amount"], "89.97");
    assert_eq!(body["payment_mode"], "upi");
    assert!(body["payment_date"].as_str().is_some());

    let payment_id = body["payment_id"].as_i64().unwrap();
    let response = app.patch_json(&format!("/payments/{}/", payment_id), &json!({ "payment_mode": "bank_transfer" })).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap()["payment_mode"], "bank_transfer");

    let listed = app.get("/payments/").await.json::<Vec<Value>>().await.unwrap();
    assert_eq!(listed.len(), 1);

    assert_eq!(app.delete(&format!("/payments/{}/", payment_id)).await.status().as_u16(), 204);
    assert_eq!(app.get(&format!("/payments/{}/", payment_id)).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn unknown_payment_mode_is_rejected(){
    let app = TestApp::spawn_app().await;
    let order_id = place_order(&app).await;

    let response = app.post_json("/payments/", &json!({
        "order": order_id,
        "amount": "10.00",
        "payment_mode": "cheque"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn payment_for_missing_order_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/payments/", &json!({
        "order": 4242,
        "amount": "10.00",
        "payment_mode": "cash"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.json::<Value>().await.unwrap()["order"][0],
        "Invalid pk \"4242\" - object does not exist."
    );
}

#[actix_web::test]
async fn several_payments_may_settle_one_order(){
    let app = TestApp::spawn_app().await;
    let order_id = place_order(&app).await;

    for (amount, mode) in [("50.00", "card"), ("39.97", "cash")] {
        let response = app.post_json("/payments/", &json!({
            "order": order_id,
            "amount": amount,
            "payment_mode": mode
        }))
        .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    assert_eq!(app.get("/payments/").await.json::<Vec<Value>>().await.unwrap().len(), 2);
}
