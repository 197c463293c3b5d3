use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn empty_database_reports_zeros(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/dashboard/").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!({
        "total_customers": 0,
        "total_products": 0,
        "total_orders": 0,
        "total_revenue": "0.00",
        "low_stock_products": 0,
        "recent_orders": []
    }));
}

#[actix_web::test]
async fn dashboard_aggregates_counts_revenue_and_low_stock(){
    let app = TestApp::spawn_app().await;

    let customer_id = app.create_customer("Asha Rao").await;
    app.create_customer("Ravi Kumar").await;
    let rice = app.create_product("Rice", "29.99", 50).await;
    let kettle = app.create_product("Kettle", "20.00", 12).await;
    app.create_product("Tea", "4.50", 9).await;

    app.create_order(customer_id, json!([{ "product": rice, "quantity": 3 }])).await;
    app.create_order(customer_id, json!([{ "product": kettle, "quantity": 3 }])).await;

    let body = app.get("/dashboard/").await.json::<Value>().await.unwrap();
    assert_eq!(body["total_customers"], 2);
    assert_eq!(body["total_products"], 3);
    assert_eq!(body["total_orders"], 2);
    // 89.97 + 60.00
    assert_eq!(body["total_revenue"], "149.97");
    // Tea at 9 and the kettle, now at 9
    assert_eq!(body["low_stock_products"], 2);
}

#[actix_web::test]
async fn recent_orders_holds_the_five_newest(){
    let app = TestApp::spawn_app().await;

    let customer_id = app.create_customer("Asha Rao").await;
    let rice = app.create_product("Rice", "1.00", 100).await;

    let mut ids = Vec::new();
    for _ in 0..6 {
        let body = app.create_order(customer_id, json!([{ "product": rice, "quantity": 1 }]))
            .await
            .json::<Value>()
            .await
            .unwrap();
        ids.push(body["order_id"].as_i64().unwrap());
    }

    let body = app.get("/dashboard/").await.json::<Value>().await.unwrap();
    let recent: Vec<i64> = body["recent_orders"].as_array()
        .unwrap()
        .iter()
        .map(|o| o["order_id"].as_i64().unwrap())
        .collect();

    let expected: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(recent, expected);
    assert_eq!(body["recent_orders"][0]["customer_name"], "Asha Rao");
}
