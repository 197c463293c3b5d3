use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn supplier_crud_round_trip(){
    let app = TestApp::spawn_app().await;

    let supplier_id = app.create_supplier("Acme").await;

    let body = app.get(&format!("/suppliers/{}/", supplier_id)).await.json::<Value>().await.unwrap();
    assert_eq!(body, json!({
        "supplier_id": supplier_id,
        "name": "Acme",
        "contact": "sales@acme.io"
    }));

    let response = app.put_json(&format!("/suppliers/{}/", supplier_id), &json!({
        "name": "Acme Wholesale",
        "contact": "orders@acme.io"
    }))
    .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap()["name"], "Acme Wholesale");

    assert_eq!(app.delete(&format!("/suppliers/{}/", supplier_id)).await.status().as_u16(), 204);
    assert_eq!(app.get(&format!("/suppliers/{}/", supplier_id)).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn supplier_requires_name_and_contact(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/suppliers/", &json!({ "name": "Acme" })).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.json::<Value>().await.unwrap()["contact"][0], "This field is required.");
}

#[actix_web::test]
async fn deleting_supplier_removes_its_links_only(){
    let app = TestApp::spawn_app().await;

    let product_id = app.create_product("Kettle", "20.00", 10).await;
    let supplier_id = app.create_supplier("Acme").await;
    app.post_json("/product-suppliers/", &json!({ "product": product_id, "supplier": supplier_id })).await;

    assert_eq!(app.delete(&format!("/suppliers/{}/", supplier_id)).await.status().as_u16(), 204);

    let links = app.get("/product-suppliers/").await.json::<Vec<Value>>().await.unwrap();
    assert!(links.is_empty());

    let product = app.get(&format!("/products/{}/", product_id)).await.json::<Value>().await.unwrap();
    assert_eq!(product["suppliers"], json!([]));
}
