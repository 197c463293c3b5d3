use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::{Identifiable, Insertable, Queryable, Selectable};
use serde::Deserialize;
use serde::Serialize;

use crate::domain::{money, payment_mode::PaymentMode};
use crate::schema::{customers, order_items, orders, payments, products, suppliers, users};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User{
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser{
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct UserIdentity{
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        Self{
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customers)]
#[diesel(primary_key(customer_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer{
    pub customer_id: i32,
    pub name: String,
    pub address: String,
    pub phone: String
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = suppliers)]
#[diesel(primary_key(supplier_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Supplier{
    pub supplier_id: i32,
    pub name: String,
    pub contact: String
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product{
    pub product_id: i32,
    pub name: String,
    pub price: BigDecimal,
    pub stock: i32
}

// Product as served over http, suppliers joined in at read time
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductView{
    pub product_id: i32,
    pub name: String,
    #[serde(serialize_with = "money::serialize")]
    pub price: BigDecimal,
    pub stock: i32,
    pub suppliers: Vec<Supplier>
}

impl ProductView {
    pub fn new(product: Product, suppliers: Vec<Supplier>) -> Self{
        Self{
            product_id: product.product_id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            suppliers
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order{
    pub order_id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub amount: BigDecimal
}

#[derive(Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder{
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub amount: BigDecimal
}

#[derive(Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem{
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32
}

// Line item as served over http. Name and price are the product's current values
#[derive(Queryable, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItemView{
    pub product: i32,
    pub product_name: String,
    #[serde(serialize_with = "money::serialize")]
    pub product_price: BigDecimal,
    pub quantity: i32
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderView{
    pub order_id: i32,
    pub customer: i32,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    #[serde(serialize_with = "money::serialize")]
    pub amount: BigDecimal,
    pub items: Vec<OrderItemView>
}

impl OrderView {
    pub fn new(order: Order, customer_name: String, items: Vec<OrderItemView>) -> Self{
        Self{
            order_id: order.order_id,
            customer: order.customer_id,
            customer_name,
            order_date: order.order_date,
            amount: order.amount,
            items
        }
    }
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct PaymentView{
    pub payment_id: i32,
    pub order: i32,
    pub order_customer: String,
    #[serde(serialize_with = "money::serialize")]
    pub amount: BigDecimal,
    pub payment_mode: PaymentMode,
    pub payment_date: DateTime<Utc>
}

#[derive(Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment{
    pub order_id: i32,
    pub amount: BigDecimal,
    pub payment_mode: PaymentMode,
    pub payment_date: DateTime<Utc>
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductSupplierView{
    pub id: i32,
    pub product: i32,
    pub product_name: String,
    pub supplier: i32,
    pub supplier_name: String
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardStats{
    pub total_customers: i64,
    pub total_products: i64,
    pub total_orders: i64,
    #[serde(serialize_with = "money::serialize")]
    pub total_revenue: BigDecimal,
    pub low_stock_products: i64,
    pub recent_orders: Vec<OrderView>
}
