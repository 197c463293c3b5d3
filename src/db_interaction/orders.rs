use std::{collections::HashMap, error::Error, fmt::Debug};

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::{dsl::exists, pg::PgConnection, select, Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use thiserror::Error;

use crate::{domain::{money, OrderItemRequest, OrderRequest}, error::{ApiError, FieldErrors}, models::{NewOrder, NewOrderItem, Order, OrderItemView, OrderView}, schema::{customers, order_items, orders, products}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

use super::invalid_pk;

// Builds the read model for a batch of orders: customer names and line items
// are fetched with one query each
pub(crate) fn load_order_views(
    conn: &mut PgConnection,
    orders: Vec<Order>
) -> QueryResult<Vec<OrderView>> {
    let order_ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();
    let customer_ids: Vec<i32> = orders.iter().map(|o| o.customer_id).collect();

    let customer_names: HashMap<i32, String> = customers::table
        .filter(customers::customer_id.eq_any(customer_ids))
        .select((customers::customer_id, customers::name))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .collect();

    let items: Vec<(i32, OrderItemView)> = order_items::table
        .inner_join(products::table)
        .filter(order_items::order_id.eq_any(order_ids))
        .order(order_items::id.asc())
        .select((
            order_items::order_id,
            (
                order_items::product_id,
                products::name,
                products::price,
                order_items::quantity
            )
        ))
        .load::<(i32, OrderItemView)>(conn)?;

    let mut items_by_order: HashMap<i32, Vec<OrderItemView>> = HashMap::new();
    for (order_id, item) in items {
        items_by_order.entry(order_id).or_default().push(item);
    }

    Ok(orders.into_iter()
        .map(|order| {
            let customer_name = customer_names.get(&order.customer_id).cloned().unwrap_or_default();
            let items = items_by_order.remove(&order.order_id).unwrap_or_default();
            OrderView::new(order, customer_name, items)
        })
        .collect())
}

fn load_order_view(conn: &mut PgConnection, order_id: i32) -> QueryResult<OrderView> {
    let order = orders::table
        .find(order_id)
        .select(Order::as_select())
        .first::<Order>(conn)?;

    let mut views = load_order_views(conn, vec![order])?;
    views.pop().ok_or(diesel::result::Error::NotFound)
}

#[tracing::instrument(
    "Getting orders along with their items",
    skip(conn)
)]
pub async fn get_orders_with_items(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<OrderView>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Vec<OrderView>, diesel::result::Error, _>(|conn| {
            let mut query = orders::table
                .order((orders::order_date.desc(), orders::order_id.asc()))
                .select(Order::as_select())
                .into_boxed();

            if let Some((limit, offset)) = window {
                query = query.limit(limit).offset(offset);
            }

            let orders = query.load::<Order>(conn)?;
            load_order_views(conn, orders)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting order with items by id",
    skip(conn)
)]
pub async fn get_order_with_items_by_id(
    mut conn: DbConnection,
    order_id: i32
) -> Result<OrderView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderView, diesel::result::Error, _>(|conn| {
            load_order_view(conn, order_id)
        })
    })
    .await??;

    Ok(res)
}

// Items and payments of the order are removed with it. Stock is not restored
#[tracing::instrument(
    "Deleting order from db",
    skip(conn)
)]
pub async fn delete_order_from_database(
    mut conn: DbConnection,
    order_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(orders::table.find(order_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}

// Error associated with creating orders and decrementing product stock
#[derive(Error)]
pub enum CreateOrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("customer: {0} doesn't exist")]
    UnknownCustomer(i32),
    #[error("product: {0} doesn't exist")]
    UnknownProduct(i32),
    #[error("Insufficient stock for product {product}: requested {requested}, available {available}.")]
    InsufficientStock{
        product: i32,
        requested: i32,
        available: i32
    },
    #[error("{0}")]
    TotalOutOfRange(String),
    #[error("Amount {submitted} does not match the total of the items ({computed}).")]
    AmountMismatch{
        submitted: BigDecimal,
        computed: BigDecimal
    }
}

impl Debug for CreateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<CreateOrderError> for ApiError {
    fn from(e: CreateOrderError) -> Self {
        match e {
            CreateOrderError::UnknownCustomer(id) => ApiError::Validation(invalid_pk("customer", id)),
            CreateOrderError::UnknownProduct(id) => ApiError::Validation(invalid_pk("items", id)),
            CreateOrderError::InsufficientStock { .. } => ApiError::Validation(
                FieldErrors::single("items", e.to_string())
            ),
            CreateOrderError::TotalOutOfRange(_) => ApiError::Validation(
                FieldErrors::single("amount", e.to_string())
            ),
            CreateOrderError::AmountMismatch { .. } => ApiError::Validation(
                FieldErrors::single("amount", e.to_string())
            ),
            CreateOrderError::RunQueryError(e) => e.into(),
            CreateOrderError::ThreadpoolError(e) => e.into()
        }
    }
}

// Decrements stock of one product in a single statement. The row lock taken by the
// UPDATE is held until commit, so concurrent orders on the same product serialize here.
// Returns the product's price, or None when the product is missing, does not have
// enough stock (without backorders) or would leave the int4 stock range (with them)
fn decrement_stock(
    conn: &mut PgConnection,
    item: &OrderItemRequest,
    allow_backorder: bool
) -> QueryResult<Option<BigDecimal>> {
    let target = products::table.filter(products::product_id.eq(item.product));

    if allow_backorder {
        diesel::update(target.filter(products::stock.ge(i32::MIN + item.quantity)))
            .set(products::stock.eq(products::stock - item.quantity))
            .returning(products::price)
            .get_result::<BigDecimal>(conn)
            .optional()
    } else {
        diesel::update(target.filter(products::stock.ge(item.quantity)))
            .set(products::stock.eq(products::stock - item.quantity))
            .returning(products::price)
            .get_result::<BigDecimal>(conn)
            .optional()
    }
}

fn explain_failed_decrement(conn: &mut PgConnection, item: &OrderItemRequest) -> CreateOrderError {
    let available = products::table
        .find(item.product)
        .select(products::stock)
        .first::<i32>(conn)
        .optional();

    match available {
        Ok(Some(available)) => CreateOrderError::InsufficientStock{
            product: item.product,
            requested: item.quantity,
            available
        },
        Ok(None) => CreateOrderError::UnknownProduct(item.product),
        Err(e) => CreateOrderError::RunQueryError(e)
    }
}

#[tracing::instrument(
    "Creating order in order table and updating product stock",
    skip(conn, request),
    fields(customer = request.customer, items = request.items.len())
)]
pub async fn create_order_and_update_stock(
    mut conn: DbConnection,
    request: OrderRequest,
    allow_backorder: bool
) -> Result<OrderView, CreateOrderError> {

    let ret = spawn_blocking_with_tracing(move || {
        conn.transaction::<OrderView, CreateOrderError, _>(|conn| {
            if !select(exists(customers::table.find(request.customer))).get_result::<bool>(conn)? {
                return Err(CreateOrderError::UnknownCustomer(request.customer));
            }

            // Amount is filled in once every item is priced
            let order = diesel::insert_into(orders::table)
                .values(NewOrder{
                    customer_id: request.customer,
                    order_date: Utc::now(),
                    amount: BigDecimal::from(0)
                })
                .returning(Order::as_returning())
                .get_result::<Order>(conn)?;

            let mut total = BigDecimal::from(0);

            // Stock rows are locked in product id order
            let mut items = request.items.clone();
            items.sort_by_key(|item| item.product);

            for item in items.iter() {
                let price = match decrement_stock(conn, item, allow_backorder)? {
                    Some(price) => price,
                    None => return Err(explain_failed_decrement(conn, item))
                };

                diesel::insert_into(order_items::table)
                    .values(NewOrderItem{
                        order_id: order.order_id,
                        product_id: item.product,
                        quantity: item.quantity
                    })
                    .execute(conn)?;

                total += price * BigDecimal::from(item.quantity);
            }

            let total = money::parse_amount(&total)
                .map_err(CreateOrderError::TotalOutOfRange)?;

            if let Some(submitted) = &request.amount {
                if *submitted != total {
                    return Err(CreateOrderError::AmountMismatch{
                        submitted: submitted.clone(),
                        computed: total
                    });
                }
            }

            let order = diesel::update(orders::table.find(order.order_id))
                .set(orders::amount.eq(&total))
                .returning(Order::as_returning())
                .get_result::<Order>(conn)?;

            let mut views = load_order_views(conn, vec![order])?;
            views.pop().ok_or(CreateOrderError::RunQueryError(diesel::result::Error::NotFound))
        })
    })
    .await??;

    tracing::info!(order_id = ret.order_id, amount = %ret.amount, "Order created");
    Ok(ret)
}
