use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{domain::CustomerForm, error::ApiError, models::Customer, schema::customers, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

#[tracing::instrument(
    "Getting customers from db",
    skip(conn)
)]
pub async fn get_customers(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<Customer>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = customers::table
            .order(customers::customer_id.asc())
            .select(Customer::as_select())
            .into_boxed();

        if let Some((limit, offset)) = window {
            query = query.limit(limit).offset(offset);
        }

        query.load::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting customer by id",
    skip(conn)
)]
pub async fn get_customer(
    mut conn: DbConnection,
    customer_id: i32
) -> Result<Customer, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        customers::table
            .find(customer_id)
            .select(Customer::as_select())
            .first::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting customer into db",
    skip(conn)
)]
pub async fn insert_customer(
    mut conn: DbConnection,
    form: CustomerForm
) -> Result<Customer, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(customers::table)
            .values(form)
            .returning(Customer::as_returning())
            .get_result::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating customer in db",
    skip(conn)
)]
pub async fn update_customer(
    mut conn: DbConnection,
    customer_id: i32,
    form: CustomerForm
) -> Result<Customer, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        if form.is_empty() {
            return customers::table
                .find(customer_id)
                .select(Customer::as_select())
                .first::<Customer>(&mut conn);
        }

        diesel::update(customers::table.find(customer_id))
            .set(form)
            .returning(Customer::as_returning())
            .get_result::<Customer>(&mut conn)
    })
    .await??;

    Ok(res)
}

// Orders, their items and payments go with the customer (ON DELETE CASCADE)
#[tracing::instrument(
    "Deleting customer from db",
    skip(conn)
)]
pub async fn delete_customer(
    mut conn: DbConnection,
    customer_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(customers::table.find(customer_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
