use chrono::Utc;
use diesel::{dsl::exists, pg::PgConnection, select, Connection, ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl};

use crate::{domain::PaymentForm, error::{ApiError, FieldErrors}, models::{NewPayment, PaymentView}, schema::{customers, orders, payments}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::invalid_pk;

// Payment rows joined with the paying customer's name
macro_rules! payment_view_query {
    () => {
        payments::table
            .inner_join(orders::table.inner_join(customers::table))
            .select((
                payments::payment_id,
                payments::order_id,
                customers::name,
                payments::amount,
                payments::payment_mode,
                payments::payment_date
            ))
    };
}

fn load_payment_view(conn: &mut PgConnection, payment_id: i32) -> QueryResult<PaymentView> {
    payment_view_query!()
        .filter(payments::payment_id.eq(payment_id))
        .first::<PaymentView>(conn)
}

fn check_order_exists(conn: &mut PgConnection, order_id: Option<i32>) -> Result<(), ApiError> {
    if let Some(order_id) = order_id {
        let found = select(exists(orders::table.find(order_id))).get_result::<bool>(conn)?;

        if !found {
            return Err(ApiError::Validation(invalid_pk("order", order_id)));
        }
    }

    Ok(())
}

#[tracing::instrument(
    "Getting payments from db",
    skip(conn)
)]
pub async fn get_payments(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<PaymentView>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = payment_view_query!()
            .order(payments::payment_id.asc())
            .into_boxed();

        if let Some((limit, offset)) = window {
            query = query.limit(limit).offset(offset);
        }

        query.load::<PaymentView>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting payment by id",
    skip(conn)
)]
pub async fn get_payment(
    mut conn: DbConnection,
    payment_id: i32
) -> Result<PaymentView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        load_payment_view(&mut conn, payment_id)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting payment into db",
    skip(conn)
)]
pub async fn insert_payment(
    mut conn: DbConnection,
    form: PaymentForm
) -> Result<PaymentView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<PaymentView, ApiError, _>(|conn| {
            let (order_id, amount, payment_mode) = match (form.order_id, form.amount, form.payment_mode) {
                (Some(order_id), Some(amount), Some(payment_mode)) => (order_id, amount, payment_mode),
                _ => return Err(ApiError::Validation(
                    FieldErrors::single("non_field_errors", "order, amount and payment_mode are required.")
                ))
            };

            check_order_exists(conn, Some(order_id))?;

            let payment_id = diesel::insert_into(payments::table)
                .values(NewPayment{
                    order_id,
                    amount,
                    payment_mode,
                    payment_date: Utc::now()
                })
                .returning(payments::payment_id)
                .get_result::<i32>(conn)?;

            Ok(load_payment_view(conn, payment_id)?)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating payment in db",
    skip(conn)
)]
pub async fn update_payment(
    mut conn: DbConnection,
    payment_id: i32,
    form: PaymentForm
) -> Result<PaymentView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<PaymentView, ApiError, _>(|conn| {
            if !form.is_empty() {
                // Missing payment wins over a bad order reference
                let found = select(exists(payments::table.find(payment_id))).get_result::<bool>(conn)?;
                if !found {
                    return Err(ApiError::NotFound);
                }

                check_order_exists(conn, form.order_id)?;

                diesel::update(payments::table.find(payment_id))
                    .set(form)
                    .execute(conn)?;
            }

            Ok(load_payment_view(conn, payment_id)?)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Deleting payment from db",
    skip(conn)
)]
pub async fn delete_payment(
    mut conn: DbConnection,
    payment_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(payments::table.find(payment_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
