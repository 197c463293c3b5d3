use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{domain::SupplierForm, error::ApiError, models::Supplier, schema::suppliers, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

#[tracing::instrument(
    "Getting suppliers from db",
    skip(conn)
)]
pub async fn get_suppliers(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<Supplier>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = suppliers::table
            .order(suppliers::supplier_id.asc())
            .select(Supplier::as_select())
            .into_boxed();

        if let Some((limit, offset)) = window {
            query = query.limit(limit).offset(offset);
        }

        query.load::<Supplier>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting supplier by id",
    skip(conn)
)]
pub async fn get_supplier(
    mut conn: DbConnection,
    supplier_id: i32
) -> Result<Supplier, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        suppliers::table
            .find(supplier_id)
            .select(Supplier::as_select())
            .first::<Supplier>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting supplier into db",
    skip(conn)
)]
pub async fn insert_supplier(
    mut conn: DbConnection,
    form: SupplierForm
) -> Result<Supplier, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(suppliers::table)
            .values(form)
            .returning(Supplier::as_returning())
            .get_result::<Supplier>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating supplier in db",
    skip(conn)
)]
pub async fn update_supplier(
    mut conn: DbConnection,
    supplier_id: i32,
    form: SupplierForm
) -> Result<Supplier, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        if form.is_empty() {
            return suppliers::table
                .find(supplier_id)
                .select(Supplier::as_select())
                .first::<Supplier>(&mut conn);
        }

        diesel::update(suppliers::table.find(supplier_id))
            .set(form)
            .returning(Supplier::as_returning())
            .get_result::<Supplier>(&mut conn)
    })
    .await??;

    Ok(res)
}

// Product links go with the supplier (ON DELETE CASCADE)
#[tracing::instrument(
    "Deleting supplier from db",
    skip(conn)
)]
pub async fn delete_supplier(
    mut conn: DbConnection,
    supplier_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(suppliers::table.find(supplier_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
