use diesel::{dsl::exists, pg::PgConnection, select, Connection, ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl};

use crate::{domain::ProductSupplierForm, error::{ApiError, FieldErrors}, models::ProductSupplierView, schema::{product_suppliers, products, suppliers}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

macro_rules! link_view_query {
    () => {
        product_suppliers::table
            .inner_join(products::table)
            .inner_join(suppliers::table)
            .select((
                product_suppliers::id,
                product_suppliers::product_id,
                products::name,
                product_suppliers::supplier_id,
                suppliers::name
            ))
    };
}

fn load_link_view(conn: &mut PgConnection, link_id: i32) -> QueryResult<ProductSupplierView> {
    link_view_query!()
        .filter(product_suppliers::id.eq(link_id))
        .first::<ProductSupplierView>(conn)
}

fn check_link_targets(conn: &mut PgConnection, form: &ProductSupplierForm) -> Result<(), ApiError> {
    let mut errors = FieldErrors::default();

    if let Some(product_id) = form.product_id {
        if !select(exists(products::table.find(product_id))).get_result::<bool>(conn)? {
            errors.add("product", format!("Invalid pk \"{}\" - object does not exist.", product_id));
        }
    }

    if let Some(supplier_id) = form.supplier_id {
        if !select(exists(suppliers::table.find(supplier_id))).get_result::<bool>(conn)? {
            errors.add("supplier", format!("Invalid pk \"{}\" - object does not exist.", supplier_id));
        }
    }

    Ok(errors.into_result()?)
}

#[tracing::instrument(
    "Getting product-supplier links from db",
    skip(conn)
)]
pub async fn get_product_suppliers(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<ProductSupplierView>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = link_view_query!()
            .order(product_suppliers::id.asc())
            .into_boxed();

        if let Some((limit, offset)) = window {
            query = query.limit(limit).offset(offset);
        }

        query.load::<ProductSupplierView>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting product-supplier link by id",
    skip(conn)
)]
pub async fn get_product_supplier(
    mut conn: DbConnection,
    link_id: i32
) -> Result<ProductSupplierView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        load_link_view(&mut conn, link_id)
    })
    .await??;

    Ok(res)
}

// A second link for the same (product, supplier) pair fails with a unique violation
#[tracing::instrument(
    "Linking product to supplier",
    skip(conn)
)]
pub async fn insert_product_supplier(
    mut conn: DbConnection,
    form: ProductSupplierForm
) -> Result<ProductSupplierView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<ProductSupplierView, ApiError, _>(|conn| {
            check_link_targets(conn, &form)?;

            let link_id = diesel::insert_into(product_suppliers::table)
                .values(form)
                .returning(product_suppliers::id)
                .get_result::<i32>(conn)?;

            Ok(load_link_view(conn, link_id)?)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating product-supplier link",
    skip(conn)
)]
pub async fn update_product_supplier(
    mut conn: DbConnection,
    link_id: i32,
    form: ProductSupplierForm
) -> Result<ProductSupplierView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<ProductSupplierView, ApiError, _>(|conn| {
            if !form.is_empty() {
                if !select(exists(product_suppliers::table.find(link_id))).get_result::<bool>(conn)? {
                    return Err(ApiError::NotFound);
                }

                check_link_targets(conn, &form)?;

                diesel::update(product_suppliers::table.find(link_id))
                    .set(form)
                    .execute(conn)?;
            }

            Ok(load_link_view(conn, link_id)?)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Unlinking product from supplier",
    skip(conn)
)]
pub async fn delete_product_supplier(
    mut conn: DbConnection,
    link_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(product_suppliers::table.find(link_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
