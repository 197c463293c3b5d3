use std::collections::HashMap;

use diesel::{pg::PgConnection, ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};

use crate::{domain::ProductForm, error::ApiError, models::{Product, ProductView, Supplier}, schema::{product_suppliers, products, suppliers}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Joins the supplier links of every given product in one query
fn attach_suppliers(
    conn: &mut PgConnection,
    products: Vec<Product>
) -> QueryResult<Vec<ProductView>> {
    let product_ids: Vec<i32> = products.iter().map(|p| p.product_id).collect();

    let links: Vec<(i32, Supplier)> = product_suppliers::table
        .inner_join(suppliers::table)
        .filter(product_suppliers::product_id.eq_any(product_ids))
        .order((product_suppliers::product_id.asc(), suppliers::supplier_id.asc()))
        .select((product_suppliers::product_id, Supplier::as_select()))
        .load::<(i32, Supplier)>(conn)?;

    let mut by_product: HashMap<i32, Vec<Supplier>> = HashMap::new();
    for (product_id, supplier) in links {
        by_product.entry(product_id).or_default().push(supplier);
    }

    Ok(products.into_iter()
        .map(|product| {
            let suppliers = by_product.remove(&product.product_id).unwrap_or_default();
            ProductView::new(product, suppliers)
        })
        .collect())
}

fn load_product_view(conn: &mut PgConnection, product_id: i32) -> QueryResult<ProductView> {
    let product = products::table
        .find(product_id)
        .select(Product::as_select())
        .first::<Product>(conn)?;

    let mut views = attach_suppliers(conn, vec![product])?;
    views.pop().ok_or(diesel::result::Error::NotFound)
}

#[tracing::instrument(
    "Getting products with suppliers from db",
    skip(conn)
)]
pub async fn get_products(
    mut conn: DbConnection,
    window: Option<(i64, i64)>
) -> Result<Vec<ProductView>, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = products::table
            .order(products::product_id.asc())
            .select(Product::as_select())
            .into_boxed();

        if let Some((limit, offset)) = window {
            query = query.limit(limit).offset(offset);
        }

        let products = query.load::<Product>(&mut conn)?;
        attach_suppliers(&mut conn, products)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting product by id",
    skip(conn)
)]
pub async fn get_product(
    mut conn: DbConnection,
    product_id: i32
) -> Result<ProductView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        load_product_view(&mut conn, product_id)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting product into db",
    skip(conn)
)]
pub async fn insert_product(
    mut conn: DbConnection,
    form: ProductForm
) -> Result<ProductView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        let product = diesel::insert_into(products::table)
            .values(form)
            .returning(Product::as_returning())
            .get_result::<Product>(&mut conn)?;

        Ok::<_, diesel::result::Error>(ProductView::new(product, Vec::new()))
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating product in db",
    skip(conn)
)]
pub async fn update_product(
    mut conn: DbConnection,
    product_id: i32,
    form: ProductForm
) -> Result<ProductView, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        if !form.is_empty() {
            diesel::update(products::table.find(product_id))
                .set(form)
                .returning(Product::as_returning())
                .get_result::<Product>(&mut conn)?;
        }

        load_product_view(&mut conn, product_id)
    })
    .await??;

    Ok(res)
}

// Order items and supplier links referencing the product are removed with it
#[tracing::instrument(
    "Deleting product from db",
    skip(conn)
)]
pub async fn delete_product(
    mut conn: DbConnection,
    product_id: i32
) -> Result<(), ApiError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(products::table.find(product_id))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
