use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_product_supplier, get_product_suppliers}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of product-supplier links",
    skip(pool, _user)
)]
pub async fn list_product_suppliers(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let product_suppliers = get_product_suppliers(conn, window).await?;

    Ok(HttpResponse::Ok().json(product_suppliers))
}

#[tracing::instrument(
    "Getting product-supplier link by id",
    skip(pool, _user)
)]
pub async fn retrieve_product_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let product_supplier = get_product_supplier(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(product_supplier))
}
