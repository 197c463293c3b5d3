use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_product, get_products}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of products",
    skip(pool, _user)
)]
pub async fn list_products(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let products = get_products(conn, window).await?;

    Ok(HttpResponse::Ok().json(products))
}

#[tracing::instrument(
    "Getting product by id",
    skip(pool, _user)
)]
pub async fn retrieve_product(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let product = get_product(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(product))
}
