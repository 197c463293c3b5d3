use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_order_with_items_by_id, get_orders_with_items}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of orders",
    skip(pool, _user)
)]
pub async fn get_orders(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let orders = get_orders_with_items(conn, window).await?;

    Ok(HttpResponse::Ok().json(orders))
}

#[tracing::instrument(
    "Getting order by id",
    skip(pool, _user)
)]
pub async fn get_order(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let order = get_order_with_items_by_id(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(order))
}
