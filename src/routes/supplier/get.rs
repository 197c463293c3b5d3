use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_supplier, get_suppliers}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of suppliers",
    skip(pool, _user)
)]
pub async fn list_suppliers(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let suppliers = get_suppliers(conn, window).await?;

    Ok(HttpResponse::Ok().json(suppliers))
}

#[tracing::instrument(
    "Getting supplier by id",
    skip(pool, _user)
)]
pub async fn retrieve_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let supplier = get_supplier(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(supplier))
}
