use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_payment, get_payments}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of payments",
    skip(pool, _user)
)]
pub async fn list_payments(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let payments = get_payments(conn, window).await?;

    Ok(HttpResponse::Ok().json(payments))
}

#[tracing::instrument(
    "Getting payment by id",
    skip(pool, _user)
)]
pub async fn retrieve_payment(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let payment = get_payment(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(payment))
}
