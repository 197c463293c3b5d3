use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::{get_customer, get_customers}, domain::ListQuery, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of customers",
    skip(pool, _user)
)]
pub async fn list_customers(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, ApiError> {
    let window = query.window()?;
    let conn = get_pooled_connection(&pool).await?;

    let customers = get_customers(conn, window).await?;

    Ok(HttpResponse::Ok().json(customers))
}

#[tracing::instrument(
    "Getting customer by id",
    skip(pool, _user)
)]
pub async fn retrieve_customer(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let customer = get_customer(conn, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(customer))
}
