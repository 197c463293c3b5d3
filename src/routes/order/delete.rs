use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::delete_order_from_database, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting order by id",
    skip(pool, _user)
)]
pub async fn delete_order(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    delete_order_from_database(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
