use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::delete_supplier, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting supplier by id",
    skip(pool, _user)
)]
pub async fn destroy_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    delete_supplier(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
