use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::delete_customer, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting customer by id",
    skip(pool, _user)
)]
pub async fn destroy_customer(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    delete_customer(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
