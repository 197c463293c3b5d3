use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::delete_payment, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting payment by id",
    skip(pool, _user)
)]
pub async fn destroy_payment(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    delete_payment(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
