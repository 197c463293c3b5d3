use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::delete_product, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Deleting product by id",
    skip(pool, _user)
)]
pub async fn destroy_product(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    delete_product(conn, path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
