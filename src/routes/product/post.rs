use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::insert_product, domain::{ProductForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Creating product",
    skip(pool, _user)
)]
pub async fn create_product(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    form: web::Json<ProductForm>
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner().validated(WriteMode::Create)?;

    let conn = get_pooled_connection(&pool).await?;
    let product = insert_product(conn, form).await?;

    Ok(HttpResponse::Created().json(product))
}
