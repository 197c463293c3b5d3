use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::update_product, domain::{ProductForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

async fn apply_update(
    pool: &DbPool,
    product_id: i32,
    form: ProductForm,
    mode: WriteMode
) -> Result<HttpResponse, ApiError> {
    let form = form.validated(mode)?;

    let conn = get_pooled_connection(pool).await?;
    let product = update_product(conn, product_id, form).await?;

    Ok(HttpResponse::Ok().json(product))
}

#[tracing::instrument(
    "Replacing product",
    skip(pool, _user)
)]
pub async fn replace_product(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<ProductForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Replace).await
}

#[tracing::instrument(
    "Partially updating product",
    skip(pool, _user)
)]
pub async fn patch_product(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<ProductForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Patch).await
}
