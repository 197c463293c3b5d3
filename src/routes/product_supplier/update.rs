use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::update_product_supplier, domain::{ProductSupplierForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

async fn apply_update(
    pool: &DbPool,
    link_id: i32,
    form: ProductSupplierForm,
    mode: WriteMode
) -> Result<HttpResponse, ApiError> {
    form.check(mode)?;

    let conn = get_pooled_connection(pool).await?;
    let product_supplier = update_product_supplier(conn, link_id, form).await?;

    Ok(HttpResponse::Ok().json(product_supplier))
}

#[tracing::instrument(
    "Replacing product-supplier link",
    skip(pool, _user)
)]
pub async fn replace_product_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<ProductSupplierForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Replace).await
}

#[tracing::instrument(
    "Partially updating product-supplier link",
    skip(pool, _user)
)]
pub async fn patch_product_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<ProductSupplierForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Patch).await
}
