use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::update_supplier, domain::{SupplierForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

async fn apply_update(
    pool: &DbPool,
    supplier_id: i32,
    form: SupplierForm,
    mode: WriteMode
) -> Result<HttpResponse, ApiError> {
    let form = form.validated(mode)?;

    let conn = get_pooled_connection(pool).await?;
    let supplier = update_supplier(conn, supplier_id, form).await?;

    Ok(HttpResponse::Ok().json(supplier))
}

#[tracing::instrument(
    "Replacing supplier",
    skip(pool, _user)
)]
pub async fn replace_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<SupplierForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Replace).await
}

#[tracing::instrument(
    "Partially updating supplier",
    skip(pool, _user)
)]
pub async fn patch_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<SupplierForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Patch).await
}
