use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::update_customer, domain::{CustomerForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

async fn apply_update(
    pool: &DbPool,
    customer_id: i32,
    form: CustomerForm,
    mode: WriteMode
) -> Result<HttpResponse, ApiError> {
    let form = form.validated(mode)?;

    let conn = get_pooled_connection(pool).await?;
    let customer = update_customer(conn, customer_id, form).await?;

    Ok(HttpResponse::Ok().json(customer))
}

#[tracing::instrument(
    "Replacing customer",
    skip(pool, _user)
)]
pub async fn replace_customer(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<CustomerForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Replace).await
}

#[tracing::instrument(
    "Partially updating customer",
    skip(pool, _user)
)]
pub async fn patch_customer(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<CustomerForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Patch).await
}
