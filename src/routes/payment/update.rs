use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::update_payment, domain::{PaymentForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

async fn apply_update(
    pool: &DbPool,
    payment_id: i32,
    form: PaymentForm,
    mode: WriteMode
) -> Result<HttpResponse, ApiError> {
    let form = form.validated(mode)?;

    let conn = get_pooled_connection(pool).await?;
    let payment = update_payment(conn, payment_id, form).await?;

    Ok(HttpResponse::Ok().json(payment))
}

#[tracing::instrument(
    "Replacing payment",
    skip(pool, _user)
)]
pub async fn replace_payment(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<PaymentForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Replace).await
}

#[tracing::instrument(
    "Partially updating payment",
    skip(pool, _user)
)]
pub async fn patch_payment(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<PaymentForm>
) -> Result<HttpResponse, ApiError> {
    apply_update(&pool, path.into_inner(), form.into_inner(), WriteMode::Patch).await
}
