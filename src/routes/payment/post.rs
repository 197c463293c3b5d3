use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::insert_payment, domain::{PaymentForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Creating payment",
    skip(pool, _user)
)]
pub async fn create_payment(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    form: web::Json<PaymentForm>
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner().validated(WriteMode::Create)?;

    let conn = get_pooled_connection(&pool).await?;
    let payment = insert_payment(conn, form).await?;

    Ok(HttpResponse::Created().json(payment))
}
