use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::insert_customer, domain::{CustomerForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Creating customer",
    skip(pool, _user)
)]
pub async fn create_customer(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    form: web::Json<CustomerForm>
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner().validated(WriteMode::Create)?;

    let conn = get_pooled_connection(&pool).await?;
    let customer = insert_customer(conn, form).await?;

    Ok(HttpResponse::Created().json(customer))
}
