use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::insert_supplier, domain::{SupplierForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Creating supplier",
    skip(pool, _user)
)]
pub async fn create_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    form: web::Json<SupplierForm>
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner().validated(WriteMode::Create)?;

    let conn = get_pooled_connection(&pool).await?;
    let supplier = insert_supplier(conn, form).await?;

    Ok(HttpResponse::Created().json(supplier))
}
