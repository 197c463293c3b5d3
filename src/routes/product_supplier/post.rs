use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::insert_product_supplier, domain::{ProductSupplierForm, WriteMode}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Linking product to supplier",
    skip(pool, _user)
)]
pub async fn create_product_supplier(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    form: web::Json<ProductSupplierForm>
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    form.check(WriteMode::Create)?;

    let conn = get_pooled_connection(&pool).await?;
    let product_supplier = insert_product_supplier(conn, form).await?;

    Ok(HttpResponse::Created().json(product_supplier))
}
