use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, configuration::OrderSettings, db_interaction::create_order_and_update_stock, domain::OrderRequest, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Posting order",
    skip(pool, settings, user),
    fields(user_id = user.0.id)
)]
pub async fn post_order(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    settings: web::Data<OrderSettings>,
    order: web::Json<OrderRequest>
) -> Result<HttpResponse, ApiError> {
    let request = order.into_inner().validated()?;

    let conn = get_pooled_connection(&pool).await?;
    let order = create_order_and_update_stock(conn, request, settings.allow_backorder).await?;

    Ok(HttpResponse::Created().json(order))
}
