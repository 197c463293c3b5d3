use actix_web::{web, HttpResponse};

use crate::{auth::AuthenticatedUser, db_interaction::get_dashboard_stats, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting dashboard stats",
    skip(pool, _user)
)]
pub async fn dashboard_stats(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let stats = get_dashboard_stats(conn).await?;

    Ok(HttpResponse::Ok().json(stats))
}
