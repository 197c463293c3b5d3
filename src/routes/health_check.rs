use actix_web::{web, HttpResponse};
use diesel::{sql_query, RunQueryDsl};

use crate::{telemetry::spawn_blocking_with_tracing, utils::{get_pooled_connection, DbPool}};

// Liveness plus a round trip to postgres
#[tracing::instrument(
    "Checking if api is online",
    skip(pool)
)]
pub async fn health_check(pool: web::Data<DbPool>) -> HttpResponse{
    let conn = match get_pooled_connection(&pool).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = ?e, "Database unavailable");
            return HttpResponse::ServiceUnavailable().body("Database unavailable");
        }
    };

    let ping = spawn_blocking_with_tracing(move || {
        let mut conn = conn;
        sql_query("SELECT 1").execute(&mut conn)
    })
    .await;

    match ping {
        Ok(Ok(_)) => HttpResponse::Ok().body("Working"),
        _ => HttpResponse::ServiceUnavailable().body("Database unavailable")
    }
}
