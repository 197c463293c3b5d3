use bigdecimal::BigDecimal;
use diesel::{dsl::sum, ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{domain::money, error::ApiError, models::{DashboardStats, Order}, schema::{customers, orders, products}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::orders::load_order_views;

pub const LOW_STOCK_THRESHOLD: i32 = 10;
pub const RECENT_ORDER_COUNT: i64 = 5;

#[tracing::instrument(
    "Computing dashboard stats",
    skip(conn)
)]
pub async fn get_dashboard_stats(
    mut conn: DbConnection
) -> Result<DashboardStats, ApiError> {
    let res = spawn_blocking_with_tracing(move || {
        // One snapshot for every figure
        conn.build_transaction()
            .repeatable_read()
            .read_only()
            .run::<DashboardStats, diesel::result::Error, _>(|conn| {
                let total_customers = customers::table.count().get_result::<i64>(conn)?;
                let total_products = products::table.count().get_result::<i64>(conn)?;
                let total_orders = orders::table.count().get_result::<i64>(conn)?;

                let total_revenue = orders::table
                    .select(sum(orders::amount))
                    .first::<Option<BigDecimal>>(conn)?
                    .unwrap_or_else(|| BigDecimal::from(0))
                    .with_scale(money::DECIMAL_PLACES);

                let low_stock_products = products::table
                    .filter(products::stock.lt(LOW_STOCK_THRESHOLD))
                    .count()
                    .get_result::<i64>(conn)?;

                let recent = orders::table
                    .order((orders::order_date.desc(), orders::order_id.asc()))
                    .limit(RECENT_ORDER_COUNT)
                    .select(Order::as_select())
                    .load::<Order>(conn)?;

                Ok(DashboardStats{
                    total_customers,
                    total_products,
                    total_orders,
                    total_revenue,
                    low_stock_products,
                    recent_orders: load_order_views(conn, recent)?
                })
            })
    })
    .await??;

    Ok(res)
}
