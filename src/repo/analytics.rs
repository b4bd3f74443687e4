//! Repository for the four read-only aggregation queries over deliveries.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::domain::{Delivery, DepartmentEfficiency, MonthlyEnergy, TodayStats};

/// Trailing window for the live deliveries query.
pub const LIVE_WINDOW_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Energy totals grouped by calendar month, ordered by the chronological
    /// first occurrence of each month rather than alphabetically.
    pub async fn monthly_energy(&self) -> Result<Vec<MonthlyEnergy>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, MonthlyEnergy>(
            r#"
            SELECT to_char(date_trunc('month', delivered_at), 'Mon') AS month,
                   SUM(energy_used) AS saved
            FROM deliveries
            GROUP BY 1
            ORDER BY min(date_trunc('month', delivered_at))
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Average energy use per department. The left join keeps departments
    /// with no deliveries; their average comes back null.
    pub async fn department_efficiency(&self) -> Result<Vec<DepartmentEfficiency>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, DepartmentEfficiency>(
            r#"
            SELECT d.name AS department_name, AVG(del.energy_used) AS avg_energy_used
            FROM departments d
            LEFT JOIN deliveries del ON del.department_id = d.id
            GROUP BY d.name
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Totals for the database's current date. `CURRENT_DATE` is evaluated in
    /// the store's configured timezone.
    pub async fn today_stats(&self) -> Result<TodayStats, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, TodayStats>(
            r#"
            SELECT COALESCE(SUM(energy_used), 0) AS energy_saved, COUNT(*) AS deliveries
            FROM deliveries
            WHERE delivered_at::date = CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *conn)
        .await
    }

    /// Deliveries inside the trailing live window, most recent first.
    pub async fn live_deliveries(&self) -> Result<Vec<Delivery>, sqlx::Error> {
        let since = live_cutoff(Utc::now());
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Delivery>(
            r#"
            SELECT id, energy_used, delivered_at, department_id
            FROM deliveries
            WHERE delivered_at >= $1
            ORDER BY delivered_at DESC
            "#,
        )
        .bind(since)
        .fetch_all(&mut *conn)
        .await
    }
}

/// Cutoff timestamp for the live window: `now` minus five minutes.
pub fn live_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(LIVE_WINDOW_MINUTES)
}
