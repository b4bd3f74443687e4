//! Database integration tests.
//!
//! These need a reachable PostgreSQL instance (configured the same way as
//! the service, via `DB_*` variables) and are ignored by default:
//!
//! ```bash
//! cargo test --test db_tests -- --ignored --test-threads=1
//! ```
//!
//! Fixtures live in session-scoped temp tables that shadow any real
//! `deliveries` / `departments` tables, so the target database is never
//! modified. The pool is pinned to a single connection so every query sees
//! the temp tables.

use chrono::{Duration, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use delivery_analytics::{config::Config, repo::AnalyticsRepository};

async fn fixture_pool() -> PgPool {
    let db = Config::load().unwrap().db;
    let options = PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.name)
        .username(&db.user)
        .password(&db.password);

    // single connection: temp tables are session-scoped
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("test database unreachable");

    sqlx::query(
        r#"
        CREATE TEMP TABLE departments (
            id BIGINT PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        CREATE TEMP TABLE deliveries (
            id BIGINT PRIMARY KEY,
            energy_used DOUBLE PRECISION NOT NULL,
            delivered_at TIMESTAMPTZ NOT NULL,
            department_id BIGINT REFERENCES departments(id)
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

async fn insert_delivery(pool: &PgPool, id: i64, energy: f64, delivered_at: chrono::DateTime<Utc>) {
    sqlx::query("INSERT INTO deliveries (id, energy_used, delivered_at) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(energy)
        .bind(delivered_at)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn monthly_energy_orders_chronologically_and_conserves_totals() {
    let pool = fixture_pool().await;
    let repo = AnalyticsRepository::new(pool.clone());

    // December 2023 precedes January 2024; alphabetical order would flip it
    insert_delivery(&pool, 1, 7.5, "2023-12-20T08:00:00Z".parse().unwrap()).await;
    insert_delivery(&pool, 2, 10.0, "2024-01-05T09:00:00Z".parse().unwrap()).await;
    insert_delivery(&pool, 3, 5.0, "2024-02-10T10:00:00Z".parse().unwrap()).await;

    let months = repo.monthly_energy().await.unwrap();

    let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(labels, vec!["Dec", "Jan", "Feb"]);
    assert_eq!(months[1].saved, 10.0);
    assert_eq!(months[2].saved, 5.0);

    let total: f64 = months.iter().map(|m| m.saved).sum();
    assert_eq!(total, 22.5);
}

#[tokio::test]
#[ignore]
async fn department_with_no_deliveries_has_null_average() {
    let pool = fixture_pool().await;
    let repo = AnalyticsRepository::new(pool.clone());

    sqlx::query("INSERT INTO departments (id, name) VALUES (1, 'HVAC'), (2, 'Lighting')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO deliveries (id, energy_used, delivered_at, department_id)
         VALUES (1, 4.0, now(), 2), (2, 6.0, now(), 2)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let mut rows = repo.department_efficiency().await.unwrap();
    rows.sort_by(|a, b| a.department_name.cmp(&b.department_name));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].department_name, "HVAC");
    assert_eq!(rows[0].avg_energy_used, None);
    assert_eq!(rows[1].department_name, "Lighting");
    assert_eq!(rows[1].avg_energy_used, Some(5.0));
}

#[tokio::test]
#[ignore]
async fn today_stats_coalesces_to_zero_on_an_empty_day() {
    let pool = fixture_pool().await;
    let repo = AnalyticsRepository::new(pool.clone());

    let stats = repo.today_stats().await.unwrap();
    assert_eq!(stats.energy_saved, 0.0);
    assert_eq!(stats.deliveries, 0);

    insert_delivery(&pool, 1, 3.0, Utc::now()).await;
    insert_delivery(&pool, 2, 4.0, Utc::now()).await;
    // outside today, must not count
    insert_delivery(&pool, 3, 99.0, Utc::now() - Duration::days(2)).await;

    let stats = repo.today_stats().await.unwrap();
    assert_eq!(stats.energy_saved, 7.0);
    assert_eq!(stats.deliveries, 2);
}

#[tokio::test]
#[ignore]
async fn live_deliveries_filters_to_the_trailing_window() {
    let pool = fixture_pool().await;
    let repo = AnalyticsRepository::new(pool.clone());

    assert!(repo.live_deliveries().await.unwrap().is_empty());

    let now = Utc::now();
    insert_delivery(&pool, 1, 1.0, now - Duration::minutes(10)).await;
    insert_delivery(&pool, 2, 2.0, now - Duration::minutes(1)).await;
    insert_delivery(&pool, 3, 3.0, now).await;

    let live = repo.live_deliveries().await.unwrap();

    let ids: Vec<i64> = live.iter().map(|d| d.id).collect();
    // most recent first; the 10-minute-old row is outside the window
    assert_eq!(ids, vec![3, 2]);
}
