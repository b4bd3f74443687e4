//! Row and response types for the analytics queries.
//!
//! The delivery store is owned by an external writer; everything here is a
//! read-only projection of its `deliveries` and `departments` tables.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A recorded energy delivery, optionally attributed to a department.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Delivery {
    pub id: i64,
    pub energy_used: f64,
    pub delivered_at: DateTime<Utc>,
    pub department_id: Option<i64>,
}

/// Energy total for one calendar month, labeled with the three-letter
/// month abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct MonthlyEnergy {
    pub month: String,
    pub saved: f64,
}

/// Average energy use per department. `avg_energy_used` is `None` for
/// departments with no deliveries (left-join semantics).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DepartmentEfficiency {
    pub department_name: String,
    pub avg_energy_used: Option<f64>,
}

/// Totals for deliveries whose `delivered_at` falls on the current date.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TodayStats {
    pub energy_saved: f64,
    pub deliveries: i64,
}
