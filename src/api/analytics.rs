use axum::{extract::State, Json};

use crate::{
    api::error::ApiError,
    domain::{Delivery, DepartmentEfficiency, MonthlyEnergy, TodayStats},
    state::AppState,
};

/// GET /api/analytics/monthly-energy
///
/// Energy totals per calendar month in chronological order. Months with no
/// deliveries are absent, not zero-filled.
pub async fn monthly_energy(
    State(st): State<AppState>,
) -> Result<Json<Vec<MonthlyEnergy>>, ApiError> {
    Ok(Json(st.repo.monthly_energy().await?))
}

/// GET /api/analytics/department-efficiency
///
/// Average energy use for every department, null for departments with no
/// deliveries.
pub async fn department_efficiency(
    State(st): State<AppState>,
) -> Result<Json<Vec<DepartmentEfficiency>>, ApiError> {
    Ok(Json(st.repo.department_efficiency().await?))
}

/// GET /api/analytics/today
///
/// Total energy and delivery count for the current date, zero-coalesced when
/// no deliveries occurred today.
pub async fn today_stats(State(st): State<AppState>) -> Result<Json<TodayStats>, ApiError> {
    Ok(Json(st.repo.today_stats().await?))
}

/// GET /api/analytics/live
///
/// Full delivery rows from the trailing five-minute window, most recent
/// first; empty array when none qualify.
pub async fn live_deliveries(State(st): State<AppState>) -> Result<Json<Vec<Delivery>>, ApiError> {
    Ok(Json(st.repo.live_deliveries().await?))
}
