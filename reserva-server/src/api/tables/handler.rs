//! Restaurant Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{RestaurantTable, RestaurantTableCreate, RestaurantTableUpdate};
use crate::db::repository::{ReservationRepository, RestaurantTableRepository};
use crate::utils::validation::validate_positive;
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RestaurantTable>>> {
    let repo = RestaurantTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantTableCreate>,
) -> AppResult<Json<RestaurantTable>> {
    validate_positive(payload.number, "number")?;
    validate_positive(payload.capacity, "capacity")?;

    let repo = RestaurantTableRepository::new(state.db.clone());
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PATCH /api/tables/{id} - 部分更新桌台
///
/// 直接改写 status 属于带外覆盖：预订引擎不会将它与
/// 现有预订进行对账。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantTableUpdate>,
) -> AppResult<Json<RestaurantTable>> {
    if let Some(number) = payload.number {
        validate_positive(number, "number")?;
    }
    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;
    }

    let repo = RestaurantTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id} - 删除桌台
///
/// 有 ACTIVE 预订引用时拒绝删除，避免预订悬空。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RestaurantTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;

    let table_id = table
        .id
        .ok_or_else(|| AppError::internal("table record has no id"))?;
    let reservations = ReservationRepository::new(state.db.clone());
    if !reservations.find_active_by_table(&table_id).await?.is_empty() {
        return Err(AppError::conflict("Table has an active reservation"));
    }

    repo.delete(&id).await?;
    Ok(Json(true))
}
