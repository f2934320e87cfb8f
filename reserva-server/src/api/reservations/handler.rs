//! Reservation API Handlers
//!
//! Thin adapters over the booking engine: the caller identity comes from
//! the authenticated request and is passed down explicitly.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate};
use crate::utils::AppResult;

/// POST /api/reservations - 预订桌台
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .booking
        .create_reservation(payload, &user.email)
        .await?;
    Ok(Json(reservation))
}

/// GET /api/reservations - 当前用户的全部预订
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.booking.list_reservations(&user.email).await?;
    Ok(Json(reservations))
}

/// PATCH /api/reservations/{id}/cancel - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.booking.cancel_reservation(&id).await?;
    Ok(Json(reservation))
}
