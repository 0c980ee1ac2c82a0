use crate::application::booking::{
    ServiceDependencies, book_slot as execute_book_slot, create_slot as execute_create_slot,
    get_slot as execute_get_slot, list_bookings as execute_list_bookings,
    list_slots as execute_list_slots,
};
use crate::domain::{SlotId, UserId, commands::*};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
};
use std::sync::Arc;

use super::{
    error::{ApiError, QueryError},
    types::{BookSlotRequest, BookingResponse, CreateSlotRequest, SlotResponse},
};

/// 予約成功後のリダイレクト先
pub const BOOKINGS_PATH: &str = "/bookings";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    /// 容量未指定のスロットに設定する残席数
    pub default_slot_capacity: i32,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /slots/:id/book - スロットを予約
///
/// 成功時は予約一覧（GET /bookings）へ 303 でリダイレクトする。
///
/// 強制されるビジネスルール:
/// - スロットが存在すること（404）
/// - 残席があること（422 SLOT_FULL）
/// - 同じ利用者が未予約であること（422 ALREADY_BOOKED）
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Path(slot_id): Path<i32>,
    Json(req): Json<BookSlotRequest>,
) -> Result<Redirect, ApiError> {
    let cmd = BookSlot {
        slot_id: SlotId::new(slot_id),
        user_id: UserId::new(req.user_id),
    };

    execute_book_slot(&state.service_deps, cmd).await?;

    Ok(Redirect::to(BOOKINGS_PATH))
}

/// POST /slots - スロットを作成（管理用）
pub async fn create_slot(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<SlotResponse>), ApiError> {
    let cmd = CreateSlot {
        time: req.time,
        duration: req.duration,
        capacity: req.capacity.unwrap_or(state.default_slot_capacity),
    };

    let slot = execute_create_slot(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(SlotResponse::from(slot))))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /slots/:id/book - 予約確認用にスロットを取得
///
/// 見つからない場合は404を返す。変更は行わない。
pub async fn booking_form(
    State(state): State<Arc<AppState>>,
    Path(slot_id): Path<i32>,
) -> Result<Json<SlotResponse>, QueryError> {
    let slot = execute_get_slot(&state.service_deps, SlotId::new(slot_id)).await?;
    Ok(Json(SlotResponse::from(slot)))
}

/// GET /slots - スロット一覧
pub async fn list_slots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SlotResponse>>, QueryError> {
    let slots = execute_list_slots(&state.service_deps).await?;
    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}

/// GET /bookings - 予約一覧（スロット情報付き）
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingResponse>>, QueryError> {
    let bookings = execute_list_bookings(&state.service_deps).await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
