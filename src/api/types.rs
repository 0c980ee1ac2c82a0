use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BookingWithSlot, Slot};

/// 予約リクエスト（POST /slots/:id/book）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub user_id: i32,
}

/// スロット作成リクエスト（POST /slots）
///
/// `capacity`省略時は設定値（DEFAULT_SLOT_CAPACITY）を使う。
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub time: DateTime<Utc>,
    pub duration: i32,
    pub capacity: Option<i32>,
}

/// スロットレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub slot_id: i32,
    pub time: DateTime<Utc>,
    pub duration: i32,
    pub capacity: i32,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            slot_id: slot.id.value(),
            time: slot.time,
            duration: slot.duration.value(),
            capacity: slot.capacity.value(),
        }
    }
}

/// 予約レスポンス（GET /bookings）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: i32,
    pub slot_id: i32,
    pub user_id: i32,
    pub slot: SlotResponse,
}

impl From<BookingWithSlot> for BookingResponse {
    fn from(view: BookingWithSlot) -> Self {
        Self {
            booking_id: view.booking.id.value(),
            slot_id: view.booking.slot_id.value(),
            user_id: view.booking.user_id.value(),
            slot: SlotResponse::from(view.slot),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
