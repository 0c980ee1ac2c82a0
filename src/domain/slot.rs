use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingRejection, Capacity, DurationMinutes, SlotId, UserId};

// ============================================================================
// エンティティ
// ============================================================================

/// スロット（開講されるクラス1回分）
///
/// 生成後に変化するのは`capacity`のみで、予約時に1ずつ減る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub time: DateTime<Utc>,
    pub duration: DurationMinutes,
    pub capacity: Capacity,
}

/// 予約（利用者1人によるスロット1件の予約）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub user_id: UserId,
}

/// スロットとそれに紐づく予約一覧
///
/// 予約処理は常にこのスナップショットに対して判定する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotWithBookings {
    pub slot: Slot,
    pub bookings: Vec<Booking>,
}

impl SlotWithBookings {
    /// 利用者が既にこのスロットを予約しているか
    pub fn is_booked_by(&self, user_id: UserId) -> bool {
        self.bookings.iter().any(|b| b.user_id == user_id)
    }
}

/// 予約一覧表示用：予約とその対象スロット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWithSlot {
    pub booking: Booking,
    pub slot: Slot,
}

/// 作成前のスロット（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlot {
    pub time: DateTime<Utc>,
    pub duration: DurationMinutes,
    pub capacity: Capacity,
}

/// 作成前の予約（IDはストアが採番する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub slot_id: SlotId,
    pub user_id: UserId,
}

// ============================================================================
// 予約の判定（純粋な関数）
// ============================================================================

/// 予約判定の結果：書き込むべき内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDecision {
    pub booking: NewBooking,
    pub remaining_capacity: Capacity,
}

/// スロットを予約できるか判定する（純粋な関数）
///
/// ビジネスルール（この順で評価する）：
/// 1. 残席があること
/// 2. 同じ利用者が既に予約していないこと
///
/// 満席かつ予約済みの場合は満席として拒否する。
pub fn book(
    snapshot: &SlotWithBookings,
    user_id: UserId,
) -> Result<BookingDecision, BookingRejection> {
    let remaining_capacity = snapshot
        .slot
        .capacity
        .decrement()
        .ok_or(BookingRejection::SlotFull)?;

    if snapshot.is_booked_by(user_id) {
        return Err(BookingRejection::AlreadyBooked);
    }

    Ok(BookingDecision {
        booking: NewBooking {
            slot_id: snapshot.slot.id,
            user_id,
        },
        remaining_capacity,
    })
}
