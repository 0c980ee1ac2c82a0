use crate::domain::{
    self, Booking, BookingWithSlot, Capacity, DurationMinutes, NewSlot, Slot, SlotId,
    commands::*,
};
use crate::ports::BookingStore;
use std::sync::Arc;

use super::atomic::run_atomic;
use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// リクエストごとに明示的に渡す。グローバルなDBコンテキストは持たない。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
}

/// スロットを予約する
///
/// ビジネスルール（この順で評価する）：
/// - スロットが存在すること
/// - 残席があること
/// - 利用者がまだこのスロットを予約していないこと
///
/// # 一貫性保証
///
/// スロットの読み取りから予約の追加・残席数の更新までを1つのトランザクションで実行する。
/// 成功時は予約がちょうど1件増え、残席数がちょうど1減る。
/// 失敗時はどちらの変更も残らない。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 予約コマンド
///
/// # 戻り値
/// 成功時は作成された予約
pub async fn book_slot(deps: &ServiceDependencies, cmd: BookSlot) -> Result<Booking> {
    let BookSlot { slot_id, user_id } = cmd;

    let outcome = run_atomic(deps.booking_store.as_ref(), move |tx| {
        Box::pin(async move {
            // 1. スロットと既存の予約を取得
            let snapshot = tx
                .get_slot_with_bookings(slot_id)
                .await
                .map_err(BookingApplicationError::StoreError)?
                .ok_or(BookingApplicationError::SlotNotFound)?;

            // 2. ドメイン層の純粋関数で判定（満席 → 予約済みの順）
            let decision = domain::slot::book(&snapshot, user_id)?;

            // 3. 予約を追加し、残席数を減らす
            let booking = tx
                .insert_booking(decision.booking)
                .await
                .map_err(BookingApplicationError::StoreError)?;

            tx.update_slot_capacity(slot_id, decision.remaining_capacity)
                .await
                .map_err(BookingApplicationError::StoreError)?;

            Ok::<_, BookingApplicationError>(booking)
        })
    })
    .await;

    match &outcome {
        Ok(booking) => tracing::info!(
            booking_id = booking.id.value(),
            slot_id = slot_id.value(),
            user_id = user_id.value(),
            "Slot booked"
        ),
        Err(BookingApplicationError::Rejected(rejection)) => tracing::info!(
            slot_id = slot_id.value(),
            user_id = user_id.value(),
            "Booking rejected: {}",
            rejection
        ),
        Err(BookingApplicationError::SlotNotFound) => {
            tracing::debug!(slot_id = slot_id.value(), "Booking for unknown slot")
        }
        Err(e) => tracing::error!(slot_id = slot_id.value(), "Booking failed: {}", e),
    }

    outcome
}

/// スロットを取得する（予約確認画面用）
///
/// 変更は一切行わない。
pub async fn get_slot(deps: &ServiceDependencies, slot_id: SlotId) -> Result<Slot> {
    deps.booking_store
        .get_slot(slot_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::SlotNotFound)
}

/// 全スロットを取得する
pub async fn list_slots(deps: &ServiceDependencies) -> Result<Vec<Slot>> {
    deps.booking_store
        .list_slots()
        .await
        .map_err(BookingApplicationError::StoreError)
}

/// 全予約を対象スロット付きで取得する
pub async fn list_bookings(deps: &ServiceDependencies) -> Result<Vec<BookingWithSlot>> {
    deps.booking_store
        .list_bookings()
        .await
        .map_err(BookingApplicationError::StoreError)
}

/// スロットを作成する（管理用）
///
/// 長さ・残席数が負の場合は`InvalidSlot`。
pub async fn create_slot(deps: &ServiceDependencies, cmd: CreateSlot) -> Result<Slot> {
    let new_slot = NewSlot {
        time: cmd.time,
        duration: DurationMinutes::new(cmd.duration)?,
        capacity: Capacity::new(cmd.capacity)?,
    };

    let slot = deps
        .booking_store
        .create_slot(new_slot)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(
        slot_id = slot.id.value(),
        capacity = slot.capacity.value(),
        "Slot created"
    );

    Ok(slot)
}
