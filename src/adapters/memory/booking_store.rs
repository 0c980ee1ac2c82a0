use crate::domain::{
    Booking, BookingId, BookingWithSlot, Capacity, NewBooking, NewSlot, Slot, SlotId,
    SlotWithBookings, UserId,
};
use crate::ports::booking_store::{
    BookingStore as BookingStoreTrait, Result, StoreTransaction,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// インメモリストアのエラー
#[derive(Debug, Error)]
pub enum InMemoryStoreError {
    /// 外部キー違反：参照先のスロットが存在しない
    #[error("slot {0:?} does not exist")]
    UnknownSlot(SlotId),
}

/// テーブル一式
///
/// BTreeMapのキー順（= 採番順）を保存順とする。
#[derive(Debug, Clone, Default)]
struct Tables {
    slots: BTreeMap<SlotId, Slot>,
    bookings: BTreeMap<BookingId, Booking>,
    last_slot_id: i32,
    last_booking_id: i32,
}

impl Tables {
    fn insert_slot(&mut self, new_slot: NewSlot) -> Slot {
        self.last_slot_id += 1;
        let slot = Slot {
            id: SlotId::new(self.last_slot_id),
            time: new_slot.time,
            duration: new_slot.duration,
            capacity: new_slot.capacity,
        };
        self.slots.insert(slot.id, slot.clone());
        slot
    }

    fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking> {
        if !self.slots.contains_key(&new_booking.slot_id) {
            return Err(Box::new(InMemoryStoreError::UnknownSlot(
                new_booking.slot_id,
            )));
        }

        self.last_booking_id += 1;
        let booking = Booking {
            id: BookingId::new(self.last_booking_id),
            slot_id: new_booking.slot_id,
            user_id: new_booking.user_id,
        };
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }
}

/// BookingStoreのインメモリ実装
///
/// トランザクションはストア全体のロックを保持し、テーブルの複製に対して変更を行う。
/// コミット時に複製を書き戻し、ロールバック・破棄時は複製を捨てる。
/// そのため並行トランザクションは完全に直列化される。
#[derive(Clone, Default)]
pub struct BookingStore {
    tables: Arc<Mutex<Tables>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 業務ルールを通さずに予約を直接追加する（テスト・初期データ用）
    ///
    /// 残席数は変更しない。
    pub async fn insert_booking_unchecked(
        &self,
        slot_id: SlotId,
        user_id: UserId,
    ) -> Result<Booking> {
        let mut tables = self.tables.lock().await;
        tables.insert_booking(NewBooking { slot_id, user_id })
    }

    /// 予約件数
    pub async fn booking_count(&self) -> usize {
        self.tables.lock().await.bookings.len()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(Transaction { guard, staged }))
    }

    async fn create_slot(&self, new_slot: NewSlot) -> Result<Slot> {
        let mut tables = self.tables.lock().await;
        Ok(tables.insert_slot(new_slot))
    }

    async fn get_slot(&self, slot_id: SlotId) -> Result<Option<Slot>> {
        let tables = self.tables.lock().await;
        Ok(tables.slots.get(&slot_id).cloned())
    }

    async fn list_slots(&self) -> Result<Vec<Slot>> {
        let tables = self.tables.lock().await;
        Ok(tables.slots.values().cloned().collect())
    }

    async fn list_bookings(&self) -> Result<Vec<BookingWithSlot>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bookings
            .values()
            .filter_map(|booking| {
                tables.slots.get(&booking.slot_id).map(|slot| BookingWithSlot {
                    booking: booking.clone(),
                    slot: slot.clone(),
                })
            })
            .collect())
    }
}

/// インメモリストアのトランザクション
struct Transaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

#[async_trait]
impl StoreTransaction for Transaction {
    async fn get_slot_with_bookings(
        &mut self,
        slot_id: SlotId,
    ) -> Result<Option<SlotWithBookings>> {
        let Some(slot) = self.staged.slots.get(&slot_id).cloned() else {
            return Ok(None);
        };

        let bookings = self
            .staged
            .bookings
            .values()
            .filter(|b| b.slot_id == slot_id)
            .cloned()
            .collect();

        Ok(Some(SlotWithBookings { slot, bookings }))
    }

    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking> {
        self.staged.insert_booking(new_booking)
    }

    async fn update_slot_capacity(&mut self, slot_id: SlotId, capacity: Capacity) -> Result<()> {
        let slot = self
            .staged
            .slots
            .get_mut(&slot_id)
            .ok_or(InMemoryStoreError::UnknownSlot(slot_id))?;
        slot.capacity = capacity;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let Transaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
