use crate::domain::{
    Booking, BookingWithSlot, Capacity, NewBooking, NewSlot, Slot, SlotId, SlotWithBookings,
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// スロットと予約の永続化を抽象化する。
/// 読み取りはストアから直接、予約処理の書き込みは`begin()`で開始した
/// トランザクション経由でのみ行う。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// トランザクションを開始する
    ///
    /// 返されたトランザクションは`commit`されるまで他の操作から見えない。
    /// `commit`せずに破棄した場合はロールバックされる。
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>>;

    /// スロットを作成する（IDはストアが採番）
    async fn create_slot(&self, new_slot: NewSlot) -> Result<Slot>;

    /// IDでスロットを取得する
    async fn get_slot(&self, slot_id: SlotId) -> Result<Option<Slot>>;

    /// 全スロットを取得する（順序は保存順）
    async fn list_slots(&self) -> Result<Vec<Slot>>;

    /// 全予約を対象スロット付きで取得する（順序は保存順）
    async fn list_bookings(&self) -> Result<Vec<BookingWithSlot>>;
}

/// ストアのトランザクション
///
/// 予約処理の「読み取り・判定・書き込み」を1単位で実行するために使う。
/// 同じスロットに対する並行トランザクションは、ストア側で直列化されなければならない。
#[async_trait]
pub trait StoreTransaction: Send {
    /// スロットを紐づく予約一覧と共に取得する
    async fn get_slot_with_bookings(&mut self, slot_id: SlotId)
    -> Result<Option<SlotWithBookings>>;

    /// 予約を追加する（IDはストアが採番）
    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking>;

    /// スロットの残席数を更新する
    async fn update_slot_capacity(&mut self, slot_id: SlotId, capacity: Capacity) -> Result<()>;

    /// 変更を確定する
    async fn commit(self: Box<Self>) -> Result<()>;

    /// 変更を破棄する
    async fn rollback(self: Box<Self>) -> Result<()>;
}
