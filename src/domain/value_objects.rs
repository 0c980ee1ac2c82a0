use serde::{Deserialize, Serialize};
use thiserror::Error;

/// スロットID - ストアが採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(i32);

impl SlotId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// 予約ID - ストアが採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i32);

impl BookingId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// 利用者ID - 認証基盤は持たないため、リクエストで渡された値をそのまま使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// スロットの値が不正
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotValidationError {
    #[error("capacity must not be negative (got {0})")]
    NegativeCapacity(i32),

    #[error("duration must not be negative (got {0})")]
    NegativeDuration(i32),
}

/// 残席数
///
/// 不変条件：0以上。
/// 予約1件につきちょうど1減り、0のスロットは満席として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Capacity(i32);

impl Capacity {
    /// 残席数を作成する
    ///
    /// # エラー
    /// 負の値の場合は`SlotValidationError::NegativeCapacity`を返す
    pub fn new(value: i32) -> Result<Self, SlotValidationError> {
        if value < 0 {
            return Err(SlotValidationError::NegativeCapacity(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// 満席か
    pub fn is_full(&self) -> bool {
        self.0 <= 0
    }

    /// 1席消費した残席数を返す。満席なら`None`
    pub fn decrement(self) -> Option<Self> {
        if self.is_full() {
            return None;
        }
        Some(Self(self.0 - 1))
    }
}

impl TryFrom<i32> for Capacity {
    type Error = SlotValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capacity> for i32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}

/// クラスの長さ（分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    pub fn new(minutes: i32) -> Result<Self, SlotValidationError> {
        if minutes < 0 {
            return Err(SlotValidationError::NegativeDuration(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for DurationMinutes {
    type Error = SlotValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationMinutes> for i32 {
    fn from(duration: DurationMinutes) -> Self {
        duration.0
    }
}
