use crate::domain::{BookingRejection, SlotValidationError};
use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// スロットが存在しない
    #[error("Slot not found")]
    SlotNotFound,

    /// 業務ルール違反（満席・予約済み）
    #[error(transparent)]
    Rejected(#[from] BookingRejection),

    /// スロットの値が不正
    #[error("Invalid slot: {0}")]
    InvalidSlot(#[from] SlotValidationError),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingApplicationError {
    /// 業務ルール違反による拒否か
    pub fn rejection(&self) -> Option<BookingRejection> {
        match self {
            BookingApplicationError::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
