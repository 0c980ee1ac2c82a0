use thiserror::Error;

/// 予約が業務ルールにより拒否された理由
///
/// メッセージは利用者にそのまま表示されるため、文言を変えてはならない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRejection {
    /// 残席がない
    #[error("Slot is full.")]
    SlotFull,

    /// 同じ利用者が既に同じスロットを予約している
    #[error("You have already booked this slot.")]
    AlreadyBooked,
}

impl BookingRejection {
    /// API応答用のエラーコード
    pub fn code(&self) -> &'static str {
        match self {
            BookingRejection::SlotFull => "SLOT_FULL",
            BookingRejection::AlreadyBooked => "ALREADY_BOOKED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages_are_literal() {
        assert_eq!(BookingRejection::SlotFull.to_string(), "Slot is full.");
        assert_eq!(
            BookingRejection::AlreadyBooked.to_string(),
            "You have already booked this slot."
        );
    }
}
