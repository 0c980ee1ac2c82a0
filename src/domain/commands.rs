use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SlotId, UserId};

/// コマンド：スロットを予約する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSlot {
    pub slot_id: SlotId,
    pub user_id: UserId,
}

/// コマンド：スロットを作成する（管理用）
///
/// 値は未検証の生の値で受け取り、アプリケーション層で値オブジェクトに変換する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSlot {
    pub time: DateTime<Utc>,
    pub duration: i32,
    pub capacity: i32,
}
