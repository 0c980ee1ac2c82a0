use crate::ports::{BookingStore, StoreTransaction};
use futures::future::BoxFuture;

use super::errors::{BookingApplicationError, Result};

/// トランザクション内で処理を実行する
///
/// `f`が`Ok`を返した場合のみコミットし、`Err`の場合はロールバックする。
/// どちらの場合も、途中まで適用された状態が他の操作から見えることはない。
///
/// ```ignore
/// let booking = run_atomic(store, |tx| Box::pin(async move {
///     let snapshot = tx.get_slot_with_bookings(slot_id).await?;
///     // ...
/// })).await?;
/// ```
pub async fn run_atomic<T, F>(store: &dyn BookingStore, f: F) -> Result<T>
where
    T: Send,
    F: for<'tx> FnOnce(&'tx mut dyn StoreTransaction) -> BoxFuture<'tx, Result<T>> + Send,
{
    let mut tx = store
        .begin()
        .await
        .map_err(BookingApplicationError::StoreError)?;

    let outcome = f(&mut *tx).await;

    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(BookingApplicationError::StoreError)?;
            Ok(value)
        }
        Err(err) => {
            // ロールバック失敗は元のエラーを隠さない
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Failed to roll back transaction: {}", rollback_err);
            }
            Err(err)
        }
    }
}
