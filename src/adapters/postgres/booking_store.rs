use crate::domain::{
    Booking, BookingId, BookingWithSlot, Capacity, DurationMinutes, NewBooking, NewSlot, Slot,
    SlotId, SlotWithBookings, UserId,
};
use crate::ports::booking_store::{
    BookingStore as BookingStoreTrait, Result, StoreTransaction,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, postgres::PgRow};

/// Wrap a row-level data problem as a store error
fn invalid_data(message: impl Into<String>) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message.into(),
    ))
}

/// Map a `slots` row to a Slot
///
/// The CHECK constraints keep duration and capacity non-negative, but the
/// value objects are still validated so a bad row surfaces as an error.
fn map_row_to_slot(row: &PgRow) -> Result<Slot> {
    let duration = DurationMinutes::new(row.get("duration"))
        .map_err(|e| invalid_data(e.to_string()))?;
    let capacity =
        Capacity::new(row.get("capacity")).map_err(|e| invalid_data(e.to_string()))?;

    Ok(Slot {
        id: SlotId::new(row.get("id")),
        time: row.get("time"),
        duration,
        capacity,
    })
}

/// Map a `bookings JOIN slots` row to a BookingWithSlot
fn map_row_to_booking_with_slot(row: &PgRow) -> Result<BookingWithSlot> {
    let slot_id = SlotId::new(row.get("slot_id"));
    let duration = DurationMinutes::new(row.get("duration"))
        .map_err(|e| invalid_data(e.to_string()))?;
    let capacity =
        Capacity::new(row.get("capacity")).map_err(|e| invalid_data(e.to_string()))?;

    Ok(BookingWithSlot {
        booking: Booking {
            id: BookingId::new(row.get("booking_id")),
            slot_id,
            user_id: UserId::new(row.get("user_id")),
        },
        slot: Slot {
            id: slot_id,
            time: row.get("time"),
            duration,
            capacity,
        },
    })
}

fn map_row_to_booking(row: &PgRow) -> Booking {
    Booking {
        id: BookingId::new(row.get("id")),
        slot_id: SlotId::new(row.get("slot_id")),
        user_id: UserId::new(row.get("user_id")),
    }
}

/// PostgreSQL implementation of BookingStore
///
/// Tables are created by the migrations in `migrations/`.
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// Create a new BookingStore with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(Transaction { tx }))
    }

    async fn create_slot(&self, new_slot: NewSlot) -> Result<Slot> {
        let row = sqlx::query(
            r#"
            INSERT INTO slots ("time", duration, capacity)
            VALUES ($1, $2, $3)
            RETURNING id, "time", duration, capacity
            "#,
        )
        .bind(new_slot.time)
        .bind(new_slot.duration.value())
        .bind(new_slot.capacity.value())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_slot(&row)
    }

    async fn get_slot(&self, slot_id: SlotId) -> Result<Option<Slot>> {
        let row = sqlx::query(
            r#"
            SELECT id, "time", duration, capacity
            FROM slots
            WHERE id = $1
            "#,
        )
        .bind(slot_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_slot).transpose()
    }

    async fn list_slots(&self) -> Result<Vec<Slot>> {
        let rows = sqlx::query(
            r#"
            SELECT id, "time", duration, capacity
            FROM slots
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_slot).collect()
    }

    async fn list_bookings(&self) -> Result<Vec<BookingWithSlot>> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id AS booking_id,
                b.slot_id,
                b.user_id,
                s."time",
                s.duration,
                s.capacity
            FROM bookings b
            JOIN slots s ON s.id = b.slot_id
            ORDER BY b.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_with_slot).collect()
    }
}

/// A BookingStore transaction backed by `sqlx::Transaction`
///
/// Dropping it without `commit` rolls back.
struct Transaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for Transaction {
    /// Load the slot and its bookings, locking the slot row
    ///
    /// `FOR UPDATE` makes a concurrent booking of the same slot wait until this
    /// transaction ends, so it always sees the updated capacity.
    async fn get_slot_with_bookings(
        &mut self,
        slot_id: SlotId,
    ) -> Result<Option<SlotWithBookings>> {
        let row = sqlx::query(
            r#"
            SELECT id, "time", duration, capacity
            FROM slots
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(slot_id.value())
        .fetch_optional(&mut *self.tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let slot = map_row_to_slot(&row)?;

        let rows = sqlx::query(
            r#"
            SELECT id, slot_id, user_id
            FROM bookings
            WHERE slot_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(slot_id.value())
        .fetch_all(&mut *self.tx)
        .await?;

        let bookings = rows.iter().map(map_row_to_booking).collect();

        Ok(Some(SlotWithBookings { slot, bookings }))
    }

    async fn insert_booking(&mut self, new_booking: NewBooking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (slot_id, user_id)
            VALUES ($1, $2)
            RETURNING id, slot_id, user_id
            "#,
        )
        .bind(new_booking.slot_id.value())
        .bind(new_booking.user_id.value())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(map_row_to_booking(&row))
    }

    async fn update_slot_capacity(&mut self, slot_id: SlotId, capacity: Capacity) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE slots
            SET capacity = $2
            WHERE id = $1
            "#,
        )
        .bind(slot_id.value())
        .bind(capacity.value())
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(invalid_data(format!(
                "slot {} vanished during booking",
                slot_id.value()
            )));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
