mod atomic;
mod booking_service;
mod errors;

pub use atomic::run_atomic;
pub use booking_service::{
    ServiceDependencies, book_slot, create_slot, get_slot, list_bookings, list_slots,
};
pub use errors::{BookingApplicationError, Result};
