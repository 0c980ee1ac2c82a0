pub mod commands;
pub mod errors;
pub mod slot;
pub mod value_objects;

pub use errors::*;
pub use slot::{
    Booking, BookingDecision, BookingWithSlot, NewBooking, NewSlot, Slot, SlotWithBookings,
};
pub use value_objects::*;
