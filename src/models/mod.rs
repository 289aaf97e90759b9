pub mod booking;
pub mod notice;
pub mod studio;
pub mod user;

pub use booking::{Booking, BookingRequest, BookingSlot, NewBooking};
pub use notice::{Notice, Severity};
pub use studio::{Studio, StudioTier};
pub use user::{Role, User, Viewer};
