pub mod availability;
pub mod booking;
pub mod opening_hours;
pub mod service;

pub use availability::{day_key, time_key, AvailabilityIndex};
pub use booking::{booking_key, Booking, BookingRequest, BookingStatus};
pub use opening_hours::{OpeningHours, OpeningInterval};
pub use service::{Service, ServiceCatalog};
