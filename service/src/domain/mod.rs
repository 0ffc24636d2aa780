//! Domain definitions.

pub mod lease;
pub mod occupancy;
pub mod payment;
pub mod schedule;
pub mod weekday;

pub use self::{
    lease::Lease,
    occupancy::OccupancyResolution,
    schedule::{PaymentCycle, PaymentSchedule, RentalTerms},
    weekday::{Weekday, WeekdaySet},
};
