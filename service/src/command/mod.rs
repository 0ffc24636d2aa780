//! [`Command`] definition.

pub mod generate_guest_payment_schedule;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::generate_guest_payment_schedule::GenerateGuestPaymentSchedule;
