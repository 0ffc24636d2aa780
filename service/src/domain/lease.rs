//! [`Lease`] definitions.

use common::Money;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    occupancy::{self, InvalidSelectionError, OccupancyResolution},
    schedule::{self, InvalidTermsError, PaymentSchedule, RentalTerms},
    WeekdaySet,
};

/// Lease of a guest.
#[derive(Clone, Copy, Debug)]
pub struct Lease {
    /// ID of this [`Lease`].
    pub id: Id,

    /// [`RentalTerms`] this [`Lease`] is billed by.
    pub terms: RentalTerms,

    /// Days of the week the guest selected for this [`Lease`].
    pub selected_days: WeekdaySet,

    /// Total rent of this [`Lease`], once its [`PaymentSchedule`] has been
    /// generated.
    pub total_rent: Option<Money>,
}

impl Lease {
    /// Resolves the weekly [`OccupancyResolution`] of this [`Lease`].
    ///
    /// # Errors
    ///
    /// With an [`InvalidSelectionError`] if no days are selected.
    pub fn occupancy(
        &self,
    ) -> Result<OccupancyResolution, InvalidSelectionError> {
        occupancy::resolve(self.selected_days)
    }

    /// Generates the guest [`PaymentSchedule`] of this [`Lease`].
    ///
    /// # Errors
    ///
    /// With an [`InvalidTermsError`] if the [`RentalTerms`] are invalid.
    pub fn guest_payment_schedule(
        &self,
    ) -> Result<PaymentSchedule, InvalidTermsError> {
        schedule::generate(&self.terms)
    }
}

/// ID of a [`Lease`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
