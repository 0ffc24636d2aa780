//! [`RentalTerms`] definitions.

use std::fmt;

use common::{define_kind, Date, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

define_kind! {
    /// Kind of a lease, defining how it's billed.
    #[derive(Deserialize, Serialize)]
    enum RentalType {
        /// Billed once a month.
        Monthly = 1,

        /// Billed for every 4 weeks, occupied week by week.
        Weekly = 2,

        /// Billed for every 4 weeks, occupied night by night.
        Nightly = 3,
    }
}

define_kind! {
    /// Pattern of occupied weeks within every 4-week block of a lease.
    #[derive(Default, Deserialize, Serialize)]
    enum WeekPattern {
        /// Every week is occupied.
        #[default]
        EveryWeek = 1,

        /// One week is occupied, the next one is not.
        OneOnOneOff = 2,

        /// Two weeks are occupied, the next two are not.
        TwoOnTwoOff = 3,

        /// One week is occupied, the next three are not.
        OneOnThreeOff = 4,
    }
}

impl WeekPattern {
    /// Returns which weeks of a 4-week block are occupied.
    #[must_use]
    pub const fn occupied_weeks(self) -> [bool; 4] {
        match self {
            Self::EveryWeek => [true, true, true, true],
            Self::OneOnOneOff => [true, false, true, false],
            Self::TwoOnTwoOff => [true, true, false, false],
            Self::OneOnThreeOff => [true, false, false, false],
        }
    }
}

define_kind! {
    /// Unit a [`ReservationSpan`] is measured in.
    enum SpanUnit {
        /// Whole weeks.
        Weeks = 1,

        /// Whole months.
        Months = 2,
    }
}

/// Total booked duration of a lease.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReservationSpan {
    /// Number of whole weeks.
    Weeks(u32),

    /// Number of whole months.
    Months(u32),
}

impl ReservationSpan {
    /// Creates a new [`ReservationSpan`] out of the provided unit and length.
    ///
    /// # Errors
    ///
    /// With an [`InvalidTermsError`] if the `length` is not positive, or is
    /// too large to form any valid schedule.
    pub fn new(unit: SpanUnit, length: i64) -> Result<Self, InvalidTermsError> {
        if length <= 0 {
            return Err(InvalidTermsError::NonPositiveSpan(length));
        }
        let length = u32::try_from(length)
            .map_err(|_| InvalidTermsError::DateOutOfRange)?;
        Ok(match unit {
            SpanUnit::Weeks => Self::Weeks(length),
            SpanUnit::Months => Self::Months(length),
        })
    }

    /// Creates a new [`ReservationSpan`] out of the optional week and month
    /// counts, exactly one of which must be provided.
    ///
    /// # Errors
    ///
    /// With an [`InvalidTermsError`] if both or none counts are provided, or
    /// the provided one is not a valid [`ReservationSpan`] length.
    pub fn from_parts(
        weeks: Option<i64>,
        months: Option<i64>,
    ) -> Result<Self, InvalidTermsError> {
        match (weeks, months) {
            (Some(weeks), None) => Self::new(SpanUnit::Weeks, weeks),
            (None, Some(months)) => Self::new(SpanUnit::Months, months),
            (Some(_), Some(_)) | (None, None) => {
                Err(InvalidTermsError::AmbiguousSpan)
            }
        }
    }

    /// Returns the [`SpanUnit`] of this [`ReservationSpan`].
    #[must_use]
    pub const fn unit(self) -> SpanUnit {
        match self {
            Self::Weeks(_) => SpanUnit::Weeks,
            Self::Months(_) => SpanUnit::Months,
        }
    }

    /// Returns the number of [`SpanUnit`]s in this [`ReservationSpan`].
    #[must_use]
    pub const fn length(self) -> u32 {
        match self {
            Self::Weeks(n) | Self::Months(n) => n,
        }
    }
}

impl Display for ReservationSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weeks(n) => write!(f, "{n} week(s)"),
            Self::Months(n) => write!(f, "{n} month(s)"),
        }
    }
}

/// Terms a lease is billed by.
///
/// Amounts are kept as provided, so [`RentalTerms`] may hold invalid values
/// until they're validated by generating a payment schedule out of them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "wire::RentalTerms")]
pub struct RentalTerms {
    /// [`RentalType`] of the lease.
    pub rental_type: RentalType,

    /// [`Date`] the guest moves in.
    pub move_in_date: Date,

    /// [`ReservationSpan`] of the lease.
    pub reservation_span: ReservationSpan,

    /// [`WeekPattern`] of the lease.
    ///
    /// Ignored for [`RentalType::Monthly`] leases.
    pub week_pattern: WeekPattern,

    /// Rent per billing cycle: a 4-week amount for [`RentalType::Weekly`]
    /// and [`RentalType::Nightly`] leases, and a monthly amount for
    /// [`RentalType::Monthly`] ones.
    pub periodic_rent: Decimal,

    /// Maintenance fee charged every billing cycle.
    pub maintenance_fee: Decimal,

    /// Refundable damage deposit charged once, with the first billing cycle.
    pub damage_deposit: Decimal,
}

impl RentalTerms {
    /// Validates the amounts of these [`RentalTerms`], returning them as
    /// `(periodic_rent, maintenance_fee, damage_deposit)`.
    pub(super) fn amounts(
        &self,
    ) -> Result<(Money, Money, Money), InvalidTermsError> {
        let money = |field, amount| {
            Money::new(amount)
                .ok_or(InvalidTermsError::NegativeAmount { field, amount })
        };
        Ok((
            money("periodicRent", self.periodic_rent)?,
            money("maintenanceFee", self.maintenance_fee)?,
            money("damageDeposit", self.damage_deposit)?,
        ))
    }
}

/// Error of invalid [`RentalTerms`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidTermsError {
    /// [`ReservationSpan`] is measured in a unit not matching the
    /// [`RentalType`].
    #[display("`{rental_type}` lease cannot be reserved for {span}")]
    SpanUnitMismatch {
        /// [`RentalType`] of the lease.
        rental_type: RentalType,

        /// Mismatched [`ReservationSpan`].
        span: ReservationSpan,
    },

    /// Both or none of the week and month counts are provided.
    #[display(
        "exactly one of `reservationSpanWeeks` or `reservationSpanMonths` \
         must be provided"
    )]
    AmbiguousSpan,

    /// [`ReservationSpan`] is not positive.
    #[display("reservation span must be positive, got {_0}")]
    NonPositiveSpan(#[error(not(source))] i64),

    /// An amount is negative.
    #[display("`{field}` must not be negative, got {amount}")]
    NegativeAmount {
        /// Name of the negative amount.
        field: &'static str,

        /// Negative amount itself.
        amount: Decimal,
    },

    /// Payment dates fall outside the supported calendar range.
    #[display("payment dates fall outside the supported calendar range")]
    DateOutOfRange,

    /// Payment amounts overflow.
    #[display("payment amounts are too large")]
    AmountOverflow,
}

mod wire {
    //! Module providing the wire representation of [`RentalTerms`].
    //!
    //! [`RentalTerms`]: super::RentalTerms

    use common::Date;
    use rust_decimal::Decimal;
    use serde::Deserialize;

    use super::{InvalidTermsError, RentalType, ReservationSpan, WeekPattern};

    /// Wire representation of [`RentalTerms`].
    ///
    /// [`RentalTerms`]: super::RentalTerms
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct RentalTerms {
        rental_type: RentalType,
        move_in_date: Date,
        reservation_span_weeks: Option<i64>,
        reservation_span_months: Option<i64>,
        #[serde(default)]
        week_pattern: WeekPattern,
        periodic_rent: Decimal,
        #[serde(default)]
        maintenance_fee: Decimal,
        #[serde(default)]
        damage_deposit: Decimal,
    }

    impl TryFrom<RentalTerms> for super::RentalTerms {
        type Error = InvalidTermsError;

        fn try_from(wire: RentalTerms) -> Result<Self, Self::Error> {
            Ok(Self {
                rental_type: wire.rental_type,
                move_in_date: wire.move_in_date,
                reservation_span: ReservationSpan::from_parts(
                    wire.reservation_span_weeks,
                    wire.reservation_span_months,
                )?,
                week_pattern: wire.week_pattern,
                periodic_rent: wire.periodic_rent,
                maintenance_fee: wire.maintenance_fee,
                damage_deposit: wire.damage_deposit,
            })
        }
    }
}
