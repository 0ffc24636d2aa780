//! [`PaymentSchedule`]-related definitions.

use common::{Date, Money};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject};
use rust_decimal::Decimal;
use service::domain::{self, schedule};

use crate::{api, api::scalar, AsError, Context, Error};

/// Type of a lease, defining how its rent is billed.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "RentalType")]
pub enum RentalType {
    /// Billed every 31 days.
    Monthly,

    /// Billed every 4 weeks.
    Weekly,

    /// Billed every 4 weeks for the selected nights.
    Nightly,
}

impl From<RentalType> for schedule::RentalType {
    fn from(kind: RentalType) -> Self {
        match kind {
            RentalType::Monthly => Self::Monthly,
            RentalType::Weekly => Self::Weekly,
            RentalType::Nightly => Self::Nightly,
        }
    }
}

/// Pattern of the occupied weeks in every 4-week cycle.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "WeekPattern")]
pub enum WeekPattern {
    /// All 4 weeks are occupied.
    EveryWeek,

    /// 1st and 3rd weeks are occupied.
    OneOnOneOff,

    /// 1st and 2nd weeks are occupied.
    TwoOnTwoOff,

    /// Only the 1st week is occupied.
    OneOnThreeOff,
}

impl From<WeekPattern> for schedule::WeekPattern {
    fn from(pattern: WeekPattern) -> Self {
        match pattern {
            WeekPattern::EveryWeek => Self::EveryWeek,
            WeekPattern::OneOnOneOff => Self::OneOnOneOff,
            WeekPattern::TwoOnTwoOff => Self::TwoOnTwoOff,
            WeekPattern::OneOnThreeOff => Self::OneOnThreeOff,
        }
    }
}

/// Rental terms to generate a `PaymentSchedule` by.
///
/// Exactly one of `reservationSpanWeeks` and `reservationSpanMonths` must be
/// provided: weeks for `WEEKLY` and `NIGHTLY` leases, months for `MONTHLY`
/// ones.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "RentalTermsInput")]
pub struct RentalTermsInput {
    /// Type of the lease.
    pub rental_type: RentalType,

    /// `Date` the guest moves in.
    pub move_in_date: Date,

    /// Length of the reservation in weeks.
    pub reservation_span_weeks: Option<i32>,

    /// Length of the reservation in months.
    pub reservation_span_months: Option<i32>,

    /// Pattern of the occupied weeks. `EVERY_WEEK` if omitted.
    pub week_pattern: Option<WeekPattern>,

    /// Rent charged every payment cycle.
    pub periodic_rent: scalar::Amount,

    /// Maintenance fee charged every payment cycle. Zero if omitted.
    pub maintenance_fee: Option<scalar::Amount>,

    /// Damage deposit charged with the first payment. Zero if omitted.
    pub damage_deposit: Option<scalar::Amount>,
}

impl TryFrom<RentalTermsInput> for domain::RentalTerms {
    type Error = schedule::InvalidTermsError;

    fn try_from(input: RentalTermsInput) -> Result<Self, Self::Error> {
        let or_zero = |a: Option<scalar::Amount>| {
            a.map(Decimal::from).unwrap_or_default()
        };

        let RentalTermsInput {
            rental_type,
            move_in_date,
            reservation_span_weeks,
            reservation_span_months,
            week_pattern,
            periodic_rent,
            maintenance_fee,
            damage_deposit,
        } = input;

        Ok(Self {
            rental_type: rental_type.into(),
            move_in_date,
            reservation_span: schedule::ReservationSpan::from_parts(
                reservation_span_weeks.map(i64::from),
                reservation_span_months.map(i64::from),
            )?,
            week_pattern: week_pattern.map(Into::into).unwrap_or_default(),
            periodic_rent: periodic_rent.into(),
            maintenance_fee: or_zero(maintenance_fee),
            damage_deposit: or_zero(damage_deposit),
        })
    }
}

/// Generated guest payment schedule.
#[derive(Clone, Debug)]
pub struct PaymentSchedule(domain::PaymentSchedule);

impl From<domain::PaymentSchedule> for PaymentSchedule {
    fn from(schedule: domain::PaymentSchedule) -> Self {
        Self(schedule)
    }
}

/// Generated guest payment schedule.
#[graphql_object(context = Context)]
impl PaymentSchedule {
    /// `PaymentCycle`s of this `PaymentSchedule`, in chronological order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentSchedule.cycles",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cycles(&self) -> Vec<PaymentCycle> {
        self.0.cycles.iter().copied().map(Into::into).collect()
    }

    /// Sum of all the `PaymentCycle` totals, excluding the damage deposit.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentSchedule.aggregateTotal",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn aggregate_total(&self) -> Money {
        self.0.aggregate_total
    }

    /// Number of `PaymentCycle`s in this `PaymentSchedule`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentSchedule.cycleCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cycle_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.cycle_count)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Total number of occupied weeks, for `WEEKLY` and `NIGHTLY` leases only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentSchedule.occupiedWeeks",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn occupied_weeks(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        self.0
            .occupied_weeks()
            .map(i32::try_from)
            .transpose()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Single billing cycle of a `PaymentSchedule`.
#[derive(Clone, Copy, Debug)]
pub struct PaymentCycle(domain::PaymentCycle);

impl From<domain::PaymentCycle> for PaymentCycle {
    fn from(cycle: domain::PaymentCycle) -> Self {
        Self(cycle)
    }
}

/// Single billing cycle of a `PaymentSchedule`.
#[graphql_object(context = Context)]
impl PaymentCycle {
    /// Number of this `PaymentCycle`, starting from `1`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.cycleNumber",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cycle_number(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.0.cycle_number)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// `Date` this `PaymentCycle` is due on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.scheduledDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn scheduled_date(&self) -> Date {
        self.0.scheduled_date
    }

    /// Rent charged in this `PaymentCycle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.rent",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn rent(&self) -> Money {
        self.0.rent
    }

    /// Maintenance fee charged in this `PaymentCycle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.maintenanceFee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn maintenance_fee(&self) -> Money {
        self.0.maintenance_fee
    }

    /// Damage deposit charged in this `PaymentCycle`.
    ///
    /// Zero for every `PaymentCycle` except the first one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.depositCharged",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn deposit_charged(&self) -> Money {
        self.0.deposit_charged
    }

    /// Total amount due in this `PaymentCycle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.total",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total(&self) -> Money {
        self.0.total
    }

    /// Number of occupied weeks in this `PaymentCycle`, for `WEEKLY` and
    /// `NIGHTLY` leases only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentCycle.occupiedWeeks",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn occupied_weeks(&self) -> Option<i32> {
        self.0.occupied_weeks.map(i32::from)
    }
}

impl AsError for schedule::InvalidTermsError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::bad_request("INVALID_TERMS", self))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::domain::{self, schedule};

    use crate::AsError as _;

    use super::{RentalTermsInput, RentalType, WeekPattern};

    fn input() -> RentalTermsInput {
        RentalTermsInput {
            rental_type: RentalType::Weekly,
            move_in_date: "2025-03-01".parse().unwrap(),
            reservation_span_weeks: Some(8),
            reservation_span_months: None,
            week_pattern: None,
            periodic_rent: Decimal::from(1000).into(),
            maintenance_fee: None,
            damage_deposit: None,
        }
    }

    #[test]
    fn defaults_omitted_fields() {
        let terms = domain::RentalTerms::try_from(input()).unwrap();

        assert_eq!(terms.rental_type, schedule::RentalType::Weekly);
        assert_eq!(terms.reservation_span, schedule::ReservationSpan::Weeks(8));
        assert_eq!(terms.week_pattern, schedule::WeekPattern::EveryWeek);
        assert_eq!(terms.periodic_rent, Decimal::from(1000));
        assert_eq!(terms.maintenance_fee, Decimal::ZERO);
        assert_eq!(terms.damage_deposit, Decimal::ZERO);
    }

    #[test]
    fn keeps_provided_fields() {
        let terms = domain::RentalTerms::try_from(RentalTermsInput {
            rental_type: RentalType::Monthly,
            reservation_span_weeks: None,
            reservation_span_months: Some(3),
            week_pattern: Some(WeekPattern::TwoOnTwoOff),
            maintenance_fee: Some(Decimal::from(50).into()),
            damage_deposit: Some(Decimal::from(500).into()),
            ..input()
        })
        .unwrap();

        assert_eq!(terms.rental_type, schedule::RentalType::Monthly);
        assert_eq!(
            terms.reservation_span,
            schedule::ReservationSpan::Months(3),
        );
        assert_eq!(terms.week_pattern, schedule::WeekPattern::TwoOnTwoOff);
        assert_eq!(terms.maintenance_fee, Decimal::from(50));
        assert_eq!(terms.damage_deposit, Decimal::from(500));
    }

    #[test]
    fn rejects_ambiguous_span_as_invalid_terms() {
        for (weeks, months) in [(Some(8), Some(2)), (None, None)] {
            let err = domain::RentalTerms::try_from(RentalTermsInput {
                reservation_span_weeks: weeks,
                reservation_span_months: months,
                ..input()
            })
            .unwrap_err();

            assert_eq!(err, schedule::InvalidTermsError::AmbiguousSpan);

            let err = err.into_error();
            assert_eq!(err.code, "INVALID_TERMS");
            assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
            assert!(err.message.contains("reservationSpanWeeks"), "{err}");
        }
    }

    #[test]
    fn rejects_non_positive_span_as_invalid_terms() {
        let err = domain::RentalTerms::try_from(RentalTermsInput {
            reservation_span_weeks: Some(0),
            ..input()
        })
        .unwrap_err()
        .into_error();

        assert_eq!(err.code, "INVALID_TERMS");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
