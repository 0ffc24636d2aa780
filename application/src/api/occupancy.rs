//! [`OccupancyResolution`]-related definitions.

use juniper::graphql_object;
use service::{
    domain::{self, occupancy, weekday},
    query,
};

use crate::{api, define_error, AsError, Context, Error};

/// Resolved occupancy of a week.
#[derive(Clone, Debug)]
pub struct OccupancyResolution(domain::OccupancyResolution);

impl From<domain::OccupancyResolution> for OccupancyResolution {
    fn from(resolution: domain::OccupancyResolution) -> Self {
        Self(resolution)
    }
}

/// Converts the provided [`domain::Weekday`]s into their GraphQL
/// representation.
fn days(days: &[domain::Weekday]) -> Vec<i32> {
    days.iter().map(|d| i32::from(d.u8())).collect()
}

/// Resolved occupancy of a week.
///
/// Days of the week are numbered from `0` (Sunday) to `6` (Saturday).
#[graphql_object(context = Context)]
impl OccupancyResolution {
    /// Day of the week the guest arrives on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.checkInDay",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_in_day(&self) -> i32 {
        i32::from(self.0.check_in_day.u8())
    }

    /// Day of the week the guest leaves on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.checkOutDay",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn check_out_day(&self) -> i32 {
        i32::from(self.0.check_out_day.u8())
    }

    /// Nights the guest stays, in arrival order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.occupiedNights",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn occupied_nights(&self) -> Vec<i32> {
        days(&self.0.occupied_nights)
    }

    /// Number of nights per week the guest stays.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.nightsPerWeek",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "no more than 6 nights"
    )]
    pub fn nights_per_week(&self) -> i32 {
        self.0.nights_per_week() as i32
    }

    /// Indicates whether the stay crosses the boundary between Saturday and
    /// Sunday.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.wrapped",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn wrapped(&self) -> bool {
        self.0.wrapped
    }

    /// All the selected days in arrival order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OccupancyResolution.canonicalOrder",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn canonical_order(&self) -> Vec<i32> {
        days(&self.0.canonical_order)
    }
}

/// Parses the provided `days` numbers into a [`domain::WeekdaySet`].
///
/// Repeated numbers are counted once.
///
/// # Errors
///
/// With an `INVALID_WEEKDAY` [`Error`] if any number is out of `0..=6` range.
pub fn weekday_set(days: &[i32]) -> Result<domain::WeekdaySet, Error> {
    days.iter()
        .map(|&d| domain::Weekday::try_from(d))
        .collect::<Result<_, _>>()
        .map_err(AsError::into_error)
}

impl AsError for weekday::InvalidWeekdayError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::bad_request("INVALID_WEEKDAY", self))
    }
}

impl AsError for occupancy::InvalidSelectionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_SELECTION"]
                #[status = BAD_REQUEST]
                #[message = "At least one day of the week must be selected"]
                Empty,
            }
        }

        Some(Error::Empty.into())
    }
}

impl AsError for query::occupancy::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidSelection(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => {
                Some(api::query::LeaseError::NotExists.into())
            }
        }
    }
}
