//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Resolves the check-in day, the check-out day and the occupied nights
    /// of the provided selection of days of the week.
    ///
    /// Days of the week are numbered from `0` (Sunday) to `6` (Saturday).
    /// A selection containing both Saturday and Sunday (but not every day)
    /// wraps around the end of the week.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_WEEKDAY` - some number is not a day of the week;
    /// - `INVALID_SELECTION` - no days are selected.
    #[tracing::instrument(
        skip_all,
        fields(
            days = ?days,
            gql.name = "resolveDaySelection",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn resolve_day_selection(
        days: Vec<i32>,
        ctx: &Context,
    ) -> Result<api::OccupancyResolution, Error> {
        let selection =
            api::occupancy::weekday_set(&days).map_err(ctx.error())?;

        ctx.service()
            .execute(query::ResolveDaySelection(selection))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Resolves the check-in day, the check-out day and the occupied nights
    /// of the days selected for the lease with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEASE_NOT_EXISTS` - the lease with the specified ID does not exist;
    /// - `INVALID_SELECTION` - no days are selected for the lease.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "leaseOccupancy",
            lease_id = %lease_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn lease_occupancy(
        lease_id: api::lease::Id,
        ctx: &Context,
    ) -> Result<api::OccupancyResolution, Error> {
        ctx.service()
            .execute(query::ResolveLeaseOccupancy {
                lease_id: lease_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Generates the guest `PaymentSchedule` of the provided rental terms
    /// without storing it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_TERMS` - the provided rental terms are invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "paymentSchedule",
            otel.name = Self::SPAN_NAME,
            rental_type = ?terms.rental_type,
        ),
    )]
    pub async fn payment_schedule(
        terms: api::schedule::RentalTermsInput,
        ctx: &Context,
    ) -> Result<api::PaymentSchedule, Error> {
        let terms = domain::RentalTerms::try_from(terms)
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::PreviewPaymentSchedule(terms))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the stored guest `PaymentRecord`s of the lease with the
    /// specified ID, ordered by their cycle numbers.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEASE_NOT_EXISTS` - the lease with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "leasePaymentRecords",
            lease_id = %lease_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn lease_payment_records(
        lease_id: api::lease::Id,
        ctx: &Context,
    ) -> Result<Vec<api::payment::Record>, Error> {
        _ = ctx
            .service()
            .execute(query::lease::ById::by(lease_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| LeaseError::NotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::payment::ByLease::by(lease_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|records| records.into_iter().map(Into::into).collect())
    }
}

define_error! {
    /// Error of looking up a lease.
    enum LeaseError {
        #[code = "LEASE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Lease with the specified ID does not exist"]
        NotExists,
    }
}
