//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Generates the guest `PaymentSchedule` of the lease with the specified
    /// ID out of its rental terms.
    ///
    /// Replaces all the previously stored `PaymentRecord`s of the lease and
    /// updates its total rent, so repeating this mutation is safe.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEASE_NOT_EXISTS` - the lease with the specified ID does not exist;
    /// - `INVALID_TERMS` - the rental terms of the lease are invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "generateGuestPaymentSchedule",
            lease_id = %lease_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn generate_guest_payment_schedule(
        lease_id: api::lease::Id,
        ctx: &Context,
    ) -> Result<api::PaymentSchedule, Error> {
        ctx.service()
            .execute(command::GenerateGuestPaymentSchedule {
                lease_id: lease_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::generate_guest_payment_schedule::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidTerms(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => {
                Some(api::query::LeaseError::NotExists.into())
            }
        }
    }
}
