//! [`Record`]-related definitions.

use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, Context};

/// Persisted guest payment cycle of a lease.
#[derive(Clone, Copy, Debug, From)]
pub struct Record(domain::payment::Record);

/// Persisted guest payment cycle of a lease.
#[graphql_object(name = "PaymentRecord", context = Context)]
impl Record {
    /// Unique identifier of this `PaymentRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentRecord.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the lease this `PaymentRecord` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentRecord.leaseId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn lease_id(&self) -> api::lease::Id {
        self.0.lease_id.into()
    }

    /// `PaymentCycle` stored in this `PaymentRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PaymentRecord.cycle",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn cycle(&self) -> api::PaymentCycle {
        self.0.cycle.into()
    }
}

/// Unique identifier of a `PaymentRecord`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::payment::Id)]
#[into(domain::payment::Id)]
#[graphql(name = "PaymentRecordId", transparent)]
pub struct Id(Uuid);
