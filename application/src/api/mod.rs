//! GraphQL API definitions.

pub mod lease;
mod mutation;
pub mod occupancy;
pub mod payment;
mod query;
pub mod scalar;
pub mod schedule;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    mutation::Mutation,
    occupancy::OccupancyResolution,
    query::Query,
    schedule::{PaymentCycle, PaymentSchedule},
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;
