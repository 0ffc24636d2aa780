//! Guest payment [`Record`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lease, schedule::PaymentCycle};
#[cfg(doc)]
use super::Lease;

/// Persisted [`PaymentCycle`] of a [`Lease`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: Id,

    /// ID of the [`Lease`] this [`Record`] belongs to.
    pub lease_id: lease::Id,

    /// [`PaymentCycle`] of this [`Record`].
    pub cycle: PaymentCycle,
}

impl Record {
    /// Creates a new [`Record`] of the provided [`PaymentCycle`].
    #[must_use]
    pub fn new(lease_id: lease::Id, cycle: PaymentCycle) -> Self {
        Self {
            id: Id::new(),
            lease_id,
            cycle,
        }
    }
}

/// ID of a [`Record`].
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
