//! [`Query`] collection related to guest payment [`Record`]s.

use common::operations::By;

use crate::domain::{lease, payment::Record};
#[cfg(doc)]
use crate::{domain::Lease, Query};

use super::DatabaseQuery;

/// Queries all the payment [`Record`]s of a [`Lease`] by its [`lease::Id`],
/// ordered by their cycle numbers.
pub type ByLease = DatabaseQuery<By<Vec<Record>, lease::Id>>;
