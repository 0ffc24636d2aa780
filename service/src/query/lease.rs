//! [`Query`] collection related to a single [`Lease`].

use common::operations::By;

use crate::domain::{lease, Lease};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Lease`] by its [`lease::Id`].
pub type ById = DatabaseQuery<By<Option<Lease>, lease::Id>>;
