//! [`Query`] collection resolving an [`OccupancyResolution`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lease,
        occupancy::{self, InvalidSelectionError},
        Lease, OccupancyResolution, WeekdaySet,
    },
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] resolving the [`OccupancyResolution`] of the selected days.
#[derive(Clone, Copy, Debug)]
pub struct ResolveDaySelection(pub WeekdaySet);

impl<Db> Query<ResolveDaySelection> for Service<Db> {
    type Ok = OccupancyResolution;
    type Err = Traced<InvalidSelectionError>;

    async fn execute(
        &self,
        ResolveDaySelection(days): ResolveDaySelection,
    ) -> Result<Self::Ok, Self::Err> {
        occupancy::resolve(days).map_err(tracerr::wrap!())
    }
}

/// [`Query`] resolving the [`OccupancyResolution`] of the days selected for
/// a stored [`Lease`].
#[derive(Clone, Copy, Debug)]
pub struct ResolveLeaseOccupancy {
    /// ID of the [`Lease`] to resolve the [`OccupancyResolution`] of.
    pub lease_id: lease::Id,
}

impl<Db> Query<ResolveLeaseOccupancy> for Service<Db>
where
    Db: Database<
        Select<By<Option<Lease>, lease::Id>>,
        Ok = Option<Lease>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = OccupancyResolution;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ResolveLeaseOccupancy { lease_id }: ResolveLeaseOccupancy,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Select(By::<Option<Lease>, _>::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(lease_id))
            .map_err(tracerr::wrap!())?
            .occupancy()
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`ResolveLeaseOccupancy`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No days are selected for the [`Lease`].
    #[display("`Lease` day selection is invalid: {_0}")]
    #[from]
    InvalidSelection(InvalidSelectionError),

    /// [`Lease`] with the provided ID does not exist.
    #[display("`Lease(id: {_0})` does not exist")]
    LeaseNotExists(#[error(not(source))] lease::Id),
}
