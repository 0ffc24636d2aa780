//! In-memory [`Database`] used in tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{lease, payment, Lease},
    infra::{database, Database},
};

/// Contents of a [`Memory`] database.
#[derive(Clone, Debug, Default)]
struct State {
    /// Stored [`Lease`]s.
    leases: HashMap<lease::Id, Lease>,

    /// Stored payment [`payment::Record`]s.
    records: Vec<payment::Record>,
}

/// In-memory [`Database`].
///
/// A [`Transact`]ed [`Memory`] works on a copy of the [`State`], which
/// replaces the original one on [`Commit`] only.
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory {
    /// Committed [`State`].
    committed: Arc<Mutex<State>>,

    /// [`State`] of an open transaction, if any.
    staged: Option<Arc<Mutex<State>>>,
}

impl Memory {
    /// Returns the [`State`] this [`Memory`] operates on.
    fn state(&self) -> MutexGuard<'_, State> {
        self.staged
            .as_ref()
            .unwrap_or(&self.committed)
            .lock()
            .unwrap()
    }

    /// Stores the provided [`Lease`] bypassing any transaction.
    pub(crate) fn put_lease(&self, lease: Lease) {
        _ = self.committed.lock().unwrap().leases.insert(lease.id, lease);
    }

    /// Returns the committed [`Lease`] with the provided ID.
    pub(crate) fn lease(&self, id: lease::Id) -> Option<Lease> {
        self.committed.lock().unwrap().leases.get(&id).copied()
    }

    /// Returns the committed [`payment::Record`]s of the [`Lease`] with the
    /// provided ID.
    pub(crate) fn records(&self, id: lease::Id) -> Vec<payment::Record> {
        self.committed
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.lease_id == id)
            .copied()
            .collect()
    }
}

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let staged = self.state().clone();
        Ok(Self {
            committed: Arc::clone(&self.committed),
            staged: Some(Arc::new(Mutex::new(staged))),
        })
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        if let Some(staged) = &self.staged {
            let staged = staged.lock().unwrap().clone();
            *self.committed.lock().unwrap() = staged;
        }
        Ok(())
    }
}

impl Database<Lock<By<Lease, lease::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Lease, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Lease>, lease::Id>>> for Memory {
    type Ok = Option<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().leases.get(by.by()).copied())
    }
}

impl Database<Update<Lease>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lease): Update<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self.state().leases.insert(lease.id, lease);
        Ok(())
    }
}

impl Database<Select<By<Vec<payment::Record>, lease::Id>>> for Memory {
    type Ok = Vec<payment::Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<payment::Record>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let lease_id = by.into_inner();
        let mut records = self
            .state()
            .records
            .iter()
            .filter(|r| r.lease_id == lease_id)
            .copied()
            .collect::<Vec<_>>();
        records.sort_by_key(|r| r.cycle.cycle_number);
        Ok(records)
    }
}

impl Database<Insert<payment::Record>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<payment::Record>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().records.push(record);
        Ok(())
    }
}

impl Database<Delete<By<Vec<payment::Record>, lease::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<payment::Record>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let lease_id = by.into_inner();
        self.state().records.retain(|r| r.lease_id != lease_id);
        Ok(())
    }
}
