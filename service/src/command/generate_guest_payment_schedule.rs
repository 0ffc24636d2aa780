//! [`Command`] for generating a guest [`PaymentSchedule`] of a [`Lease`].

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{lease, payment, schedule::InvalidTermsError, Lease},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::PaymentSchedule;

use super::Command;

/// [`Command`] for generating a guest [`PaymentSchedule`] of a [`Lease`].
///
/// Replaces all the payment [`payment::Record`]s of the [`Lease`] with the
/// newly generated ones, and stores the aggregate total as its
/// [`Lease::total_rent`].
#[derive(Clone, Copy, Debug)]
pub struct GenerateGuestPaymentSchedule {
    /// ID of the [`Lease`] to generate the [`PaymentSchedule`] for.
    pub lease_id: lease::Id,
}

impl<Db> Command<GenerateGuestPaymentSchedule> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Lease, lease::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Vec<payment::Record>, lease::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<payment::Record>, Err = Traced<database::Error>>
        + Database<Update<Lease>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = crate::domain::PaymentSchedule;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: GenerateGuestPaymentSchedule,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let GenerateGuestPaymentSchedule { lease_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent regenerations of the same schedule.
        tx.execute(Lock(By::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut lease = tx
            .execute(Select(By::<Option<Lease>, _>::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(lease_id))
            .map_err(tracerr::wrap!())?;

        let schedule = lease
            .guest_payment_schedule()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        tx.execute(Delete(By::<Vec<payment::Record>, _>::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        for cycle in &schedule.cycles {
            tx.execute(Insert(payment::Record::new(lease_id, *cycle)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        lease.total_rent = Some(schedule.aggregate_total);
        tx.execute(Update(lease))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "generated {} guest payment cycle(s) of `Lease(id: {lease_id})` \
             totalling {}",
            schedule.cycle_count,
            schedule.aggregate_total,
        );

        Ok(schedule)
    }
}

/// Error of [`GenerateGuestPaymentSchedule`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Lease`] terms are invalid.
    #[display("`Lease` terms are invalid: {_0}")]
    #[from]
    InvalidTerms(InvalidTermsError),

    /// [`Lease`] with the provided ID does not exist.
    #[display("`Lease(id: {_0})` does not exist")]
    LeaseNotExists(#[error(not(source))] lease::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        command::Command as _,
        domain::{
            lease,
            schedule::{RentalType, ReservationSpan, WeekPattern},
            Lease, RentalTerms, Weekday, WeekdaySet,
        },
        infra::database::mock::Memory,
        Service,
    };

    use super::{ExecutionError, GenerateGuestPaymentSchedule};

    fn lease(span: ReservationSpan) -> Lease {
        Lease {
            id: lease::Id::new(),
            terms: RentalTerms {
                rental_type: RentalType::Monthly,
                move_in_date: "2025-03-01".parse().unwrap(),
                reservation_span: span,
                week_pattern: WeekPattern::EveryWeek,
                periodic_rent: Decimal::from(2000),
                maintenance_fee: Decimal::from(50),
                damage_deposit: Decimal::from(500),
            },
            selected_days: WeekdaySet::from([
                Weekday::Monday,
                Weekday::Tuesday,
            ]),
            total_rent: None,
        }
    }

    #[tokio::test]
    async fn stores_records_and_total() {
        let db = Memory::default();
        let lease = lease(ReservationSpan::Months(2));
        db.put_lease(lease);
        let svc = Service::new(db.clone());

        let schedule = svc
            .execute(GenerateGuestPaymentSchedule { lease_id: lease.id })
            .await
            .unwrap();

        let records = db.records(lease.id);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records.iter().map(|r| r.cycle).collect::<Vec<_>>(),
            schedule.cycles,
        );
        assert_eq!(
            db.lease(lease.id).unwrap().total_rent,
            Some("4100".parse::<Money>().unwrap()),
        );
    }

    #[tokio::test]
    async fn replaces_previous_records() {
        let db = Memory::default();
        let mut lease = lease(ReservationSpan::Months(5));
        db.put_lease(lease);
        let svc = Service::new(db.clone());

        _ = svc
            .execute(GenerateGuestPaymentSchedule { lease_id: lease.id })
            .await
            .unwrap();
        assert_eq!(db.records(lease.id).len(), 5);

        lease.terms.reservation_span = ReservationSpan::Months(3);
        db.put_lease(lease);
        _ = svc
            .execute(GenerateGuestPaymentSchedule { lease_id: lease.id })
            .await
            .unwrap();
        _ = svc
            .execute(GenerateGuestPaymentSchedule { lease_id: lease.id })
            .await
            .unwrap();

        let numbers = db
            .records(lease.id)
            .iter()
            .map(|r| r.cycle.cycle_number)
            .collect::<Vec<_>>();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(
            db.lease(lease.id).unwrap().total_rent,
            Some("6150".parse::<Money>().unwrap()),
        );
    }

    #[tokio::test]
    async fn writes_nothing_for_invalid_terms() {
        let db = Memory::default();
        let lease = lease(ReservationSpan::Weeks(8));
        db.put_lease(lease);
        let svc = Service::new(db.clone());

        let err = svc
            .execute(GenerateGuestPaymentSchedule { lease_id: lease.id })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::InvalidTerms(_)),
            "{err}",
        );
        assert!(db.records(lease.id).is_empty());
        assert_eq!(db.lease(lease.id).unwrap().total_rent, None);
    }

    #[tokio::test]
    async fn fails_for_unknown_lease() {
        let svc = Service::new(Memory::default());
        let lease_id = lease::Id::new();

        let err = svc
            .execute(GenerateGuestPaymentSchedule { lease_id })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::LeaseNotExists(id) if *id == lease_id,
            ),
            "{err}",
        );
    }
}
