//! [`Lease`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        lease,
        schedule::{ReservationSpan, SpanUnit},
        Lease, RentalTerms,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Lease>, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lease::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, rental_type, move_in_date, \
                   reservation_span_unit, reservation_span, week_pattern, \
                   periodic_rent, maintenance_fee, damage_deposit, \
                   selected_days, total_rent \
            FROM leases \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Lease {
                id: row.get("id"),
                terms: RentalTerms {
                    rental_type: row.get("rental_type"),
                    move_in_date: row.get("move_in_date"),
                    // `CHECK` constraint of the `reservation_span` column
                    // keeps it in `u32` range and positive.
                    reservation_span: ReservationSpan::new(
                        row.get::<_, SpanUnit>("reservation_span_unit"),
                        row.get::<_, i64>("reservation_span"),
                    )
                    .expect("`reservation_span` is checked by database"),
                    week_pattern: row.get("week_pattern"),
                    periodic_rent: row.get("periodic_rent"),
                    maintenance_fee: row.get("maintenance_fee"),
                    damage_deposit: row.get("damage_deposit"),
                },
                selected_days: row.get("selected_days"),
                total_rent: row.get("total_rent"),
            }))
    }
}

impl<C> Database<Update<Lease>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lease): Update<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lease {
            id,
            terms:
                RentalTerms {
                    rental_type,
                    move_in_date,
                    reservation_span,
                    week_pattern,
                    periodic_rent,
                    maintenance_fee,
                    damage_deposit,
                },
            selected_days,
            total_rent,
        } = lease;

        let span_unit = reservation_span.unit();
        let span = i64::from(reservation_span.length());

        const SQL: &str = "\
            INSERT INTO leases (\
                id, rental_type, move_in_date, \
                reservation_span_unit, reservation_span, week_pattern, \
                periodic_rent, maintenance_fee, damage_deposit, \
                selected_days, total_rent \
            ) VALUES (\
                $1::UUID, $2::INT2, $3::DATE, \
                $4::INT2, $5::INT8, $6::INT2, \
                $7::NUMERIC, $8::NUMERIC, $9::NUMERIC, \
                $10::INT2, $11::NUMERIC \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET rental_type = EXCLUDED.rental_type, \
                move_in_date = EXCLUDED.move_in_date, \
                reservation_span_unit = EXCLUDED.reservation_span_unit, \
                reservation_span = EXCLUDED.reservation_span, \
                week_pattern = EXCLUDED.week_pattern, \
                periodic_rent = EXCLUDED.periodic_rent, \
                maintenance_fee = EXCLUDED.maintenance_fee, \
                damage_deposit = EXCLUDED.damage_deposit, \
                selected_days = EXCLUDED.selected_days, \
                total_rent = EXCLUDED.total_rent";
        self.exec(
            SQL,
            &[
                &id,
                &rental_type,
                &move_in_date,
                &span_unit,
                &span,
                &week_pattern,
                &periodic_rent,
                &maintenance_fee,
                &damage_deposit,
                &selected_days,
                &total_rent,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Lease, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Lease, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lease::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM leases \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
