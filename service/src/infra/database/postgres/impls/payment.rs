//! Payment [`Record`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{lease, payment::Record, PaymentCycle},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Record>, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Record>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let lease_id: lease::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, lease_id, cycle_number, scheduled_date, \
                   rent, maintenance_fee, deposit_charged, total, \
                   occupied_weeks \
            FROM guest_payment_records \
            WHERE lease_id = $1::UUID \
            ORDER BY cycle_number ASC";
        Ok(self
            .query(SQL, &[&lease_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Record {
                id: row.get("id"),
                lease_id: row.get("lease_id"),
                cycle: PaymentCycle {
                    cycle_number: u32::try_from(
                        row.get::<_, i64>("cycle_number"),
                    )
                    .expect("`cycle_number` overflow"),
                    scheduled_date: row.get("scheduled_date"),
                    rent: row.get("rent"),
                    maintenance_fee: row.get("maintenance_fee"),
                    deposit_charged: row.get("deposit_charged"),
                    total: row.get("total"),
                    occupied_weeks: row
                        .get::<_, Option<i16>>("occupied_weeks")
                        .map(u8::try_from)
                        .transpose()
                        .expect("`occupied_weeks` overflow"),
                },
            })
            .collect())
    }
}

impl<C> Database<Insert<Record>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<Record>,
    ) -> Result<Self::Ok, Self::Err> {
        let Record {
            id,
            lease_id,
            cycle:
                PaymentCycle {
                    cycle_number,
                    scheduled_date,
                    rent,
                    maintenance_fee,
                    deposit_charged,
                    total,
                    occupied_weeks,
                },
        } = record;

        let cycle_number = i64::from(cycle_number);
        let occupied_weeks = occupied_weeks.map(i16::from);

        const SQL: &str = "\
            INSERT INTO guest_payment_records (\
                id, lease_id, cycle_number, scheduled_date, \
                rent, maintenance_fee, deposit_charged, total, \
                occupied_weeks \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::INT8, $4::DATE, \
                $5::NUMERIC, $6::NUMERIC, $7::NUMERIC, $8::NUMERIC, \
                $9::INT2 \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &lease_id,
                &cycle_number,
                &scheduled_date,
                &rent,
                &maintenance_fee,
                &deposit_charged,
                &total,
                &occupied_weeks,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Vec<Record>, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<Record>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let lease_id: lease::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM guest_payment_records \
            WHERE lease_id = $1::UUID";
        self.exec(SQL, &[&lease_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
