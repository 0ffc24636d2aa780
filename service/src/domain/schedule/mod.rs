//! Guest payment schedule definitions.

pub mod terms;

use common::{Date, Money};
use serde::Serialize;

pub use self::terms::{
    InvalidTermsError, RentalTerms, RentalType, ReservationSpan, SpanUnit,
    WeekPattern,
};

/// Offset (in days) from the move-in date to the date guest payments are
/// anchored at for [`RentalType::Weekly`] and [`RentalType::Nightly`] leases.
pub const GUEST_ANCHOR_OFFSET: i64 = -3;

/// Offset (in days) from the move-in date to the date host payouts are
/// anchored at for [`RentalType::Weekly`] and [`RentalType::Nightly`] leases.
///
/// Host payout schedules are not generated here, the offset only documents
/// the counterpart of [`GUEST_ANCHOR_OFFSET`].
pub const HOST_ANCHOR_OFFSET: i64 = 2;

/// Length (in days) of a [`RentalType::Monthly`] billing cycle.
pub const MONTHLY_CYCLE_DAYS: i64 = 31;

/// Length (in days) of a [`RentalType::Weekly`] and [`RentalType::Nightly`]
/// billing cycle.
pub const FOUR_WEEK_CYCLE_DAYS: i64 = 28;

/// Number of weeks billed by a single 4-week cycle.
const WEEKS_PER_CYCLE: u32 = 4;

/// Single billing cycle of a [`PaymentSchedule`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCycle {
    /// Number of this [`PaymentCycle`], starting from `1`.
    pub cycle_number: u32,

    /// [`Date`] this [`PaymentCycle`] is due.
    pub scheduled_date: Date,

    /// Rent charged.
    pub rent: Money,

    /// Maintenance fee charged.
    pub maintenance_fee: Money,

    /// Damage deposit charged, being non-zero for the first cycle only.
    pub deposit_charged: Money,

    /// Total charged: the rent, the maintenance fee and the deposit.
    pub total: Money,

    /// Number of weeks the guest occupies during this [`PaymentCycle`].
    ///
    /// [`None`] for [`RentalType::Monthly`] leases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied_weeks: Option<u8>,
}

/// Guest payment schedule for the whole life of a lease.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    /// [`PaymentCycle`]s ordered by their dates.
    pub cycles: Vec<PaymentCycle>,

    /// Total of all the [`PaymentCycle`]s, excluding the refundable damage
    /// deposit.
    pub aggregate_total: Money,

    /// Number of [`PaymentCycle`]s.
    pub cycle_count: u32,
}

impl PaymentSchedule {
    /// Returns the number of weeks the guest occupies over the whole lease.
    ///
    /// [`None`] for [`RentalType::Monthly`] leases.
    #[must_use]
    pub fn occupied_weeks(&self) -> Option<u32> {
        self.cycles
            .iter()
            .map(|c| c.occupied_weeks.map(u32::from))
            .sum()
    }
}

/// Billing plan of a lease, derived from its [`RentalTerms`].
struct Plan {
    /// [`Date`] of the first [`PaymentCycle`].
    anchor: Date,

    /// Length of a [`PaymentCycle`] in days.
    cycle_days: i64,

    /// Number of [`PaymentCycle`]s.
    cycle_count: u32,

    /// Number of weeks to be occupied, if billed by weeks.
    weeks: Option<u32>,
}

impl Plan {
    /// Derives a [`Plan`] out of the provided [`RentalTerms`].
    fn new(terms: &RentalTerms) -> Result<Self, InvalidTermsError> {
        use RentalType as T;
        use ReservationSpan as S;

        let (offset, cycle_days, cycle_count, weeks) =
            match (terms.rental_type, terms.reservation_span) {
                (T::Monthly, S::Months(months)) => {
                    (0, MONTHLY_CYCLE_DAYS, months, None)
                }
                (T::Weekly | T::Nightly, S::Weeks(weeks)) => (
                    GUEST_ANCHOR_OFFSET,
                    FOUR_WEEK_CYCLE_DAYS,
                    weeks.div_ceil(WEEKS_PER_CYCLE),
                    Some(weeks),
                ),
                (rental_type, span) => {
                    return Err(InvalidTermsError::SpanUnitMismatch {
                        rental_type,
                        span,
                    })
                }
            };
        if cycle_count == 0 {
            return Err(InvalidTermsError::NonPositiveSpan(0));
        }

        let anchor = terms
            .move_in_date
            .checked_add_days(offset)
            .ok_or(InvalidTermsError::DateOutOfRange)?;
        // Every later date lies between the anchor and the last one.
        _ = anchor
            .checked_add_days(i64::from(cycle_count - 1) * cycle_days)
            .ok_or(InvalidTermsError::DateOutOfRange)?;

        Ok(Self {
            anchor,
            cycle_days,
            cycle_count,
            weeks,
        })
    }
}

/// Generates a guest [`PaymentSchedule`] for the provided [`RentalTerms`].
///
/// [`RentalType::Monthly`] leases are billed every 31 days starting from the
/// move-in date. [`RentalType::Weekly`] and [`RentalType::Nightly`] leases
/// are billed every 28 days starting [`GUEST_ANCHOR_OFFSET`] days from the
/// move-in date, one cycle per started 4-week block.
///
/// Every cycle charges the full periodic rent regardless of the
/// [`WeekPattern`].
///
/// # Errors
///
/// With an [`InvalidTermsError`] if the [`RentalTerms`] are invalid. Nothing
/// is generated in such case.
pub fn generate(
    terms: &RentalTerms,
) -> Result<PaymentSchedule, InvalidTermsError> {
    let (rent, fee, deposit) = terms.amounts()?;
    let plan = Plan::new(terms)?;
    let pattern = terms.week_pattern.occupied_weeks();

    let mut cycles = Vec::with_capacity(plan.cycle_count as usize);
    let mut sum = Money::ZERO;
    for (i, n) in (0..plan.cycle_count).zip(0..) {
        let scheduled_date = plan
            .anchor
            .checked_add_days(n * plan.cycle_days)
            .ok_or(InvalidTermsError::DateOutOfRange)?;
        let deposit_charged = if i == 0 { deposit } else { Money::ZERO };
        let total = rent
            .checked_add(fee)
            .and_then(|t| t.checked_add(deposit_charged))
            .ok_or(InvalidTermsError::AmountOverflow)?;
        sum = sum
            .checked_add(total)
            .ok_or(InvalidTermsError::AmountOverflow)?;

        let occupied_weeks = plan.weeks.map(|weeks| {
            let remaining = weeks - i * WEEKS_PER_CYCLE;
            pattern
                .into_iter()
                .zip(0..remaining)
                .fold(0, |count, (occupied, _)| count + u8::from(occupied))
        });

        cycles.push(PaymentCycle {
            cycle_number: i + 1,
            scheduled_date,
            rent,
            maintenance_fee: fee,
            deposit_charged,
            total,
            occupied_weeks,
        });
    }

    Ok(PaymentSchedule {
        cycles,
        aggregate_total: sum
            .checked_sub(deposit)
            .ok_or(InvalidTermsError::AmountOverflow)?,
        cycle_count: plan.cycle_count,
    })
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};
    use rust_decimal::Decimal;

    use super::{
        generate, InvalidTermsError, PaymentSchedule, RentalTerms, RentalType,
        ReservationSpan, WeekPattern,
    };

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn terms(
        rental_type: RentalType,
        span: ReservationSpan,
        rent: i64,
        fee: i64,
        deposit: i64,
    ) -> RentalTerms {
        RentalTerms {
            rental_type,
            move_in_date: date("2025-03-01"),
            reservation_span: span,
            week_pattern: WeekPattern::EveryWeek,
            periodic_rent: Decimal::from(rent),
            maintenance_fee: Decimal::from(fee),
            damage_deposit: Decimal::from(deposit),
        }
    }

    fn assert_aggregates(schedule: &PaymentSchedule, deposit: Money) {
        let sum = schedule
            .cycles
            .iter()
            .fold(Money::ZERO, |sum, c| sum.checked_add(c.total).unwrap());
        assert_eq!(
            Some(schedule.aggregate_total),
            sum.checked_sub(deposit),
        );
        assert_eq!(schedule.cycle_count as usize, schedule.cycles.len());
    }

    #[test]
    fn generates_monthly_schedule() {
        let schedule = generate(&terms(
            RentalType::Monthly,
            ReservationSpan::Months(2),
            2000,
            50,
            500,
        ))
        .unwrap();

        assert_eq!(schedule.cycle_count, 2);
        let [first, second] = schedule.cycles.as_slice() else {
            panic!("expected 2 cycles, got: {:?}", schedule.cycles);
        };

        assert_eq!(first.cycle_number, 1);
        assert_eq!(first.scheduled_date, date("2025-03-01"));
        assert_eq!(first.rent, money("2000"));
        assert_eq!(first.maintenance_fee, money("50"));
        assert_eq!(first.deposit_charged, money("500"));
        assert_eq!(first.total, money("2550"));
        assert_eq!(first.occupied_weeks, None);

        assert_eq!(second.cycle_number, 2);
        assert_eq!(second.scheduled_date, date("2025-04-01"));
        assert_eq!(second.deposit_charged, Money::ZERO);
        assert_eq!(second.total, money("2050"));

        assert_eq!(schedule.aggregate_total, money("4100"));
        assert_eq!(schedule.occupied_weeks(), None);
    }

    #[test]
    fn bills_monthly_every_31_days() {
        let schedule = generate(&terms(
            RentalType::Monthly,
            ReservationSpan::Months(12),
            1000,
            0,
            0,
        ))
        .unwrap();

        for (i, c) in (0..).zip(&schedule.cycles) {
            assert_eq!(
                Some(c.scheduled_date),
                date("2025-03-01").checked_add_days(i * 31),
            );
        }
        assert_eq!(schedule.cycle_count, 12);
    }

    #[test]
    fn anchors_four_week_cycles_before_move_in() {
        for rental_type in [RentalType::Weekly, RentalType::Nightly] {
            let schedule = generate(&terms(
                rental_type,
                ReservationSpan::Weeks(12),
                1200,
                30,
                0,
            ))
            .unwrap();

            let dates = schedule
                .cycles
                .iter()
                .map(|c| c.scheduled_date)
                .collect::<Vec<_>>();
            assert_eq!(
                dates,
                [date("2025-02-26"), date("2025-03-26"), date("2025-04-23")],
            );
        }
    }

    #[test]
    fn covers_partial_trailing_block() {
        let schedule = generate(&terms(
            RentalType::Weekly,
            ReservationSpan::Weeks(6),
            1200,
            0,
            0,
        ))
        .unwrap();

        assert_eq!(schedule.cycle_count, 2);
        assert_eq!(schedule.cycles[1].rent, money("1200"));
        assert_eq!(schedule.cycles[0].occupied_weeks, Some(4));
        assert_eq!(schedule.cycles[1].occupied_weeks, Some(2));
        assert_eq!(schedule.occupied_weeks(), Some(6));
    }

    #[test]
    fn counts_occupied_weeks_by_pattern() {
        for (pattern, expected) in [
            (WeekPattern::EveryWeek, 10),
            (WeekPattern::OneOnOneOff, 5),
            (WeekPattern::TwoOnTwoOff, 6),
            (WeekPattern::OneOnThreeOff, 3),
        ] {
            let mut terms = terms(
                RentalType::Nightly,
                ReservationSpan::Weeks(10),
                900,
                0,
                0,
            );
            terms.week_pattern = pattern;

            let schedule = generate(&terms).unwrap();

            assert_eq!(schedule.occupied_weeks(), Some(expected), "{pattern}");
            assert!(
                schedule.cycles.iter().all(|c| c.rent == money("900")),
                "{pattern}",
            );
        }
    }

    #[test]
    fn charges_deposit_once() {
        let schedule = generate(&terms(
            RentalType::Weekly,
            ReservationSpan::Weeks(16),
            1000,
            20,
            300,
        ))
        .unwrap();

        let charged = schedule
            .cycles
            .iter()
            .filter(|c| !c.deposit_charged.is_zero())
            .map(|c| c.cycle_number)
            .collect::<Vec<_>>();
        assert_eq!(charged, [1]);
        assert_aggregates(&schedule, money("300"));
    }

    #[test]
    fn aggregates_totals_without_deposit() {
        for (rental_type, span) in [
            (RentalType::Monthly, ReservationSpan::Months(1)),
            (RentalType::Monthly, ReservationSpan::Months(7)),
            (RentalType::Weekly, ReservationSpan::Weeks(1)),
            (RentalType::Nightly, ReservationSpan::Weeks(9)),
        ] {
            for deposit in [0, 1, 750] {
                let schedule =
                    generate(&terms(rental_type, span, 1500, 45, deposit))
                        .unwrap();

                assert_aggregates(&schedule, money(&deposit.to_string()));
            }
        }
    }

    #[test]
    fn increases_dates_strictly() {
        let schedule = generate(&terms(
            RentalType::Nightly,
            ReservationSpan::Weeks(30),
            800,
            0,
            0,
        ))
        .unwrap();

        assert!(schedule
            .cycles
            .windows(2)
            .all(|w| w[0].scheduled_date < w[1].scheduled_date
                && w[0].cycle_number + 1 == w[1].cycle_number));
    }

    #[test]
    fn rejects_mismatched_span_unit() {
        assert_eq!(
            generate(&terms(
                RentalType::Monthly,
                ReservationSpan::Weeks(8),
                2000,
                0,
                0,
            )),
            Err(InvalidTermsError::SpanUnitMismatch {
                rental_type: RentalType::Monthly,
                span: ReservationSpan::Weeks(8),
            }),
        );
        assert!(matches!(
            generate(&terms(
                RentalType::Weekly,
                ReservationSpan::Months(2),
                2000,
                0,
                0,
            )),
            Err(InvalidTermsError::SpanUnitMismatch { .. }),
        ));
    }

    #[test]
    fn rejects_invalid_terms() {
        assert_eq!(
            generate(&terms(
                RentalType::Monthly,
                ReservationSpan::Months(0),
                2000,
                0,
                0,
            )),
            Err(InvalidTermsError::NonPositiveSpan(0)),
        );
        assert!(matches!(
            generate(&terms(
                RentalType::Monthly,
                ReservationSpan::Months(1),
                -1,
                0,
                0,
            )),
            Err(InvalidTermsError::NegativeAmount {
                field: "periodicRent",
                ..
            }),
        ));
        assert!(matches!(
            generate(&terms(
                RentalType::Weekly,
                ReservationSpan::Weeks(4),
                100,
                0,
                -5,
            )),
            Err(InvalidTermsError::NegativeAmount {
                field: "damageDeposit",
                ..
            }),
        ));
    }

    #[test]
    fn rejects_dates_out_of_range() {
        let mut terms = terms(
            RentalType::Monthly,
            ReservationSpan::Months(u32::MAX),
            1,
            0,
            0,
        );
        assert_eq!(generate(&terms), Err(InvalidTermsError::DateOutOfRange));

        terms.reservation_span = ReservationSpan::Months(2);
        terms.move_in_date = date("9999-12-01");
        assert_eq!(generate(&terms), Err(InvalidTermsError::DateOutOfRange));
    }

    #[test]
    fn serializes_to_json() {
        let schedule = generate(&terms(
            RentalType::Monthly,
            ReservationSpan::Months(1),
            2000,
            50,
            500,
        ))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&schedule).unwrap(),
            serde_json::json!({
                "cycles": [{
                    "cycleNumber": 1,
                    "scheduledDate": "2025-03-01",
                    "rent": "2000",
                    "maintenanceFee": "50",
                    "depositCharged": "500",
                    "total": "2550",
                }],
                "aggregateTotal": "2050",
                "cycleCount": 1,
            }),
        );
    }
}
