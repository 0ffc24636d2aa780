//! Resolution of a guest's selected days into check-in, check-out and occupied
//! nights.

use derive_more::{Display, Error};
use serde::Serialize;

use super::weekday::{Weekday, WeekdaySet};

/// Occupancy of a week, resolved from a [`WeekdaySet`] selected by a guest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResolution {
    /// [`Weekday`] the guest arrives on.
    pub check_in_day: Weekday,

    /// [`Weekday`] the guest leaves on.
    pub check_out_day: Weekday,

    /// Nights the guest stays, in arrival order.
    ///
    /// Always [`OccupancyResolution::canonical_order`] without its last
    /// element, since no night is spent after checking out.
    pub occupied_nights: Vec<Weekday>,

    /// Indicates whether the stay crosses the boundary between
    /// [`Weekday::Saturday`] and [`Weekday::Sunday`].
    pub wrapped: bool,

    /// All the selected [`Weekday`]s in arrival order.
    pub canonical_order: Vec<Weekday>,
}

impl OccupancyResolution {
    /// Returns the number of nights per week the guest stays.
    #[must_use]
    pub fn nights_per_week(&self) -> usize {
        self.occupied_nights.len()
    }
}

/// Error of resolving an empty [`WeekdaySet`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("at least one day of the week must be selected")]
pub struct InvalidSelectionError;

/// Resolves the provided `selected` days into an [`OccupancyResolution`].
///
/// A selection containing both [`Weekday::Sunday`] and [`Weekday::Saturday`],
/// but not the whole week, is a stay spanning the weekend: it starts right
/// after the first gap in the ascending order and continues through the week
/// boundary. Any other selection is a plain ascending stay.
///
/// # Errors
///
/// With an [`InvalidSelectionError`] if the `selected` set is empty.
pub fn resolve(
    selected: WeekdaySet,
) -> Result<OccupancyResolution, InvalidSelectionError> {
    let mut order = selected.iter().collect::<Vec<_>>();

    let wrap_candidate = selected.contains(Weekday::Sunday)
        && selected.contains(Weekday::Saturday)
        && selected.len() < WeekdaySet::FULL.len();
    let gap = wrap_candidate
        .then(|| {
            order.windows(2).position(|w| w[1].u8() - w[0].u8() > 1)
        })
        .flatten();
    if let Some(i) = gap {
        order.rotate_left(i + 1);
    }

    let (&check_out_day, nights) =
        order.split_last().ok_or(InvalidSelectionError)?;
    let check_in_day = nights.first().copied().unwrap_or(check_out_day);

    Ok(OccupancyResolution {
        check_in_day,
        check_out_day,
        occupied_nights: nights.to_vec(),
        wrapped: gap.is_some(),
        canonical_order: order,
    })
}

#[cfg(test)]
mod spec {
    use super::{
        resolve, InvalidSelectionError, OccupancyResolution, Weekday as D,
        WeekdaySet,
    };

    fn resolved(days: &[u8]) -> OccupancyResolution {
        let set = days
            .iter()
            .map(|&d| D::from_u8(d).unwrap())
            .collect::<WeekdaySet>();
        resolve(set).unwrap()
    }

    fn all_selections() -> impl Iterator<Item = WeekdaySet> {
        (1..=0b111_1111).map(|bits| WeekdaySet::from_bits(bits).unwrap())
    }

    #[test]
    fn resolves_weekdays_without_wrapping() {
        let r = resolved(&[1, 2, 3, 4, 5]);

        assert_eq!(r.check_in_day, D::Monday);
        assert_eq!(r.check_out_day, D::Friday);
        assert_eq!(
            r.occupied_nights,
            [D::Monday, D::Tuesday, D::Wednesday, D::Thursday],
        );
        assert!(!r.wrapped);
        assert_eq!(r.nights_per_week(), 4);
    }

    #[test]
    fn resolves_stay_across_weekend() {
        let r = resolved(&[5, 6, 0, 1]);

        assert_eq!(r.check_in_day, D::Friday);
        assert_eq!(r.check_out_day, D::Monday);
        assert_eq!(r.occupied_nights, [D::Friday, D::Saturday, D::Sunday]);
        assert_eq!(
            r.canonical_order,
            [D::Friday, D::Saturday, D::Sunday, D::Monday],
        );
        assert!(r.wrapped);
    }

    #[test]
    fn resolves_weekend_only() {
        let r = resolved(&[0, 6]);

        assert_eq!(r.check_in_day, D::Saturday);
        assert_eq!(r.check_out_day, D::Sunday);
        assert_eq!(r.occupied_nights, [D::Saturday]);
        assert!(r.wrapped);
    }

    #[test]
    fn resolves_single_day() {
        let r = resolved(&[3]);

        assert_eq!(r.check_in_day, D::Wednesday);
        assert_eq!(r.check_out_day, D::Wednesday);
        assert!(r.occupied_nights.is_empty());
        assert!(!r.wrapped);
    }

    #[test]
    fn never_wraps_full_week() {
        let r = resolve(WeekdaySet::FULL).unwrap();

        assert_eq!(r.check_in_day, D::Sunday);
        assert_eq!(r.check_out_day, D::Saturday);
        assert_eq!(r.occupied_nights.len(), 6);
        assert!(!r.wrapped);
    }

    #[test]
    fn wraps_after_first_gap() {
        // Gap after Sunday and another after Tuesday.
        let r = resolved(&[0, 2, 4, 6]);

        assert_eq!(
            r.canonical_order,
            [D::Tuesday, D::Thursday, D::Saturday, D::Sunday],
        );
        assert_eq!(r.check_in_day, D::Tuesday);
        assert_eq!(r.check_out_day, D::Sunday);
        assert!(r.wrapped);
    }

    #[test]
    fn rejects_empty_selection() {
        assert_eq!(resolve(WeekdaySet::EMPTY), Err(InvalidSelectionError));
    }

    #[test]
    fn occupies_one_night_less_than_selected() {
        for set in all_selections() {
            let r = resolve(set).unwrap();

            assert_eq!(r.occupied_nights.len(), set.len() - 1, "{set:?}");
            assert_eq!(
                r.occupied_nights,
                r.canonical_order[..set.len() - 1],
                "{set:?}",
            );
        }
    }

    #[test]
    fn orders_permutation_of_selection() {
        for set in all_selections() {
            let r = resolve(set).unwrap();

            assert_eq!(r.canonical_order.len(), set.len(), "{set:?}");
            assert_eq!(
                r.canonical_order.iter().copied().collect::<WeekdaySet>(),
                set,
            );
            assert_eq!(r.canonical_order.first(), Some(&r.check_in_day));
            assert_eq!(r.canonical_order.last(), Some(&r.check_out_day));
        }
    }

    #[test]
    fn keeps_ascending_order_without_both_weekend_ends() {
        for set in all_selections() {
            if set.contains(D::Sunday) && set.contains(D::Saturday) {
                continue;
            }
            let r = resolve(set).unwrap();

            assert!(!r.wrapped, "{set:?}");
            assert_eq!(Some(r.check_in_day), set.iter().min());
            assert_eq!(Some(r.check_out_day), set.iter().max());
        }
    }

    #[test]
    fn wraps_every_partial_selection_with_both_weekend_ends() {
        for set in all_selections() {
            if !(set.contains(D::Sunday) && set.contains(D::Saturday)) {
                continue;
            }
            let r = resolve(set).unwrap();

            assert_eq!(r.wrapped, set != WeekdaySet::FULL, "{set:?}");
        }
    }
}
