//! [`Weekday`] and [`WeekdaySet`] definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::fmt;

use common::define_kind;
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use serde::Serialize;

define_kind! {
    /// Day of the week.
    ///
    /// Numbered from `0` (the first day of the week) to `6` (the last one).
    #[derive(Ord, PartialOrd, Serialize)]
    #[serde(into = "u8")]
    enum Weekday {
        /// Sunday, the first day of the week.
        Sunday = 0,

        /// Monday.
        Monday = 1,

        /// Tuesday.
        Tuesday = 2,

        /// Wednesday.
        Wednesday = 3,

        /// Thursday.
        Thursday = 4,

        /// Friday.
        Friday = 5,

        /// Saturday, the last day of the week.
        Saturday = 6,
    }
}

impl Weekday {
    /// Bit of this [`Weekday`] in a [`WeekdaySet`].
    const fn bit(self) -> u8 {
        1 << self.u8()
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.u8()
    }
}

impl TryFrom<i32> for Weekday {
    type Error = InvalidWeekdayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .ok_or(InvalidWeekdayError(value))
    }
}

/// Error of converting an integer outside `0..=6` range into a [`Weekday`].
#[derive(
    Clone, Copy, Debug, derive_more::Display, Eq, derive_more::Error, PartialEq,
)]
#[display("`{_0}` is not a day of the week, expected a number in `0..=6`")]
pub struct InvalidWeekdayError(#[error(not(source))] pub i32);

/// Set of [`Weekday`]s.
///
/// Iterates its members in ascending order, from [`Weekday::Sunday`] to
/// [`Weekday::Saturday`], regardless of the insertion order.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Empty [`WeekdaySet`].
    pub const EMPTY: Self = Self(0);

    /// [`WeekdaySet`] containing the whole week.
    pub const FULL: Self = Self(0b111_1111);

    /// Creates a new [`WeekdaySet`] from its bit mask representation, where
    /// the bit `n` stands for the [`Weekday`] numbered `n`.
    ///
    /// [`None`] is returned if any bit above the 7th one is set.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::FULL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns the bit mask representation of this [`WeekdaySet`].
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Adds the provided [`Weekday`] to this [`WeekdaySet`].
    ///
    /// Returns whether the [`Weekday`] was newly inserted.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let is_new = !self.contains(day);
        self.0 |= day.bit();
        is_new
    }

    /// Indicates whether this [`WeekdaySet`] contains the provided
    /// [`Weekday`].
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// Returns the number of [`Weekday`]s in this [`WeekdaySet`].
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Indicates whether this [`WeekdaySet`] contains no [`Weekday`]s.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the [`Weekday`]s of this [`WeekdaySet`] in ascending
    /// order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.iter().copied().filter(move |d| self.contains(*d))
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            _ = set.insert(day);
        }
        set
    }
}

impl<const N: usize> From<[Weekday; N]> for WeekdaySet {
    fn from(days: [Weekday; N]) -> Self {
        days.into_iter().collect()
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for WeekdaySet {
    accepts!(INT2);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        let bits = u8::try_from(i16::from_sql(ty, raw)?)?;
        Self::from_bits(bits)
            .ok_or_else(|| format!("invalid `WeekdaySet` bits: {bits}").into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for WeekdaySet {
    accepts!(INT2);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        i16::from(self.bits()).to_sql(ty, w)
    }
}

#[cfg(test)]
mod spec {
    use super::{InvalidWeekdayError, Weekday, WeekdaySet};

    #[test]
    fn converts_from_integers() {
        assert_eq!(Weekday::try_from(0), Ok(Weekday::Sunday));
        assert_eq!(Weekday::try_from(6), Ok(Weekday::Saturday));

        assert!(Weekday::try_from(7).is_err());
        assert!(Weekday::try_from(-1).is_err());
        assert!(Weekday::try_from(256).is_err());
    }

    #[test]
    fn reports_rejected_integer() {
        assert_eq!(Weekday::try_from(7), Err(InvalidWeekdayError(7)));
        assert_eq!(Weekday::try_from(-1), Err(InvalidWeekdayError(-1)));
        assert_eq!(
            InvalidWeekdayError(9).to_string(),
            "`9` is not a day of the week, expected a number in `0..=6`",
        );
    }

    #[test]
    fn iterates_in_ascending_order() {
        let set = WeekdaySet::from([
            Weekday::Monday,
            Weekday::Saturday,
            Weekday::Friday,
            Weekday::Sunday,
        ]);

        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [
                Weekday::Sunday,
                Weekday::Monday,
                Weekday::Friday,
                Weekday::Saturday,
            ],
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn keeps_members_unique() {
        let mut set = WeekdaySet::EMPTY;

        assert!(set.insert(Weekday::Tuesday));
        assert!(!set.insert(Weekday::Tuesday));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Weekday::Tuesday));
        assert!(!set.contains(Weekday::Wednesday));
    }

    #[test]
    fn round_trips_bits() {
        assert_eq!(WeekdaySet::from_bits(0), Some(WeekdaySet::EMPTY));
        assert_eq!(WeekdaySet::from_bits(0b111_1111), Some(WeekdaySet::FULL));
        assert_eq!(WeekdaySet::from_bits(0b1000_0000), None);

        let set = WeekdaySet::from([Weekday::Sunday, Weekday::Saturday]);
        assert_eq!(set.bits(), 0b100_0001);
        assert_eq!(WeekdaySet::FULL.len(), 7);
        assert!(WeekdaySet::EMPTY.is_empty());
    }
}
