//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Every variant is backed by an explicit [`u8`] discriminant, which is used
/// for storing the kind in a database, while [`Display`]/[`FromStr`] use the
/// variant name as is.
///
/// Additional attributes (like `#[derive(..)]`) may be placed before the
/// `enum` keyword.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     /// Shape kind.
///     enum Kind {
///         /// A cube.
///         Cube = 1,
///
///         /// A sphere.
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::from_u8(2), Some(Kind::Sphere));
/// assert_eq!(Kind::Cube.to_string(), "Cube");
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        $(#[$attr:meta])*
        enum $name:ident {
            $(
                $(#[$variant_attr:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        $(#[$attr])*
        #[repr(u8)]
        pub enum $name {
            $(
                $(#[$variant_attr])*
                $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in their declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Converts the provided [`u8`] representation back.
            ///
            /// [`None`] is returned if no variant has such representation.
            #[must_use]
            pub const fn from_u8(value: u8) -> Option<Self> {
                $(
                    if value == Self::$variant.u8() {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &[u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                let v = <i16 as $crate::private::postgres_types::FromSql>
                    ::from_sql(ty, raw)?;
                let v = u8::try_from(v)?;
                Self::from_u8(v).ok_or_else(|| ::std::format!(
                    "invalid `{}` value: {v}",
                    ::core::stringify!($name),
                ).into())
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT2);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(
                    &i16::from(self.u8()),
                    ty,
                    w,
                )
            }
        }
    };
}

#[cfg(test)]
mod spec {
    define_kind! {
        /// Kind used in tests.
        enum Sample {
            /// First.
            First = 0,

            /// Second.
            Second = 3,
        }
    }

    #[test]
    fn converts_u8_representation() {
        assert_eq!(Sample::First.u8(), 0);
        assert_eq!(Sample::Second.u8(), 3);

        assert_eq!(Sample::from_u8(0), Some(Sample::First));
        assert_eq!(Sample::from_u8(3), Some(Sample::Second));
        assert_eq!(Sample::from_u8(1), None);
    }

    #[test]
    fn lists_all_variants() {
        assert_eq!(Sample::ALL, &[Sample::First, Sample::Second]);
    }

    #[test]
    fn uses_variant_names_as_strings() {
        assert_eq!(Sample::Second.to_string(), "Second");
        assert_eq!("First".parse::<Sample>(), Ok(Sample::First));
        assert!("first".parse::<Sample>().is_err());
    }
}
