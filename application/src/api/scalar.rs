//! GraphQL scalar definitions.

use std::{marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};
use rust_decimal::Decimal;

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string scalar, going through the
/// [`FromStr`]/[`Display`] impls of the `As` type, which the target type must
/// be [`TryFrom`] and [`AsRef`].
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the [`InputValue`] is not a string, or the string is not a valid
    /// `As` representation, or the parsed `As` is not a valid target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: Display,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("scalars are always named");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Expected a string for `{name}` scalar, found: {input}")
        })?;
        s.parse::<As>()
            .map_err(|e| format!("Invalid `{name}` scalar \"{s}\": {e}"))?
            .try_into()
            .map_err(|e| format!("Invalid `{name}` scalar \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the [`ScalarToken`] is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Exact decimal number in `{integer}.{fraction}` format, with an optional
/// leading `-` sign and an optional fraction.
#[derive(
    AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into, PartialEq,
)]
#[graphql(name = "Decimal", with = Via::<Decimal>)]
pub struct Amount(Decimal);
