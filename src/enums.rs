//! # Enumeration Parsers
//!
//! Helpers that turn `strum`-derived enums into parsers over text. A
//! variant is matched by its `AsRef<str>` form ([`member`]) or its
//! `Display` form ([`value`]); [`members`] and [`values`] build an ordered
//! choice over every variant of the enum, in declaration order.

use std::fmt::Display;

use strum::IntoEnumIterator;

use crate::combinators::{AsValue, Choice};
use crate::core::BoxedParser;
use crate::prelude::{as_value, choice};
use crate::text::{ExactString, string};

/// Matches the `AsRef<str>` form of `variant`, yielding the variant.
pub fn member<E>(variant: E) -> AsValue<ExactString, String, E>
where
    E: AsRef<str> + Clone,
{
    let matcher = string(variant.as_ref());
    as_value(matcher, variant)
}

/// Matches any variant of `E` by its `AsRef<str>` form, in declaration
/// order; when nothing matches, the last variant's failure surfaces.
pub fn members<E>() -> Choice<str, E>
where
    E: IntoEnumIterator + AsRef<str> + Clone + Send + Sync + 'static,
{
    choice(
        E::iter()
            .map(|variant| Box::new(member(variant)) as BoxedParser<str, E>)
            .collect(),
    )
}

/// Matches the `Display` form of `variant`, yielding the variant.
pub fn value<E>(variant: E) -> AsValue<ExactString, String, E>
where
    E: Display + Clone,
{
    let matcher = string(variant.to_string());
    as_value(matcher, variant)
}

/// Matches any variant of `E` by its `Display` form, in declaration order.
pub fn values<E>() -> Choice<str, E>
where
    E: IntoEnumIterator + Display + Clone + Send + Sync + 'static,
{
    choice(
        E::iter()
            .map(|variant| Box::new(value(variant)) as BoxedParser<str, E>)
            .collect(),
    )
}
