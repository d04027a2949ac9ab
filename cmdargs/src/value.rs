//! Coercion of argument values to field types.

use alloc::string::String;
use core::num::{ParseFloatError, ParseIntError};

use crate::schema::ValueKind;

/// Defines the possible errors that may occur while coercing a value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The value is not a boolean.
    #[error("expected `true` or `false`")]
    Bool,

    /// The value is not an integer, or is out of range.
    #[error(transparent)]
    Integer(#[from] ParseIntError),

    /// The value is not a floating point number.
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    /// The value is not exactly one character.
    #[error("expected a single character")]
    Char,

    /// The value is not a decimal number.
    #[cfg(feature = "decimal")]
    #[error("invalid decimal number")]
    Decimal,

    /// The value names no variant of the enumeration.
    #[error("expected one of {0:?}")]
    UnknownVariant(&'static [&'static str]),
}

/// Defines a type an argument value can be coerced to.
///
/// Enumerations implement it with `#[derive(ValueEnum)]`.
pub trait FromArg: Sized {
    /// The kind of value, as exposed by the schema.
    const KIND: ValueKind;

    /// Coerce the raw argument value.
    fn from_arg(value: &str) -> Result<Self, ValueError>;
}

macro_rules! make_from_arg_impl {
    ($kind:ident => $($target:ty),+ $(,)?) => {
        $(
            impl FromArg for $target {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_arg(value: &str) -> Result<Self, ValueError> {
                    value.parse::<$target>().map_err(Into::into)
                }
            }
        )+
    };
}

make_from_arg_impl!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
make_from_arg_impl!(Float => f32, f64);

impl FromArg for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_arg(value: &str) -> Result<Self, ValueError> {
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ValueError::Bool)
        }
    }
}

impl FromArg for char {
    const KIND: ValueKind = ValueKind::Char;

    fn from_arg(value: &str) -> Result<Self, ValueError> {
        let mut chars = value.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::Char),
        }
    }
}

impl FromArg for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_arg(value: &str) -> Result<Self, ValueError> {
        Ok(value.into())
    }
}

#[cfg(feature = "decimal")]
impl FromArg for rust_decimal::Decimal {
    const KIND: ValueKind = ValueKind::Decimal;

    fn from_arg(value: &str) -> Result<Self, ValueError> {
        use core::str::FromStr;

        rust_decimal::Decimal::from_str(value).map_err(|_| ValueError::Decimal)
    }
}
