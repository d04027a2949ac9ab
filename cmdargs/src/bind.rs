//! Binding of parsed arguments to destination fields.

use alloc::string::String;
use alloc::vec::Vec;

use cmdargs_parser::{Argument, ParsedArgs};

use crate::Error;
use crate::schema::{ArgInfo, OperandsInfo, Schema, ValueKind};
use crate::value::FromArg;

/// Defines a sequence of values a collection field can be built from.
pub trait Collection<T>: Default {
    /// Try to append a value. The value is given back when the collection is full.
    fn try_push(&mut self, value: T) -> Result<(), T>;
}

impl<T> Collection<T> for Vec<T> {
    fn try_push(&mut self, value: T) -> Result<(), T> {
        self.push(value);
        Ok(())
    }
}

impl<T, const N: usize> Collection<T> for heapless::Vec<T, N> {
    fn try_push(&mut self, value: T) -> Result<(), T> {
        self.push(value)
    }
}

/// Defines a `Binder` that looks up and coerces the values of the arguments of a schema.
#[derive(Clone, Copy, Debug)]
pub struct Binder<'a> {
    parsed: &'a ParsedArgs,
    args: &'static [ArgInfo],
    operands: Option<&'static OperandsInfo>,
}

impl<'a> Binder<'a> {
    /// Create a binder for the given schema.
    pub fn new<T: Schema>(parsed: &'a ParsedArgs) -> Self {
        Binder {
            parsed,
            args: T::args(),
            operands: T::operands(),
        }
    }

    /// Get the value of the argument at the given index of the schema. The last occurrence wins,
    /// whatever name it has been given with. A boolean without value is `true`.
    pub fn one<T: FromArg>(&self, index: usize) -> Result<Option<T>, Error> {
        let Some(info) = self.args.get(index) else {
            return Ok(None);
        };

        let Some(arg) = self.occurrences(info).last() else {
            return Ok(None);
        };

        coerce(info, arg).map(Some)
    }

    /// Get the optional value of the argument at the given index of the schema. An argument
    /// without value gives `Some(None)`.
    pub fn maybe<T: FromArg>(&self, index: usize) -> Result<Option<Option<T>>, Error> {
        let Some(info) = self.args.get(index) else {
            return Ok(None);
        };

        let Some(arg) = self.occurrences(info).last() else {
            return Ok(None);
        };

        if arg.value.is_empty() {
            return Ok(Some(None));
        }

        coerce(info, arg).map(Some).map(Some)
    }

    /// Get all the values of the argument at the given index of the schema, in order of
    /// appearance.
    pub fn many<B, T>(&self, index: usize) -> Result<Option<B>, Error>
    where
        B: Collection<T>,
        T: FromArg,
    {
        let Some(info) = self.args.get(index) else {
            return Ok(None);
        };

        let count = self.occurrences(info).count();
        if count == 0 {
            return Ok(None);
        }

        let mut out = B::default();

        for arg in self.occurrences(info) {
            let value = coerce::<T>(info, arg)?;

            if out.try_push(value).is_err() {
                tracing::debug!(key = arg.key.as_str(), count, "too many values");

                return Err(Error::TooManyValues {
                    key: arg.key.clone(),
                    count,
                });
            }
        }

        Ok(Some(out))
    }

    /// Get the operands, in order of appearance.
    pub fn operands<B>(&self) -> Result<B, Error>
    where
        B: Collection<String>,
    {
        let operands = self.parsed.operand_list();
        let mut out = B::default();

        for operand in operands {
            if out.try_push(operand.clone()).is_err() {
                return Err(Error::TooManyOperands {
                    field: self.operands.map_or("", |x| x.field),
                    count: operands.len(),
                });
            }
        }

        Ok(out)
    }

    fn occurrences<'s>(&'s self, info: &'s ArgInfo) -> impl Iterator<Item = &'a Argument> + 's {
        self.parsed
            .argument_list()
            .iter()
            .filter(move |x| info.matches(&x.key))
    }
}

fn coerce<T: FromArg>(info: &ArgInfo, arg: &Argument) -> Result<T, Error> {
    let value = if arg.value.is_empty() && matches!(T::KIND, ValueKind::Bool) {
        "true"
    } else {
        arg.value.as_str()
    };

    T::from_arg(value).map_err(|source| {
        tracing::debug!(
            field = info.field,
            key = arg.key.as_str(),
            value = arg.value.as_str(),
            "cannot coerce value"
        );

        Error::InvalidValue {
            key: arg.key.clone(),
            value: arg.value.clone(),
            ty: core::any::type_name::<T>(),
            source,
        }
    })
}
