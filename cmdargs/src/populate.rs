//! Population of destination values from a command line.

use alloc::vec::Vec;

use cmdargs_parser::{ParseOptions, ParsedArgs, Target, TargetArg};

use crate::Error;
use crate::bind::Binder;
use crate::schema::{ArgInfo, Schema};

/// Parse the given command line, or the arguments of the current process when there is none.
///
/// Only `None` falls back to the process arguments. An empty command line, `Some("")`, gives an
/// empty result, so callers can tell an empty input from a missing one.
pub fn parse(input: Option<&str>) -> ParsedArgs {
    match input {
        Some(input) => ParsedArgs::parse(input),

        #[cfg(feature = "std")]
        None => ParsedArgs::from_env(&ParseOptions::default()),

        #[cfg(not(feature = "std"))]
        None => ParsedArgs::default(),
    }
}

/// Populate the destination from the given command line, after resetting its bound fields.
pub fn populate<T: Schema>(dest: &mut T, input: &str) -> Result<(), Error> {
    populate_with(dest, input, true)
}

/// Populate the destination from the given command line. Fields are reset first if `clear` is
/// set, otherwise fields without argument keep their current value.
pub fn populate_with<T: Schema>(dest: &mut T, input: &str, clear: bool) -> Result<(), Error> {
    let options = ParseOptions::new().target(target::<T>());
    let parsed = ParsedArgs::parse_with(input, &options);

    populate_from(dest, &parsed, clear)
}

/// Populate the destination from the arguments of the current process.
#[cfg(feature = "std")]
pub fn populate_from_env<T: Schema>(dest: &mut T) -> Result<(), Error> {
    let options = ParseOptions::new().target(target::<T>());
    let parsed = ParsedArgs::from_env(&options);

    populate_from(dest, &parsed, true)
}

/// Populate the destination from an existing parsing result.
///
/// On error, the fields bound so far keep their new value.
pub fn populate_from<T: Schema>(dest: &mut T, parsed: &ParsedArgs, clear: bool) -> Result<(), Error> {
    let active = resolve::<T>();

    if clear {
        dest.clear();
    }

    let binder = Binder::new::<T>(parsed);

    for (index, info) in active {
        tracing::trace!(field = info.field, "binding argument");
        dest.bind(index, &binder)?;
    }

    match T::operands() {
        None => {}

        Some(info) if !info.supported => {
            tracing::debug!(field = info.field, ty = info.ty, "unsupported operands field");

            return Err(Error::InvalidOperands {
                field: info.field,
                ty: info.ty,
            });
        }

        Some(info) => {
            tracing::trace!(field = info.field, "binding operands");
            dest.bind_operands(&binder)?;
        }
    }

    Ok(())
}

/// Retrieve the active argument bindings of the destination type, in declaration order.
pub fn arg_info<T: Schema>() -> Vec<&'static ArgInfo> {
    resolve::<T>().into_iter().map(|(_, info)| info).collect()
}

/// Build the parser-level description of the destination type.
pub fn target<T: Schema>() -> Target {
    let name = core::any::type_name::<T>();
    let name = name.rsplit("::").next().unwrap_or(name);

    let args = resolve::<T>().into_iter().map(|(_, info)| TargetArg {
        short: info.short,
        long: info.long.map(Into::into),
        switch: info.kind.is_switch(),
        multiple: info.kind.is_collection(),
    });

    Target::new(name, args)
}

/// Resolve the bindings with unique names. A binding sharing any name with a previously declared
/// one is ignored.
fn resolve<T: Schema>() -> Vec<(usize, &'static ArgInfo)> {
    let mut active: Vec<(usize, &'static ArgInfo)> = Vec::new();

    for (index, info) in T::args().iter().enumerate() {
        if info.short.is_none() && info.long.is_none() {
            continue;
        }

        if let Some((_, other)) = active.iter().find(|(_, x)| info.conflicts_with(x)) {
            tracing::debug!(
                field = info.field,
                other = other.field,
                "argument name already taken, ignoring field"
            );
            continue;
        }

        active.push((index, info));
    }

    active
}
