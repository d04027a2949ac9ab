//! cmdargs, a `no_std` command line tokenizer and a derive-based value binder.
//!
//! A destination type derives [`Schema`] to describe which of its fields receive argument values,
//! and which one receives the operands. It is then populated in place from a command line.
//!
//! ```
//! #[derive(Default, cmdargs::Schema)]
//! struct Args {
//!     /// Print more things.
//!     #[arg(short, long)]
//!     verbose: bool,
//!
//!     #[arg(short = 'n', long = "count")]
//!     count: u32,
//!
//!     #[operands]
//!     files: Vec<String>,
//! }
//!
//! let mut args = Args::default();
//! cmdargs::populate(&mut args, "-v -n 3 one.txt two.txt").unwrap();
//!
//! assert!(args.verbose);
//! assert_eq!(3, args.count);
//! assert_eq!(vec!["one.txt", "two.txt"], args.files);
//! ```
#![no_std]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;

pub mod bind;
pub mod populate;
pub mod schema;
pub mod value;

pub use cmdargs_macros as macros;
pub use cmdargs_parser as parser;
pub use heapless;

pub use macros::{Schema, ValueEnum};

pub use bind::{Binder, Collection};
#[cfg(feature = "std")]
pub use populate::populate_from_env;
pub use populate::{arg_info, parse, populate, populate_from, populate_with, target};
pub use schema::{ArgInfo, FieldKind, OperandsInfo, Schema, ValueKind};
pub use value::{FromArg, ValueError};

/// Defines the possible errors that may occur while populating a destination.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument value cannot be coerced to the type of its field.
    #[error("invalid value `{value}` for argument `{key}` of type `{ty}`")]
    InvalidValue {
        /// The argument key, as written.
        key: String,

        /// The raw argument value.
        value: String,

        /// The expected type.
        ty: &'static str,

        /// The coercion error.
        #[source]
        source: ValueError,
    },

    /// The operands field cannot receive the operands.
    #[error("field `{field}` of type `{ty}` cannot receive operands")]
    InvalidOperands {
        /// The field name.
        field: &'static str,

        /// The declared field type.
        ty: &'static str,
    },

    /// A fixed capacity collection cannot hold all the values of its argument.
    #[error("too many values for argument `{key}` ({count} given)")]
    TooManyValues {
        /// The argument key, as written.
        key: String,

        /// Number of values given.
        count: usize,
    },

    /// A fixed capacity collection cannot hold all the operands.
    #[error("too many operands for field `{field}` ({count} given)")]
    TooManyOperands {
        /// The field name.
        field: &'static str,

        /// Number of operands given.
        count: usize,
    },
}
