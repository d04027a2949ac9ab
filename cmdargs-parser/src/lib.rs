//! cmdargs-parser, a `no_std` command line tokenizer.
//!
//! A command line is split into quote-aware words. Words starting with `--`, `-` or `/` followed
//! by an identifier are argument keys, the others are values or operands. Every word following
//! the first standalone `--` is an operand, kept verbatim.
#![no_std]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod lexer;
pub mod options;
pub mod parser;
pub mod utils;
pub mod value;

pub use lexer::{Flag, Token, Tokens};
pub use options::{ParseOptions, Target, TargetArg};
pub use parser::{Argument, ParsedArgs};
pub use value::Value;
