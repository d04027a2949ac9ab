//! Schema description of a destination type.

use core::fmt;

use crate::Error;
use crate::bind::Binder;

/// Defines the kind of values a single argument is coerced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueKind {
    /// Boolean switch, set when the argument is present without value.
    Bool,

    /// Integer number, signed or not.
    Integer,

    /// Floating point number.
    Float,

    /// Decimal number.
    Decimal,

    /// Single character.
    Char,

    /// Text, taken verbatim.
    String,

    /// One of the given enumeration variants.
    Enum(&'static [&'static str]),
}

/// Defines how a field holds the values of its argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// The field holds one value (possibly optional).
    Value(ValueKind),

    /// The field holds all the values of its argument, in order of appearance.
    Collection(ValueKind),
}

impl FieldKind {
    /// The kind of each value.
    pub const fn value_kind(&self) -> ValueKind {
        match *self {
            FieldKind::Value(kind) | FieldKind::Collection(kind) => kind,
        }
    }

    /// Evaluate if the field is a boolean switch.
    pub const fn is_switch(&self) -> bool {
        matches!(self, FieldKind::Value(ValueKind::Bool))
    }

    /// Evaluate if the field accepts multiple values.
    pub const fn is_collection(&self) -> bool {
        matches!(self, FieldKind::Collection(_))
    }
}

/// Describes the binding of one argument to one field of the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArgInfo {
    /// Short name (e.g. `v` for `-v`).
    pub short: Option<char>,

    /// Long name (e.g. `verbose` for `--verbose` or `/verbose`).
    pub long: Option<&'static str>,

    /// Help text.
    pub help: Option<&'static str>,

    /// Destination field name.
    pub field: &'static str,

    /// Kind of destination field.
    pub kind: FieldKind,
}

impl ArgInfo {
    /// Create a new argument binding, without help text.
    pub const fn new(
        short: Option<char>,
        long: Option<&'static str>,
        field: &'static str,
        kind: FieldKind,
    ) -> Self {
        ArgInfo {
            short,
            long,
            help: None,
            field,
            kind,
        }
    }

    /// Set the help text.
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Check if the key designates this argument, by its short or long name.
    pub fn matches(&self, key: &str) -> bool {
        let mut chars = key.chars();

        let short = matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if Some(c) == self.short
        );

        short || self.long == Some(key)
    }

    /// Check if this argument shares a name with the other one. Short and long names live in
    /// one namespace, so a one-character long name collides with the same short name.
    pub fn conflicts_with(&self, other: &ArgInfo) -> bool {
        let mut buf = [0u8; 4];
        let short = self.short.map(|c| &*c.encode_utf8(&mut buf));

        short.into_iter().chain(self.long).any(|name| other.matches(name))
    }
}

impl fmt::Display for ArgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short, self.long) {
            (Some(short), Some(long)) => write!(f, "-{short}, --{long}"),
            (Some(short), None) => write!(f, "-{short}"),
            (None, Some(long)) => write!(f, "--{long}"),
            (None, None) => write!(f, "<{}>", self.field),
        }
    }
}

/// Describes the field that receives the operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperandsInfo {
    /// Destination field name.
    pub field: &'static str,

    /// Declared type of the field, as written.
    pub ty: &'static str,

    /// The field type is a sequence of strings, so it can receive the operands.
    pub supported: bool,
}

impl OperandsInfo {
    /// Create a new operand sink description.
    pub const fn new(field: &'static str, ty: &'static str, supported: bool) -> Self {
        OperandsInfo {
            field,
            ty,
            supported,
        }
    }
}

/// Defines a destination type that can be populated from a command line.
///
/// This trait is usually derived with `#[derive(Schema)]`, which generates the descriptors and
/// dispatches each binding to its field.
pub trait Schema {
    /// The argument bindings, in declaration order. Names may collide: the first declared
    /// binding wins and the colliding ones are ignored.
    fn args() -> &'static [ArgInfo];

    /// The operand sink, if any.
    fn operands() -> Option<&'static OperandsInfo> {
        None
    }

    /// Reset every bound field, and the operand sink, to its default value.
    fn clear(&mut self);

    /// Bind the argument at the given index of [`Schema::args`] to its field. A field whose
    /// argument is absent is left untouched.
    fn bind(&mut self, index: usize, binder: &Binder<'_>) -> Result<(), Error>;

    /// Bind the operands to the operand sink. Only called when the sink is supported.
    fn bind_operands(&mut self, binder: &Binder<'_>) -> Result<(), Error> {
        let _ = binder;
        Ok(())
    }
}
