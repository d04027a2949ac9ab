//! Resolved values of the argument dictionary.

use alloc::string::String;
use alloc::vec::Vec;

/// Defines the value of an argument once repeated occurrences have been resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A single value (e.g. the last one when repeated values are not combined).
    Single(String),

    /// All the values of a combined argument, in order of appearance.
    Multiple(Vec<String>),
}

impl Value {
    /// Retrieve the single value, if any.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Value::Single(x) => Some(x),
            Value::Multiple(_) => None,
        }
    }

    /// Retrieve the combined values, if any.
    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Value::Single(_) => None,
            Value::Multiple(x) => Some(x),
        }
    }

    /// Retrieve the last value, which is the one that wins when values are not combined.
    pub fn last(&self) -> Option<&str> {
        match self {
            Value::Single(x) => Some(x),
            Value::Multiple(x) => x.last().map(String::as_str),
        }
    }

    /// Iterate over all the values.
    pub fn iter(&self) -> core::slice::Iter<'_, String> {
        match self {
            Value::Single(x) => core::slice::from_ref(x).iter(),
            Value::Multiple(x) => x.iter(),
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Value::Single(_) => 1,
            Value::Multiple(x) => x.len(),
        }
    }

    /// Evaluate if there is no value at all (i.e. an empty combination).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, value: String) {
        match self {
            Value::Single(x) => {
                let first = core::mem::take(x);
                *self = Value::Multiple(alloc::vec![first, value]);
            }
            Value::Multiple(x) => x.push(value),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Single(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Single(value.into())
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
