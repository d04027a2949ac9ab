//! A parser for collecting arguments and operands from a command line.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;

use crate::lexer::{Token, Tokens};
use crate::options::{ParseOptions, Target};
use crate::utils::trim_outer_quotes;
use crate::value::Value;

/// Defines an argument as found in the command line, i.e. a key and its value. The value is
/// empty when the key is not followed by a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    /// The argument key, without leading hyphens or slash.
    pub key: String,

    /// The argument value, without outer quotes.
    pub value: String,
}

impl Argument {
    /// Create a new argument.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Argument {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Defines the result of argument parsing. It keeps the arguments in order of appearance, a
/// dictionary of their resolved values and the operands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    list: Vec<Argument>,
    dictionary: BTreeMap<String, Value>,
    operands: Vec<String>,
    target: Option<Target>,
}

impl ParsedArgs {
    /// Parse the command line input with the default options. Parsing never fails: anything that
    /// is not an argument is an operand.
    pub fn parse(input: &str) -> Self {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parse the command line input with the given options.
    pub fn parse_with(input: &str, options: &ParseOptions) -> Self {
        let mut tokens = Tokens::new(input).peekable();

        let mut out = ParsedArgs {
            target: options.get_target().cloned(),
            ..Default::default()
        };

        while let Some(token) = tokens.next() {
            match token {
                Token::Flag(flag, attached) => {
                    // A flag has at least one key, the last one gets the value.
                    let last = flag.keys().last().unwrap_or_default();

                    let value = match attached {
                        Some(value) => trim_outer_quotes(value),
                        None if options.is_switch(last) => "",
                        None => match tokens.next_if(|x| matches!(x, Token::Value(_))) {
                            Some(Token::Value(value)) => trim_outer_quotes(value),
                            _ => "",
                        },
                    };

                    let mut keys = flag.keys().peekable();

                    while let Some(key) = keys.next() {
                        let value = if keys.peek().is_some() { "" } else { value };
                        out.list.push(Argument::new(key, value));
                    }
                }

                Token::Value(value) => out.operands.push(trim_outer_quotes(value).to_string()),

                Token::Delimiter => {}

                Token::Operand(value) => out.operands.push(value.to_string()),
            }
        }

        out.dictionary = build_dictionary(&out.list, options);

        tracing::debug!(
            arguments = out.list.len(),
            keys = out.dictionary.len(),
            operands = out.operands.len(),
            "parsed command line"
        );

        out
    }

    /// Parse the arguments the current process has been started with, the program name aside.
    #[cfg(feature = "std")]
    pub fn from_env(options: &ParseOptions) -> Self {
        use crate::utils::quote_word;

        let words: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|x| x.to_string_lossy().into_owned())
            .collect();

        let input = words
            .iter()
            .map(|x| quote_word(x))
            .collect::<Vec<_>>()
            .join(" ");

        Self::parse_with(&input, options)
    }

    /// The arguments in order of appearance, including repeated ones.
    #[inline(always)]
    pub fn argument_list(&self) -> &[Argument] {
        &self.list
    }

    /// The arguments by key, once repeated occurrences have been resolved.
    #[inline(always)]
    pub fn argument_dictionary(&self) -> &BTreeMap<String, Value> {
        &self.dictionary
    }

    /// The operands in order of appearance.
    #[inline(always)]
    pub fn operand_list(&self) -> &[String] {
        &self.operands
    }

    /// The destination description used for parsing, if any.
    #[inline(always)]
    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Check if there exists an argument with the given key.
    #[inline(always)]
    pub fn contains(&self, key: &str) -> bool {
        self.dictionary.contains_key(key)
    }

    /// Get the resolved value of the given key.
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.dictionary.get(key)
    }

    /// Iterate over the values of all the occurrences of the given keys, in order of appearance.
    pub fn values_of<'s>(&'s self, keys: &'s [&'s str]) -> impl Iterator<Item = &'s Argument> + 's {
        self.list.iter().filter(move |x| keys.contains(&x.key.as_str()))
    }
}

impl Index<&str> for ParsedArgs {
    type Output = Value;

    /// Get the resolved value of the given key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &str) -> &Self::Output {
        &self.dictionary[key]
    }
}

impl Index<usize> for ParsedArgs {
    type Output = str;

    /// Get the value of the argument at the given position of the argument list.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    fn index(&self, index: usize) -> &Self::Output {
        &self.list[index].value
    }
}

impl<K, V> FromIterator<(K, V)> for ParsedArgs
where
    K: Into<String>,
    V: Into<String>,
{
    /// Build the result from explicit key-value pairs, with the default options and no operand.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let list: Vec<_> = iter.into_iter().map(|(k, v)| Argument::new(k, v)).collect();
        let dictionary = build_dictionary(&list, &ParseOptions::default());

        ParsedArgs {
            list,
            dictionary,
            ..Default::default()
        }
    }
}

fn build_dictionary(list: &[Argument], options: &ParseOptions) -> BTreeMap<String, Value> {
    let target = options.get_target();

    // The short and long keys of the same target argument are stored under the first one seen.
    let mut aliases: BTreeMap<usize, &str> = BTreeMap::new();
    let mut keys: Vec<(&str, bool)> = Vec::with_capacity(list.len());

    for arg in list {
        let found = target.and_then(|t| t.position(&arg.key).map(|i| (i, t.args()[i].multiple)));

        match found {
            Some((index, multiple)) => {
                let key = *aliases.entry(index).or_insert(arg.key.as_str());
                keys.push((key, multiple));
            }
            None => keys.push((arg.key.as_str(), false)),
        }
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &(key, _) in &keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut dictionary: BTreeMap<String, Value> = BTreeMap::new();

    for (&(key, multiple), arg) in keys.iter().zip(list) {
        let combine = multiple || (counts[key] > 1 && options.is_combinable(key));
        let value = arg.value.clone();

        match dictionary.entry(key.to_string()) {
            Entry::Occupied(mut entry) if combine => entry.get_mut().push(value),
            Entry::Occupied(mut entry) => {
                entry.insert(Value::Single(value));
            }
            Entry::Vacant(entry) if combine => {
                entry.insert(Value::Multiple(vec![value]));
            }
            Entry::Vacant(entry) => {
                entry.insert(Value::Single(value));
            }
        }
    }

    tracing::trace!(
        destination = target.map(Target::name),
        keys = dictionary.len(),
        "built argument dictionary"
    );

    dictionary
}
