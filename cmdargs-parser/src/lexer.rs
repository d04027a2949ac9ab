//! A lexer for generating tokens from a command line.

/// Variant of `Flag` token. Only store the identifier, not the leading marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag<'a> {
    /// A group of short flags (e.g. -v or -abc).
    Short(&'a str),

    /// A long flag (e.g. --verbose or /verbose).
    Long(&'a str),
}

impl<'a> Flag<'a> {
    /// Try to read a flag from a command line word. The optional attached value (i.e. the part
    /// after `=` or `:`) is returned untouched.
    pub fn parse(input: &'a str) -> Option<(Self, Option<&'a str>)> {
        let (short, rest) = if let Some(rest) = input.strip_prefix("--") {
            (false, rest)
        } else if let Some(rest) = input.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = input.strip_prefix('/') {
            (false, rest)
        } else {
            return None;
        };

        let end = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }

        let (name, tail) = rest.split_at(end);

        let value = match tail.chars().next() {
            None => None,
            Some('=' | ':') => Some(&tail[1..]),
            // Something like `--foo.bar`, which is not a flag.
            Some(_) => return None,
        };

        let flag = if short {
            Flag::Short(name)
        } else {
            Flag::Long(name)
        };

        Some((flag, value))
    }

    /// Retrieve the identifier of the flag, as written.
    pub fn name(&self) -> &'a str {
        match *self {
            Flag::Short(name) | Flag::Long(name) => name,
        }
    }

    /// Iterate over the argument keys designated by this flag. A group of short flags yields one
    /// key per character.
    pub fn keys(&self) -> Keys<'a> {
        match *self {
            Flag::Short(name) => Keys {
                input: name,
                split: true,
            },
            Flag::Long(name) => Keys {
                input: name,
                split: false,
            },
        }
    }
}

/// Evaluate if the character may be part of a flag identifier.
#[inline(always)]
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// An iterator over the keys of a flag.
#[derive(Clone, Debug)]
pub struct Keys<'a> {
    input: &'a str,
    split: bool,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.input.is_empty() {
            return None;
        }

        let end = if self.split {
            self.input
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(self.input.len())
        } else {
            self.input.len()
        };

        let (key, rest) = self.input.split_at(end);
        self.input = rest;
        Some(key)
    }
}

/// Defines a `Token` that has been read from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token<'a> {
    /// Flag, with its attached value if any (e.g. --flag=value).
    Flag(Flag<'a>, Option<&'a str>),

    /// Value (i.e. every word that is not a flag before the strict operand delimiter).
    Value(&'a str),

    /// The strict operand delimiter `--`.
    Delimiter,

    /// Word found after the strict operand delimiter.
    Operand(&'a str),
}

impl Token<'_> {
    /// The strict operand delimiter.
    pub const DELIMITER: &'static str = "--";
}

/// Defines a `Lexer` that is responsible for streaming tokens from the command line input.
///
/// A lexer acts like an forward iterator. Words are separated by whitespaces, except inside
/// a pair of single or double quotes.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    input: &'a str,
    cursor: usize,
    strict: bool,
}

impl<'a> Tokens<'a> {
    /// Create a new lexer from the command line input.
    pub fn new(input: &'a str) -> Self {
        Tokens {
            input,
            cursor: 0,
            strict: false,
        }
    }

    /// Evaluate if the lexer has gone past the strict operand delimiter.
    #[inline(always)]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn next_word(&mut self) -> Option<&'a str> {
        let rest = &self.input[self.cursor..];

        let start = match rest.find(|c: char| !c.is_whitespace()) {
            Some(start) => start,
            None => {
                self.cursor = self.input.len();
                return None;
            }
        };

        let mut quote = None;
        let mut end = rest.len();

        for (i, c) in rest[start..].char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c.is_whitespace() => {
                    end = start + i;
                    break;
                }
                None => {}
            }
        }

        self.cursor += end;
        Some(&rest[start..end])
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let word = self.next_word()?;

        if self.strict {
            return Some(Token::Operand(word));
        }

        if word == Token::DELIMITER {
            self.strict = true;
            return Some(Token::Delimiter);
        }

        if let Some((flag, value)) = Flag::parse(word) {
            return Some(Token::Flag(flag, value));
        }

        Some(Token::Value(word))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_match_short_flag() {
        let mut lexer = Tokens::new("-f");

        let token = lexer.next();
        assert_that!(token, eq(Some(Token::Flag(Flag::Short("f"), None))));
        assert_that!(lexer.next(), eq(None));
    }

    #[test]
    fn it_should_match_group_of_short_flags() {
        let mut lexer = Tokens::new("-abc");

        let token = lexer.next();
        assert_that!(token, eq(Some(Token::Flag(Flag::Short("abc"), None))));

        let keys: Vec<_> = Flag::Short("abc").keys().collect();
        assert_that!(keys, elements_are![eq(&"a"), eq(&"b"), eq(&"c")]);
    }

    #[test]
    fn it_should_match_long_flag() {
        let mut lexer = Tokens::new("--flag /other");

        assert_that!(lexer.next(), eq(Some(Token::Flag(Flag::Long("flag"), None))));
        assert_that!(lexer.next(), eq(Some(Token::Flag(Flag::Long("other"), None))));

        let keys: Vec<_> = Flag::Long("flag").keys().collect();
        assert_that!(keys, elements_are![eq(&"flag")]);
    }

    #[test]
    fn it_should_match_attached_values() {
        let lexer = Tokens::new("--one=1 --two:2 /three:3 --four='4 4' -x=");
        let tokens: Vec<_> = lexer.collect();

        assert_that!(
            tokens,
            elements_are![
                eq(&Token::Flag(Flag::Long("one"), Some("1"))),
                eq(&Token::Flag(Flag::Long("two"), Some("2"))),
                eq(&Token::Flag(Flag::Long("three"), Some("3"))),
                eq(&Token::Flag(Flag::Long("four"), Some("'4 4'"))),
                eq(&Token::Flag(Flag::Short("x"), Some(""))),
            ]
        );
    }

    #[test]
    fn it_should_keep_quoted_words_together() {
        let lexer = Tokens::new("  \"test '1'\"   'test \"2\"' \"open ended");
        let tokens: Vec<_> = lexer.collect();

        assert_that!(
            tokens,
            elements_are![
                eq(&Token::Value("\"test '1'\"")),
                eq(&Token::Value("'test \"2\"'")),
                eq(&Token::Value("\"open ended")),
            ]
        );
    }

    #[test]
    fn it_should_match_values_that_look_like_flags() {
        let lexer = Tokens::new("- hello-world //foo --foo.bar -- ");
        let tokens: Vec<_> = lexer.collect();

        assert_that!(
            tokens,
            elements_are![
                eq(&Token::Value("-")),
                eq(&Token::Value("hello-world")),
                eq(&Token::Value("//foo")),
                eq(&Token::Value("--foo.bar")),
                eq(&Token::Delimiter),
            ]
        );
    }

    #[test]
    fn it_should_match_digits_as_short_flags() {
        let mut lexer = Tokens::new("-4");
        assert_that!(lexer.next(), eq(Some(Token::Flag(Flag::Short("4"), None))));
    }

    #[test]
    fn it_should_switch_to_strict_operands() {
        let mut lexer = Tokens::new("-a -- -b -- 'c d'");

        assert_that!(lexer.next(), eq(Some(Token::Flag(Flag::Short("a"), None))));
        assert_that!(lexer.is_strict(), eq(false));
        assert_that!(lexer.next(), eq(Some(Token::Delimiter)));
        assert_that!(lexer.is_strict(), eq(true));
        assert_that!(lexer.next(), eq(Some(Token::Operand("-b"))));
        assert_that!(lexer.next(), eq(Some(Token::Operand("--"))));
        assert_that!(lexer.next(), eq(Some(Token::Operand("'c d'"))));
        assert_that!(lexer.next(), eq(None));
    }

    #[test]
    fn it_should_not_split_delimiter_inside_quotes() {
        let lexer = Tokens::new("\"a -- b\"");
        let tokens: Vec<_> = lexer.collect();

        assert_that!(tokens, elements_are![eq(&Token::Value("\"a -- b\""))]);
    }

    #[test]
    fn it_should_match_nothing_in_blank_input() {
        assert_that!(Tokens::new("").next(), eq(None));
        assert_that!(Tokens::new(" \t\n ").next(), eq(None));
    }
}
