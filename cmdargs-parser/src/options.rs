//! Parsing options.

use alloc::string::String;
use alloc::vec::Vec;

/// Describes one argument expected by a destination, as seen by the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetArg {
    /// Short name.
    pub short: Option<char>,

    /// Long name.
    pub long: Option<String>,

    /// The argument is a switch, i.e. it never takes a value from the next word.
    pub switch: bool,

    /// The argument accepts multiple values.
    pub multiple: bool,
}

impl TargetArg {
    /// Check if the key designates this argument.
    #[inline(always)]
    pub fn matches(&self, key: &str) -> bool {
        self.matches_short(key) || self.matches_long(key)
    }

    fn matches_short(&self, key: &str) -> bool {
        let mut chars = key.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if Some(c) == self.short)
    }

    fn matches_long(&self, key: &str) -> bool {
        self.long.as_deref() == Some(key)
    }
}

/// Describes the destination of the parsed arguments, so that the parser can resolve aliases,
/// switches and multiple values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    name: String,
    args: Vec<TargetArg>,
}

impl Target {
    /// Create a new target.
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = TargetArg>) -> Self {
        Target {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// The destination name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The destination arguments.
    #[inline(always)]
    pub fn args(&self) -> &[TargetArg] {
        &self.args
    }

    /// Find the index of the argument designated by the given key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.args
            .iter()
            .position(|x| x.matches_short(key))
            .or_else(|| self.args.iter().position(|x| x.matches_long(key)))
    }

    /// Find the argument designated by the given key.
    pub fn find(&self, key: &str) -> Option<&TargetArg> {
        self.position(key).map(|i| &self.args[i])
    }

    /// Evaluate if the given key designates a switch.
    pub fn is_switch(&self, key: &str) -> bool {
        self.find(key).is_some_and(|x| x.switch)
    }
}

/// Options that drive the construction of the argument dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    combine_all_multiples: bool,
    combinable_arguments: Vec<String>,
    target: Option<Target>,
}

impl ParseOptions {
    /// Create the default options: the last value of a repeated argument wins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine the values of every repeated argument in the order of appearance.
    pub fn combine_all_multiples(mut self, enable: bool) -> Self {
        self.combine_all_multiples = enable;
        self
    }

    /// Combine the values of the listed arguments only, when repeated.
    pub fn combinable_arguments<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combinable_arguments = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the destination description.
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Retrieve the destination description, if any.
    #[inline(always)]
    pub fn get_target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Evaluate if the repeated values of the given key should be combined.
    pub fn is_combinable(&self, key: &str) -> bool {
        self.combine_all_multiples || self.combinable_arguments.iter().any(|x| x == key)
    }

    /// Evaluate if the given key designates a switch of the target.
    #[inline(always)]
    pub fn is_switch(&self, key: &str) -> bool {
        self.target.as_ref().is_some_and(|x| x.is_switch(key))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use googletest::prelude::*;

    use super::*;

    fn target() -> Target {
        Target::new(
            "Args",
            [
                TargetArg {
                    short: Some('l'),
                    long: Some("list".to_string()),
                    switch: false,
                    multiple: true,
                },
                TargetArg {
                    short: Some('b'),
                    long: Some("bb".to_string()),
                    switch: true,
                    multiple: false,
                },
                TargetArg {
                    short: None,
                    long: Some("t".to_string()),
                    switch: false,
                    multiple: false,
                },
            ],
        )
    }

    #[test]
    fn it_should_find_args_by_short_or_long_name() {
        let target = target();

        assert_that!(target.position("l"), eq(Some(0)));
        assert_that!(target.position("list"), eq(Some(0)));
        assert_that!(target.position("bb"), eq(Some(1)));
        assert_that!(target.position("t"), eq(Some(2)));
        assert_that!(target.position("L"), eq(None));
        assert_that!(target.position("lis"), eq(None));
    }

    #[test]
    fn it_should_match_keys() {
        let target = target();
        let arg = &target.args()[0];

        assert_that!(arg.matches("l"), eq(true));
        assert_that!(arg.matches("list"), eq(true));
        assert_that!(arg.matches("ll"), eq(false));
    }

    #[test]
    fn it_should_detect_switches() {
        let options = ParseOptions::new().target(target());

        assert_that!(options.is_switch("b"), eq(true));
        assert_that!(options.is_switch("bb"), eq(true));
        assert_that!(options.is_switch("l"), eq(false));
        assert_that!(ParseOptions::new().is_switch("b"), eq(false));
    }

    #[test]
    fn it_should_detect_combinable_keys() {
        let options = ParseOptions::new().combinable_arguments(["test"]);
        assert_that!(options.is_combinable("test"), eq(true));
        assert_that!(options.is_combinable("foo"), eq(false));

        let options = ParseOptions::new().combine_all_multiples(true);
        assert_that!(options.is_combinable("foo"), eq(true));
    }
}
