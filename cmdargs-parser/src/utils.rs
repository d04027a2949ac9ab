//! Parser utilities.

/// Remove one pair of matching outer quotes (single or double) from the given value, if any.
#[inline]
pub fn trim_outer_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();

    match (bytes.first(), bytes.last()) {
        (Some(&first @ (b'"' | b'\'')), Some(&last)) if bytes.len() >= 2 && first == last => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}

/// Quote a word so that it reads back as a single word, choosing the quote that does not appear
/// in the word. A word containing both kinds of quotes is left untouched.
#[cfg(feature = "std")]
pub fn quote_word(word: &str) -> alloc::borrow::Cow<'_, str> {
    use alloc::borrow::Cow;
    use alloc::format;

    if word.is_empty() {
        return Cow::Borrowed("\"\"");
    }

    if !word.contains(char::is_whitespace) {
        return Cow::Borrowed(word);
    }

    if !word.contains('"') {
        Cow::Owned(format!("\"{word}\""))
    } else if !word.contains('\'') {
        Cow::Owned(format!("'{word}'"))
    } else {
        Cow::Borrowed(word)
    }
}
