//! Casecode decoding implementation.

use std::borrow::Cow;

use crate::MARKER;

/// Decode a casecode string back to its original case.
///
/// Every `<ascii-lowercase><marker>` pair becomes the uppercase letter.
/// A marker that does not follow a lowercase letter passes through.
///
/// # Examples
///
/// ```
/// assert_eq!(casecode::decode("uhc$a$k"), "uhCAk");
/// assert_eq!(casecode::decode("1$"), "1$");
/// ```
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_lowercase() && chars.peek() == Some(&MARKER) {
            chars.next();
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Undo transport-level escaping of the marker (`%24` → `$`).
///
/// The hex digits are matched case-insensitively. Other percent escapes are
/// left alone since they are not part of the identifier alphabet.
pub fn unescape_transport(input: &str) -> Cow<'_, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos..];
        if escape.len() >= 3 && escape[1..3].eq_ignore_ascii_case("24") {
            out.push(MARKER);
            rest = &escape[3..];
        } else {
            out.push('%');
            rest = &escape[1..];
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Unescape and decode in one step.
///
/// This is what a frame applies to the label it reads from its own location.
pub fn decode_component(input: &str) -> String {
    decode(&unescape_transport(input))
}
