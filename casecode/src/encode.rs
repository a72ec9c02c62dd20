//! Casecode encoding implementation.

use crate::{ESCAPED_MARKER, MARKER};

/// Check whether a string can be encoded without losing information.
///
/// The encoding reserves [`MARKER`], so an input that already contains it
/// would not survive a roundtrip.
pub fn is_encodable(input: &str) -> bool {
    !input.contains(MARKER)
}

/// Encode a mixed-case string so it survives lower-casing.
///
/// Every ASCII uppercase letter becomes its lowercase form followed by the
/// marker. All other characters pass through unchanged.
pub fn encode(input: &str) -> String {
    // Worst case every char is uppercase and doubles
    let mut out = String::with_capacity(input.len() * 2);

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            out.push(c.to_ascii_lowercase());
            out.push(MARKER);
        } else {
            out.push(c);
        }
    }

    out
}

/// Escape the marker for transports that percent-encode it.
pub fn escape_transport(input: &str) -> String {
    input.replace(MARKER, ESCAPED_MARKER)
}

/// Encode and transport-escape in one step.
///
/// This is the form a host embeds in an authority or fragment.
pub fn encode_component(input: &str) -> String {
    escape_transport(&encode(input))
}
