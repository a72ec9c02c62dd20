//! Casecode: keep mixed-case hash identifiers intact through lower-casing.
//!
//! Hosts often embed a content-hash identifier in an address component that
//! gets normalized to lowercase (a URL authority, for example). Casecode makes
//! such identifiers survive that normalization while staying perfectly
//! reversible.
//!
//! # Format
//!
//! - Every ASCII uppercase letter is written as its lowercase form followed by
//!   the marker `$`.
//! - Every other character passes through unchanged.
//! - Transports that percent-encode `$` produce `%24`; [`decode_component`]
//!   undoes that before reversing the case.
//!
//! # Key Properties
//!
//! - Encode/decode in O(n) time
//! - Strict roundtrip: `decode(encode(s)) == s` whenever `s` contains no `$`
//! - Encoded output never contains an ASCII uppercase letter
//!
//! # Examples
//!
//! ```
//! use casecode::{decode, decode_component, encode, encode_component};
//!
//! assert_eq!(encode("uhCAk"), "uhc$a$k");
//! assert_eq!(decode("uhc$a$k"), "uhCAk");
//!
//! // Transport escaping of the marker
//! assert_eq!(encode_component("uhCAk"), "uhc%24a%24k");
//! assert_eq!(decode_component("uhc%24a%24k"), "uhCAk");
//! ```

mod decode;
mod encode;

pub use decode::{decode, decode_component, unescape_transport};
pub use encode::{encode, encode_component, escape_transport, is_encodable};

/// Marker appended after a lowercased letter.
pub const MARKER: char = '$';

/// Percent-encoded form of [`MARKER`].
pub const ESCAPED_MARKER: &str = "%24";
