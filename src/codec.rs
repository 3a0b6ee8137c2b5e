//! URL-safe text codec for embedding request text in an address path segment.
//!
//! Text is UTF-8 encoded, base64 encoded, and made URL-safe (`+` → `-`,
//! `/` → `_`, trailing `=` stripped). Neither direction ever fails: malformed
//! tokens decode to an empty string, invalid UTF-8 decodes lossily.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

/// Standard-alphabet decoder that tolerates non-zero trailing bits.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Encodes text into a URL-safe token.
///
/// # Examples
///
/// ```
/// use rest_workbench::codec::{decode, encode};
///
/// let token = encode("https://api.example.com/users?page=2");
/// assert!(!token.contains('/'));
/// assert_eq!(decode(&token), "https://api.example.com/users?page=2");
/// assert_eq!(encode(""), "");
/// ```
pub fn encode(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Decodes a token produced by [`encode`].
///
/// Returns an empty string for tokens that are not valid base64 after the
/// URL-safe substitutions are inverted and padding is restored.
pub fn decode(token: &str) -> String {
    let mut standard: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    while standard.len() % 4 != 0 {
        standard.push('=');
    }

    match LENIENT_STANDARD.decode(standard.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}
