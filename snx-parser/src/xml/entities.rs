//! Entity reference decoding
//!
//!     Recognized forms: the five XML named entities (`&amp;` `&lt;` `&gt;`
//!     `&quot;` `&apos;`) and well-formed, semicolon-terminated numeric
//!     references (`&#123;` decimal, `&#x1F4A9;` hex) that name a valid
//!     Unicode scalar.
//!
//!     Anything else that still looks like an entity (`&foo;`, `&#xZZ;`,
//!     `&#xD800;`) is an error in strict mode and passes through verbatim
//!     in lenient mode. A bare `&` that never forms an entity shape
//!     (`a & b`) passes through in both modes.

use memchr::memchr;

use super::error::{TokenError, TokenErrorKind};
use super::ParseMode;

// 0x10FFFF needs 6 hex / 7 decimal digits; longer runs cannot decode.
const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

// Bound for deciding whether an `&` run is entity-shaped at all. Keeps the
// scan linear on adversarial input.
const MAX_SHAPE_LEN: usize = 32;

enum Scan {
    /// A recognized entity: the decoded char and the lexeme length.
    Decoded(char, usize),
    /// Entity-shaped (`&...;`) but not a recognized form; lexeme length.
    Unrecognized(usize),
    /// A bare `&` that never closes into an entity shape.
    NotAnEntity,
}

fn starts_with_at(bytes: &[u8], i: usize, pat: &[u8]) -> bool {
    bytes.get(i..i + pat.len()).is_some_and(|s| s == pat)
}

/// Classify the run starting at `bytes[start] == b'&'`.
fn scan_entity(bytes: &[u8], start: usize) -> Scan {
    const NAMED: [(&[u8], char); 5] = [
        (b"&amp;", '&'),
        (b"&lt;", '<'),
        (b"&gt;", '>'),
        (b"&quot;", '"'),
        (b"&apos;", '\''),
    ];
    for (pat, ch) in NAMED {
        if starts_with_at(bytes, start, pat) {
            return Scan::Decoded(ch, pat.len());
        }
    }

    let numeric = if starts_with_at(bytes, start, b"&#x") || starts_with_at(bytes, start, b"&#X") {
        scan_digits(bytes, start + 3, MAX_HEX_DIGITS, true)
            .map(|end| (u32::from_str_radix(ascii(bytes, start + 3, end), 16), end))
    } else if starts_with_at(bytes, start, b"&#") {
        scan_digits(bytes, start + 2, MAX_DEC_DIGITS, false)
            .map(|end| (ascii(bytes, start + 2, end).parse::<u32>(), end))
    } else {
        None
    };
    if let Some((value, end)) = numeric {
        let len = end - start + 1; // include the ';'
        return match value.ok().and_then(char::from_u32) {
            Some(ch) => Scan::Decoded(ch, len),
            // Well-formed digits naming an invalid scalar (surrogates,
            // beyond 0x10FFFF).
            None => Scan::Unrecognized(len),
        };
    }

    // Shape check: `&` + alphanumeric/`#` run + `;`.
    let mut j = start + 1;
    while j < bytes.len()
        && j - start <= MAX_SHAPE_LEN
        && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'#')
    {
        j += 1;
    }
    if j > start + 1 && j < bytes.len() && bytes[j] == b';' {
        Scan::Unrecognized(j - start + 1)
    } else {
        Scan::NotAnEntity
    }
}

/// Scan a digit run ending in `;`. Returns the index of the `;`.
fn scan_digits(bytes: &[u8], start: usize, max_digits: usize, hex: bool) -> Option<usize> {
    let mut j = start;
    let mut digits = 0usize;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b';' {
            return (digits > 0).then_some(j);
        }
        if digits == max_digits {
            return None;
        }
        let ok = if hex {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !ok {
            return None;
        }
        digits += 1;
        j += 1;
    }
    None
}

fn ascii(bytes: &[u8], start: usize, end: usize) -> &str {
    // Caller guarantees the range is ASCII digits.
    std::str::from_utf8(&bytes[start..end]).unwrap_or("")
}

/// Decode entity references in `raw`.
///
/// `base_offset` is the byte offset of `raw` within the whole source, so
/// strict-mode errors point at the document, not the slice.
pub(crate) fn decode_entities(
    raw: &str,
    base_offset: usize,
    mode: ParseMode,
) -> Result<String, TokenError> {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    let mut copy_start = 0;

    while i < bytes.len() {
        let Some(rel) = memchr(b'&', &bytes[i..]) else {
            break;
        };
        let amp = i + rel;
        match scan_entity(bytes, amp) {
            Scan::Decoded(ch, len) => {
                // '&' and ';' are ASCII, so these cuts stay on char boundaries.
                out.push_str(&raw[copy_start..amp]);
                out.push(ch);
                i = amp + len;
                copy_start = i;
            }
            Scan::Unrecognized(len) => match mode {
                ParseMode::Strict => {
                    return Err(TokenError::new(
                        TokenErrorKind::UnknownEntity,
                        base_offset + amp,
                        &raw[amp..amp + len],
                    ));
                }
                // Verbatim pass-through: leave the run inside the copy span.
                ParseMode::Lenient => i = amp + len,
            },
            Scan::NotAnEntity => i = amp + 1,
        }
    }

    out.push_str(&raw[copy_start..]);
    Ok(out)
}
