//! HTML entity escaping and markup escaping.
//!
//! Entity escaping is fast-path optimized: a `memchr` probe finds the first
//! escapable byte, then segments between escapes are bulk-copied. Markup
//! escaping inserts backslashes so user-supplied text survives a forward
//! conversion as literal characters.

use memchr::{memchr, memchr3};

use crate::boundary::{at_line_start, valid_end, valid_start};
use crate::delim::is_escapable;

/// Lookup table for escapable characters in HTML text content.
/// Index by byte value, true if the byte needs an entity.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape HTML text content into an output buffer.
///
/// Escapes `<`, `>`, `&` and `"` to their entity equivalents.
///
/// # Example
/// ```
/// use chatmark::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<b>");
/// assert_eq!(out, b"&lt;b&gt;");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    if input.is_empty() {
        return;
    }

    let mut pos = match first_escape(input) {
        Some(p) => p,
        None => {
            out.extend_from_slice(input);
            return;
        }
    };

    if pos > 0 {
        out.extend_from_slice(&input[..pos]);
    }

    while pos < input.len() {
        // Scan to the next escapable byte, bulk-copying the clean segment.
        let scan_start = pos;
        while pos < input.len() && !TEXT_ESCAPE_TABLE[input[pos] as usize] {
            pos += 1;
        }
        if pos > scan_start {
            out.extend_from_slice(&input[scan_start..pos]);
        }

        if pos < input.len() {
            let escape_seq = match input[pos] {
                b'<' => b"&lt;" as &[u8],
                b'>' => b"&gt;",
                b'&' => b"&amp;",
                b'"' => b"&quot;",
                _ => {
                    out.push(input[pos]);
                    pos += 1;
                    continue;
                }
            };
            out.extend_from_slice(escape_seq);
            pos += 1;
        }
    }
}

#[inline]
fn first_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr(b'"', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Escape HTML text content, returning a new `String`.
pub fn escape_text(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input.as_bytes());
    // SAFETY: only ASCII entity sequences are inserted, so valid UTF-8 input
    // yields valid UTF-8 output.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Decode HTML entities back to literal characters.
pub fn unescape(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Backslash-escape markup delimiters so the text converts as literal.
///
/// A delimiter character is escaped when it sits at a position where the
/// converter could treat it as a span boundary; `>` is escaped where a
/// blockquote could open. Characters that can never fire (mid-word
/// underscores, for instance) are left alone.
///
/// # Example
/// ```
/// assert_eq!(chatmark::escape_markup("_hello_"), r"\_hello\_");
/// assert_eq!(chatmark::escape_markup("snake_case"), "snake_case");
/// ```
pub fn escape_markup(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        let escape = if is_escapable(c) {
            valid_start(i, &chars) || valid_end(i, &chars)
        } else if c == '>' {
            at_line_start(i, &chars)
        } else {
            false
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
