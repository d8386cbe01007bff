//! Blockquote resolution.
//!
//! A `&gt;` (or `**&gt;`) opener is only honored at a line start. The quote
//! consumes its line and every following line reintroduced by a `&gt;`
//! marker; a trailing `||` on the consumed content marks the quote
//! expandable.

use crate::cursor::starts_with;
use crate::delim::Token;
use crate::Converter;

use super::{convert, Step};

/// Length of the `&gt;` continuation marker in code points.
const MARKER_LEN: usize = 4;

/// Resolve a blockquote opener at `i`. The caller has already verified the
/// line-start gate.
pub(crate) fn resolve(
    cv: &Converter,
    input: &[char],
    i: usize,
    tok: Token,
    buttons_enabled: bool,
    depth: usize,
) -> Step {
    let mut content: Vec<char> = Vec::new();
    let mut j = i + tok.len();

    loop {
        // One leading space per quoted line is presentation, not content.
        if input.get(j) == Some(&' ') {
            j += 1;
        }
        let line_end = input[j..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(input.len(), |p| j + p);
        content.extend_from_slice(&input[j..line_end]);

        if line_end >= input.len() {
            j = line_end;
            break;
        }
        if starts_with(input, line_end + 1, Token::Quote.text()) {
            content.push('\n');
            j = line_end + 1 + MARKER_LEN;
        } else {
            // The terminating newline stays with the remainder.
            j = line_end;
            break;
        }
    }

    // A trailing `||` right before the terminator collapses the quote.
    let expandable = content.ends_with(&['|', '|']);
    if expandable {
        content.truncate(content.len() - 2);
    }

    let (nested, buttons) = convert(cv, &content, buttons_enabled, depth + 1);
    let mut html = String::with_capacity(nested.len() + 38);
    html.push_str(if expandable {
        "<blockquote expandable>"
    } else {
        Token::Quote.open_tag()
    });
    html.push_str(&nested);
    html.push_str(tok.close_tag());
    Step::Emit {
        html,
        buttons,
        next: j,
    }
}
