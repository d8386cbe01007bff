//! Forward conversion: markup text to HTML plus extracted buttons.
//!
//! A single left-to-right scan with unbounded lookahead. Each position
//! yields a tagged [`Step`]: either a literal flush or a resolved span whose
//! interior was converted recursively. The driver loop accumulates steps
//! into the output, so sibling spans iterate and stack depth is bounded by
//! nesting alone.

pub(crate) mod links;
pub(crate) mod quote;

use crate::boundary::{at_line_start, is_escaped, valid_end, valid_start};
use crate::cursor::{index_of, starts_with, Cursor};
use crate::delim::{classify, is_delim_char, is_escapable, Token};
use crate::limits::MAX_NESTING_DEPTH;
use crate::Converter;

/// A structured action extracted from `[label](prefix...)` syntax.
///
/// Buttons never appear in the HTML output; their whole markup span is
/// consumed during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Markup-stripped label text.
    pub name: String,
    /// Which configured prefix matched (a key of `Converter::prefixes`).
    pub kind: String,
    /// Payload after prefix, style and same-line suffix removal.
    pub content: String,
    /// Whether the button shares a row with the previous one.
    pub same_line: bool,
    /// Optional `#style` tag between prefix and payload.
    pub style: Option<String>,
}

/// One scanner decision at the current position.
enum Step {
    /// Emit `input[emit.0..emit.1]` as-is and resume scanning at `next`.
    Literal { emit: (usize, usize), next: usize },
    /// A resolved span: emit `html`, record `buttons`, resume at `next`.
    Emit {
        html: String,
        buttons: Vec<Button>,
        next: usize,
    },
}

impl Step {
    /// A literal flush of `input[start..end]`.
    fn literal(start: usize, end: usize) -> Self {
        Step::Literal {
            emit: (start, end),
            next: end,
        }
    }
}

/// Convert entity-escaped markup to HTML, collecting buttons.
pub(crate) fn convert(
    cv: &Converter,
    input: &[char],
    buttons_enabled: bool,
    depth: usize,
) -> (String, Vec<Button>) {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut buttons = Vec::new();

    if depth >= MAX_NESTING_DEPTH {
        // Nested beyond reason; the rest is literal text.
        out.extend(input.iter());
        return (out, buttons);
    }

    let mut cursor = Cursor::new(input);
    while !cursor.is_eof() {
        match step(cv, input, cursor.offset(), buttons_enabled, depth) {
            Step::Literal { emit, next } => {
                out.extend(input[emit.0..emit.1].iter());
                cursor.seek(next);
            }
            Step::Emit {
                html,
                buttons: found,
                next,
            } => {
                out.push_str(&html);
                buttons.extend(found);
                cursor.seek(next);
            }
        }
    }

    (out, buttons)
}

/// Decide what the scanner does at position `i`.
fn step(cv: &Converter, input: &[char], i: usize, buttons_enabled: bool, depth: usize) -> Step {
    let c = input[i];
    if !is_delim_char(c) {
        return Step::literal(i, i + 1);
    }

    if c == '\\' {
        return escape_step(input, i);
    }

    // Bracket-delimited constructs may legally follow word characters.
    if !valid_start(i, input) && c != '!' && c != '[' {
        return Step::literal(i, i + 1);
    }

    match c {
        '`' | '*' | '~' | '_' | '|' | '&' => match classify(input, i) {
            Some(Token::Quote) => {
                if at_line_start(i, input) {
                    quote::resolve(cv, input, i, Token::Quote, buttons_enabled, depth)
                } else {
                    Step::literal(i, i + 1)
                }
            }
            Some(Token::QuoteAlt) => {
                if at_line_start(i, input) {
                    quote::resolve(cv, input, i, Token::QuoteAlt, buttons_enabled, depth)
                } else {
                    // Mid-line `**` is just a bold attempt.
                    symmetric(cv, input, i, Token::Bold, buttons_enabled, depth)
                }
            }
            Some(tok) => symmetric(cv, input, i, tok, buttons_enabled, depth),
            // Lone `|` or `&` without its full spelling.
            None => Step::literal(i, i + 1),
        },
        '!' => {
            if starts_with(input, i, "![") {
                links::resolve_emoji(cv, input, i, depth)
            } else {
                Step::literal(i, i + 1)
            }
        }
        '[' => links::resolve_link(cv, input, i, buttons_enabled, depth),
        // Bare `]`, `(`, `)` with no preceding match stay literal.
        _ => Step::literal(i, i + 1),
    }
}

/// Handle a backslash: an escaped table key is emitted without the
/// backslash, anything else keeps the backslash literal.
fn escape_step(input: &[char], i: usize) -> Step {
    let Some(&next) = input.get(i + 1) else {
        return Step::literal(i, i + 1);
    };
    if is_escapable(next) {
        return Step::Literal {
            emit: (i + 1, i + 2),
            next: i + 2,
        };
    }
    // `&gt;` is the one table key whose first code point is not itself a key.
    if next == '&' && starts_with(input, i + 1, "&gt;") {
        return Step::Literal {
            emit: (i + 1, i + 5),
            next: i + 5,
        };
    }
    Step::literal(i, i + 1)
}

/// Resolve a symmetric delimiter (`` ` ``, `*`, `~`, `_`, `__`, `` ``` ``,
/// `||`) by searching for its closing occurrence.
fn symmetric(
    cv: &Converter,
    input: &[char],
    i: usize,
    tok: Token,
    buttons_enabled: bool,
    depth: usize,
) -> Step {
    let tok_len = tok.len();
    let rest = &input[i + tok_len..];
    if rest.is_empty() {
        return Step::literal(i, i + tok_len);
    }

    // Code delimiters only need an unescaped closer; inline code may abut
    // word characters.
    let close = if tok.nests() {
        find_valid_end(rest, tok.text())
    } else {
        find_unescaped(rest, tok.text())
    };
    let Some(close) = close else {
        // No closing match: the token is literal, nothing is consumed.
        return Step::literal(i, i + tok_len);
    };

    let interior = &rest[..close];
    let next = i + tok_len + close + tok_len;

    match tok {
        Token::Pre => Step::Emit {
            html: render_pre(interior),
            buttons: Vec::new(),
            next,
        },
        Token::Code => {
            let mut html = String::with_capacity(interior.len() + 13);
            html.push_str("<code>");
            html.extend(interior.iter());
            html.push_str("</code>");
            Step::Emit {
                html,
                buttons: Vec::new(),
                next,
            }
        }
        _ => {
            let (nested, buttons) = convert(cv, interior, buttons_enabled, depth + 1);
            let mut html = String::with_capacity(nested.len() + 16);
            html.push_str(tok.open_tag());
            html.push_str(&nested);
            html.push_str(tok.close_tag());
            Step::Emit {
                html,
                buttons,
                next,
            }
        }
    }
}

/// Render a `` ``` `` body. A non-empty first line is a language tag; a bare
/// block has a single leading newline stripped.
fn render_pre(body: &[char]) -> String {
    let mut html = String::with_capacity(body.len() + 48);
    match body.iter().position(|&c| c == '\n') {
        Some(0) => {
            html.push_str("<pre>");
            html.extend(body[1..].iter());
            html.push_str("</pre>");
        }
        Some(nl) => {
            html.push_str("<pre><code class=\"language-");
            html.extend(body[..nl].iter());
            html.push_str("\">");
            html.extend(body[nl + 1..].iter());
            html.push_str("</code></pre>");
        }
        None => {
            html.push_str("<pre>");
            html.extend(body.iter());
            html.push_str("</pre>");
        }
    }
    html
}

/// Find the closing occurrence of `token`: unescaped, boundary-valid at both
/// its first and last code point, then slid right through any immediately
/// following run of the same token so runs like `___x___` close as late as
/// possible.
fn find_valid_end(input: &[char], token: &str) -> Option<usize> {
    let tok_len = token.chars().count();
    let mut offset = 0;
    while offset < input.len() {
        let idx = index_of(&input[offset..], token)?;
        let mut end = offset + idx;
        if valid_end(end, input) && valid_end(end + tok_len - 1, input) && !is_escaped(input, end) {
            while starts_with(input, end + 1, token) {
                end += 1;
            }
            return Some(end);
        }
        offset = end + 1;
    }
    None
}

/// Find the first unescaped occurrence of `token`.
fn find_unescaped(input: &[char], token: &str) -> Option<usize> {
    let mut offset = 0;
    while offset < input.len() {
        let idx = index_of(&input[offset..], token)?;
        let at = offset + idx;
        if !is_escaped(input, at) {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}
