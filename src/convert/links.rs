//! Link, button and custom-emoji span resolution.
//!
//! Spans look like `[label](payload)`. The payload decides what the span
//! becomes: a configured button prefix produces a [`Button`] record and no
//! output, a `tg://emoji?id=` payload (behind a `!`) produces a `tg-emoji`
//! element, anything else is a plain anchor.

use crate::boundary::{is_escaped, valid_end};
use crate::cursor::index_of;
use crate::delim::Token;
use crate::strip::strip_tags;
use crate::Converter;

use super::{convert, Button, Step};

/// Locate the label/URL split of a link-like span.
///
/// `input` starts at the opening `[`. Returns the positions of the first
/// unescaped `](` (mid-section) and of the first unescaped `)` after it
/// (end-section). If the label between them swallowed another unterminated
/// `](`, the mid-section re-anchors there and the end is searched again —
/// the leftmost plausible split of the last plausible link wins, so
/// `[a](b](c)` reads `a](b` as the label and `c` as the URL.
///
/// Plain links require the end-section to be a boundary-valid closer;
/// button and emoji URLs may abut word characters (`boundary_end = false`).
pub(crate) fn find_link_sections(input: &[char], boundary_end: bool) -> Option<(usize, usize)> {
    let mut mid = find_unescaped_from(input, 0, "](")?;

    loop {
        let mut offset = mid;
        let end = loop {
            let idx = index_of(&input[offset..], ")")?;
            let at = offset + idx;
            if !is_escaped(input, at) && (!boundary_end || valid_end(at, input)) {
                break at;
            }
            offset = at + 1;
        };

        // Re-anchor to a later `](` hiding inside the candidate label/URL.
        match find_unescaped_between(input, mid + 1, end) {
            Some(m) => mid = m,
            None => return Some((mid, end)),
        }
    }
}

fn find_unescaped_from(input: &[char], from: usize, pat: &str) -> Option<usize> {
    let mut offset = from;
    while offset < input.len() {
        let idx = index_of(&input[offset..], pat)?;
        let at = offset + idx;
        if !is_escaped(input, at) {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

fn find_unescaped_between(input: &[char], from: usize, to: usize) -> Option<usize> {
    let mut offset = from;
    while offset < to {
        let idx = index_of(&input[offset..to], "](")?;
        let at = offset + idx;
        if !is_escaped(input, at) {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

/// Resolve a `[`-anchored span into a button, an anchor, or literal text.
pub(crate) fn resolve_link(
    cv: &Converter,
    input: &[char],
    i: usize,
    buttons_enabled: bool,
    depth: usize,
) -> Step {
    let span = &input[i..];

    if buttons_enabled {
        // Button URLs are not boundary-checked; resolve greedily first.
        if let Some((mid, end)) = find_link_sections(span, false) {
            let url: String = span[mid + 2..end].iter().collect();
            if let Some(button) = match_button(cv, &span[1..mid], &url, depth) {
                return Step::Emit {
                    html: String::new(),
                    buttons: vec![button],
                    next: i + end + 1,
                };
            }
        }
    }

    let Some((mid, end)) = find_link_sections(span, true) else {
        return Step::literal(i, i + 1);
    };
    let url: String = span[mid + 2..end].iter().collect();

    // The label always allows nested formatting, but buttons are never
    // extracted from inside it.
    let (label, _) = convert(cv, &span[1..mid], true, depth + 1);

    let mut html = String::with_capacity(label.len() + url.len() + 15);
    html.push_str("<a href=\"");
    html.push_str(&url);
    html.push_str("\">");
    html.push_str(&label);
    html.push_str("</a>");
    Step::Emit {
        html,
        buttons: Vec::new(),
        next: i + end + 1,
    }
}

/// Resolve a `![`-anchored custom-emoji span.
///
/// The payload must be `tg://emoji?id=<id>`; anything else degrades to a
/// literal `!` so the `[` can still resolve as a link.
pub(crate) fn resolve_emoji(cv: &Converter, input: &[char], i: usize, depth: usize) -> Step {
    let span = &input[i + 1..];
    let Some((mid, end)) = find_link_sections(span, false) else {
        return Step::literal(i, i + 1);
    };
    let url: String = span[mid + 2..end].iter().collect();
    let Some(id) = url.strip_prefix("tg://emoji?id=") else {
        return Step::literal(i, i + 1);
    };

    let (label, _) = convert(cv, &span[1..mid], true, depth + 1);

    let mut html = String::with_capacity(label.len() + id.len() + 34);
    html.push_str("<tg-emoji emoji-id=\"");
    html.push_str(id);
    html.push_str("\">");
    html.push_str(&label);
    html.push_str(Token::EmojiOpen.close_tag());
    Step::Emit {
        html,
        buttons: Vec::new(),
        next: i + 1 + end + 1,
    }
}

/// Classify a URL payload against the configured button prefixes.
///
/// The payload shape is `PREFIX[#STYLE][:]//CONTENT[SUFFIX]`; leading colon
/// and slash runs after the prefix/style are presentation. The longest
/// configured prefix wins, so overlapping prefixes resolve deterministically.
fn match_button(cv: &Converter, label: &[char], url: &str, depth: usize) -> Option<Button> {
    let (kind, prefix) = cv
        .prefixes
        .iter()
        .filter(|(_, p)| url.starts_with(p.as_str()))
        .max_by_key(|(_, p)| p.len())?;

    let mut rest = &url[prefix.len()..];
    let mut style = None;
    if let Some(tagged) = rest.strip_prefix('#') {
        let cut = tagged.find([':', '/']).unwrap_or(tagged.len());
        style = Some(tagged[..cut].to_string());
        rest = &tagged[cut..];
    }

    let mut content = rest.trim_start_matches(':').trim_start_matches('/');
    let mut same_line = false;
    if !cv.same_line_suffix.is_empty() {
        if let Some(stripped) = content.strip_suffix(cv.same_line_suffix.as_str()) {
            same_line = true;
            content = stripped;
        }
    }

    // The label is sanitized down to plain text.
    let (label_html, _) = convert(cv, label, true, depth + 1);
    Some(Button {
        name: strip_tags(&label_html),
        kind: kind.clone(),
        content: content.to_string(),
        same_line,
        style,
    })
}
