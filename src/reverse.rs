//! Reverse conversion: converter-produced HTML back to markup text.
//!
//! Walks the HTML left to right. Tags map back to their markup delimiters,
//! nested same-name tags are paired with a depth counter, and literal
//! delimiter characters in plain runs are backslash-escaped so the result
//! survives another forward pass. Buttons are appended as trailing lines.

use smallvec::SmallVec;
use thiserror::Error;

use crate::convert::Button;
use crate::escape::{escape_markup, unescape};
use crate::Converter;

/// Why an HTML string could not be converted back to markup.
///
/// Reverse conversion only ever sees HTML the forward converter produced (or
/// something claiming to be compatible), so these indicate a configuration
/// mismatch or genuinely malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReverseError {
    /// An opening `<` with no `>` after it.
    #[error("no closing '>' for tag opened at {0}")]
    UnclosedTag(usize),
    /// A `<>` tag with no name inside.
    #[error("no tag name for tag opened at {0}")]
    MissingTagName(usize),
    /// No matching closing tag at the same nesting level.
    #[error("no closing tag for <{tag}> opened at {pos}")]
    MissingClosingTag { tag: String, pos: usize },
    /// A tag name outside the converter's vocabulary.
    #[error("unknown tag {0:?}")]
    UnknownTag(String),
    /// An anchor without an extractable `href` attribute.
    #[error("badly formatted anchor tag {0:?}")]
    BadAnchor(String),
    /// A `tg-emoji` without an extractable `emoji-id` attribute.
    #[error("badly formatted emoji tag {0:?}")]
    BadEmoji(String),
    /// A `span` with no attribute field at all.
    #[error("span tag without a class field {0:?}")]
    SpanWithoutClass(String),
    /// A `span` whose class is not the spoiler class.
    #[error("unknown span class {0:?}")]
    UnknownSpanClass(String),
    /// A button whose `kind` has no configured prefix.
    #[error("no button content for button type {0:?}")]
    NoButtonContent(String),
}

/// Convert HTML plus buttons back to markup, trimming surrounding
/// whitespace from the result.
pub(crate) fn reverse(
    cv: &Converter,
    html: &str,
    buttons: &[Button],
) -> Result<String, ReverseError> {
    let chars: Vec<char> = html.chars().collect();
    let mut out = reverse_tags(&chars)?;

    for button in buttons {
        out.push('\n');
        out.push_str(&button_to_markup(cv, button)?);
    }

    Ok(out.trim().to_string())
}

/// Serialize one button as its markup line.
pub(crate) fn button_to_markup(cv: &Converter, button: &Button) -> Result<String, ReverseError> {
    let prefix = cv
        .prefixes
        .get(&button.kind)
        .ok_or_else(|| ReverseError::NoButtonContent(button.kind.clone()))?;
    let suffix = if button.same_line {
        cv.same_line_suffix.as_str()
    } else {
        ""
    };
    Ok(format!(
        "[{}]({}//{}{})",
        escape_markup(&button.name),
        prefix,
        unescape(&button.content),
        suffix
    ))
}

fn reverse_tags(input: &[char]) -> Result<String, ReverseError> {
    let mut out = String::with_capacity(input.len());
    let mut prev = 0;
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            '<' => {
                let gt = find_gt(&input[i + 1..]).ok_or(ReverseError::UnclosedTag(i))?;
                let tag_end = i + 1 + gt;
                let tag_content: String = input[i + 1..tag_end].iter().collect();
                let fields: SmallVec<[&str; 2]> = tag_content.split_whitespace().collect();
                let Some(&tag) = fields.first() else {
                    return Err(ReverseError::MissingTagName(i));
                };

                let (close_start, close_end) = find_closing_tag(&input[tag_end + 1..], tag)
                    .map(|(s, e)| (tag_end + 1 + s, tag_end + 1 + e))
                    .ok_or_else(|| ReverseError::MissingClosingTag {
                        tag: tag.to_string(),
                        pos: i,
                    })?;

                flush_plain(&mut out, &input[prev..i]);
                let interior = &input[tag_end + 1..close_start];
                write_tag(&mut out, tag, &fields, &tag_content, interior)?;

                prev = close_end + 1;
                i = close_end + 1;
            }
            '\\' | '_' | '*' | '~' | '`' | '[' | ']' | '(' | ')' => {
                // Literal delimiters must be re-escaped to retain the same
                // message through another forward pass.
                flush_plain(&mut out, &input[prev..i]);
                out.push('\\');
                out.push(input[i]);
                prev = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    flush_plain(&mut out, &input[prev..]);

    Ok(out)
}

/// Emit a plain (non-tag) run, decoded of entities.
fn flush_plain(out: &mut String, run: &[char]) {
    if !run.is_empty() {
        let raw: String = run.iter().collect();
        out.push_str(&unescape(&raw));
    }
}

/// Map one tag back to its markup delimiter and write it.
fn write_tag(
    out: &mut String,
    tag: &str,
    fields: &[&str],
    tag_content: &str,
    interior: &[char],
) -> Result<(), ReverseError> {
    match tag {
        "b" | "strong" => wrap(out, "*", interior),
        "i" | "em" => wrap(out, "_", interior),
        "u" | "ins" => wrap(out, "__", interior),
        "s" | "strike" | "del" => wrap(out, "~", interior),
        "code" => {
            // Code was never markup-parsed; the interior is verbatim.
            out.push('`');
            out.push_str(&unescape(&collect(interior)));
            out.push('`');
            Ok(())
        }
        "pre" => {
            write_pre(out, interior);
            Ok(())
        }
        "span" => {
            let Some(&class) = fields.get(1) else {
                return Err(ReverseError::SpanWithoutClass(tag_content.to_string()));
            };
            if class != "class=\"tg-spoiler\"" {
                return Err(ReverseError::UnknownSpanClass(class.to_string()));
            }
            wrap(out, "||", interior)
        }
        "a" => {
            let href = attr_value(tag_content, "href")
                .ok_or_else(|| ReverseError::BadAnchor(tag_content.to_string()))?;
            out.push('[');
            out.push_str(&reverse_tags(interior)?);
            out.push_str("](");
            out.push_str(href);
            out.push(')');
            Ok(())
        }
        "tg-emoji" => {
            let id = attr_value(tag_content, "emoji-id")
                .ok_or_else(|| ReverseError::BadEmoji(tag_content.to_string()))?;
            out.push_str("![");
            out.push_str(&reverse_tags(interior)?);
            out.push_str("](tg://emoji?id=");
            out.push_str(id);
            out.push(')');
            Ok(())
        }
        _ => Err(ReverseError::UnknownTag(tag.to_string())),
    }
}

/// Write a symmetric delimiter around a recursively reversed interior.
fn wrap(out: &mut String, delim: &str, interior: &[char]) -> Result<(), ReverseError> {
    out.push_str(delim);
    out.push_str(&reverse_tags(interior)?);
    out.push_str(delim);
    Ok(())
}

/// Write a `pre` block, re-emitting a `language-` class as `` ```LANG ``.
fn write_pre(out: &mut String, interior: &[char]) {
    let raw = collect(interior);
    if let Some(rest) = raw.strip_prefix("<code class=\"language-") {
        if let Some(cut) = rest.find("\">") {
            if let Some(body) = rest[cut + 2..].strip_suffix("</code>") {
                out.push_str("```");
                out.push_str(&rest[..cut]);
                out.push('\n');
                out.push_str(&unescape(body));
                out.push_str("```");
                return;
            }
        }
    }
    out.push_str("```");
    out.push_str(&unescape(&raw));
    out.push_str("```");
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn find_gt(input: &[char]) -> Option<usize> {
    input.iter().position(|&c| c == '>')
}

/// Locate the matching `</tag>`, skipping nested same-name pairs.
///
/// Every opening tag of the same name increments a counter, closing tags
/// decrement it, and only a closing tag at counter zero is the true match —
/// so `<u><u>x</u></u>` pairs correctly. Returns the indices of the closing
/// tag's `<` and `>`.
fn find_closing_tag(input: &[char], tag: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < input.len() {
        if input[i] != '<' {
            i += 1;
            continue;
        }
        let gt = find_gt(&input[i + 1..])?;
        let gt_abs = i + 1 + gt;
        let content: String = input[i + 1..gt_abs].iter().collect();
        if let Some(name) = content.strip_prefix('/') {
            if name == tag {
                if depth == 0 {
                    return Some((i, gt_abs));
                }
                depth -= 1;
            }
        } else if content.split_whitespace().next() == Some(tag) {
            depth += 1;
        }
        i = gt_abs + 1;
    }
    None
}

/// Pull the quoted value of `attr` from a tag's content. The capture runs to
/// the last quote, matching the original's greedy `attr="(.*)"` rule.
fn attr_value<'a>(tag_content: &'a str, attr: &str) -> Option<&'a str> {
    let mut needle = String::with_capacity(attr.len() + 2);
    needle.push_str(attr);
    needle.push_str("=\"");
    let start = tag_content.find(&needle)? + needle.len();
    let end = tag_content.rfind('"')?;
    (end >= start).then(|| &tag_content[start..end])
}
