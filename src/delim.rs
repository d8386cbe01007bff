//! Static delimiter table mapping markup tokens to HTML tags.
//!
//! Tokens are matched over code points. Multi-code-point tokens are only
//! recognized when their full spelling is present at the current position,
//! longest spelling first.

use crate::cursor::starts_with;

/// A markup token that opens a formatting construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `` ` `` — inline code.
    Code,
    /// `` ``` `` — preformatted block, optional language tag on the first line.
    Pre,
    /// `_` — italic.
    Italic,
    /// `*` — bold.
    Bold,
    /// `__` — underline.
    Underline,
    /// `~` — strikethrough.
    Strike,
    /// `||` — spoiler.
    Spoiler,
    /// `&gt;` — blockquote (input text is entity-escaped before scanning).
    Quote,
    /// `**&gt;` — blockquote alternate spelling, so a quote block can follow
    /// a bold marker.
    QuoteAlt,
    /// `![` — custom emoji opener.
    EmojiOpen,
}

impl Token {
    /// The literal markup spelling of this token.
    pub const fn text(self) -> &'static str {
        match self {
            Token::Code => "`",
            Token::Pre => "```",
            Token::Italic => "_",
            Token::Bold => "*",
            Token::Underline => "__",
            Token::Strike => "~",
            Token::Spoiler => "||",
            Token::Quote => "&gt;",
            Token::QuoteAlt => "**&gt;",
            Token::EmojiOpen => "![",
        }
    }

    /// Number of code points in the markup spelling.
    pub const fn len(self) -> usize {
        match self {
            Token::Code | Token::Italic | Token::Bold | Token::Strike => 1,
            Token::Underline | Token::Spoiler | Token::EmojiOpen => 2,
            Token::Pre => 3,
            Token::Quote => 4,
            Token::QuoteAlt => 6,
        }
    }

    /// The HTML opening tag emitted for a symmetric delimiter.
    pub const fn open_tag(self) -> &'static str {
        match self {
            Token::Code => "<code>",
            Token::Pre => "<pre>",
            Token::Italic => "<i>",
            Token::Bold => "<b>",
            Token::Underline => "<u>",
            Token::Strike => "<s>",
            Token::Spoiler => "<span class=\"tg-spoiler\">",
            Token::Quote | Token::QuoteAlt => "<blockquote>",
            Token::EmojiOpen => "<tg-emoji>",
        }
    }

    /// The HTML closing tag paired with [`Token::open_tag`].
    pub const fn close_tag(self) -> &'static str {
        match self {
            Token::Code => "</code>",
            Token::Pre => "</pre>",
            Token::Italic => "</i>",
            Token::Bold => "</b>",
            Token::Underline => "</u>",
            Token::Strike => "</s>",
            Token::Spoiler => "</span>",
            Token::Quote | Token::QuoteAlt => "</blockquote>",
            Token::EmojiOpen => "</tg-emoji>",
        }
    }

    /// Whether the token's interior is scanned for nested markup.
    ///
    /// Code and pre interiors are taken verbatim.
    pub const fn nests(self) -> bool {
        !matches!(self, Token::Code | Token::Pre)
    }
}

/// Code points that can begin a delimiter or structural token.
///
/// `&` only matters as the start of `&gt;`, and `|` as the start of `||`;
/// both fall through to literal text when the full spelling is absent.
pub fn is_delim_char(c: char) -> bool {
    matches!(
        c,
        '`' | '_' | '*' | '~' | '[' | ']' | '(' | ')' | '!' | '|' | '&' | '\\'
    )
}

/// Single-code-point table keys that a backslash escapes.
pub fn is_escapable(c: char) -> bool {
    matches!(
        c,
        '`' | '_' | '*' | '~' | '[' | ']' | '(' | ')' | '!' | '|' | '\\'
    )
}

/// Classify the longest token starting at `pos`.
///
/// Multi-code-point spellings win over their single-code-point prefixes
/// (`||` over `|`, `__` over `_`, `` ``` `` over `` ` ``, `**&gt;` over `*`).
/// Returns `None` for code points that only exist as structural syntax
/// (brackets, parens, lone `|`, lone `&`).
pub fn classify(input: &[char], pos: usize) -> Option<Token> {
    match input[pos] {
        '|' if starts_with(input, pos, "||") => Some(Token::Spoiler),
        '_' if starts_with(input, pos, "__") => Some(Token::Underline),
        '_' => Some(Token::Italic),
        '`' if starts_with(input, pos, "```") => Some(Token::Pre),
        '`' => Some(Token::Code),
        '&' if starts_with(input, pos, "&gt;") => Some(Token::Quote),
        '*' if starts_with(input, pos, "**&gt;") => Some(Token::QuoteAlt),
        '*' => Some(Token::Bold),
        '~' => Some(Token::Strike),
        '!' if starts_with(input, pos, "![") => Some(Token::EmojiOpen),
        _ => None,
    }
}
