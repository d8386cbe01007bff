//! chatmark: bidirectional chat markdown to HTML converter.
//!
//! Converts a constrained chat-markdown dialect (italic, bold, underline,
//! strikethrough, spoilers, inline code, code blocks, blockquotes, links,
//! custom emoji) into an HTML subset, and converts that HTML back into
//! markdown. Inline keyboard buttons written as `[label](buttonurl://...)`
//! are extracted into structured records instead of being rendered.
//!
//! # Design Principles
//! - Code-point scanning: every position is an index into a `&[char]` slice,
//!   so multi-byte characters never split a delimiter match
//! - Forward conversion is total: malformed markup degrades to literal text
//! - Reverse conversion reports malformed HTML instead of guessing
//! - One immutable [`Converter`] value; no global state, safe to share
//!
//! # Example
//! ```
//! let html = chatmark::to_html("*hello* _world_");
//! assert_eq!(html, "<b>hello</b> <i>world</i>");
//!
//! let (html, buttons) = chatmark::to_html_with_buttons("hi [go](buttonurl://example.com)");
//! assert_eq!(html, "hi ");
//! assert_eq!(buttons[0].content, "example.com");
//! ```

pub mod boundary;
pub mod convert;
pub mod cursor;
pub mod delim;
pub mod escape;
pub mod limits;
pub mod reverse;
pub mod strip;

// Re-export primary types
pub use convert::Button;
pub use escape::escape_markup;
pub use reverse::ReverseError;
pub use strip::strip_html;

use rustc_hash::FxHashMap;

/// Conversion configuration: which URL prefixes turn links into buttons.
///
/// Immutable after construction. One `Converter` serves any number of
/// concurrent conversions; nothing is mutated per call, so sharing it across
/// threads is safe. Independent converters with different prefix sets can
/// coexist.
#[derive(Debug, Clone)]
pub struct Converter {
    /// Button type key → URL prefix, stored without a trailing colon
    /// (`"url"` → `"buttonurl"` by default).
    pub prefixes: FxHashMap<String, String>,
    /// Literal payload suffix marking a button as same-line.
    pub same_line_suffix: String,
}

impl Default for Converter {
    fn default() -> Self {
        let mut prefixes = FxHashMap::default();
        prefixes.insert("url".to_owned(), "buttonurl".to_owned());
        Self {
            prefixes,
            same_line_suffix: ":same".to_owned(),
        }
    }
}

impl Converter {
    /// A converter with the default button prefix set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A converter with custom button prefixes. Trailing colons on the
    /// prefixes are stripped.
    pub fn with_prefixes(
        prefixes: FxHashMap<String, String>,
        same_line_suffix: impl Into<String>,
    ) -> Self {
        let prefixes = prefixes
            .into_iter()
            .map(|(kind, prefix)| (kind, prefix.trim_end_matches(':').to_owned()))
            .collect();
        Self {
            prefixes,
            same_line_suffix: same_line_suffix.into(),
        }
    }

    /// Convert markup to HTML. Button syntax is not treated specially.
    pub fn to_html(&self, input: &str) -> String {
        let chars: Vec<char> = escape::escape_text(input).chars().collect();
        convert::convert(self, &chars, false, 0).0
    }

    /// Convert markup to HTML, extracting button records.
    pub fn to_html_with_buttons(&self, input: &str) -> (String, Vec<Button>) {
        let chars: Vec<char> = escape::escape_text(input).chars().collect();
        convert::convert(self, &chars, true, 0)
    }

    /// Convert converter-produced HTML (plus buttons) back to markup.
    pub fn reverse(&self, html: &str, buttons: &[Button]) -> Result<String, ReverseError> {
        reverse::reverse(self, html, buttons)
    }

    /// Serialize one button as its markup line.
    pub fn button_to_markup(&self, button: &Button) -> Result<String, ReverseError> {
        reverse::button_to_markup(self, button)
    }

    /// Strip all markup and buttons, returning plain text.
    pub fn strip(&self, input: &str) -> String {
        let (html, _) = self.to_html_with_buttons(input);
        strip::strip_html(&html)
    }
}

/// Convert markup to HTML with the default configuration.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = chatmark::to_html("__underlined__ and `code`");
/// assert_eq!(html, "<u>underlined</u> and <code>code</code>");
/// ```
pub fn to_html(input: &str) -> String {
    Converter::new().to_html(input)
}

/// Convert markup to HTML with the default configuration, extracting
/// buttons.
pub fn to_html_with_buttons(input: &str) -> (String, Vec<Button>) {
    Converter::new().to_html_with_buttons(input)
}

/// Convert HTML back to markup with the default configuration.
pub fn reverse(html: &str, buttons: &[Button]) -> Result<String, ReverseError> {
    Converter::new().reverse(html, buttons)
}

/// Strip all markup from text, returning plain text.
pub fn strip_to_plain_text(input: &str) -> String {
    Converter::new().strip(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(to_html("hello"), "hello");
    }

    #[test]
    fn test_input_is_entity_escaped() {
        assert_eq!(to_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(to_html("<b>raw</b>"), "&lt;b&gt;raw&lt;/b&gt;");
    }

    #[test]
    fn test_basic_delimiters() {
        assert_eq!(to_html("_hello_"), "<i>hello</i>");
        assert_eq!(to_html("*hello*"), "<b>hello</b>");
        assert_eq!(to_html("~hello~"), "<s>hello</s>");
        assert_eq!(to_html("__hello__"), "<u>hello</u>");
        assert_eq!(to_html("`hello`"), "<code>hello</code>");
        assert_eq!(to_html("||hello||"), "<span class=\"tg-spoiler\">hello</span>");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            to_html("[hello](test.com)"),
            "<a href=\"test.com\">hello</a>"
        );
    }

    #[test]
    fn test_buttons_disabled_by_default() {
        assert_eq!(
            to_html("[hi](buttonurl://example.com)"),
            "<a href=\"buttonurl://example.com\">hi</a>"
        );
    }

    #[test]
    fn test_buttons_extracted() {
        let (html, buttons) = to_html_with_buttons("[hi](buttonurl://example.com)");
        assert_eq!(html, "");
        assert_eq!(
            buttons,
            vec![Button {
                name: "hi".to_owned(),
                kind: "url".to_owned(),
                content: "example.com".to_owned(),
                same_line: false,
                style: None,
            }]
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let mut prefixes = FxHashMap::default();
        prefixes.insert("note".to_owned(), "notify:".to_owned());
        let cv = Converter::with_prefixes(prefixes, ":same");
        let (html, buttons) = cv.to_html_with_buttons("[ping](notify://here)");
        assert_eq!(html, "");
        assert_eq!(buttons[0].kind, "note");
        assert_eq!(buttons[0].content, "here");
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip_to_plain_text("*bold* and _italic_"), "bold and italic");
        assert_eq!(strip_to_plain_text("[go](buttonurl://x)"), "");
    }

    #[test]
    fn test_strip_html_direct() {
        assert_eq!(strip_html("<b>bold</b>"), "bold");
    }

    #[test]
    fn test_reverse_simple() {
        assert_eq!(reverse("<b>bold</b>", &[]).unwrap(), "*bold*");
    }

    #[test]
    fn test_escape_markup_roundtrip() {
        for input in ["*bold*", "_it_", "~s~", "`c`", "[a](b)", "> q"] {
            let escaped = escape_markup(input);
            assert_eq!(to_html(&escaped), escape::escape_text(input), "for {input:?}");
        }
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
