use chatmark::to_html;

// Dialect basics

#[test]
fn plain_text() {
    assert_eq!(to_html("hello"), "hello");
    assert_eq!(to_html(""), "");
}

#[test]
fn italic() {
    assert_eq!(to_html("_hello_"), "<i>hello</i>");
}

#[test]
fn bold() {
    assert_eq!(to_html("*hello*"), "<b>hello</b>");
}

#[test]
fn strikethrough() {
    assert_eq!(to_html("~hello~"), "<s>hello</s>");
}

#[test]
fn underline() {
    assert_eq!(to_html("__hello__"), "<u>hello</u>");
}

#[test]
fn spoiler() {
    assert_eq!(
        to_html("||hidden||"),
        "<span class=\"tg-spoiler\">hidden</span>"
    );
}

#[test]
fn lone_pipe_is_literal() {
    assert_eq!(to_html("a | b"), "a | b");
    assert_eq!(to_html("|x|"), "|x|");
}

#[test]
fn mixed_styles_in_sequence() {
    assert_eq!(
        to_html("_it_ *bold* ~strike~"),
        "<i>it</i> <b>bold</b> <s>strike</s>"
    );
}

#[test]
fn nested_styles() {
    assert_eq!(to_html("*_hello_*"), "<b><i>hello</i></b>");
    assert_eq!(
        to_html("__*bold underline*__"),
        "<u><b>bold underline</b></u>"
    );
}

#[test]
fn multibyte_text() {
    assert_eq!(to_html("héllo _wörld_ 🙂"), "héllo <i>wörld</i> 🙂");
}

// Boundary rules: delimiters never fire inside words or around bare space

#[test]
fn unclosed_delimiter_is_literal() {
    assert_eq!(to_html("_hello"), "_hello");
    assert_eq!(to_html("hello_"), "hello_");
    assert_eq!(to_html("_no close"), "_no close");
}

#[test]
fn word_internal_delimiters_are_literal() {
    assert_eq!(to_html("a_b_c"), "a_b_c");
    assert_eq!(to_html("_hello_there"), "_hello_there");
    assert_eq!(to_html("__hello__there"), "__hello__there");
    assert_eq!(to_html("snake_case_name"), "snake_case_name");
}

#[test]
fn whitespace_only_span_is_literal() {
    assert_eq!(to_html("_ _"), "_ _");
}

#[test]
fn trailing_run_is_consumed_greedily() {
    assert_eq!(to_html("_hello__"), "<i>hello_</i>");
}

// Escapes

#[test]
fn escaped_delimiters_render_literally() {
    assert_eq!(to_html(r"\_hello\_"), "_hello_");
    assert_eq!(to_html(r"\*bold\*"), "*bold*");
    assert_eq!(to_html(r"\~x\~"), "~x~");
    assert_eq!(to_html(r"\`code\`"), "`code`");
    assert_eq!(to_html(r"\[x\](y\)"), "[x](y)");
    assert_eq!(to_html(r"\|\|x\|\|"), "||x||");
    assert_eq!(to_html(r"\!\["), "![");
}

#[test]
fn escaped_backslash() {
    assert_eq!(to_html(r"\\"), r"\");
    assert_eq!(to_html(r"\\_x_"), r"\<i>x</i>");
}

#[test]
fn escaped_quote_marker() {
    assert_eq!(to_html(r"\> not a quote"), "&gt; not a quote");
}

#[test]
fn backslash_before_plain_text_is_literal() {
    assert_eq!(to_html(r"a\b"), r"a\b");
    assert_eq!(to_html("tail\\"), "tail\\");
}

// HTML entity escaping of the raw input

#[test]
fn input_is_entity_escaped() {
    assert_eq!(to_html("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
    assert_eq!(to_html("say \"hi\""), "say &quot;hi&quot;");
    assert_eq!(to_html("<b>not markup</b>"), "&lt;b&gt;not markup&lt;/b&gt;");
}

// Inline code and code blocks

#[test]
fn inline_code() {
    assert_eq!(to_html("`hello`"), "<code>hello</code>");
}

#[test]
fn code_interior_is_not_parsed() {
    assert_eq!(to_html("`*bold*`"), "<code>*bold*</code>");
    assert_eq!(to_html("`[a](b)`"), "<code>[a](b)</code>");
}

#[test]
fn inline_code_may_abut_words() {
    assert_eq!(to_html("a `code`b"), "a <code>code</code>b");
}

#[test]
fn code_block_bare() {
    assert_eq!(to_html("```code```"), "<pre>code</pre>");
    assert_eq!(to_html("```\ncode\n```"), "<pre>code\n</pre>");
}

#[test]
fn code_block_language() {
    assert_eq!(
        to_html("```python\nprint(1)\n```"),
        "<pre><code class=\"language-python\">print(1)\n</code></pre>"
    );
    assert_eq!(
        to_html("```rust\nfn main() {}```"),
        "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
    );
}

#[test]
fn code_block_interior_is_not_parsed() {
    assert_eq!(
        to_html("```\n_not italic_\n```"),
        "<pre>_not italic_\n</pre>"
    );
}

// Links

#[test]
fn link() {
    assert_eq!(
        to_html("[hello](test.com)"),
        "<a href=\"test.com\">hello</a>"
    );
}

#[test]
fn link_label_allows_nested_formatting() {
    assert_eq!(
        to_html("[*bold* link](x.com)"),
        "<a href=\"x.com\"><b>bold</b> link</a>"
    );
}

#[test]
fn link_greedy_disambiguation() {
    // The label swallows `a](b`; the last plausible link wins.
    assert_eq!(to_html("[a](b](c)"), "<a href=\"c\">a](b</a>");
}

#[test]
fn unmatched_brackets_are_literal() {
    assert_eq!(to_html("[hello"), "[hello");
    assert_eq!(to_html("[hello]"), "[hello]");
    assert_eq!(to_html("[hello]("), "[hello](");
    assert_eq!(to_html("]()"), "]()");
}

#[test]
fn link_closer_must_be_boundary_valid() {
    // `)` directly glued to a word character does not close a plain link.
    assert_eq!(to_html("[a](b)c"), "[a](b)c");
    assert_eq!(to_html("[a](b) c"), "<a href=\"b\">a</a> c");
}

#[test]
fn link_may_follow_word_characters() {
    assert_eq!(to_html("see[here](x.com)"), "see<a href=\"x.com\">here</a>");
}

// Custom emoji

#[test]
fn custom_emoji() {
    assert_eq!(
        to_html("![👍](tg://emoji?id=5368324170671202286)"),
        "<tg-emoji emoji-id=\"5368324170671202286\">👍</tg-emoji>"
    );
}

#[test]
fn emoji_label_allows_formatting() {
    assert_eq!(
        to_html("![_x_](tg://emoji?id=1)"),
        "<tg-emoji emoji-id=\"1\"><i>x</i></tg-emoji>"
    );
}

#[test]
fn emoji_without_payload_degrades_to_link() {
    assert_eq!(
        to_html("![text](notemoji)"),
        "!<a href=\"notemoji\">text</a>"
    );
}

#[test]
fn bang_without_bracket_is_literal() {
    assert_eq!(to_html("hey!"), "hey!");
    assert_eq!(to_html("! listen"), "! listen");
}
