//! Escape-parity and word-boundary rules for delimiter matching.
//!
//! A delimiter only opens or closes a span at a plausible word boundary,
//! so `a_b_c` stays literal text. Escape state is decided by the parity of
//! the backslash run immediately before a position.

/// Check whether the code point at `pos` is escaped.
///
/// A position is escaped iff it is preceded by an odd number of consecutive
/// backslashes. Position 0 is never escaped.
///
/// # Example
/// ```
/// use chatmark::boundary::is_escaped;
///
/// let input: Vec<char> = r"a\*b".chars().collect();
/// assert!(is_escaped(&input, 2));
/// let input: Vec<char> = r"a\\*b".chars().collect();
/// assert!(!is_escaped(&input, 3));
/// ```
pub fn is_escaped(input: &[char], pos: usize) -> bool {
    if pos == 0 {
        return false;
    }

    let mut i = pos;
    while i > 0 && input[i - 1] == '\\' {
        i -= 1;
    }

    (pos - i) % 2 == 1
}

/// Check whether `pos` can open a formatting span.
///
/// The last code point never opens, and an opener must not sit directly
/// before whitespace. The very first code point always opens; elsewhere the
/// preceding code point must not be alphanumeric.
pub fn valid_start(pos: usize, input: &[char]) -> bool {
    // Last code point is not a valid start, nor is one followed by whitespace.
    if pos + 1 >= input.len() || input[pos + 1].is_whitespace() {
        return false;
    }

    // First code point is always a valid start.
    if pos == 0 {
        return true;
    }

    !input[pos - 1].is_alphanumeric()
}

/// Check whether `pos` can close a formatting span.
///
/// The first code point never closes (empty spans are rejected), and a
/// closer must not sit directly after whitespace. The very last code point
/// always closes; elsewhere the following code point must not be
/// alphanumeric.
pub fn valid_end(pos: usize, input: &[char]) -> bool {
    // First code point is not a valid end, nor is one preceded by whitespace.
    if pos == 0 || input[pos - 1].is_whitespace() {
        return false;
    }

    // Last code point is always a valid end.
    if pos + 1 >= input.len() {
        return true;
    }

    !input[pos + 1].is_alphanumeric()
}

/// Check whether `pos` sits at the start of a line.
///
/// True when everything between the last newline (or the start of the slice)
/// and `pos` is whitespace. This is the gate for blockquote openers.
pub fn at_line_start(pos: usize, input: &[char]) -> bool {
    input[..pos]
        .iter()
        .rev()
        .take_while(|&&c| c != '\n')
        .all(|c| c.is_whitespace())
}
