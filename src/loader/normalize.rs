//! Output text normalization shared by every loader

use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    // CRLF, lone CR, and the Unicode line and paragraph separators
    Regex::new(r"\r\n|[\r\x{2028}\x{2029}]").expect("line-break pattern is valid")
});

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    // Two line breaks with only whitespace between them
    Regex::new(r"\n\s*\n").expect("blank-line pattern is valid")
});

/// Collapse every run of blank lines into a single line break and trim the ends.
///
/// `\r\n`, a lone `\r`, U+2028 and U+2029 all count as line breaks and come out as `\n`.
///
/// `normalize_text(normalize_text(s)) == normalize_text(s)` for every input.
pub fn normalize_text(text: &str) -> String {
    let unix = LINE_BREAK.replace_all(text, "\n");
    BLANK_RUN.replace_all(&unix, "\n").trim().to_string()
}
