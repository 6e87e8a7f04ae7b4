//! URL linkification for free-text comments
//!
//! A regex-based transform, not a full URL parser: every `http(s)`, `ftp`,
//! or `file` URL substring is wrapped in an anchor, and non-URL text passes
//! through byte-identical.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?|ftp|file)://[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|]")
        .expect("URL regex is valid")
});

/// Wrap every URL substring of `text` in an anchor tag.
#[must_use]
pub fn linkify(text: &str) -> String {
    URL_RE
        .replace_all(
            text,
            r#"<a href="$0" target="_blank" rel="noopener noreferrer">$0</a>"#,
        )
        .into_owned()
}
