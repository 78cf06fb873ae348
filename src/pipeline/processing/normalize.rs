//! Text normalization for post content.
//!
//! Strips links and collapses whitespace. Accepts anything that can be
//! coerced to text, so numeric or missing cells never raise.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::CellValue;

// `\S` with the ASCII information separators counted as whitespace
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s\x1c-\x1f]+").expect("valid URL pattern"));
static WWW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"www\.[^\s\x1c-\x1f]+").expect("valid www pattern"));

/// Unicode whitespace plus the ASCII file, group, record and unit separators
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Anything that may carry post text.
///
/// `None` means "no text". Falsy values (empty strings, zero, `false`) carry no
/// text either.
pub trait RawText {
    fn raw_text(&self) -> Option<Cow<'_, str>>;
}

impl RawText for str {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        if self.is_empty() {
            None
        } else {
            Some(Cow::Borrowed(self))
        }
    }
}

impl RawText for String {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        self.as_str().raw_text()
    }
}

impl RawText for CellValue {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => s.raw_text(),
            CellValue::Integer(0) | CellValue::Boolean(false) => None,
            CellValue::Double(v) if *v == 0.0 => None,
            other => other.as_text().map(Cow::Owned),
        }
    }
}

impl<T: RawText + ?Sized> RawText for &T {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        (**self).raw_text()
    }
}

impl<T: RawText> RawText for Option<T> {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|inner| inner.raw_text())
    }
}

/// Normalize raw post content.
///
/// Removes `http(s)://...` and `www....` tokens, collapses every whitespace run
/// to a single space and trims the ends. Absent or empty input yields `""`.
pub fn normalize<T: RawText + ?Sized>(raw: &T) -> String {
    match raw.raw_text() {
        Some(text) => normalize_text(&text),
        None => String::new(),
    }
}

/// Normalize a string that is already known to be present
pub fn normalize_text(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    let without_links = WWW_PATTERN.replace_all(&without_urls, "");
    without_links
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character length of normalized text
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}
