//! Plain text to XHTML fragments

use crate::types::Language;
use std::borrow::Cow;

/// Render one chapter as a standalone XHTML document.
///
/// The body is plain text: it is escaped, and every line break becomes a
/// `<br/>`. No other markup is produced.
pub fn chapter_document(heading: &str, body: &str, language: Language) -> String {
    let heading = escape_text(heading);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
<head>
  <title>{heading}</title>
  <meta charset="UTF-8"/>
</head>
<body>
  <h1>{heading}</h1>
  <p>{}</p>
</body>
</html>
"#,
        text_with_breaks(body),
        lang = language.tag(),
    )
}

/// Escape `text` and turn each line break (`\n` or `\r\n`) into `<br/>`
pub fn text_with_breaks(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + text.len() / 8);
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        html.push_str(&escape_text(line));
        if lines.peek().is_some() {
            html.push_str("<br/>\n");
        }
    }
    html
}

/// Escape XML special characters and drop characters XML 1.0 cannot carry
pub fn escape_text(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in xml_safe(s).chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `s` without the characters XML 1.0 cannot carry.
///
/// Tab and line breaks are kept; other control characters and the
/// non-characters U+FFFE and U+FFFF are removed.
pub fn xml_safe(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || !(c.is_control() || c == '\u{FFFE}' || c == '\u{FFFF}')
}
