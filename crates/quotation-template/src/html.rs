/*
 * html.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! HTML escaping.

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text and turn newlines into `<br>`.
pub fn escape_multiline(text: &str) -> String {
    text.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

/// Block-level tags that end a line of text.
const LINE_BREAKING_TAGS: [&str; 12] = [
    "br", "/p", "/div", "/li", "/tr", "/h1", "/h2", "/h3", "/h4", "/h5", "/h6", "hr",
];

/// Reduce an HTML fragment to its text.
///
/// Tags are removed, block-closing tags and `<br>` become newlines, and the
/// common character entities are decoded. This is a measuring aid, not a
/// parser: malformed markup degrades to extra text, never to an error.
pub fn to_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = after[..close].trim().trim_end_matches('/').trim();
        let name = tag
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        if LINE_BREAKING_TAGS.contains(&name.as_str()) {
            text.push('\n');
        }
        rest = &after[close + 1..];
    }
    text.push_str(rest);

    decode_entities(text.trim_end_matches('\n'))
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
