//! String-level HTML helpers for injecting snippets into composed documents.

/// Insert `snippet` just before the last `</tag>` (case-insensitive).
/// Returns `None` when the closing tag is absent.
pub fn insert_before_closing(html: &str, tag: &str, snippet: &str) -> Option<String> {
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let pos = html.to_ascii_lowercase().rfind(&needle)?;
    Some(splice(html, pos, snippet))
}

/// Like [`insert_before_closing`], but targets the first `</tag>`.
pub fn insert_before_first_closing(html: &str, tag: &str, snippet: &str) -> Option<String> {
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let pos = html.to_ascii_lowercase().find(&needle)?;
    Some(splice(html, pos, snippet))
}

fn splice(html: &str, pos: usize, snippet: &str) -> String {
    let mut out = String::with_capacity(html.len() + snippet.len());
    out.push_str(&html[..pos]);
    out.push_str(snippet);
    out.push_str(&html[pos..]);
    out
}

/// Insert a stylesheet snippet into `<head>`, or at the very start when there is none.
///
/// The head precedes the body, so the first `</head` is the real one even
/// when body content mentions the tag.
pub fn inject_head(html: &str, snippet: &str) -> String {
    insert_before_first_closing(html, "head", snippet).unwrap_or_else(|| format!("{}{}", snippet, html))
}

/// Insert a snippet at the end of `<body>`, or append it when there is none.
pub fn inject_body_end(html: &str, snippet: &str) -> String {
    insert_before_closing(html, "body", snippet).unwrap_or_else(|| format!("{}{}", html, snippet))
}

/// Undo the attribute escaping a Markdown renderer applies to URLs.
pub fn unescape_attribute(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Percent-decode a URL path; `None` when the result is not valid UTF-8.
pub fn percent_decode(value: &str) -> Option<String> {
    percent_encoding::percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}
