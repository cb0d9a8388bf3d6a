use crate::tree::Tag;
use std::borrow::Cow;

/// Indentation unit for every nesting level.
pub const INDENT: usize = 4;

pub const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
"#;

pub const FOOTER: &str = "</plist>\n";

/// Push the indentation for `depth` nesting levels.
///
/// Only structural lines are padded; text inside an element is written as
/// is, so multi-line values survive unchanged.
pub(crate) fn pad(out: &mut String, depth: usize) {
    out.push_str(&" ".repeat(depth * INDENT));
}

/// Escape the characters that would break XML character data.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>'][..]) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape`], used when reading rendered text back.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Wrap an already rendered body (options at depth 1) in the document
/// shell: header, root dict, footer.
///
/// The root dict is always emitted, even when there are no options, so the
/// output stays a well-formed plist.
pub fn render_document(body: &str) -> String {
    let tag = Tag::Dict;

    let mut out = String::with_capacity(HEADER.len() + body.len() + 64);
    out.push_str(HEADER);
    out.push_str(&format!("<{}>\n", tag));
    out.push_str(body);
    out.push_str(&format!("</{}>\n", tag));
    out.push_str(FOOTER);
    out
}
