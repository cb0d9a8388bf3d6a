use crate::inspect::entry::TopLevelEntry;
use crate::render::plist::unescape;
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;

/// Parse a rendered plist file into its top-level entries.
pub fn parse_file(path: &str) -> anyhow::Result<Vec<TopLevelEntry>> {
    let text = fs::read_to_string(path).with_context(|| format!("read plist file {}", path))?;
    parse_document(&text).with_context(|| format!("inspect {}", path))
}

/// Scan the top-level dict of a rendered document.
///
/// Only lines indented exactly one level are looked at. Block values are
/// skipped up to their closing line, and text values spanning several lines
/// are read back verbatim. Expected top-level shapes:
///
/// ```text
///     <key>Label</key>
///     <string>com.example.job</string>
///     <key>RunAtLoad</key>
///     <true/>
///     <key>ProgramArguments</key>
///     <array>
///         ...
///     </array>
/// ```
pub fn parse_document(text: &str) -> anyhow::Result<Vec<TopLevelEntry>> {
    if !text.contains("<plist") {
        bail!("not a property list: missing <plist> element");
    }

    // Capture groups:
    // key:    1) key text
    // inline: 1) open tag 2) value 3) close tag
    // flag:   1) true|false
    // open:   1) tag of a block value
    // start:  1) tag 2) first line of a text value that spans lines
    let key_re = Regex::new(r#"^ {4}<key>(.*)</key>$"#)?;
    let inline_re = Regex::new(r#"^ {4}<(\w+)>(.*)</(\w+)>$"#)?;
    let flag_re = Regex::new(r#"^ {4}<(true|false)/>$"#)?;
    let open_re = Regex::new(r#"^ {4}<(\w+)>$"#)?;
    let start_re = Regex::new(r#"^ {4}<(\w+)>(.*)$"#)?;

    let mut out = Vec::new();
    let mut pending: Option<(String, usize)> = None;
    // (key, tag, text so far, line it started on)
    let mut open_text: Option<(String, String, String, usize)> = None;
    // Tag of the block value being skipped.
    let mut open_block: Option<String> = None;

    for (lineno, raw) in text.lines().enumerate() {
        let lno = lineno + 1;

        // Continuation lines of a text value are data, indentation included.
        if let Some((key, tag, mut value, at)) = open_text.take() {
            value.push('\n');
            match raw.strip_suffix(format!("</{}>", tag).as_str()) {
                Some(last) => {
                    value.push_str(last);
                    out.push(TopLevelEntry {
                        key,
                        kind: tag,
                        value: Some(unescape(&value)),
                    });
                }
                None => {
                    value.push_str(raw);
                    open_text = Some((key, tag, value, at));
                }
            }
            continue;
        }

        let line = raw.trim_end();

        if let Some(tag) = &open_block {
            if line.strip_prefix("    </").and_then(|l| l.strip_suffix('>')) == Some(tag.as_str()) {
                open_block = None;
            }
            continue;
        }

        // Top level only: exactly four spaces, then content.
        if !line.starts_with("    ") || line[4..].starts_with(' ') {
            continue;
        }

        if let Some(caps) = key_re.captures(line) {
            if let Some((key, at)) = pending.take() {
                bail!("key {:?} at line {} has no value", key, at);
            }
            pending = Some((unescape(&caps[1]), lno));
            continue;
        }

        let (kind, value) = if let Some(caps) = flag_re.captures(line) {
            (caps[1].to_string(), Some(caps[1].to_string()))
        } else if let Some(caps) = inline_re.captures(line) {
            if caps[1] != caps[3] {
                bail!(
                    "mismatched tags at line {}: <{}> closed by </{}>",
                    lno,
                    &caps[1],
                    &caps[3]
                );
            }
            (caps[1].to_string(), Some(unescape(&caps[2])))
        } else if let Some(caps) = open_re.captures(line) {
            open_block = Some(caps[1].to_string());
            (caps[1].to_string(), None)
        } else if let Some(caps) = start_re.captures(raw) {
            let Some((key, _)) = pending.take() else {
                bail!("value at line {} has no key", lno);
            };
            open_text = Some((key, caps[1].to_string(), caps[2].to_string(), lno));
            continue;
        } else {
            bail!("cannot parse line {}: {:?}", lno, line);
        };

        let Some((key, _)) = pending.take() else {
            bail!("value at line {} has no key", lno);
        };
        out.push(TopLevelEntry { key, kind, value });
    }

    if let Some((key, at)) = pending {
        bail!("key {:?} at line {} has no value", key, at);
    }
    if let Some(tag) = open_block {
        bail!("<{}> block is never closed", tag);
    }
    if let Some((key, tag, _, at)) = open_text {
        bail!("<{}> value of key {:?} opened at line {} is never closed", tag, key, at);
    }

    Ok(out)
}
