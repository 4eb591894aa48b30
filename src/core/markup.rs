//! Entry label markup.
//!
//! Labels are tiny markup strings: `<span class="dir">name</span>` for directories,
//! `<span class="exec">name</span>` for executables and the bare escaped name for plain files.
//! The UI turns them into styled spans, and [strip_markup] removes any tags that leak into a
//! path before it is embedded in a shell command.

/// Label class for directories.
pub(crate) const CLASS_DIR: &str = "dir";
/// Label class for executable files.
pub(crate) const CLASS_EXEC: &str = "exec";

/// Escapes `&`, `<` and `>` so a raw name can sit inside a label.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [escape].
pub(crate) fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Wraps an already escaped name in a span of the given class.
pub(crate) fn span(class: &str, escaped: &str) -> String {
    format!("<span class=\"{class}\">{escaped}</span>")
}

/// Removes every `<...>` tag from `input`.
///
/// An unterminated `<` is kept as literal text. Idempotent.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Splits a label into `(class, text)` segments with entities decoded.
///
/// Text outside any span has no class. Unknown tags are dropped.
pub(crate) fn parse_label(label: &str) -> Vec<(Option<String>, String)> {
    let mut segments = Vec::new();
    let mut class: Option<String> = None;
    let mut rest = label;

    loop {
        let Some(open) = rest.find('<') else {
            if !rest.is_empty() {
                segments.push((class.clone(), unescape(rest)));
            }
            break;
        };
        if open > 0 {
            segments.push((class.clone(), unescape(&rest[..open])));
        }
        let Some(close) = rest[open..].find('>') else {
            segments.push((class.clone(), unescape(&rest[open..])));
            break;
        };

        let tag = &rest[open + 1..open + close];
        if tag.starts_with('/') {
            class = None;
        } else if let Some(value) = tag
            .split_once("class=\"")
            .and_then(|(_, v)| v.split_once('"'))
            .map(|(v, _)| v.to_string())
        {
            class = Some(value);
        }
        rest = &rest[open + close + 1..];
    }
    segments
}
