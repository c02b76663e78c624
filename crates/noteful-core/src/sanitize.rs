//! Markup sanitization for text echoed back to clients.
//!
//! Tags on an allow-list survive with their attributes filtered to a per-tag
//! allow-list. Any other tag, and any stray angle bracket, is escaped so a
//! browser renders it as text. Text between tags is otherwise untouched.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// An opening or closing tag. Quoted attribute values may contain `>`.
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^<>"']|"[^"]*"|'[^']*')*)>"#).unwrap()
});

/// One attribute inside a tag, with an optional double-, single-, or unquoted value.
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

/// A numeric or named character reference. The trailing `;` is optional, as
/// browsers accept it either way.
static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|([A-Za-z][A-Za-z0-9]*));?").unwrap()
});

/// Named references decoded before URL checks. Anything else stays literal
/// and has its `&` escaped on output, so a browser cannot decode it either.
static NAMED_REFS: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("colon", ':'),
        ("Tab", '\t'),
        ("NewLine", '\n'),
        ("nbsp", '\u{a0}'),
    ])
});

const TABLE_CELL: &[&str] = &["width", "rowspan", "colspan", "align", "valign"];

/// Allowed tags and the attributes each may keep.
static ALLOWED_TAGS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut tags: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    for tag in [
        "b", "i", "u", "s", "em", "strong", "small", "mark", "sub", "sup", "code", "pre", "br",
        "hr", "p", "div", "span", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl",
        "dt", "dd", "table", "thead", "tbody", "tfoot", "tr", "caption", "strike", "tt",
    ] {
        tags.insert(tag, &[]);
    }
    tags.insert("a", &["href", "title", "target"]);
    tags.insert("abbr", &["title"]);
    tags.insert("blockquote", &["cite"]);
    tags.insert("del", &["datetime"]);
    tags.insert("ins", &["datetime"]);
    tags.insert("img", &["src", "alt", "title", "width", "height"]);
    tags.insert("td", TABLE_CELL);
    tags.insert("th", TABLE_CELL);
    tags
});

/// Neutralize executable markup in `input`.
///
/// ```
/// use noteful_core::sanitize_html;
///
/// assert_eq!(
///     sanitize_html(r#"<script>alert("xss");</script>"#),
///     r#"&lt;script&gt;alert("xss");&lt;/script&gt;"#
/// );
/// assert_eq!(
///     sanitize_html(r#"<img src="a.png" onerror="alert(1)"> <strong>ok</strong>"#),
///     r#"<img src="a.png"> <strong>ok</strong>"#
/// );
/// ```
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&escape_text(&input[last..whole.start()]));

        let name = caps[2].to_ascii_lowercase();
        match ALLOWED_TAGS.get(name.as_str()) {
            Some(allowed) => {
                let closing = !caps[1].is_empty();
                out.push_str(&rebuild_tag(&name, closing, &caps[3], allowed));
            }
            None => out.push_str(&escape_text(whole.as_str())),
        }
        last = whole.end();
    }

    out.push_str(&escape_text(&input[last..]));
    out
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decode character references the way a browser reads an attribute value.
fn decode_attribute(value: &str) -> String {
    CHAR_REF
        .replace_all(value, |caps: &regex::Captures| {
            let code = if let Some(hex) = caps.get(1) {
                Some(u32::from_str_radix(hex.as_str(), 16).ok())
            } else {
                caps.get(2).map(|dec| dec.as_str().parse::<u32>().ok())
            };
            match code {
                Some(code) => code
                    .and_then(char::from_u32)
                    .filter(|c| *c != '\0')
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string(),
                None => match NAMED_REFS.get(&caps[3]) {
                    Some(c) => c.to_string(),
                    None => caps[0].to_string(),
                },
            }
        })
        .into_owned()
}

fn rebuild_tag(name: &str, closing: bool, attributes: &str, allowed: &[&str]) -> String {
    if closing {
        return format!("</{}>", name);
    }

    let mut tag = format!("<{}", name);
    for caps in ATTRIBUTE.captures_iter(attributes) {
        let attr = caps[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4));
        match value {
            Some(value) => {
                let value = decode_attribute(value.as_str());
                let value = value.trim();
                if (attr == "href" || attr == "src") && !is_safe_url(value) {
                    continue;
                }
                tag.push_str(&format!(" {}=\"{}\"", attr, escape_attribute(value)));
            }
            None => {
                tag.push(' ');
                tag.push_str(&attr);
            }
        }
    }

    if attributes.trim_end().ends_with('/') {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

/// Reject script-bearing URL schemes. Whitespace and control characters are
/// ignored when reading the scheme, as browsers do.
fn is_safe_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.starts_with("javascript:") || normalized.starts_with("vbscript:") {
        return false;
    }
    if normalized.starts_with("data:") {
        return normalized.starts_with("data:image/");
    }
    true
}
