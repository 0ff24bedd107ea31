//! Fragment markup inspection.
//!
//! Fragments are opaque HTML; the router only needs a few facts from them:
//! the first `h1`/`h2` for the title, the navigation controls they carry,
//! and the behavior markers to run after mounting. A small set of
//! patterns covers that without a full HTML parser. Markup comments are
//! removed before any of them is matched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[12](?:\s[^>]*)?>(.*?)</h[12]\s*>").expect("heading pattern")
});

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[a-zA-Z][a-zA-Z0-9]*);").expect("entity pattern")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<([a-z][a-z0-9-]*)((?:\s[^>]*)?)>").expect("open tag pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(?:^|\s)([a-z_:][-a-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern")
});

/// Attribute marking an element whose behavior runs after mounting.
pub const BEHAVIOR_ATTRIBUTE: &str = "data-behavior";

/// Text content of the first primary or secondary heading, trimmed.
pub fn first_heading(markup: &str) -> Option<String> {
    let markup = strip_comments(markup);
    let inner = HEADING.captures(&markup)?.get(1)?.as_str();
    let text = TAG.replace_all(inner, "");
    Some(decode_entities(&text).trim().to_string())
}

/// Route identifiers of every navigation control, in document order.
pub fn nav_link_routes(markup: &str) -> Vec<String> {
    attribute_values(markup, super::ROUTE_ATTRIBUTE)
}

/// Behavior names referenced by the fragment, in document order.
pub fn behavior_markers(markup: &str) -> Vec<String> {
    attribute_values(markup, BEHAVIOR_ATTRIBUTE)
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect()
}

/// Number of `<script>` elements that carry no behavior marker.
pub fn unmarked_scripts(markup: &str) -> usize {
    OPEN_TAG
        .captures_iter(&strip_comments(markup))
        .filter(|c| c[1].eq_ignore_ascii_case("script"))
        .filter(|c| attribute(&c[2], BEHAVIOR_ATTRIBUTE).is_none())
        .count()
}

/// Values of `name` on every opening tag, in document order.
pub fn attribute_values(markup: &str, name: &str) -> Vec<String> {
    OPEN_TAG
        .captures_iter(&strip_comments(markup))
        .filter_map(|c| attribute(&c[2], name))
        .collect()
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE.captures_iter(attrs).find_map(|c| {
        if !c[1].eq_ignore_ascii_case(name) {
            return None;
        }
        let value = c
            .get(2)
            .or_else(|| c.get(3))
            .or_else(|| c.get(4))
            .map_or("", |m| m.as_str());
        Some(decode_entities(value))
    })
}

fn strip_comments(markup: &str) -> Cow<'_, str> {
    COMMENT.replace_all(markup, "")
}

/// Decode character references in one pass, so `&amp;lt;` stays `&lt;`.
/// Unknown names and invalid code points are kept verbatim.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |c: &Captures<'_>| {
            let reference = &c[1];
            let decoded = match reference.strip_prefix('#') {
                Some(number) => {
                    let code = match number.strip_prefix(|ch: char| ch == 'x' || ch == 'X') {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => number.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32).filter(|ch| *ch != '\0')
                }
                None => match reference {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "amp" => Some('&'),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                },
            };
            decoded.map_or_else(|| c[0].to_string(), String::from)
        })
        .into_owned()
}

/// Escape text for inclusion in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
