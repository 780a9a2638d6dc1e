//! Untrusted string sanitization.
//!
//! `escape` is the primary defense: text inserted into markup goes through it
//! exactly once, at the point of insertion. `sanitize_fragment` is a denylist
//! mitigation for HTML fragments that must be rendered as markup. It is not a
//! parser and is not a complete XSS defense.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// `<script ...> ... </script>` blocks, across lines.
static SCRIPT_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script regex should compile")
});

/// `on<word>=` attributes with a double-quoted, single-quoted or bare value,
/// after whitespace, a slash, or directly after the previous attribute's
/// closing quote. The quote is captured so it can be put back.
static EVENT_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:[\s/]+|(["']))on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#)
        .expect("event attribute regex should compile")
});

/// Executable URI schemes at the start of an attribute value.
static UNSAFE_SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(=\s*["']?\s*)(?:javascript|data|vbscript)\s*:"#)
        .expect("scheme regex should compile")
});

/// Opening or closing `script`/`iframe` tags typed into a field.
static INPUT_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(?:script|iframe)\b[^>]*>").expect("input tag regex should compile")
});

static INPUT_JS_SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)javascript\s*:").expect("input scheme regex should compile")
});

static INPUT_EVENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bon[a-z]+\s*=").expect("input event regex should compile")
});

/// Marker written in place of a neutralized scheme.
pub const BLOCKED_SCHEME: &str = "blocked:";

/// Escape text for insertion into HTML.
///
/// Not idempotent: escaping `&lt;` again yields `&amp;lt;`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a dynamically typed content value. Anything but a string yields `""`.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s),
        _ => String::new(),
    }
}

/// Strip the most common script vectors from an HTML fragment.
pub fn sanitize_fragment(html: &str) -> String {
    let blocked = format!("${{1}}{}", BLOCKED_SCHEME);
    until_stable(html, |value| {
        let value = SCRIPT_BLOCK_REGEX.replace_all(value, "");
        let value = EVENT_ATTR_REGEX.replace_all(&value, "$1");
        UNSAFE_SCHEME_REGEX
            .replace_all(&value, blocked.as_str())
            .into_owned()
    })
}

/// Cleanse a raw field value as it is typed.
pub fn sanitize_on_input(raw: &str) -> String {
    until_stable(raw, |value| {
        let value = INPUT_TAG_REGEX.replace_all(value, "");
        let value = INPUT_JS_SCHEME_REGEX.replace_all(&value, "");
        INPUT_EVENT_REGEX.replace_all(&value, "").into_owned()
    })
}

/// Apply `pass` until the output stops changing, so that removing one match
/// cannot splice a new one together from the surrounding text.
fn until_stable(input: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = pass(input);
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
