//! Background-image resolution for page elements.
//!
//! Approximates `getComputedStyle(el).backgroundImage` from static markup: the
//! element's inline `style` wins, otherwise the last matching rule from the
//! page's `<style>` blocks. Specificity and `!important` are not modeled.
//! Results use the browser serialization: `url("<absolute url>")` or `none`.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::selectors::STYLE_ELEMENTS;
use super::transform::resolve;

const NONE: &str = "none";

struct StyleRule {
    selector: Selector,
    /// Declared value, e.g. `url(a.jpg)` or `none`.
    background_image: String,
}

/// Background-image rules collected from a document's stylesheets.
#[derive(Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn from_document(document: &Html) -> Self {
        let mut sheet = StyleSheet::default();
        for style in document.select(&STYLE_ELEMENTS) {
            let css = style.text().collect::<String>();
            sheet.add_css(&css);
        }
        sheet
    }

    /// Parses `css` and appends its background-image rules.
    pub fn add_css(&mut self, css: &str) {
        let css = strip_comments(css);
        parse_rules(&css, &mut self.rules);
    }

    /// Computed background-image of `element`, serialized like a browser would.
    pub fn computed_background_image(&self, element: ElementRef<'_>, base: &Url) -> String {
        let inline = element
            .value()
            .attr("style")
            .and_then(background_image_from_declarations);
        let declared = inline.or_else(|| {
            self.rules
                .iter()
                .rev()
                .find(|r| r.selector.matches(&element))
                .map(|r| r.background_image.clone())
        });
        match declared {
            Some(value) => serialize(&value, base),
            None => NONE.to_string(),
        }
    }
}

fn serialize(value: &str, base: &Url) -> String {
    match first_css_url(value) {
        Some(raw) => {
            let resolved = resolve(base, &raw);
            if resolved.is_empty() {
                NONE.to_string()
            } else {
                format!("url(\"{}\")", resolved)
            }
        }
        None => NONE.to_string(),
    }
}

/// Inner URL of the first `url(...)` in a value, without quotes.
/// A quoted URL runs to its closing quote, so it may contain `)`.
fn first_css_url(value: &str) -> Option<String> {
    let start = value.find("url(")? + "url(".len();
    let inner = value[start..].trim_start();
    let url = match inner.chars().next()? {
        quote @ ('"' | '\'') => {
            let body = &inner[1..];
            &body[..body.find(quote)?]
        }
        _ => &inner[..inner.find(')')?],
    };
    Some(url.trim().to_string())
}

/// Splits a declaration block on `;` outside quotes and parentheses.
fn split_declarations(block: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in block.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&block[start..]);
    out
}

/// Background-image value from a declaration block. Later declarations win.
fn background_image_from_declarations(block: &str) -> Option<String> {
    let mut found = None;
    for decl in split_declarations(block) {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        match prop.as_str() {
            "background-image" => found = Some(value.to_string()),
            "background" => {
                if value.contains("url(") {
                    found = Some(value.to_string());
                } else if value.eq_ignore_ascii_case(NONE) {
                    found = Some(NONE.to_string());
                }
            }
            _ => {}
        }
    }
    found
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the `}` closing a block whose `{` precedes `s`.
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn parse_rules(css: &str, out: &mut Vec<StyleRule>) {
    let mut rest = css;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = matching_brace(after) else {
            break;
        };
        let body = &after[..close];
        // Statement at-rules (`@import ...;`) end up ahead of the prelude.
        let prelude = rest[..open].rsplit(';').next().unwrap_or("").trim();
        rest = &after[close + 1..];

        if let Some(at_rule) = prelude.strip_prefix('@') {
            let name = at_rule.split_whitespace().next().unwrap_or("");
            if name.eq_ignore_ascii_case("media") || name.eq_ignore_ascii_case("supports") {
                parse_rules(body, out);
            }
            continue;
        }

        let Some(value) = background_image_from_declarations(body) else {
            continue;
        };
        match Selector::parse(prelude) {
            Ok(selector) => out.push(StyleRule {
                selector,
                background_image: value,
            }),
            Err(e) => tracing::debug!(selector = prelude, "skipping style rule: {}", e),
        }
    }
}
