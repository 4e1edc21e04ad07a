//! Read-only scans of page markup.
//!
//! # Responsibilities
//! - Find interactive elements whose visible text suggests a testing control
//! - Find known API endpoint patterns inside inline scripts
//!
//! # Design Decisions
//! - Scans are pure functions over the markup string; nothing is mutated
//! - Keyword matching is case-insensitive substring, in both English and
//!   Russian, matching the vocabulary of the provider dashboards this tool
//!   is pointed at
//! - A lightweight tag-level scan is enough for diagnostics; this is not a
//!   conforming HTML parser

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Visible-text fragments that mark an element as a testing control.
pub const TEST_KEYWORDS: &[&str] = &[
    "test",
    "тест",
    "webhook",
    "вебхук",
    "send",
    "отправить",
    "ping",
    "проверить",
    "sample",
    "пример",
    "debug",
    "отладка",
];

static BUTTON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<button\b[^>]*>(.*?)</button>").expect("Invalid button regex"));

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("Invalid anchor regex"));

/// Any opening tag, with its attribute text and the immediate text child.
static OPEN_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9-]*)\b([^>]*)>\s*([^<]*)").expect("Invalid open tag regex")
});

static ROLE_BUTTON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\brole\s*=\s*["']?button["']?"#).expect("Invalid role regex"));

static CLASS_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bclass\s*=\s*["']([^"']*)["']"#).expect("Invalid class regex"));

static TAG_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag strip regex"));

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("Invalid script regex"));

/// Endpoint shapes worth reporting when found in page scripts.
static API_ENDPOINT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)api\.lava\.top",
        r"(?i)/api/v[12]/webhook",
        r"(?i)/test/webhook",
        r"(?i)webhook/test",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid endpoint pattern"))
    .collect()
});

/// An interactive element whose visible text matched the keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestControl {
    /// Element tag, uppercased the way DOM `tagName` reports it.
    pub tag: String,
    /// Collapsed visible text of the element.
    pub text: String,
}

/// A script fragment matching one of the known endpoint patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointMatch {
    /// Source of the pattern that matched.
    pub pattern: String,
    /// The matched text, verbatim.
    pub matched: String,
}

/// Find interactive elements (buttons, links, button-like roles and classes)
/// whose visible text contains a testing keyword.
pub fn scan_test_controls(markup: &str) -> Vec<TestControl> {
    let mut found = Vec::new();

    for capture in BUTTON_RE.captures_iter(markup) {
        push_if_keyworded(&mut found, "BUTTON", &capture[1]);
    }
    for capture in ANCHOR_RE.captures_iter(markup) {
        push_if_keyworded(&mut found, "A", &capture[1]);
    }

    // Elements made interactive by role or class rather than tag. Buttons and
    // anchors are already covered above with their full inner text.
    for capture in OPEN_TAG_RE.captures_iter(markup) {
        let tag = capture[1].to_lowercase();
        if tag == "button" || tag == "a" {
            continue;
        }
        let attrs = &capture[2];
        if ROLE_BUTTON_RE.is_match(attrs) || has_button_class(attrs) {
            push_if_keyworded(&mut found, &tag.to_uppercase(), &capture[3]);
        }
    }

    found
}

/// Find known endpoint patterns inside inline `<script>` bodies.
pub fn scan_api_endpoints(markup: &str) -> Vec<EndpointMatch> {
    let mut found: Vec<EndpointMatch> = Vec::new();

    for script in SCRIPT_RE.captures_iter(markup) {
        let content = &script[1];
        for pattern in API_ENDPOINT_PATTERNS.iter() {
            for m in pattern.find_iter(content) {
                let hit = EndpointMatch {
                    pattern: pattern.as_str().to_string(),
                    matched: m.as_str().to_string(),
                };
                if !found.contains(&hit) {
                    found.push(hit);
                }
            }
        }
    }

    found
}

fn push_if_keyworded(found: &mut Vec<TestControl>, tag: &str, inner: &str) {
    let text = visible_text(inner);
    let lowered = text.to_lowercase();
    if TEST_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        found.push(TestControl {
            tag: tag.to_string(),
            text,
        });
    }
}

/// Strip nested tags and collapse whitespace, approximating `textContent`.
fn visible_text(inner: &str) -> String {
    let stripped = TAG_STRIP_RE.replace_all(inner, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_button_class(attrs: &str) -> bool {
    CLASS_ATTR_RE
        .captures(attrs)
        .map(|c| {
            c[1].split_whitespace()
                .any(|token| token.eq_ignore_ascii_case("btn") || token.eq_ignore_ascii_case("button"))
        })
        .unwrap_or(false)
}
