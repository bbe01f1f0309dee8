//! Regexes and small parsers for the pattern syntax the validator recovers
//! from query text: node patterns `(v:Label {k: ...})`, relation fragments
//! `<-[v:TYPE {k: ...}]->`, dotted attribute references and the RETURN
//! keyword.
//!
//! All scans run over masked text (see [`super::masking`]) and report byte
//! offsets into the text they were given.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Node pattern: optional variable, optional `:Label`, optional property map
/// Captures: lead (whitespace after the paren), var, label, props
pub static NODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\((?P<lead>\s*)(?P<var>[A-Za-z_]\w*)?\s*(?::\s*(?P<label>[A-Za-z_]\w*))?\s*(?P<props>\{[^{}]*\})?\s*\)",
    )
    .unwrap()
});

/// Relation fragment: left edge marker, bracket, right edge marker
/// Captures: left, body (bracket interior, one level of nested `[...]`), right
pub static RELATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<left>(?:<\s*)?-)\s*\[(?P<body>(?:[^\[\]]|\[[^\[\]]*\])*)\]\s*(?P<right>-(?:\s*>)?)",
    )
    .unwrap()
});

/// Edge marker directly followed by an opening bracket. Every match must lie
/// inside a [`RELATION_PATTERN`] match.
pub static RELATION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<\s*)?-\s*\[").unwrap());

/// Interior of a relation bracket, anchored at both ends
/// Captures: lead, var, label, hops (variable length suffix), props
static RELATION_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<lead>\s*)(?P<var>[A-Za-z_]\w*)?\s*(?::\s*(?P<label>[A-Za-z_]\w*))?\s*(?P<hops>\*\s*\d*\s*(?:\.\.\s*\d*)?)?\s*(?P<props>\{[^{}]*\})?\s*$",
    )
    .unwrap()
});

/// Key of a property map entry: `{key: ...` or `, key: ...`
static PROPERTY_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{,]\s*(?P<key>[A-Za-z_]\w*)\s*:").unwrap());

/// Dotted attribute reference
/// Captures: var, attr
pub static ATTRIBUTE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<var>[A-Za-z_]\w*)\.(?P<attr>\w+)").unwrap());

/// RETURN keyword followed by the start of the return list
pub static RETURN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breturn\s+").unwrap());

/// Built-in type and namespace names that may appear on the left of a dot
/// without being pattern variables (`date.truncate`, `point.distance`)
pub const RESERVED_TYPE_NAMES: [&str; 10] = [
    "boolean", "float", "integer", "path", "string", "date", "time", "datetime", "duration",
    "point",
];

/// Keywords that may directly precede a node pattern without a space
const PATTERN_KEYWORDS: [&str; 11] = [
    "MATCH", "MERGE", "CREATE", "WHERE", "AND", "OR", "XOR", "NOT", "WITH", "RETURN", "DELETE",
];

pub fn is_reserved_type_name(name: &str) -> bool {
    RESERVED_TYPE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// The parsed contents of a node paren or relation bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternBody {
    pub variable: Option<String>,
    /// Where a synthesized variable name belongs, relative to the scanned text
    pub name_insert_at: usize,
    pub label: String,
    pub properties: Vec<String>,
}

impl PatternBody {
    fn from_captures(caps: &Captures<'_>, base: usize) -> Self {
        let name_insert_at = caps.name("lead").map_or(0, |lead| lead.end()) + base;
        PatternBody {
            variable: caps.name("var").map(|m| m.as_str().to_string()),
            name_insert_at,
            label: caps
                .name("label")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            properties: caps
                .name("props")
                .map(|m| property_keys(m.as_str()))
                .unwrap_or_default(),
        }
    }
}

/// Body of a [`NODE_PATTERN`] match, offsets relative to the scanned text.
pub fn node_body(caps: &Captures<'_>) -> PatternBody {
    PatternBody::from_captures(caps, 0)
}

/// Parse the interior of a relation bracket. `body_start` is the offset of
/// the interior in the scanned text.
pub fn parse_relation_body(body: &str, body_start: usize) -> Option<PatternBody> {
    RELATION_BODY
        .captures(body)
        .map(|caps| PatternBody::from_captures(&caps, body_start))
}

/// Keys of a `{k: v, ...}` property map, in order.
pub fn property_keys(map: &str) -> Vec<String> {
    PROPERTY_KEY
        .captures_iter(map)
        .filter_map(|cap| cap.name("key").map(|m| m.as_str().to_string()))
        .collect()
}

/// True when the paren at `paren_at` opens a function call argument list
/// (`count(n)`) rather than a node pattern.
pub fn is_call_site(text: &str, paren_at: usize) -> bool {
    let before = &text[..paren_at];
    let ident_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map(|(idx, _)| idx);

    match ident_start {
        Some(start) => {
            let ident = &before[start..];
            !PATTERN_KEYWORDS
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(ident))
        }
        None => false,
    }
}
