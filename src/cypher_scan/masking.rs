//! String literal masking.
//!
//! Every quoted literal keeps its quotes but its interior becomes a single
//! placeholder character, so that structural scans (node patterns, dotted
//! attribute references, RETURN lists) never see literal text.
//!
//! Masking changes lengths. [`MaskedQuery`] keeps the offset anchors needed
//! to translate a position in the masked text back to the original query.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder written between the quotes of every masked literal
pub const MASK_PLACEHOLDER: char = '#';

/// Single or double quoted literal on one line, honouring backslash escapes
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'(?:[^'\\\n]|\\.)*'|"(?:[^"\\\n]|\\.)*""#).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedQuery {
    text: String,
    // (masked offset, original offset) pairs, one per unmasked stretch
    anchors: Vec<(usize, usize)>,
}

impl MaskedQuery {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut anchors = vec![(0, 0)];
        let mut last = 0;

        for literal in STRING_LITERAL.find_iter(original) {
            text.push_str(&original[last..literal.start()]);
            let quote = &original[literal.start()..literal.start() + 1];
            text.push_str(quote);
            text.push(MASK_PLACEHOLDER);
            text.push_str(quote);
            last = literal.end();
            anchors.push((text.len(), last));
        }
        text.push_str(&original[last..]);

        MaskedQuery { text, anchors }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Translate an offset in the masked text to the original query.
    ///
    /// Only meaningful for offsets outside a masked literal interior.
    pub fn to_original(&self, masked_offset: usize) -> usize {
        let idx = self
            .anchors
            .partition_point(|(masked, _)| *masked <= masked_offset)
            .saturating_sub(1);
        let (masked, original) = self.anchors[idx];
        original + (masked_offset - masked)
    }
}

/// Mask every string literal in `query`.
pub fn mask_string_literals(query: &str) -> String {
    MaskedQuery::new(query).into_string()
}
