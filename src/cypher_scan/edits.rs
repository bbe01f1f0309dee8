use std::ops::Range;

/// A change to the query text, addressed by byte range in the text it was
/// computed against. Insertions use an empty range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        TextEdit {
            range: at..at,
            replacement: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        TextEdit {
            range,
            replacement: text.into(),
        }
    }
}

/// Apply non-overlapping edits to `text`. Identical edits are applied once.
pub fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|edit| (edit.range.start, edit.range.end));
    edits.dedup();

    let mut result = text.to_string();
    // Process in reverse order to preserve string positions
    for edit in edits.into_iter().rev() {
        result.replace_range(edit.range, &edit.replacement);
    }
    result
}
