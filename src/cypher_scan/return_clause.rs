//! RETURN list normalisation.
//!
//! The final RETURN clause is located on the masked query so that a
//! `return` inside a string literal is never taken for the keyword. The list
//! is everything after the keyword up to the end of the text, split at
//! top-level commas. Rewrites splice the rebuilt list back into the original
//! (unmasked) query, so literal items survive unchanged.

use super::masking::MaskedQuery;
use super::patterns::RETURN_KEYWORD;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReturnList {
    /// Offset of the first list item in the original query
    start: usize,
    items: Vec<String>,
}

fn locate_return_list(query: &str) -> Option<ReturnList> {
    let masked = MaskedQuery::new(query);
    let text = masked.as_str();
    let keyword = RETURN_KEYWORD.find_iter(text).last()?;
    let list_start = keyword.end();

    let mut items = Vec::new();
    let mut item_start = list_start;
    let mut depth = 0usize;
    for (offset, ch) in text[list_start..].char_indices() {
        let pos = list_start + offset;
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(original_item(query, &masked, item_start, pos));
                item_start = pos + 1;
            }
            _ => {}
        }
    }
    items.push(original_item(query, &masked, item_start, text.len()));

    Some(ReturnList {
        start: masked.to_original(list_start),
        items,
    })
}

fn original_item(query: &str, masked: &MaskedQuery, start: usize, end: usize) -> String {
    query[masked.to_original(start)..masked.to_original(end)]
        .trim()
        .to_string()
}

fn normalized(item: &str) -> String {
    item.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn dedupe_items(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut unique = Vec::new();
    for item in items {
        let key = normalized(&item);
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(item);
        }
    }
    unique
}

fn splice(query: &str, list: &ReturnList, items: &[String]) -> String {
    format!("{}{}", &query[..list.start], items.join(", "))
}

/// Drop repeated RETURN items, keeping the first occurrence of each.
///
/// Returns `None` when the query has no RETURN clause.
pub fn dedupe_return_variables(query: &str) -> Option<String> {
    let list = locate_return_list(query)?;
    let items = dedupe_items(list.items.clone());
    Some(splice(query, &list, &items))
}

/// Dedupe the RETURN list, then put every known variable that is not yet
/// returned at the front of it.
///
/// `variables` yields (name, alias) pairs in declaration order. An aliased
/// variable is skipped when either of its two names is already returned.
pub fn include_variables<'a, I>(query: &str, variables: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let list = locate_return_list(query)?;
    let mut items = dedupe_items(list.items.clone());

    for (name, alias) in variables {
        let returned = |candidate: &str| items.iter().any(|item| normalized(item) == candidate);
        let present = returned(name) || alias.is_some_and(|alias| returned(alias));
        if !present {
            items.insert(0, name.to_string());
        }
    }

    Some(splice(query, &list, &items))
}
