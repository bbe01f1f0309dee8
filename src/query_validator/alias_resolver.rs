use super::symbol_table::SymbolTable;

/// Link `x AS y` bindings of known variables.
///
/// Works on whitespace separated tokens of the masked query. A dotted token
/// before `AS` is an attribute projection, not a variable, and is skipped.
/// Runs once after node extraction and again after relation extraction.
pub(crate) fn resolve_aliases(masked_query: &str, symbols: &mut SymbolTable) {
    let tokens: Vec<&str> = masked_query.split_whitespace().collect();

    for window in tokens.windows(3) {
        let [before, keyword, after] = [window[0], window[1], window[2]];
        if !keyword.eq_ignore_ascii_case("as") || before.contains('.') {
            continue;
        }

        let alias = after.replace(',', "");
        if alias.is_empty() || alias == before {
            continue;
        }
        if symbols.link_alias(before, &alias) {
            log::debug!("alias `{}` AS `{}`", before, alias);
        }
    }
}
