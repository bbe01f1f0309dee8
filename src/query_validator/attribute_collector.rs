use super::errors::SchemaCheckError;
use super::symbol_table::SymbolTable;
use crate::cypher_scan::patterns::{is_reserved_type_name, ATTRIBUTE_REFERENCE};
use crate::cypher_scan::MaskedQuery;

/// Attach every `variable.attribute` reference of the masked query to the
/// variable's record.
///
/// Reserved type names on the left of the dot are skipped; any other unknown
/// identifier is an [`SchemaCheckError::UndefinedVariable`]. References that
/// continue a longer dotted path or follow a `$` (query parameters) are not
/// variable references and are ignored.
pub(crate) fn collect_attributes(
    masked: &MaskedQuery,
    symbols: &mut SymbolTable,
) -> Result<(), SchemaCheckError> {
    let text = masked.as_str();

    for caps in ATTRIBUTE_REFERENCE.captures_iter(text) {
        let (Some(whole), Some(variable), Some(attribute)) =
            (caps.get(0), caps.name("var"), caps.name("attr"))
        else {
            continue;
        };

        let preceding = text[..whole.start()].chars().next_back();
        if matches!(preceding, Some(c) if c == '$' || c == '.' || c.is_alphanumeric() || c == '_')
        {
            continue;
        }

        let (variable, attribute) = (variable.as_str(), attribute.as_str());
        if let Some(record) = symbols.get_mut(variable) {
            log::debug!("attribute `{}` on `{}`", attribute, variable);
            record.add_attribute(attribute);
        } else if is_reserved_type_name(variable) {
            continue;
        } else {
            return Err(SchemaCheckError::UndefinedVariable {
                variable: variable.to_string(),
                offset: masked.to_original(whole.start()),
            });
        }
    }

    Ok(())
}
