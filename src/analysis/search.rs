//! Symbol lookup by exact name

use crate::error::{ElfParserError, Result};
use crate::formats::elf::symbols::SymbolRow;
use crate::formats::elf::ElfImage;
use tracing::debug;

/// Find the first symbol named exactly `name`.
///
/// Every symbol table entry is considered, whatever its type. `Ok(None)`
/// means the table was scanned and nothing matched.
pub fn find_symbol(image: &ElfImage<'_>, name: &str) -> Result<Option<SymbolRow>> {
    if name.is_empty() {
        return Err(ElfParserError::BadArguments(
            "no symbol name given".to_string(),
        ));
    }

    let symbols = image.symbols()?;
    let found = match symbols.find(name)? {
        Some(symbol) => Some(symbols.row(symbol)?),
        None => None,
    };
    debug!(symbol = name, found = found.is_some(), "Symbol search");
    Ok(found)
}
