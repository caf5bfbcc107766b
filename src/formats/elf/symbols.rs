//! Symbol table decoding

use crate::formats::elf::tables::{symbol_bind_name, symbol_type_name};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::{read_cstring, FieldRead};
use serde::Serialize;
use std::borrow::Cow;

/// One row of the symbol table listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolRow {
    pub value: u32,
    pub size: u32,
    pub bind_text: &'static str,
    pub type_text: &'static str,
    pub name: String,
}

/// Symbol table
pub struct SymbolTable<'a> {
    symbols: Vec<Symbol>,
    strings: &'a [u8],
}

impl<'a> SymbolTable<'a> {
    /// Parse symbol table from section data.
    ///
    /// The entry count is the section size divided by the entry size; a
    /// trailing partial entry is ignored.
    pub fn parse(symbol_data: &[u8], string_data: &'a [u8]) -> Result<Self> {
        let symbols = symbol_data
            .chunks_exact(SYM_SIZE)
            .map(parse_symbol)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            symbols,
            strings: string_data,
        })
    }

    /// Count total symbols
    pub fn count(&self) -> usize {
        self.symbols.len()
    }

    /// Get symbol by index
    pub fn by_index(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter()
    }

    /// Get symbol name
    pub fn symbol_name(&self, symbol: &Symbol) -> Result<Cow<'a, str>> {
        read_cstring(self.strings, symbol.st_name as usize)
    }

    pub fn row(&self, symbol: &Symbol) -> Result<SymbolRow> {
        Ok(SymbolRow {
            value: symbol.st_value,
            size: symbol.st_size,
            bind_text: symbol_bind_name(symbol.st_bind()),
            type_text: symbol_type_name(symbol.st_type()),
            name: self.symbol_name(symbol)?.into_owned(),
        })
    }

    /// Object and function symbols, in storage order
    pub fn rows(&self) -> Result<Vec<SymbolRow>> {
        self.symbols
            .iter()
            .filter(|s| s.is_listed())
            .map(|s| self.row(s))
            .collect()
    }

    /// First symbol whose name equals `name` exactly
    pub fn find(&self, name: &str) -> Result<Option<&Symbol>> {
        for symbol in &self.symbols {
            if self.symbol_name(symbol)? == name {
                return Ok(Some(symbol));
            }
        }
        Ok(None)
    }
}

/// Parse a single 16-byte symbol entry
fn parse_symbol(raw: &[u8]) -> Result<Symbol> {
    Ok(Symbol {
        st_name: raw.read_u32(0)?,
        st_value: raw.read_u32(4)?,
        st_size: raw.read_u32(8)?,
        st_info: raw.read_u8(12)?,
        st_other: raw.read_u8(13)?,
        st_shndx: raw.read_u16(14)?,
    })
}
