//! ELF32 image model
//!
//! A bounds-checked, zero-copy view over a caller-owned buffer. Only the
//! file header is decoded up front; the section and symbol tables are
//! decoded on request so a damaged table only fails the operations that
//! need it.

#[cfg(test)]
pub(crate) mod fixture;
pub mod headers;
pub mod sections;
pub mod symbols;
pub mod tables;
pub mod types;
pub mod utils;

use headers::parse_header;
use sections::{SectionRow, SectionTable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use symbols::{SymbolRow, SymbolTable};
use tracing::{debug, warn};
pub use types::*;

/// Knobs for decoding an image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Section index of the string table holding symbol names. When unset,
    /// the first `STRTAB` section other than `e_shstrndx` is used.
    pub symbol_strtab: Option<usize>,
}

/// Decoded ELF32 image
pub struct ElfImage<'data> {
    data: &'data [u8],
    header: ElfHeader,
    options: ImageOptions,
}

impl<'data> ElfImage<'data> {
    /// Validate the magic bytes and decode the file header
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        Self::parse_with(data, ImageOptions::default())
    }

    pub fn parse_with(data: &'data [u8], options: ImageOptions) -> Result<Self> {
        let header = parse_header(data)?;
        debug!(
            sections = header.e_shnum,
            shoff = header.e_shoff,
            entry = header.e_entry,
            "Decoded ELF header"
        );
        Ok(Self {
            data,
            header,
            options,
        })
    }

    /// Get ELF header
    pub fn header(&self) -> &ElfHeader {
        &self.header
    }

    /// Get raw data
    pub fn data(&self) -> &'data [u8] {
        self.data
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// Get sections
    pub fn sections(&self) -> Result<SectionTable<'data>> {
        SectionTable::parse(self.data, &self.header)
    }

    /// Name of section `index`, resolved through `e_shstrndx`
    pub fn section_name(&self, index: usize) -> Result<Cow<'data, str>> {
        self.sections()?.name(index)
    }

    /// Get the symbol table.
    ///
    /// The first `SYMTAB` section supplies the entries. Names come from the
    /// string table chosen by [`ImageOptions::symbol_strtab`], or else the
    /// first `STRTAB` section that is not the section-name table. That
    /// default only picks the right table when the file has exactly one
    /// auxiliary string table.
    pub fn symbols(&self) -> Result<SymbolTable<'data>> {
        let sections = self.sections()?;

        let symtab_idx = sections
            .first_of_type(SHT_SYMTAB, None)
            .ok_or(ElfError::MissingSection("symtab"))?;

        let strtab_idx = match self.options.symbol_strtab {
            Some(idx) => {
                sections.header(idx)?;
                idx
            }
            None => sections
                .first_of_type(SHT_STRTAB, Some(sections.shstrndx()))
                .ok_or(ElfError::MissingSection("strtab"))?,
        };

        let linked = sections.header(symtab_idx)?.sh_link as usize;
        if linked != strtab_idx {
            warn!(
                symtab = symtab_idx,
                strtab = strtab_idx,
                sh_link = linked,
                "Symbol names resolved against a string table other than the linked one"
            );
        }

        SymbolTable::parse(sections.data(symtab_idx)?, sections.data(strtab_idx)?)
    }

    /// One row per section, in storage order
    pub fn list_sections(&self) -> Result<Vec<SectionRow>> {
        self.sections()?.rows()
    }

    /// Object and function symbols, in storage order
    pub fn list_symbols(&self) -> Result<Vec<SymbolRow>> {
        self.symbols()?.rows()
    }
}
