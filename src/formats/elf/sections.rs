//! Section table decoding and listing

use crate::formats::elf::tables::{section_flags_text, section_type_name};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::{read_cstring, slice_at, FieldRead};
use serde::Serialize;
use std::borrow::Cow;

/// One row of the section table listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
    pub index: usize,
    pub name: String,
    pub type_text: &'static str,
    pub flags_text: String,
    pub addr: u32,
    pub offset: u32,
    pub size: u32,
}

/// Decoded section header table plus the section-name string table
pub struct SectionTable<'a> {
    headers: Vec<SectionHeader>,
    names: &'a [u8],
    data: &'a [u8],
    shstrndx: usize,
}

impl<'a> SectionTable<'a> {
    /// Parse the section table described by `header`.
    ///
    /// Fails when the table or the section-name string table lies outside
    /// the buffer, or when `e_shstrndx` does not name a section.
    pub fn parse(data: &'a [u8], header: &ElfHeader) -> Result<Self> {
        let sh_offset = header.section_table_offset();
        let sh_num = header.section_count();
        let shstrndx = header.shstrndx();

        if sh_num == 0 {
            return Ok(Self {
                headers: Vec::new(),
                names: &[],
                data,
                shstrndx,
            });
        }

        let table = slice_at(data, sh_offset, sh_num * SHDR_SIZE)?;
        let headers = table
            .chunks_exact(SHDR_SIZE)
            .map(parse_section_header)
            .collect::<Result<Vec<_>>>()?;

        let names_header = headers
            .get(shstrndx)
            .ok_or(ElfError::InvalidSectionIndex(shstrndx))?;
        let names = slice_at(
            data,
            names_header.sh_offset as usize,
            names_header.sh_size as usize,
        )?;

        Ok(Self {
            headers,
            names,
            data,
            shstrndx,
        })
    }

    /// Count sections
    pub fn count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the section-name string table
    pub fn shstrndx(&self) -> usize {
        self.shstrndx
    }

    pub fn headers(&self) -> &[SectionHeader] {
        &self.headers
    }

    pub fn header(&self, index: usize) -> Result<&SectionHeader> {
        self.headers
            .get(index)
            .ok_or(ElfError::InvalidSectionIndex(index))
    }

    /// String at `offset` in the section-name string table
    pub fn string_at(&self, offset: usize) -> Result<Cow<'a, str>> {
        read_cstring(self.names, offset)
    }

    /// Resolve the name of section `index`
    pub fn name(&self, index: usize) -> Result<Cow<'a, str>> {
        let header = self.header(index)?;
        self.string_at(header.sh_name as usize)
    }

    /// File contents of section `index`; empty for `NOBITS`.
    pub fn data(&self, index: usize) -> Result<&'a [u8]> {
        let header = self.header(index)?;
        if header.sh_type == SHT_NOBITS {
            return Ok(&[]);
        }
        slice_at(
            self.data,
            header.sh_offset as usize,
            header.sh_size as usize,
        )
    }

    /// Get section by index
    pub fn by_index(&self, index: usize) -> Result<Section<'a>> {
        Ok(Section {
            index,
            header: *self.header(index)?,
            name: self.name(index)?,
            data: self.data(index)?,
        })
    }

    /// First section named `name`, in storage order
    pub fn by_name(&self, name: &str) -> Result<Option<Section<'a>>> {
        for index in 0..self.headers.len() {
            if self.name(index)? == name {
                return self.by_index(index).map(Some);
            }
        }
        Ok(None)
    }

    /// Index of the first section of type `sh_type`, skipping `skip`
    pub fn first_of_type(&self, sh_type: u32, skip: Option<usize>) -> Option<usize> {
        self.headers
            .iter()
            .enumerate()
            .find(|(i, h)| h.sh_type == sh_type && Some(*i) != skip)
            .map(|(i, _)| i)
    }

    /// Allocated, nonempty `PROGBITS` sections in storage order
    pub fn loadable(&self) -> Result<Vec<Section<'a>>> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_loadable())
            .map(|(i, _)| self.by_index(i))
            .collect()
    }

    /// One row per section header, in storage order
    pub fn rows(&self) -> Result<Vec<SectionRow>> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, h)| {
                Ok(SectionRow {
                    index,
                    name: self.string_at(h.sh_name as usize)?.into_owned(),
                    type_text: section_type_name(h.sh_type),
                    flags_text: section_flags_text(h.flags()),
                    addr: h.sh_addr,
                    offset: h.sh_offset,
                    size: h.sh_size,
                })
            })
            .collect()
    }
}

/// Parse a single 40-byte section header
fn parse_section_header(raw: &[u8]) -> Result<SectionHeader> {
    Ok(SectionHeader {
        sh_name: raw.read_u32(0)?,
        sh_type: raw.read_u32(4)?,
        sh_flags: raw.read_u32(8)?,
        sh_addr: raw.read_u32(12)?,
        sh_offset: raw.read_u32(16)?,
        sh_size: raw.read_u32(20)?,
        sh_link: raw.read_u32(24)?,
        sh_info: raw.read_u32(28)?,
        sh_addralign: raw.read_u32(32)?,
        sh_entsize: raw.read_u32(36)?,
    })
}
