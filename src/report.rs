//! Text rendering of headers, tables and lists.
//!
//! Column widths and banners follow the classic ElfParser console layout so
//! existing scripts that scrape the output keep working.

use crate::error::ElfParserError;
use crate::formats::elf::sections::SectionRow;
use crate::formats::elf::symbols::SymbolRow;
use crate::formats::elf::tables::{file_type_name, machine_name};
use crate::formats::elf::{ElfClass, ElfData, ElfHeader};
use serde::Serialize;
use std::io::{self, Write};

/// Printed when the magic check fails
pub const INVALID_INPUT: &str = "This is not a valid ELF file [KO]";

/// Display form of the file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub class: &'static str,
    pub endianness: &'static str,
    pub e_type: u16,
    pub type_text: &'static str,
    pub machine: u16,
    pub machine_text: &'static str,
    pub version: u32,
    pub entry: u32,
    pub phoff: u32,
    pub shoff: u32,
    pub flags: u32,
    pub ehsize: u16,
    pub phentsize: u16,
    pub phnum: u16,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

impl From<&ElfHeader> for HeaderView {
    fn from(h: &ElfHeader) -> Self {
        Self {
            class: match h.ident.class {
                ElfClass::Elf32 => "32 bit",
                ElfClass::Elf64 => "64 bit",
                _ => "unknown class",
            },
            endianness: match h.ident.data {
                ElfData::Little => "little endian",
                ElfData::Big => "big endian",
                _ => "unknown endian",
            },
            e_type: h.e_type,
            type_text: file_type_name(h.e_type),
            machine: h.e_machine,
            machine_text: machine_name(h.e_machine),
            version: h.e_version,
            entry: h.e_entry,
            phoff: h.e_phoff,
            shoff: h.e_shoff,
            flags: h.e_flags,
            ehsize: h.e_ehsize,
            phentsize: h.e_phentsize,
            phnum: h.e_phnum,
            shentsize: h.e_shentsize,
            shnum: h.e_shnum,
            shstrndx: h.e_shstrndx,
        }
    }
}

/// Header dump, trailing padding included
pub fn write_header<W: Write>(out: &mut W, header: &HeaderView) -> io::Result<()> {
    write!(out, "\nELF File Header :\n\n")?;
    // Only the fallback class line is padded
    let class_pad = if header.class.starts_with("unknown") { " " } else { "" };
    writeln!(out, "Class      = {}{}", header.class, class_pad)?;
    writeln!(out, "Endianness = {} ", header.endianness)?;
    writeln!(out, "Type       = 0x{:x} ({})", header.e_type, header.type_text)?;
    writeln!(
        out,
        "Machine    = 0x{:x} ({})",
        header.machine, header.machine_text
    )?;
    writeln!(out, "Version    = 0x{:x}     ", header.version)?;
    writeln!(out, "Entry      = 0x{:x}     ", header.entry)?;
    writeln!(out, "Phoff      = 0x{:x}     ", header.phoff)?;
    writeln!(out, "Shoff      = 0x{:x}     ", header.shoff)?;
    writeln!(out, "Flags      = 0x{:x}     ", header.flags)?;
    writeln!(out, "Ehsize     = {}       ", header.ehsize)?;
    writeln!(out, "Phentsize  = {}       ", header.phentsize)?;
    writeln!(out, "Phnum      = {}       ", header.phnum)?;
    writeln!(out, "Shentsize  = {}       ", header.shentsize)?;
    writeln!(out, "Shnum      = {}       ", header.shnum)?;
    writeln!(out, "Shstrndx   = {}       ", header.shstrndx)?;
    Ok(())
}

pub fn write_section_table<W: Write>(out: &mut W, rows: &[SectionRow]) -> io::Result<()> {
    write!(out, "\nSECTIONS TABLE : \n")?;
    writeln!(
        out,
        "\n{:<10}{:<20}{:<20}{:<20}{:<22}{:<22}{:<22}",
        "ID", "Section", "Type", "Flags", "Addr", "Offset", "Size"
    )?;
    for row in rows {
        writeln!(
            out,
            "[{:<2}{:<7}{:<20}{:<20}{:<20}0x{:<20x}0x{:<20x}0x{:<20x}",
            row.index, "]", row.name, row.type_text, row.flags_text, row.addr, row.offset, row.size
        )?;
    }
    Ok(())
}

fn write_symbol_columns<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\n{:<17}{:<17}{:<15}{:<15}{:<15}",
        "Value", "Size", "Bind", "Type", "Name"
    )
}

fn write_symbol_row<W: Write>(out: &mut W, row: &SymbolRow) -> io::Result<()> {
    writeln!(
        out,
        "0x{:<15x}0x{:<15x}{:<15}{:<15}{:<15}",
        row.value, row.size, row.bind_text, row.type_text, row.name
    )
}

pub fn write_symbol_table<W: Write>(out: &mut W, rows: &[SymbolRow]) -> io::Result<()> {
    write!(out, "\nSYMBOL TABLE : \n")?;
    write_symbol_columns(out)?;
    writeln!(out)?;
    for row in rows {
        write_symbol_row(out, row)?;
    }
    Ok(())
}

/// Search result block; nothing is printed for a miss
pub fn write_symbol_info<W: Write>(
    out: &mut W,
    name: &str,
    row: Option<&SymbolRow>,
) -> io::Result<()> {
    let Some(row) = row else {
        return Ok(());
    };
    write!(out, "\nSYMBOL INFO ({}) : \n", name)?;
    write_symbol_columns(out)?;
    write_symbol_row(out, row)
}

pub fn write_source_files<W: Write>(out: &mut W, files: &[String]) -> io::Result<()> {
    for file in files {
        writeln!(out, "{}", file)?;
    }
    Ok(())
}

pub fn write_invalid_input<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", INVALID_INPUT)
}

/// Diagnostic for an operation that failed; processing goes on afterwards
pub fn write_failure<W: Write>(out: &mut W, err: &ElfParserError) -> io::Result<()> {
    write!(out, "\n {} !\n", err)
}
