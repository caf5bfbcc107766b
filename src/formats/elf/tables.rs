//! Display names for ELF numeric codes
//!
//! Every lookup falls back to an empty string for codes it does not know,
//! so callers print the raw value next to an empty mnemonic.

use crate::formats::elf::types::*;

const SYMBOL_BINDS: &[(u8, &str)] = &[
    (STB_LOCAL, "LOCAL"),
    (STB_GLOBAL, "GLOBAL"),
    (STB_WEAK, "WEAK"),
];

const SYMBOL_TYPES: &[(u8, &str)] = &[
    (STT_NOTYPE, "UNSPECIFIED"),
    (STT_OBJECT, "OBJECT"),
    (STT_FUNC, "FUNCTION"),
    (STT_SECTION, "SECTION"),
    (STT_FILE, "FILE"),
    (STT_COMMON, "COMMON"),
];

const FILE_TYPES: &[(u16, &str)] = &[
    (ET_NONE, "Unknown ELF file type"),
    (ET_REL, "Relocatable ELF"),
    (ET_EXEC, "Executable ELF"),
];

const MACHINES: &[(u16, &str)] = &[
    (EM_NONE, "Invalid machine"),
    (EM_SPARC, "Sun SPARC"),
    (EM_386, "Intel 80386"),
    (EM_68K, "Freescale 68000"),
    (EM_486, "Intel 80486"),
    (EM_MIPS, "MIPS"),
    (EM_960, "Intel i960"),
    (EM_PPC, "Power Architecture"),
    (EM_PPC64, "Power Architecture 64-bit mode"),
    (EM_V800, "Renesas V800 series"),
    (EM_FR20, "Fujitsu FR"),
    (EM_MCORE, "Freescale MCore"),
    (EM_ARM, "ARM"),
    (EM_SH, "Hitachi SH"),
    (EM_TRICORE, "Infineon TriCore"),
    (EM_COLDFIRE, "Freescale ColdFire"),
    (EM_STARCORE, "Freescale StarCore"),
    (EM_FIREPATH, "Broadcom FirePath"),
    (EM_M32R, "Renesas M32R"),
    (EM_BLACKFIN, "ADI Blackfin"),
];

const SECTION_TYPES: &[(u32, &str)] = &[
    (SHT_NULL, "NULL"),
    (SHT_PROGBITS, "PROGBITS"),
    (SHT_SYMTAB, "SYMTAB"),
    (SHT_STRTAB, "STRTAB"),
    (SHT_RELA, "RELA"),
    (SHT_NOTE, "NOTE"),
    (SHT_NOBITS, "NOBITS"),
    (SHT_REL, "REL"),
];

/// Flag letters in column order
const SECTION_FLAGS: [(SectionFlags, char); 3] = [
    (SectionFlags::WRITE, 'W'),
    (SectionFlags::ALLOC, 'A'),
    (SectionFlags::EXECINSTR, 'X'),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, &'static str)], code: K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == code)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

pub fn symbol_bind_name(bind: u8) -> &'static str {
    lookup(SYMBOL_BINDS, bind)
}

pub fn symbol_type_name(kind: u8) -> &'static str {
    lookup(SYMBOL_TYPES, kind)
}

pub fn file_type_name(e_type: u16) -> &'static str {
    lookup(FILE_TYPES, e_type)
}

pub fn machine_name(machine: u16) -> &'static str {
    lookup(MACHINES, machine)
}

pub fn section_type_name(sh_type: u32) -> &'static str {
    lookup(SECTION_TYPES, sh_type)
}

/// Fixed three-column flag text, e.g. `" AX"` for an allocated code section.
pub fn section_flags_text(flags: SectionFlags) -> String {
    SECTION_FLAGS
        .iter()
        .map(|&(flag, letter)| if flags.contains(flag) { letter } else { ' ' })
        .collect()
}
