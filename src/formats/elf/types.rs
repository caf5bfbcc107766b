//! Core ELF32 types and constants

use bitflags::bitflags;
use std::borrow::Cow;
use std::fmt;

/// ELF decoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElfError {
    InvalidMagic,
    Truncated { offset: usize, needed: usize },
    InvalidOffset { offset: usize },
    InvalidSectionIndex(usize),
    MissingSection(&'static str),
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "Invalid ELF magic"),
            Self::Truncated { offset, needed } => {
                write!(f, "Truncated at {:#x}, needed {} bytes", offset, needed)
            }
            Self::InvalidOffset { offset } => write!(f, "Invalid offset: {:#x}", offset),
            Self::InvalidSectionIndex(idx) => write!(f, "Invalid section index: {}", idx),
            Self::MissingSection(name) => write!(f, "{} section is not found", name),
        }
    }
}

impl std::error::Error for ElfError {}

pub type Result<T> = std::result::Result<T, ElfError>;

/// ELF magic number
pub const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Size of the ELF32 file header
pub const EHDR_SIZE: usize = 52;
/// Size of one ELF32 section header
pub const SHDR_SIZE: usize = 40;
/// Size of one ELF32 symbol table entry
pub const SYM_SIZE: usize = 16;

/// ELF class byte (`e_ident[EI_CLASS]`). Reported, never acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    None,
    Elf32,
    Elf64,
    Unknown(u8),
}

impl From<u8> for ElfClass {
    fn from(val: u8) -> Self {
        match val {
            0 => ElfClass::None,
            1 => ElfClass::Elf32,
            2 => ElfClass::Elf64,
            other => ElfClass::Unknown(other),
        }
    }
}

/// ELF data encoding byte (`e_ident[EI_DATA]`). Reported, never acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfData {
    None,
    Little,
    Big,
    Unknown(u8),
}

impl From<u8> for ElfData {
    fn from(val: u8) -> Self {
        match val {
            0 => ElfData::None,
            1 => ElfData::Little,
            2 => ElfData::Big,
            other => ElfData::Unknown(other),
        }
    }
}

/// ELF identification (first 16 bytes)
#[derive(Debug, Clone, Copy)]
pub struct ElfIdent {
    pub class: ElfClass,
    pub data: ElfData,
    pub version: u8,
    pub osabi: u8,
    pub abiversion: u8,
}

/// ELF32 file header
#[derive(Debug, Clone, Copy)]
pub struct ElfHeader {
    pub ident: ElfIdent,
    pub e_type: u16,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u32,
    pub e_phoff: u32,
    pub e_shoff: u32,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

impl ElfHeader {
    pub fn entry_point(&self) -> u32 {
        self.e_entry
    }

    pub fn section_count(&self) -> usize {
        self.e_shnum as usize
    }

    pub fn section_table_offset(&self) -> usize {
        self.e_shoff as usize
    }

    pub fn shstrndx(&self) -> usize {
        self.e_shstrndx as usize
    }
}

/// File types
pub const ET_NONE: u16 = 0;
pub const ET_REL: u16 = 1;
pub const ET_EXEC: u16 = 2;

/// Machines with a display name
pub const EM_NONE: u16 = 0;
pub const EM_SPARC: u16 = 2;
pub const EM_386: u16 = 3;
pub const EM_68K: u16 = 4;
pub const EM_486: u16 = 6;
pub const EM_MIPS: u16 = 8;
pub const EM_960: u16 = 19;
pub const EM_PPC: u16 = 20;
pub const EM_PPC64: u16 = 21;
pub const EM_V800: u16 = 36;
pub const EM_FR20: u16 = 37;
pub const EM_MCORE: u16 = 39;
pub const EM_ARM: u16 = 40;
pub const EM_SH: u16 = 42;
pub const EM_TRICORE: u16 = 44;
pub const EM_COLDFIRE: u16 = 52;
pub const EM_STARCORE: u16 = 58;
pub const EM_FIREPATH: u16 = 78;
pub const EM_M32R: u16 = 88;
pub const EM_BLACKFIN: u16 = 106;

/// Section types
pub const SHT_NULL: u32 = 0;
pub const SHT_PROGBITS: u32 = 1;
pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_RELA: u32 = 4;
pub const SHT_NOTE: u32 = 7;
pub const SHT_NOBITS: u32 = 8;
pub const SHT_REL: u32 = 9;

bitflags! {
    /// Section flag bits tracked by the tool
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectionFlags: u32 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
    }
}

/// ELF32 section header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionHeader {
    pub sh_name: u32,
    pub sh_type: u32,
    pub sh_flags: u32,
    pub sh_addr: u32,
    pub sh_offset: u32,
    pub sh_size: u32,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u32,
    pub sh_entsize: u32,
}

impl SectionHeader {
    pub fn flags(&self) -> SectionFlags {
        SectionFlags::from_bits_retain(self.sh_flags)
    }

    /// Allocated `PROGBITS` with a nonzero size: the only sections exported.
    pub fn is_loadable(&self) -> bool {
        self.flags().contains(SectionFlags::ALLOC)
            && self.sh_type == SHT_PROGBITS
            && self.sh_size > 0
    }
}

/// ELF32 symbol entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbol {
    pub st_name: u32,
    pub st_value: u32,
    pub st_size: u32,
    pub st_info: u8,
    pub st_other: u8,
    pub st_shndx: u16,
}

impl Symbol {
    pub fn st_bind(&self) -> u8 {
        self.st_info >> 4
    }

    pub fn st_type(&self) -> u8 {
        self.st_info & 0xf
    }

    /// Object and function symbols are the ones listed in the symbol table view.
    pub fn is_listed(&self) -> bool {
        matches!(self.st_type(), STT_OBJECT | STT_FUNC)
    }
}

/// Symbol binding
pub const STB_LOCAL: u8 = 0;
pub const STB_GLOBAL: u8 = 1;
pub const STB_WEAK: u8 = 2;

/// Symbol types
pub const STT_NOTYPE: u8 = 0;
pub const STT_OBJECT: u8 = 1;
pub const STT_FUNC: u8 = 2;
pub const STT_SECTION: u8 = 3;
pub const STT_FILE: u8 = 4;
pub const STT_COMMON: u8 = 5;

/// Section with its resolved name and contents
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub index: usize,
    pub header: SectionHeader,
    pub name: Cow<'a, str>,
    pub data: &'a [u8],
}

impl<'a> Section<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.header.sh_size
    }

    pub fn addr(&self) -> u32 {
        self.header.sh_addr
    }

    pub fn is_loadable(&self) -> bool {
        self.header.is_loadable()
    }
}
