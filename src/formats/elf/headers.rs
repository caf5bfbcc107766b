//! ELF header parsing

use crate::formats::elf::types::*;
use crate::formats::elf::utils::FieldRead;
use tracing::warn;

/// Parse ELF identification bytes
pub fn parse_ident(data: &[u8]) -> Result<ElfIdent> {
    if data.len() < 4 || &data[0..4] != ELF_MAGIC {
        return Err(ElfError::InvalidMagic);
    }

    if data.len() < 16 {
        return Err(ElfError::Truncated {
            offset: 0,
            needed: 16,
        });
    }

    Ok(ElfIdent {
        class: ElfClass::from(data[4]),
        data: ElfData::from(data[5]),
        version: data[6],
        osabi: data[7],
        abiversion: data[8],
    })
}

/// Parse the ELF32 file header.
///
/// Only the magic bytes and the header length are validated. The class and
/// data-encoding bytes are recorded for display; the rest of the header is
/// decoded with the ELF32 layout regardless of what they say.
pub fn parse_header(data: &[u8]) -> Result<ElfHeader> {
    let ident = parse_ident(data)?;

    if data.len() < EHDR_SIZE {
        return Err(ElfError::Truncated {
            offset: 0,
            needed: EHDR_SIZE,
        });
    }

    if ident.class != ElfClass::Elf32 {
        warn!(class = ?ident.class, "Not an ELF32 file, decoding with the 32-bit layout anyway");
    }

    Ok(ElfHeader {
        ident,
        e_type: data.read_u16(16)?,
        e_machine: data.read_u16(18)?,
        e_version: data.read_u32(20)?,
        e_entry: data.read_u32(24)?,
        e_phoff: data.read_u32(28)?,
        e_shoff: data.read_u32(32)?,
        e_flags: data.read_u32(36)?,
        e_ehsize: data.read_u16(40)?,
        e_phentsize: data.read_u16(42)?,
        e_phnum: data.read_u16(44)?,
        e_shentsize: data.read_u16(46)?,
        e_shnum: data.read_u16(48)?,
        e_shstrndx: data.read_u16(50)?,
    })
}
