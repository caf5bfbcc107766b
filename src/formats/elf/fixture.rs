//! Hand-assembled little-endian ELF32 images for tests.
//!
//! Shared between the unit tests and the integration tests (which pull the
//! file in with `#[path]`), so it only depends on `std`.
#![allow(dead_code)]

pub const SHT_PROGBITS: u32 = 1;
pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_NOBITS: u32 = 8;

pub const SHF_WRITE: u32 = 0x1;
pub const SHF_ALLOC: u32 = 0x2;
pub const SHF_EXECINSTR: u32 = 0x4;

pub const STB_LOCAL: u8 = 0;
pub const STB_GLOBAL: u8 = 1;
pub const STB_WEAK: u8 = 2;

pub const STT_NOTYPE: u8 = 0;
pub const STT_OBJECT: u8 = 1;
pub const STT_FUNC: u8 = 2;
pub const STT_SECTION: u8 = 3;
pub const STT_FILE: u8 = 4;

/// Offset of `e_shstrndx` inside the file header
pub const SHSTRNDX_OFFSET: usize = 50;
/// Offset of `e_shoff` inside the file header
pub const SHOFF_OFFSET: usize = 32;

#[derive(Debug, Clone)]
pub struct FixtureSection {
    pub name: String,
    pub sh_type: u32,
    pub flags: u32,
    pub addr: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct FixtureSymbol {
    pub name: String,
    pub value: u32,
    pub size: u32,
    pub info: u8,
    pub shndx: u16,
}

#[derive(Debug, Default, Clone, Copy)]
struct RawHeader {
    name: u32,
    sh_type: u32,
    flags: u32,
    addr: u32,
    offset: u32,
    size: u32,
    link: u32,
    info: u32,
    align: u32,
    entsize: u32,
}

/// Builder laying out: file header, section contents, symbol/string tables,
/// then the section header table. Section 0 is the null section; user
/// sections follow in insertion order, then `.symtab` and `.strtab` when
/// symbols exist, and `.shstrtab` last.
#[derive(Debug, Clone)]
pub struct Elf32Builder {
    pub class: u8,
    pub data_encoding: u8,
    pub e_type: u16,
    pub machine: u16,
    pub entry: u32,
    sections: Vec<FixtureSection>,
    symbols: Vec<FixtureSymbol>,
}

impl Default for Elf32Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Elf32Builder {
    pub fn new() -> Self {
        Self {
            class: 1,
            data_encoding: 1,
            e_type: 2,
            machine: 40,
            entry: 0,
            sections: Vec::new(),
            symbols: Vec::new(),
        }
    }

    pub fn entry(mut self, entry: u32) -> Self {
        self.entry = entry;
        self
    }

    pub fn machine(mut self, machine: u16) -> Self {
        self.machine = machine;
        self
    }

    pub fn section(mut self, name: &str, sh_type: u32, flags: u32, addr: u32, data: &[u8]) -> Self {
        self.sections.push(FixtureSection {
            name: name.to_string(),
            sh_type,
            flags,
            addr,
            data: data.to_vec(),
        });
        self
    }

    /// Allocated, executable `PROGBITS` section
    pub fn text(self, name: &str, addr: u32, data: &[u8]) -> Self {
        self.section(name, SHT_PROGBITS, SHF_ALLOC | SHF_EXECINSTR, addr, data)
    }

    /// Non-allocated `PROGBITS` section, e.g. debug data
    pub fn debug(self, name: &str, data: &[u8]) -> Self {
        self.section(name, SHT_PROGBITS, 0, 0, data)
    }

    pub fn symbol(mut self, name: &str, value: u32, size: u32, bind: u8, kind: u8) -> Self {
        self.symbols.push(FixtureSymbol {
            name: name.to_string(),
            value,
            size,
            info: (bind << 4) | (kind & 0xf),
            shndx: 1,
        });
        self
    }

    pub fn section_count(&self) -> usize {
        let tables = if self.symbols.is_empty() { 0 } else { 2 };
        1 + self.sections.len() + tables + 1
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = vec![0u8; 52];
        let mut shstrtab = vec![0u8];
        let mut headers = vec![RawHeader::default()];

        for section in &self.sections {
            let name = push_str(&mut shstrtab, &section.name);
            let offset = body.len() as u32;
            if section.sh_type != SHT_NOBITS {
                body.extend_from_slice(&section.data);
            }
            headers.push(RawHeader {
                name,
                sh_type: section.sh_type,
                flags: section.flags,
                addr: section.addr,
                offset,
                size: section.data.len() as u32,
                align: 1,
                ..Default::default()
            });
        }

        if !self.symbols.is_empty() {
            let strtab_index = headers.len() as u32 + 1;
            let mut strtab = vec![0u8];
            let mut symtab = vec![0u8; 16];
            for sym in &self.symbols {
                let name = push_str(&mut strtab, &sym.name);
                symtab.extend_from_slice(&name.to_le_bytes());
                symtab.extend_from_slice(&sym.value.to_le_bytes());
                symtab.extend_from_slice(&sym.size.to_le_bytes());
                symtab.push(sym.info);
                symtab.push(0);
                symtab.extend_from_slice(&sym.shndx.to_le_bytes());
            }

            let name = push_str(&mut shstrtab, ".symtab");
            headers.push(RawHeader {
                name,
                sh_type: SHT_SYMTAB,
                offset: body.len() as u32,
                size: symtab.len() as u32,
                link: strtab_index,
                info: 1,
                align: 4,
                entsize: 16,
                ..Default::default()
            });
            body.extend_from_slice(&symtab);

            let name = push_str(&mut shstrtab, ".strtab");
            headers.push(RawHeader {
                name,
                sh_type: SHT_STRTAB,
                offset: body.len() as u32,
                size: strtab.len() as u32,
                align: 1,
                ..Default::default()
            });
            body.extend_from_slice(&strtab);
        }

        let name = push_str(&mut shstrtab, ".shstrtab");
        headers.push(RawHeader {
            name,
            sh_type: SHT_STRTAB,
            offset: body.len() as u32,
            size: shstrtab.len() as u32,
            align: 1,
            ..Default::default()
        });
        body.extend_from_slice(&shstrtab);

        while body.len() % 4 != 0 {
            body.push(0);
        }
        let shoff = body.len() as u32;
        for h in &headers {
            for field in [
                h.name, h.sh_type, h.flags, h.addr, h.offset, h.size, h.link, h.info, h.align,
                h.entsize,
            ] {
                body.extend_from_slice(&field.to_le_bytes());
            }
        }

        body[0..4].copy_from_slice(b"\x7fELF");
        body[4] = self.class;
        body[5] = self.data_encoding;
        body[6] = 1;
        put_u16(&mut body, 16, self.e_type);
        put_u16(&mut body, 18, self.machine);
        put_u32(&mut body, 20, 1);
        put_u32(&mut body, 24, self.entry);
        put_u32(&mut body, SHOFF_OFFSET, shoff);
        put_u16(&mut body, 40, 52);
        put_u16(&mut body, 46, 40);
        put_u16(&mut body, 48, headers.len() as u16);
        put_u16(&mut body, SHSTRNDX_OFFSET, (headers.len() - 1) as u16);

        body
    }
}

fn push_str(table: &mut Vec<u8>, s: &str) -> u32 {
    let offset = table.len() as u32;
    table.extend_from_slice(s.as_bytes());
    table.push(0);
    offset
}

pub fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
