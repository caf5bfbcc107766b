//! Common test utilities and helpers.
//!
//! ELF32 images are assembled in memory with the same builder the unit
//! tests use, so no sample binaries need to be checked in.

#![allow(dead_code)]

#[path = "../../src/formats/elf/fixture.rs"]
pub mod fixture;

use fixture::Elf32Builder;
use std::io::Write;
use tempfile::NamedTempFile;

/// Small firmware-like image: code, constants, initialised data, a BSS
/// section, debug line info and a handful of symbols.
pub fn firmware_image() -> Vec<u8> {
    let code: Vec<u8> = (0..60u8).collect();
    Elf32Builder::new()
        .entry(0x0800_0000)
        .text(".text", 0x0800_0000, &code)
        .section(
            ".rodata",
            fixture::SHT_PROGBITS,
            fixture::SHF_ALLOC,
            0x0800_1000,
            b"v1.2\0",
        )
        .section(
            ".data",
            fixture::SHT_PROGBITS,
            fixture::SHF_WRITE | fixture::SHF_ALLOC,
            0x2000_0000,
            &[0xAA; 8],
        )
        .section(
            ".bss",
            fixture::SHT_NOBITS,
            fixture::SHF_WRITE | fixture::SHF_ALLOC,
            0x2000_0008,
            &[0; 64],
        )
        .debug(
            ".debug_line",
            b"\x10\x00\x02C:/work/fw/src/main.c\0C:/work/fw/inc/board.h\0\
              main.c\0C:/work/fw/src/main.c\0D:\\tools\\crt0.s\0",
        )
        .symbol("main.c", 0, 0, fixture::STB_LOCAL, fixture::STT_FILE)
        .symbol(".text", 0x0800_0000, 0, fixture::STB_LOCAL, fixture::STT_SECTION)
        .symbol("reset_handler", 0x0800_0000, 16, fixture::STB_GLOBAL, fixture::STT_FUNC)
        .symbol("main", 0x0800_0010, 44, fixture::STB_GLOBAL, fixture::STT_FUNC)
        .symbol("tick_count", 0x2000_0008, 4, fixture::STB_LOCAL, fixture::STT_OBJECT)
        .symbol("board_init", 0x0800_0030, 0, fixture::STB_WEAK, fixture::STT_FUNC)
        .build()
}

/// Write `data` to a fresh temporary file
pub fn temp_file(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(data).expect("write temp file");
    file
}
