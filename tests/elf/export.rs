use crate::common::{self, fixture};
use elfparser::config::{CArrayConfig, S19Config};
use elfparser::export::srec::{encode_record, RecordType};
use elfparser::export::{export_c_array, export_s19};
use elfparser::{ElfImage, ElfParserError};
use std::fs;

/// Parse an S-record line into (type digit, length byte, payload bytes)
fn decode_line(line: &str) -> (u8, u8, Vec<u8>) {
    let kind = line.as_bytes()[1] - b'0';
    let bytes = hex::decode(&line[2..]).expect("hex record");
    let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    assert_eq!(sum, 0xFF, "bad checksum in {line}");
    assert_eq!(bytes[0] as usize, bytes.len() - 1, "bad length in {line}");
    (kind, bytes[0], bytes[1..bytes.len() - 1].to_vec())
}

#[test]
fn test_c_export_is_idempotent() {
    let data = common::firmware_image();
    let image = ElfImage::parse(&data).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firmware.c");

    export_c_array(&image, Some(&path), &CArrayConfig::default()).unwrap();
    let first = fs::read(&path).unwrap();
    export_c_array(&image, Some(&path), &CArrayConfig::default()).unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);

    let text = String::from_utf8(first).unwrap();
    let arrays: Vec<_> = text
        .lines()
        .filter(|l| l.starts_with(" const unsigned char"))
        .collect();
    assert_eq!(
        arrays,
        [
            " const unsigned char _text[] = {",
            " const unsigned char _rodata[] = {",
            " const unsigned char _data[] = {",
        ]
    );
    assert!(text.contains("0x76, 0x31, 0x2E, 0x32, 0x00\n};\n"));
    assert_eq!(text.matches("};\n").count(), 3);
}

#[test]
fn test_s19_file_structure() {
    let data = common::firmware_image();
    let image = ElfImage::parse(&data).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firmware.s19");

    let summary = export_s19(&image, Some(&path), &S19Config::default()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<_> = text.lines().map(decode_line).collect();

    assert_eq!(records.first().unwrap().0, 0);
    assert_eq!(&records[0].2[2..], b"ELF_PARSER_BY_CHALANDI_AMINE_2019\0");
    assert_eq!(records[0].1, 0x25);

    let data_records: Vec<_> = records.iter().filter(|r| r.0 == 3).collect();
    assert_eq!(data_records.len(), 5);
    assert_eq!(summary.data_records, 5);

    // Count record carries the number of S3 records
    let count = &records[records.len() - 2];
    assert_eq!(count.0, 5);
    assert_eq!(count.1, 3);
    assert_eq!(u16::from_be_bytes([count.2[0], count.2[1]]), 5);

    // Termination record carries the entry point
    let term = records.last().unwrap();
    assert_eq!(term.0, 7);
    assert_eq!(
        u32::from_be_bytes([term.2[0], term.2[1], term.2[2], term.2[3]]),
        image.header().entry_point()
    );

    // Addresses of the .text records advance by the chunk size
    let addrs: Vec<u32> = data_records
        .iter()
        .take(3)
        .map(|r| u32::from_be_bytes([r.2[0], r.2[1], r.2[2], r.2[3]]))
        .collect();
    assert_eq!(addrs, [0x0800_0000, 0x0800_001C, 0x0800_0038]);
    assert_eq!(data_records[2].1 as usize, 4 + 4 + 1);
}

#[test]
fn test_ten_byte_section_record() {
    let bytes: Vec<u8> = (1..=10).collect();
    let data = fixture::Elf32Builder::new()
        .entry(0x1000)
        .text(".text", 0x1000, &bytes)
        .build();
    let image = ElfImage::parse(&data).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.s19");
    export_s19(&image, Some(&path), &S19Config::default()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("S30F00001000"));
    assert_eq!(
        lines[1],
        encode_record(RecordType::Data32, 0x1000, &bytes).unwrap()
    );
    // 0x0F + 0x10 + 55 = 0x56
    assert!(lines[1].ends_with("A9"));
}

#[test]
fn test_export_errors() {
    let data = common::firmware_image();
    let image = ElfImage::parse(&data).unwrap();

    assert!(matches!(
        export_s19(&image, None, &S19Config::default()),
        Err(ElfParserError::BadArguments(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("no").join("such").join("dir.c");
    assert!(matches!(
        export_c_array(&image, Some(&blocked), &CArrayConfig::default()),
        Err(ElfParserError::Io(_))
    ));
}

#[test]
fn test_failed_exports_keep_previous_output() {
    let mut data = common::firmware_image();
    let len = data.len() as u32;
    fixture::put_u32(&mut data, fixture::SHOFF_OFFSET, len + 40);
    let image = ElfImage::parse(&data).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let s19 = dir.path().join("firmware.s19");
    let c_file = dir.path().join("firmware.c");
    fs::write(&s19, "PREVIOUS GOOD IMAGE\n").unwrap();
    fs::write(&c_file, "PREVIOUS GOOD IMAGE\n").unwrap();

    assert!(matches!(
        export_s19(&image, Some(&s19), &S19Config::default()),
        Err(ElfParserError::Malformed(_))
    ));
    assert!(export_c_array(&image, Some(&c_file), &CArrayConfig::default()).is_err());
    assert_eq!(fs::read_to_string(&s19).unwrap(), "PREVIOUS GOOD IMAGE\n");
    assert_eq!(fs::read_to_string(&c_file).unwrap(), "PREVIOUS GOOD IMAGE\n");

    // Rejected options behave the same on a sound image
    let data = common::firmware_image();
    let image = ElfImage::parse(&data).unwrap();
    let config = S19Config {
        bytes_per_record: 0,
        ..S19Config::default()
    };
    assert!(export_s19(&image, Some(&s19), &config).is_err());
    assert_eq!(fs::read_to_string(&s19).unwrap(), "PREVIOUS GOOD IMAGE\n");
}
