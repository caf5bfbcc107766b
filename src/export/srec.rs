//! Motorola S-record (S19) export
//!
//! Layout of a file: one `S0` header carrying the configured tag, `S3`
//! data records for each loadable section, an `S5` (or `S6`) record with
//! the number of data records and an `S7` record holding the entry point.
//! Every record is `S<type><len><address><data><checksum>` in uppercase hex,
//! where `len` counts the address, data and checksum bytes and the checksum
//! is the one's complement of the low byte of the sum of `len`, address and
//! data bytes.

use crate::config::S19Config;
use crate::error::{ElfParserError, Result};
use crate::export::create_output;
use crate::formats::elf::ElfImage;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, trace};

/// Largest value of the one-byte length field
const MAX_RECORD_LEN: usize = 0xFF;

/// S-record types produced by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// `S0`, 16-bit address, tag payload
    Header,
    /// `S3`, 32-bit address, data payload
    Data32,
    /// `S5`, 16-bit record count
    Count16,
    /// `S6`, 24-bit record count
    Count24,
    /// `S7`, 32-bit entry address
    Termination32,
}

impl RecordType {
    fn digit(self) -> u8 {
        match self {
            RecordType::Header => 0,
            RecordType::Data32 => 3,
            RecordType::Count16 => 5,
            RecordType::Count24 => 6,
            RecordType::Termination32 => 7,
        }
    }

    /// Width of the address field in bytes
    fn address_len(self) -> usize {
        match self {
            RecordType::Header | RecordType::Count16 => 2,
            RecordType::Count24 => 3,
            RecordType::Data32 | RecordType::Termination32 => 4,
        }
    }
}

/// One's complement of the low byte of the byte sum
pub fn checksum(len: u8, address: &[u8], data: &[u8]) -> u8 {
    let sum = address
        .iter()
        .chain(data)
        .fold(len, |acc, b| acc.wrapping_add(*b));
    !sum
}

/// Encode a single record, without the line terminator.
///
/// `address` is truncated to the width of the record type.
pub fn encode_record(kind: RecordType, address: u32, data: &[u8]) -> Result<String> {
    let addr_len = kind.address_len();
    let len = addr_len + data.len() + 1;
    if len > MAX_RECORD_LEN {
        return Err(ElfParserError::BadArguments(format!(
            "S-record payload of {} bytes does not fit the length field",
            data.len()
        )));
    }

    let addr_bytes = &address.to_be_bytes()[4 - addr_len..];
    let len = len as u8;
    Ok(format!(
        "S{}{:02X}{}{}{:02X}",
        kind.digit(),
        len,
        hex::encode_upper(addr_bytes),
        hex::encode_upper(data),
        checksum(len, addr_bytes, data)
    ))
}

/// What an S19 export wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct S19Summary {
    /// Number of `S3` records
    pub data_records: u32,
    /// Address carried by the `S7` record
    pub entry: u32,
}

fn write_record<W: Write>(out: &mut W, kind: RecordType, address: u32, data: &[u8]) -> Result<()> {
    let record = encode_record(kind, address, data)?;
    trace!(record = %record, "S-record");
    writeln!(out, "{}", record)?;
    Ok(())
}

/// Everything an S19 export needs, checked before any output exists
struct S19Plan<'a> {
    header: String,
    /// Base address and contents of each loadable section
    sections: Vec<(u32, &'a [u8])>,
    per_record: usize,
    data_records: u32,
    entry: u32,
}

fn plan_s19<'a>(image: &ElfImage<'a>, config: &S19Config) -> Result<S19Plan<'a>> {
    let per_record = config.bytes_per_record;
    if per_record == 0 || per_record + RecordType::Data32.address_len() + 1 > MAX_RECORD_LEN {
        return Err(ElfParserError::BadArguments(format!(
            "s19.bytes_per_record must be between 1 and {}, got {}",
            MAX_RECORD_LEN - RecordType::Data32.address_len() - 1,
            per_record
        )));
    }

    let header = encode_record(RecordType::Header, 0, config.header_tag.as_bytes())?;

    let sections: Vec<(u32, &'a [u8])> = image
        .sections()?
        .loadable()?
        .into_iter()
        .map(|section| (section.addr(), section.data))
        .collect();

    let data_records: usize = sections
        .iter()
        .map(|(_, data)| data.len().div_ceil(per_record))
        .sum();
    let data_records = u32::try_from(data_records)
        .ok()
        .filter(|count| *count <= 0xFF_FFFF)
        .ok_or_else(|| {
            ElfParserError::BadArguments(format!(
                "{} data records exceed the 24-bit count record",
                data_records
            ))
        })?;

    Ok(S19Plan {
        header,
        sections,
        per_record,
        data_records,
        entry: image.header().entry_point(),
    })
}

fn emit_s19<W: Write>(plan: &S19Plan<'_>, out: &mut W) -> Result<S19Summary> {
    writeln!(out, "{}", plan.header)?;

    for &(base, data) in &plan.sections {
        debug!(addr = base, size = data.len(), "Writing S3 records");
        let mut address = base;
        for chunk in data.chunks(plan.per_record) {
            write_record(out, RecordType::Data32, address, chunk)?;
            address = address.wrapping_add(chunk.len() as u32);
        }
    }

    let count = if plan.data_records <= 0xFFFF {
        RecordType::Count16
    } else {
        RecordType::Count24
    };
    write_record(out, count, plan.data_records, &[])?;
    write_record(out, RecordType::Termination32, plan.entry, &[])?;

    Ok(S19Summary {
        data_records: plan.data_records,
        entry: plan.entry,
    })
}

/// Write the full S19 image of `image` to `out`.
///
/// Nothing is written when the configuration or the section table is
/// rejected.
pub fn write_s19<W: Write>(
    image: &ElfImage<'_>,
    out: &mut W,
    config: &S19Config,
) -> Result<S19Summary> {
    let plan = plan_s19(image, config)?;
    emit_s19(&plan, out)
}

/// Export loadable sections as an S19 file at `path`.
///
/// The target is only created once the records are known to be encodable,
/// so a rejected image leaves an existing file untouched.
pub fn export_s19(
    image: &ElfImage<'_>,
    path: Option<&Path>,
    config: &S19Config,
) -> Result<S19Summary> {
    let plan = plan_s19(image, config)?;
    let mut out = create_output(path)?;
    let summary = emit_s19(&plan, &mut out)?;
    out.flush()?;
    info!(
        data_records = summary.data_records,
        entry = summary.entry,
        "S19 export complete"
    );
    Ok(summary)
}
