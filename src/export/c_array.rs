//! C source byte-array export

use crate::config::CArrayConfig;
use crate::error::{ElfParserError, Result};
use crate::export::create_output;
use crate::formats::elf::ElfImage;
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// One `const unsigned char` declaration
struct ArrayBlock<'a> {
    name: Cow<'a, str>,
    data: &'a [u8],
}

/// Resolve every array name and body up front.
///
/// The array name is the section name without its first character, so
/// `.text` becomes `_text`.
fn plan_blocks<'a>(image: &ElfImage<'a>, config: &CArrayConfig) -> Result<Vec<ArrayBlock<'a>>> {
    if config.bytes_per_line == 0 {
        return Err(ElfParserError::BadArguments(
            "c_array.bytes_per_line must be at least 1".to_string(),
        ));
    }

    let sections = image.sections()?;
    sections
        .loadable()?
        .into_iter()
        .map(|section| -> Result<ArrayBlock<'a>> {
            Ok(ArrayBlock {
                name: sections.string_at(section.header.sh_name as usize + 1)?,
                data: section.data,
            })
        })
        .collect()
}

fn emit_blocks<W: Write>(blocks: &[ArrayBlock<'_>], out: &mut W, config: &CArrayConfig) -> Result<()> {
    let per_line = config.bytes_per_line;
    let line_end: &[u8] = if config.comma_at_line_end { b",\n" } else { b"\n" };

    for block in blocks {
        debug!(array = %block.name, size = block.data.len(), "Writing C array");

        write!(out, "\n const unsigned char _{}[] = {{\n\n", block.name)?;
        let last = block.data.len() - 1;
        for (i, byte) in block.data.iter().enumerate() {
            write!(out, "0x{:02X}", byte)?;
            if i == last {
                out.write_all(b"\n")?;
            } else if (i + 1) % per_line == 0 {
                out.write_all(line_end)?;
            } else {
                out.write_all(b", ")?;
            }
        }
        out.write_all(b"};\n")?;
    }
    Ok(())
}

/// Write every loadable section as a `const unsigned char` array.
///
/// Returns the number of arrays written. Nothing is written when the
/// section table cannot be resolved.
pub fn write_c_array<W: Write>(
    image: &ElfImage<'_>,
    out: &mut W,
    config: &CArrayConfig,
) -> Result<usize> {
    let blocks = plan_blocks(image, config)?;
    emit_blocks(&blocks, out, config)?;
    Ok(blocks.len())
}

/// Export loadable sections as C arrays to `path`.
///
/// The target is created only after every array has been resolved.
pub fn export_c_array(
    image: &ElfImage<'_>,
    path: Option<&Path>,
    config: &CArrayConfig,
) -> Result<()> {
    let blocks = plan_blocks(image, config)?;
    let mut out = create_output(path)?;
    emit_blocks(&blocks, &mut out, config)?;
    out.flush()?;
    info!(arrays = blocks.len(), "C array export complete");
    Ok(())
}
