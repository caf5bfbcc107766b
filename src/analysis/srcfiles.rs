//! Source file list scraped from `.debug_line`
//!
//! No DWARF decoding happens here. The section is treated as a bag of
//! NUL-terminated strings and run through four stages:
//!
//! 1. keep path-like bytes, turning `/` into `\` (NUL ends a line)
//! 2. keep lines ending in a source or header extension
//! 3. drop repeats, first occurrence wins
//! 4. keep lines carrying a drive marker (`:\`)

use crate::config::{DedupStrategy, SourceListConfig};
use crate::error::{ElfParserError, Result};
use crate::formats::elf::ElfImage;
use memchr::memmem;
use std::collections::HashSet;
use tracing::debug;

/// Section scanned for file names
pub const DEBUG_LINE: &str = ".debug_line";

const DRIVE_MARKER: &[u8] = b":\\";

fn is_path_byte(b: u8) -> bool {
    matches!(b, 0 | b' ' | b'.' | b'_' | b':' | b'\\' | b'/') || b.is_ascii_alphanumeric()
}

/// Stage 1: split into candidate lines.
///
/// Works on its own staging copy; `data` is left untouched. Bytes after
/// the last NUL do not form a line.
pub fn candidate_lines(data: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut staging = String::new();
    for &b in data.iter().filter(|&&b| is_path_byte(b)) {
        match b {
            0 => lines.push(std::mem::take(&mut staging)),
            b'/' => staging.push('\\'),
            other => staging.push(other as char),
        }
    }
    lines
}

/// Stage 2: keep lines of at least `min_len` characters ending in one of
/// `extensions`
pub fn with_source_extension(lines: Vec<String>, config: &SourceListConfig) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| {
            line.len() >= config.min_len
                && config.extensions.iter().any(|ext| line.ends_with(ext.as_str()))
        })
        .collect()
}

/// Stage 3: drop repeated lines, keeping first-seen order
pub fn dedup(lines: Vec<String>, strategy: DedupStrategy) -> Vec<String> {
    match strategy {
        DedupStrategy::Pairwise => {
            let mut kept: Vec<String> = Vec::new();
            for line in lines {
                if !kept.contains(&line) {
                    kept.push(line);
                }
            }
            kept
        }
        DedupStrategy::SeenSet => {
            let mut seen = HashSet::new();
            lines
                .into_iter()
                .filter(|line| seen.insert(line.clone()))
                .collect()
        }
    }
}

/// Stage 4: keep lines containing `:\`
pub fn with_drive_marker(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| memmem::find(line.as_bytes(), DRIVE_MARKER).is_some())
        .collect()
}

/// Run the whole pipeline over raw `.debug_line` bytes
pub fn source_files_from(data: &[u8], config: &SourceListConfig) -> Vec<String> {
    let lines = candidate_lines(data);
    let candidates = lines.len();
    let lines = with_source_extension(lines, config);
    let sources = lines.len();
    let lines = dedup(lines, config.dedup);
    let unique = lines.len();
    let lines = if config.require_drive_marker {
        with_drive_marker(lines)
    } else {
        lines
    };
    debug!(
        candidates,
        sources,
        unique,
        listed = lines.len(),
        "Source file extraction"
    );
    lines
}

/// List the source files named in the image's `.debug_line` section
pub fn extract_source_files(
    image: &ElfImage<'_>,
    config: &SourceListConfig,
) -> Result<Vec<String>> {
    let sections = image.sections()?;
    let section = sections
        .by_name(DEBUG_LINE)?
        .ok_or_else(|| ElfParserError::MissingSection(DEBUG_LINE.to_string()))?;
    Ok(source_files_from(section.data, config))
}
