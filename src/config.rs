//! Configuration for elfparser.
//!
//! Every section has defaults matching the classic tool output, so an empty
//! JSON object (or no config file at all) reproduces it exactly. Config files
//! may set any subset of fields.

use crate::error::Result;
use crate::formats::elf::ImageOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Input file limits.
    pub io: IOConfig,
    /// Image decoding options.
    pub image: ImageOptions,
    /// C-array exporter layout.
    pub c_array: CArrayConfig,
    /// S-record exporter layout.
    pub s19: S19Config,
    /// Source-file extractor pipeline.
    pub source_list: SourceListConfig,
}

impl ParserConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// I/O configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOConfig {
    /// Largest input file accepted, in bytes.
    pub max_file_size: u64,
}

impl Default for IOConfig {
    fn default() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024,
        }
    }
}

/// C-array exporter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CArrayConfig {
    /// Byte values per output line.
    pub bytes_per_line: usize,
    /// End every full line with a comma. Off keeps the historical layout,
    /// which only separates values within a line.
    pub comma_at_line_end: bool,
}

impl Default for CArrayConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: 16,
            comma_at_line_end: false,
        }
    }
}

/// S0 payload of the classic tool, terminating NUL included.
pub const DEFAULT_HEADER_TAG: &str = "ELF_PARSER_BY_CHALANDI_AMINE_2019\0";

/// S-record exporter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct S19Config {
    /// Payload of the S0 header record.
    pub header_tag: String,
    /// Data bytes per S3 record.
    pub bytes_per_record: usize,
}

impl Default for S19Config {
    fn default() -> Self {
        Self {
            header_tag: DEFAULT_HEADER_TAG.to_string(),
            bytes_per_record: 28,
        }
    }
}

/// How the source-file extractor drops repeated paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    /// Compare each candidate against every kept path, O(n²).
    #[default]
    Pairwise,
    /// Hash-set membership, for large `.debug_line` sections.
    SeenSet,
}

/// Source-file extractor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceListConfig {
    /// Accepted file name suffixes, matched case-sensitively.
    pub extensions: Vec<String>,
    /// Shortest candidate line considered, in characters.
    pub min_len: usize,
    pub dedup: DedupStrategy,
    /// Keep only paths carrying a drive marker (`:\`).
    pub require_drive_marker: bool,
}

impl Default for SourceListConfig {
    fn default() -> Self {
        Self {
            extensions: [".c", ".cpp", ".h", ".s", ".asm", ".v850"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_len: 5,
            dedup: DedupStrategy::Pairwise,
            require_drive_marker: true,
        }
    }
}
