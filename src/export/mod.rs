//! Exporters for the loadable sections of an image.
//!
//! Both exporters resolve everything they will write first, then stream
//! into a buffered writer. The file-level entry points only create the
//! output once that succeeded, then write, flush and close before returning.

pub mod c_array;
pub mod srec;

use crate::error::{ElfParserError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

pub use c_array::{export_c_array, write_c_array};
pub use srec::{export_s19, write_s19, S19Summary};

/// Create (or truncate) an export target.
///
/// A missing path is a caller error, an unopenable one an I/O failure.
pub(crate) fn create_output(path: Option<&Path>) -> Result<BufWriter<File>> {
    let path =
        path.ok_or_else(|| ElfParserError::BadArguments("no output path given".to_string()))?;
    debug!(path = %path.display(), "Creating output file");
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
