//! Drives the requested operations against one decoded image.
//!
//! The header is validated first; an invalid image stops everything. The
//! remaining operations always run in the same order and a failure in one
//! of them is reported before moving on to the next.

use crate::analysis::{extract_source_files, find_symbol};
use crate::config::ParserConfig;
use crate::error::{ElfParserError, Result};
use crate::export::{export_c_array, export_s19, S19Summary};
use crate::formats::elf::sections::SectionRow;
use crate::formats::elf::symbols::SymbolRow;
use crate::formats::elf::ElfImage;
use crate::io::{IOLimits, InputFile};
use crate::report::{self, HeaderView};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What the caller asked for
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub input: PathBuf,
    pub header: bool,
    pub sections: bool,
    pub symbols: bool,
    /// C-array export target
    pub c_array: Option<PathBuf>,
    /// S19 export target
    pub s19: Option<PathBuf>,
    /// Symbol to look up
    pub search: Option<String>,
    pub source_files: bool,
    /// Emit one JSON document instead of text tables
    pub json: bool,
}

impl Request {
    /// Selected operations, in execution order
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::new();
        if self.sections {
            ops.push(Operation::Sections);
        }
        if self.symbols {
            ops.push(Operation::Symbols);
        }
        if self.c_array.is_some() {
            ops.push(Operation::CArray);
        }
        if self.s19.is_some() {
            ops.push(Operation::S19);
        }
        if self.search.is_some() {
            ops.push(Operation::Search);
        }
        if self.source_files {
            ops.push(Operation::SourceFiles);
        }
        ops
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Sections,
    Symbols,
    CArray,
    S19,
    Search,
    SourceFiles,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Sections => "sections",
            Operation::Symbols => "symbols",
            Operation::CArray => "c_array",
            Operation::S19 => "s19",
            Operation::Search => "search",
            Operation::SourceFiles => "source_files",
        };
        f.write_str(name)
    }
}

/// Data produced by a successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Sections(Vec<SectionRow>),
    Symbols(Vec<SymbolRow>),
    Written { path: PathBuf },
    S19(S19Summary),
    Search { name: String, found: Option<SymbolRow> },
    SourceFiles(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OperationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// False when the input failed validation; no operation ran
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderView>,
    pub operations: Vec<OperationResult>,
}

impl RunReport {
    fn invalid() -> Self {
        Self {
            valid: false,
            header: None,
            operations: Vec::new(),
        }
    }

    pub fn failures(&self) -> usize {
        self.operations.iter().filter(|r| !r.succeeded()).count()
    }
}

/// Open `request.input` and run every requested operation on it.
///
/// Errors are returned only when the input cannot be read or stdout cannot
/// be written; everything else ends up in the report.
pub fn run<W: Write>(request: &Request, config: &ParserConfig, out: &mut W) -> Result<RunReport> {
    let span = crate::span_trace!("run", input = %request.input.display());
    let _guard = span.enter();

    let limits = IOLimits {
        max_file_size: config.io.max_file_size,
    };
    let input = InputFile::open(&request.input, &limits)?;
    run_on_bytes(input.bytes(), request, config, out)
}

/// Same as [`run`] for an image already in memory
pub fn run_on_bytes<W: Write>(
    data: &[u8],
    request: &Request,
    config: &ParserConfig,
    out: &mut W,
) -> Result<RunReport> {
    let image = match ElfImage::parse_with(data, config.image.clone()) {
        Ok(image) => image,
        Err(err) => {
            warn!(error = %err, "Rejected input");
            let invalid = RunReport::invalid();
            if request.json {
                write_json(out, &invalid)?;
            } else {
                report::write_invalid_input(out)?;
            }
            return Ok(invalid);
        }
    };

    let header = HeaderView::from(image.header());
    if request.header && !request.json {
        report::write_header(out, &header)?;
    }

    let mut results = Vec::new();
    for operation in request.operations() {
        let span = crate::span_trace!("operation", name = %operation);
        let _guard = span.enter();

        let result = match execute(operation, &image, request, config) {
            Ok(output) => {
                debug!("Operation complete");
                if !request.json {
                    render(out, &output)?;
                }
                OperationResult {
                    operation,
                    output: Some(output),
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "Operation failed");
                if !request.json {
                    report::write_failure(out, &err)?;
                }
                OperationResult {
                    operation,
                    output: None,
                    error: Some(err.to_string()),
                }
            }
        };
        results.push(result);
    }

    let run_report = RunReport {
        valid: true,
        header: request.header.then_some(header),
        operations: results,
    };
    info!(
        operations = run_report.operations.len(),
        failures = run_report.failures(),
        "Run complete"
    );

    if request.json {
        write_json(out, &run_report)?;
    }
    out.flush()?;
    Ok(run_report)
}

fn execute(
    operation: Operation,
    image: &ElfImage<'_>,
    request: &Request,
    config: &ParserConfig,
) -> Result<OperationOutput> {
    match operation {
        Operation::Sections => Ok(OperationOutput::Sections(image.list_sections()?)),
        Operation::Symbols => Ok(OperationOutput::Symbols(image.list_symbols()?)),
        Operation::CArray => {
            let path = request.c_array.as_deref();
            export_c_array(image, path, &config.c_array)?;
            Ok(OperationOutput::Written {
                path: path.map(Path::to_path_buf).unwrap_or_default(),
            })
        }
        Operation::S19 => Ok(OperationOutput::S19(export_s19(
            image,
            request.s19.as_deref(),
            &config.s19,
        )?)),
        Operation::Search => {
            let name = request.search.as_deref().ok_or_else(|| {
                ElfParserError::BadArguments("no symbol name given".to_string())
            })?;
            Ok(OperationOutput::Search {
                name: name.to_string(),
                found: find_symbol(image, name)?,
            })
        }
        Operation::SourceFiles => Ok(OperationOutput::SourceFiles(extract_source_files(
            image,
            &config.source_list,
        )?)),
    }
}

fn render<W: Write>(out: &mut W, output: &OperationOutput) -> std::io::Result<()> {
    match output {
        OperationOutput::Sections(rows) => report::write_section_table(out, rows),
        OperationOutput::Symbols(rows) => report::write_symbol_table(out, rows),
        OperationOutput::Search { name, found } => {
            report::write_symbol_info(out, name, found.as_ref())
        }
        OperationOutput::SourceFiles(files) => report::write_source_files(out, files),
        // Exports only touch their output file
        OperationOutput::Written { .. } | OperationOutput::S19(_) => Ok(()),
    }
}

fn write_json<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
