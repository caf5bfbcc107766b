//! elfparser: inspect 32-bit ELF object files.
//!
//! Decodes the file header, section table and symbol table of an ELF32
//! image held in memory, prints them as tables, searches symbols, lists the
//! source files named in `.debug_line` and exports the loadable sections as
//! C byte arrays or Motorola S-records.
//!
//! ```no_run
//! use elfparser::config::ParserConfig;
//! use elfparser::runner::{run, Request};
//!
//! let request = Request {
//!     input: "firmware.elf".into(),
//!     sections: true,
//!     ..Request::default()
//! };
//! let report = run(&request, &ParserConfig::default(), &mut std::io::stdout()).unwrap();
//! assert!(report.valid);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod io;
pub mod logging;
pub mod report;
pub mod runner;

pub use error::{ElfParserError, Result};
pub use formats::elf::ElfImage;
