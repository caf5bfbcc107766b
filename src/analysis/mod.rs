//! Lookups built on a decoded image: symbol search and the source file
//! list scraped from `.debug_line`.

pub mod search;
pub mod srcfiles;

pub use search::find_symbol;
pub use srcfiles::extract_source_files;
