//! Command line definition

use clap::Parser;
use elfparser::runner::Request;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elfparser")]
#[command(version, about = "Inspect 32-bit ELF files and export their loadable sections")]
pub struct Cli {
    /// Input ELF file
    pub input: PathBuf,

    /// Display the ELF file header
    #[arg(long)]
    pub header: bool,

    /// Display the sections table
    #[arg(long)]
    pub sec: bool,

    /// Display the symbols table
    #[arg(long)]
    pub sym: bool,

    /// List the source files named in .debug_line
    #[arg(long)]
    pub srclist: bool,

    /// Display the information of one symbol
    #[arg(long, value_name = "SYMBOL")]
    pub search: Option<String>,

    /// Export loadable sections in S19 format
    #[arg(long, value_name = "FILE")]
    pub s19: Option<PathBuf>,

    /// Export loadable sections as C arrays
    #[arg(long, value_name = "FILE")]
    pub c: Option<PathBuf>,

    /// Print one JSON document instead of text tables
    #[arg(long)]
    pub json: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Section index of the string table holding symbol names
    #[arg(long, value_name = "INDEX")]
    pub strtab: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn request(&self) -> Request {
        Request {
            input: self.input.clone(),
            header: self.header,
            sections: self.sec,
            symbols: self.sym,
            c_array: self.c.clone(),
            s19: self.s19.clone(),
            search: self.search.clone(),
            source_files: self.srclist,
            json: self.json,
        }
    }
}
