//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Innkeep: hotel, customer, and reservation management over flat JSON stores
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the JSON store files (created on first write)
    #[arg(short, long, default_value = "data", value_name = "DIR")]
    pub data_dir: PathBuf,
}
